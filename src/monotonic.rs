//! Monotonic regression
//!
//! Pool adjacent violators with plateau breaking, used to force the raw
//! posterior curve into a strictly monotone probability mapping.

/// Isotonic regression with unit weights.
///
/// Returns the non-decreasing curve closest to `values` in least squares,
/// built from averaged blocks of adjacent violators.
pub fn pool_adjacent_violators(values: &[f64]) -> Vec<f64> {
    // blocks of (sum, count, value)
    let mut blocks: Vec<(f64, f64, f64)> = Vec::with_capacity(values.len());
    for &v in values {
        let mut sum = v;
        let mut count = 1.0;
        while let Some(&(prev_sum, prev_count, prev_value)) = blocks.last() {
            if prev_value > sum / count {
                sum += prev_sum;
                count += prev_count;
                blocks.pop();
            } else {
                break;
            }
        }
        blocks.push((sum, count, sum / count));
    }
    let mut out = Vec::with_capacity(values.len());
    for &(_, count, value) in &blocks {
        for _ in 0..count as usize {
            out.push(value);
        }
    }
    out
}

/// Replace plateaus in a non-decreasing curve with linear ramps.
///
/// Interior plateaus ramp toward the next distinct value. A plateau
/// touching the right edge keeps its final value and ramps up from the
/// left neighbor instead, so pinned endpoints stay pinned.
fn spread_plateaus(out: &mut [f64]) {
    let n = out.len();
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && out[j + 1] == out[i] {
            j += 1;
        }
        if j > i {
            let span = (j + 1 - i) as f64;
            if j < n - 1 {
                let base = out[i];
                let next = out[j + 1];
                for k in i..=j {
                    out[k] = base + (next - base) * ((k - i) as f64 / span);
                }
            } else if i > 0 {
                let prev = out[i - 1];
                let top = out[j];
                for k in i..=j {
                    out[k] = prev + (top - prev) * ((k - (i - 1)) as f64 / span);
                }
            }
        }
        i = j + 1;
    }
}

/// Force a curve into a strictly monotone shape with fixed endpoints.
///
/// Values are clamped to the endpoint interval, the first and last
/// entries are pinned to `left` and `right`, violations are averaged out
/// by isotonic regression and the remaining plateaus are broken with
/// linear ramps. A decreasing target is handled by negating, fixing and
/// negating back.
pub fn monotonize(curve: &[f64], left: f64, right: f64, increasing: bool) -> Vec<f64> {
    if !increasing {
        let negated: Vec<f64> = curve.iter().map(|v| -v).collect();
        return monotonize(&negated, -left, -right, true).iter().map(|v| -v).collect();
    }
    if curve.is_empty() {
        return Vec::new();
    }
    let (lo, hi) = if left <= right { (left, right) } else { (right, left) };
    let mut arr: Vec<f64> = curve.iter().map(|v| v.clamp(lo, hi)).collect();
    let last = arr.len() - 1;
    arr[0] = left;
    arr[last] = right;
    let mut arr = pool_adjacent_violators(&arr);
    arr[0] = left;
    arr[last] = right;
    spread_plateaus(&mut arr);
    arr
}

/// Direction of a strictly monotone curve.
///
/// `Some(true)` for strictly increasing, `Some(false)` for strictly
/// decreasing, `None` when the curve is neither.
pub fn strict_direction(curve: &[f64]) -> Option<bool> {
    if curve.len() < 2 {
        return None;
    }
    if curve.windows(2).all(|w| w[0] < w[1]) {
        return Some(true);
    }
    if curve.windows(2).all(|w| w[0] > w[1]) {
        return Some(false);
    }
    None
}
