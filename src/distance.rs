//! Descriptor distances
//!
//! Batch distances and similarities between feature descriptor pairs,
//! the usual producers of the raw match scores this crate normalizes.
//! Distances shrink as descriptors agree, so they feed the normalizer
//! with `reverse` set. Histogram intersections grow instead and feed it
//! forward.

use crate::errors::ScorenormError;
use rayon::prelude::*;

fn pairwise_rows<F>(a: &[f64], b: &[f64], dim: usize, parallel: bool, row_fn: F) -> Result<Vec<f64>, ScorenormError>
where
    F: Fn(&[f64], &[f64]) -> f64 + Sync,
{
    if dim == 0 {
        return Err(ScorenormError::InvalidParameter(
            "dim".to_string(),
            "a positive descriptor length".to_string(),
            "0".to_string(),
        ));
    }
    if a.len() != b.len() || a.len() % dim != 0 {
        return Err(ScorenormError::InvalidParameter(
            "descriptors".to_string(),
            format!("two equal buffers of a multiple of {} values", dim),
            format!("{} and {} values", a.len(), b.len()),
        ));
    }
    let out = if parallel {
        a.par_chunks_exact(dim)
            .zip(b.par_chunks_exact(dim))
            .map(|(row_a, row_b)| row_fn(row_a, row_b))
            .collect()
    } else {
        a.chunks_exact(dim)
            .zip(b.chunks_exact(dim))
            .map(|(row_a, row_b)| row_fn(row_a, row_b))
            .collect()
    };
    Ok(out)
}

/// Sum of absolute differences per descriptor pair.
///
/// `a` and `b` are row major buffers of descriptors of length `dim`.
pub fn l1_distance(a: &[f64], b: &[f64], dim: usize, parallel: bool) -> Result<Vec<f64>, ScorenormError> {
    pairwise_rows(a, b, dim, parallel, |row_a, row_b| {
        row_a.iter().zip(row_b).map(|(x, y)| (x - y).abs()).sum()
    })
}

/// Sum of squared differences per descriptor pair.
pub fn l2_squared_distance(a: &[f64], b: &[f64], dim: usize, parallel: bool) -> Result<Vec<f64>, ScorenormError> {
    pairwise_rows(a, b, dim, parallel, |row_a, row_b| {
        row_a
            .iter()
            .zip(row_b)
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum()
    })
}

/// Euclidean distance per descriptor pair.
pub fn l2_distance(a: &[f64], b: &[f64], dim: usize, parallel: bool) -> Result<Vec<f64>, ScorenormError> {
    pairwise_rows(a, b, dim, parallel, |row_a, row_b| {
        row_a
            .iter()
            .zip(row_b)
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    })
}

/// Histogram intersection per descriptor pair.
///
/// The sum of elementwise minima, a similarity that grows as the
/// histograms agree.
pub fn histogram_intersection(a: &[f64], b: &[f64], dim: usize, parallel: bool) -> Result<Vec<f64>, ScorenormError> {
    pairwise_rows(a, b, dim, parallel, |row_a, row_b| {
        row_a.iter().zip(row_b).map(|(x, y)| x.min(*y)).sum()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: [f64; 4] = [1.0, 2.0, 3.0, 4.0];
    const B: [f64; 4] = [2.0, 0.0, 0.0, 8.0];

    #[test]
    fn test_l1_distance() {
        assert_eq!(l1_distance(&A, &B, 2, false).unwrap(), vec![3.0, 7.0]);
    }

    #[test]
    fn test_l2_squared_distance() {
        assert_eq!(l2_squared_distance(&A, &B, 2, false).unwrap(), vec![5.0, 25.0]);
    }

    #[test]
    fn test_l2_distance() {
        let d = l2_distance(&A, &B, 2, false).unwrap();
        assert_eq!(d[0], 5.0_f64.sqrt());
        assert_eq!(d[1], 5.0);
        // identical descriptors are at distance zero
        assert_eq!(l2_distance(&A, &A, 4, false).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_histogram_intersection() {
        assert_eq!(histogram_intersection(&A, &B, 2, false).unwrap(), vec![1.0, 4.0]);
    }

    #[test]
    fn test_shape_validation() {
        assert!(l1_distance(&A, &B[..2], 2, false).is_err());
        assert!(l1_distance(&A, &B, 3, false).is_err());
        assert!(l1_distance(&A, &B, 0, false).is_err());
    }

    #[test]
    fn test_parallel_matches_serial() {
        let a: Vec<f64> = (0..512).map(|i| (i as f64 * 0.37).sin()).collect();
        let b: Vec<f64> = (0..512).map(|i| (i as f64 * 0.11).cos()).collect();
        let serial = l2_distance(&a, &b, 8, false).unwrap();
        let parallel = l2_distance(&a, &b, 8, true).unwrap();
        assert_eq!(serial, parallel);
    }
}
