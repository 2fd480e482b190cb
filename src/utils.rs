use crate::errors::ScorenormError;

// Validation
pub fn validate_positive_float_parameter(value: f64, parameter: &str) -> Result<(), ScorenormError> {
    validate_float_parameter(value, 0.0, f64::INFINITY, parameter)
}

pub fn validate_float_parameter(value: f64, min: f64, max: f64, parameter: &str) -> Result<(), ScorenormError> {
    if value.is_nan() || value < min || max < value {
        let ex_msg = format!("real value within range {} and {}", min, max);
        Err(ScorenormError::InvalidParameter(
            parameter.to_string(),
            ex_msg,
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Arithmetic mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation, with one delta degree of freedom.
///
/// Callers must pass at least two values.
pub fn sample_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Evenly spaced values over a closed interval, endpoint included.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    if num == 0 {
        return Vec::new();
    }
    if num == 1 {
        return vec![start];
    }
    let step = (stop - start) / (num - 1) as f64;
    let mut out: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
    out[num - 1] = stop;
    out
}

/// Minimum and maximum of a slice in a single pass.
///
/// NaN values are skipped, a slice of only NaN values yields `None`.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| {
        if v.is_nan() {
            return acc;
        }
        match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(mean(&[5.0]), 5.0);
    }

    #[test]
    fn test_sample_std() {
        // ddof = 1: sum of squares 10 over 4 degrees of freedom
        let s = sample_std(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert!((s - 1.5811388300841898).abs() < 1e-12);
        assert_eq!(sample_std(&[2.0, 2.0, 2.0]), 0.0);
    }

    #[test]
    fn test_linspace() {
        let v = linspace(0.0, 10.0, 5);
        assert_eq!(v, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        // endpoint is pinned even when the step does not divide evenly
        let v = linspace(100.0, 314.1640786499874, 1024);
        assert_eq!(v.len(), 1024);
        assert_eq!(v[0], 100.0);
        assert_eq!(v[1023], 314.1640786499874);
        assert!((v[1] - 100.20934905048874).abs() < 1e-12);
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert!(linspace(1.0, 2.0, 0).is_empty());
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_max(&[3.0, -1.0, 7.0, 2.0]), Some((-1.0, 7.0)));
        assert_eq!(min_max(&[f64::NAN, 4.0]), Some((4.0, 4.0)));
        assert_eq!(min_max(&[]), None);
    }

    #[test]
    fn test_validate_float_parameter() {
        assert!(validate_float_parameter(0.5, 0.0, 1.0, "target_recall").is_ok());
        assert!(validate_float_parameter(1.5, 0.0, 1.0, "target_recall").is_err());
        assert!(validate_float_parameter(f64::NAN, 0.0, 1.0, "target_recall").is_err());
        assert!(validate_positive_float_parameter(8.0, "bandwidth_adjust").is_ok());
        assert!(validate_positive_float_parameter(-1.0, "bandwidth_adjust").is_err());
    }
}
