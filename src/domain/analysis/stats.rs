//! Small numeric helpers shared by the analyzers.

/// Arithmetic mean; `None` for an empty slice.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance (mean squared deviation from the mean).
pub(crate) fn population_variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let squared: Vec<f64> = values.iter().map(|v| (v - m).powi(2)).collect();
    mean(&squared)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn variance_of_constant_series_is_zero() {
        assert_eq!(population_variance(&[5.0, 5.0, 5.0]), Some(0.0));
    }

    #[test]
    fn variance_matches_hand_computation() {
        // mean 2, deviations 1, 0, 1
        let v = population_variance(&[1.0, 2.0, 3.0]).unwrap();
        assert!((v - 2.0 / 3.0).abs() < 1e-12);
    }
}
