/// Intensity statistics over a region's pixel samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl RegionStats {
    /// Compute statistics from samples, filtering out non-finite values.
    /// Returns `None` when no finite sample remains.
    pub fn compute(samples: &[f32]) -> Option<Self> {
        let vals: Vec<f64> = samples
            .iter()
            .map(|&v| v as f64)
            .filter(|v| v.is_finite())
            .collect();
        if vals.is_empty() {
            return None;
        }

        let count = vals.len();
        let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = vals.iter().sum::<f64>() / count as f64;

        let variance = vals.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
        let std_dev = variance.sqrt();

        Some(RegionStats {
            mean,
            std_dev,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_basic() {
        let stats = RegionStats::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-9);
        assert!((stats.std_dev - 2.0).abs() < 1e-9);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn test_compute_single_sample() {
        let stats = RegionStats::compute(&[42.0]).unwrap();
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.min, 42.0);
        assert_eq!(stats.max, 42.0);
    }

    #[test]
    fn test_compute_filters_non_finite() {
        let stats = RegionStats::compute(&[f32::NAN, 1.0, 3.0, f32::INFINITY]).unwrap();
        assert!((stats.mean - 2.0).abs() < 1e-9);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
    }

    #[test]
    fn test_compute_empty_is_none() {
        assert!(RegionStats::compute(&[]).is_none());
        assert!(RegionStats::compute(&[f32::NAN]).is_none());
    }
}
