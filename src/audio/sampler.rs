//! Per-callback loudness measurement.
//!
//! One capture buffer becomes one scalar: the mean absolute amplitude. No
//! smoothing, clipping or windowing is applied.

use std::sync::Arc;

use super::history::AmplitudeHistory;
use crate::error::DegenerateBufferError;

/// Mean absolute value of a mono batch
pub fn measure_loudness(batch: &[f32]) -> Result<f32, DegenerateBufferError> {
    if batch.is_empty() {
        return Err(DegenerateBufferError);
    }
    let sum: f32 = batch.iter().map(|s| s.abs()).sum();
    Ok(sum / batch.len() as f32)
}

/// Measures capture buffers and hands each result to the history
pub struct AmplitudeSampler {
    history: Arc<AmplitudeHistory>,
}

impl AmplitudeSampler {
    pub fn new(history: Arc<AmplitudeHistory>) -> Self {
        Self { history }
    }

    /// Measure one callback's samples and record the result.
    ///
    /// A degenerate buffer leaves the history untouched.
    pub fn process(&self, data: &[f32]) -> Result<f32, DegenerateBufferError> {
        let loudness = measure_loudness(data)?;
        self.history.write(loudness);
        Ok(loudness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_absolute_value() {
        let loudness = measure_loudness(&[0.5, -0.5, 0.25, -0.75]).unwrap();
        assert!((loudness - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_all_zero_batch_is_silent() {
        assert_eq!(measure_loudness(&[0.0; 512]).unwrap(), 0.0);
    }

    #[test]
    fn test_sign_invariance() {
        let batch = [0.1, -0.3, 0.7, -0.2, 0.05, 0.9];
        let flipped: Vec<f32> = batch
            .iter()
            .enumerate()
            .map(|(i, s)| if i % 2 == 0 { -s } else { *s })
            .collect();
        let negated: Vec<f32> = batch.iter().map(|s| -s).collect();

        let base = measure_loudness(&batch).unwrap();
        assert_eq!(measure_loudness(&flipped).unwrap(), base);
        assert_eq!(measure_loudness(&negated).unwrap(), base);
    }

    #[test]
    fn test_monotonic_in_mean_absolute_value() {
        let quiet = [0.1, -0.1, 0.1, -0.1];
        let louder = [0.2, -0.1, 0.3, -0.1];
        let loudest = [0.9, -0.8, 0.7, -1.0];

        let a = measure_loudness(&quiet).unwrap();
        let b = measure_loudness(&louder).unwrap();
        let c = measure_loudness(&loudest).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_empty_batch_rejected() {
        assert_eq!(measure_loudness(&[]), Err(DegenerateBufferError));
    }

    #[test]
    fn test_opposite_signs_do_not_cancel() {
        // Opposite-signed neighbours must not cancel out
        let same = measure_loudness(&[1.0, 1.0]).unwrap();
        let mixed = measure_loudness(&[1.0, -1.0]).unwrap();
        assert_eq!(same, 1.0);
        assert_eq!(mixed, same);

        let history = Arc::new(AmplitudeHistory::new(2));
        let sampler = AmplitudeSampler::new(Arc::clone(&history));
        sampler.process(&[0.5, -0.25, 0.25, -0.5]).unwrap();
        sampler.process(&[-0.5, 0.25, -0.25, 0.5]).unwrap();
        let window = history.read_window();
        assert_eq!(window[0], window[1]);
        assert!((window[1] - 0.375).abs() < 1e-6);
    }

    #[test]
    fn test_sampler_writes_one_slot_per_buffer() {
        let history = Arc::new(AmplitudeHistory::new(3));
        let sampler = AmplitudeSampler::new(Arc::clone(&history));

        sampler.process(&[0.5, -0.5]).unwrap();
        sampler.process(&[0.25, -0.25]).unwrap();
        assert_eq!(history.read_window(), vec![0.0, 0.5, 0.25]);
    }

    #[test]
    fn test_sampler_skips_degenerate_buffer() {
        let history = Arc::new(AmplitudeHistory::new(3));
        let sampler = AmplitudeSampler::new(Arc::clone(&history));

        sampler.process(&[1.0]).unwrap();
        assert!(sampler.process(&[]).is_err());
        assert_eq!(history.read_window(), vec![0.0, 0.0, 1.0]);
    }
}
