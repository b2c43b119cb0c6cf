//! Progress notifications.

/// Emitted after every joined batch and once more when a run ends.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// Batches joined so far.
    pub batches_completed: usize,
    pub batch_count: usize,
    /// `min(batches_completed * batch_size / total, 1.0)`; exactly `1.0` on
    /// the final event of a completed run.
    pub fraction: f64,
    /// Unique addresses resolved so far.
    pub resolved: usize,
    /// Set on the terminal event of a run.
    pub is_final: bool,
}

impl ProgressEvent {
    pub(crate) fn after_batch(
        batches_completed: usize,
        batch_count: usize,
        batch_size: usize,
        total: usize,
        resolved: usize,
    ) -> Self {
        Self {
            batches_completed,
            batch_count,
            fraction: fraction(batches_completed, batch_size, total),
            resolved,
            is_final: false,
        }
    }

    pub(crate) fn finished(batches_completed: usize, batch_count: usize, resolved: usize) -> Self {
        Self {
            batches_completed,
            batch_count,
            fraction: 1.0,
            resolved,
            is_final: true,
        }
    }

    pub(crate) fn stopped(
        batches_completed: usize,
        batch_count: usize,
        batch_size: usize,
        total: usize,
        resolved: usize,
    ) -> Self {
        Self {
            is_final: true,
            ..Self::after_batch(batches_completed, batch_count, batch_size, total, resolved)
        }
    }

    pub fn percent(&self) -> u32 {
        (self.fraction * 100.0).round() as u32
    }
}

fn fraction(batches_completed: usize, batch_size: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    ((batches_completed * batch_size) as f64 / total as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_is_clamped() {
        let e = ProgressEvent::after_batch(3, 3, 10, 25, 7);
        assert_eq!(e.fraction, 1.0);
        let e = ProgressEvent::after_batch(1, 3, 10, 25, 7);
        assert!((e.fraction - 0.4).abs() < 1e-9);
        assert_eq!(e.percent(), 40);
    }

    #[test]
    fn test_stopped_keeps_partial_fraction() {
        let e = ProgressEvent::stopped(1, 3, 10, 25, 4);
        assert!(e.is_final);
        assert!(e.fraction < 1.0);
        let e = ProgressEvent::finished(3, 3, 4);
        assert!(e.is_final);
        assert_eq!(e.fraction, 1.0);
    }
}
