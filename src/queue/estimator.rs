//! Wait-time estimation.

/// Computes expected wait in minutes from queue position and worker count.
///
/// The per-trade service time is a configured average, injected rather than
/// hard-coded so operators can tune it against observed throughput.
#[derive(Debug, Clone, Copy)]
pub struct EtaEstimator {
    worker_count: usize,
    minutes_per_trade: f64,
    batch_step_minutes: f64,
}

impl EtaEstimator {
    #[must_use]
    pub fn new(worker_count: usize, minutes_per_trade: f64, batch_step_minutes: f64) -> Self {
        Self {
            worker_count: worker_count.max(1),
            minutes_per_trade,
            batch_step_minutes,
        }
    }

    #[must_use]
    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Expected wait for an entry at the given 1-based position.
    ///
    /// Anything within reach of an idle worker starts immediately; beyond
    /// that the wait grows by one average service time per queue slot.
    #[must_use]
    pub fn wait_minutes(&self, position: usize) -> f64 {
        if position <= self.worker_count {
            return 0.0;
        }
        (position - self.worker_count) as f64 * self.minutes_per_trade
    }

    /// Displayed wait for one item of a batch: later items execute
    /// back-to-back once the batch's turn arrives, so each adds a fixed
    /// step on top of the base wait.
    #[must_use]
    pub fn display_wait_minutes(&self, position: usize, batch_index: u16) -> f64 {
        self.wait_minutes(position) + f64::from(batch_index.saturating_sub(1)) * self.batch_step_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_within_worker_reach() {
        let eta = EtaEstimator::new(2, 1.5, 1.0);
        assert_eq!(eta.wait_minutes(1), 0.0);
        assert_eq!(eta.wait_minutes(2), 0.0);
    }

    #[test]
    fn strictly_increasing_beyond_workers() {
        let eta = EtaEstimator::new(2, 1.5, 1.0);
        let mut last = 0.0;
        for position in 3..20 {
            let wait = eta.wait_minutes(position);
            assert!(wait > last, "wait must grow with position");
            last = wait;
        }
    }

    #[test]
    fn batch_items_add_a_fixed_step() {
        let eta = EtaEstimator::new(1, 2.0, 1.0);
        let base = eta.display_wait_minutes(4, 1);
        assert_eq!(eta.display_wait_minutes(4, 2), base + 1.0);
        assert_eq!(eta.display_wait_minutes(4, 3), base + 2.0);
    }

    #[test]
    fn zero_workers_is_clamped() {
        let eta = EtaEstimator::new(0, 1.0, 0.0);
        assert_eq!(eta.worker_count(), 1);
        assert_eq!(eta.wait_minutes(1), 0.0);
    }
}
