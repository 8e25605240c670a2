use std::time::Duration;

pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(75);

/// Monotonic counter behind the staggered appearance of menu nodes.
///
/// Each tick reveals one more node until `max` is reached, after which the
/// counter is finished for good. Timing is left to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealCounter {
    count: usize,
    max: usize,
}

impl RevealCounter {
    pub fn new(max: usize) -> Self {
        Self { count: 0, max }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_running(&self) -> bool {
        self.count < self.max
    }

    /// Advances by one and returns the position revealed by this tick.
    pub fn tick(&mut self) -> Option<usize> {
        if !self.is_running() {
            return None;
        }
        self.count += 1;
        Some(self.count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_to_max_then_stops() {
        let actions = 4;
        let mut counter = RevealCounter::new(actions + 1);
        let mut revealed = Vec::new();

        let mut ticks = 0;
        while counter.is_running() {
            revealed.extend(counter.tick());
            ticks += 1;
        }

        assert_eq!(ticks, actions + 1);
        assert_eq!(counter.count(), actions + 1);
        assert_eq!(revealed, vec![0, 1, 2, 3, 4]);
        assert_eq!(counter.tick(), None);
        assert_eq!(counter.count(), actions + 1);
        assert!(!counter.is_running());
    }

    #[test]
    fn test_reveals_in_position_order() {
        let mut counter = RevealCounter::new(3);
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.tick(), Some(0));
        assert_eq!(counter.tick(), Some(1));
        assert!(counter.is_running());
        assert_eq!(counter.tick(), Some(2));
        assert_eq!(counter.count(), 3);
    }

    #[test]
    fn test_zero_max_never_runs() {
        let mut counter = RevealCounter::new(0);
        assert!(!counter.is_running());
        assert_eq!(counter.tick(), None);
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(DEFAULT_REVEAL_DELAY.as_millis(), 75);
    }
}
