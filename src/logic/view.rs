//! Incremental View Window
//!
//! How many loaded rows are rendered. Only ever grows; slicing past the end
//! of the dataset truncates.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewWindow {
    visible_count: usize,
    increment: usize,
}

impl ViewWindow {
    pub fn new(visible_count: usize, increment: usize) -> Self {
        Self { visible_count, increment }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Current show-more increment (the editable input)
    pub fn increment(&self) -> usize {
        self.increment
    }

    pub fn set_increment(&mut self, increment: usize) {
        self.increment = increment;
    }

    /// Grow the window. Returns the new visible count.
    pub fn show_more(&mut self, increment: usize) -> usize {
        self.visible_count = self.visible_count.saturating_add(increment);
        self.visible_count
    }

    /// Row indices to render out of `total` loaded rows
    pub fn visible_range(&self, total: usize) -> Range<usize> {
        0..self.visible_count.min(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::debounce::Debouncer;
    use std::time::Duration;

    #[test]
    fn test_show_more_grows_monotonically() {
        let mut window = ViewWindow::new(30, 100);
        let mut last = window.visible_count();

        for inc in [0, 1, 100, 5] {
            let next = window.show_more(inc);
            assert!(next >= last);
            last = next;
        }
        assert_eq!(window.visible_count(), 136);
    }

    #[test]
    fn test_show_more_saturates() {
        let mut window = ViewWindow::new(usize::MAX - 1, 10);
        assert_eq!(window.show_more(10), usize::MAX);
    }

    #[test]
    fn test_visible_range_truncates() {
        let window = ViewWindow::new(30, 100);

        assert_eq!(window.visible_range(120), 0..30);
        assert_eq!(window.visible_range(12), 0..12);
        assert_eq!(window.visible_range(0), 0..0);
    }

    #[test]
    fn test_set_increment() {
        let mut window = ViewWindow::new(30, 100);
        window.set_increment(25);

        assert_eq!(window.increment(), 25);
        assert_eq!(window.visible_count(), 30);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_show_more_applies_once() {
        let mut window = ViewWindow::new(30, 30);
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        // Five clicks within 100ms.
        for _ in 0..5 {
            debouncer.call(window.increment());
            tokio::time::advance(Duration::from_millis(20)).await;
        }

        let increment = debouncer.fired().await;
        window.show_more(increment);

        assert_eq!(window.visible_count(), 60);
        assert!(!debouncer.is_pending());
    }
}
