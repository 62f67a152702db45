//! Sliding window of recent hand positions
//!
//! Holds at most `capacity` positions, oldest first. Appending at capacity
//! evicts the oldest position. Not synchronized: one owner appends and clears,
//! readers borrow it between appends.

use crate::domain::types::Position;

/// Fixed-capacity FIFO of the most recent positions
///
/// Backed by a `Vec` so the window is always one contiguous slice.
#[derive(Debug, Clone)]
pub struct MotionBuffer {
    positions: Vec<Position>,
    capacity: usize,
}

impl MotionBuffer {
    /// Create an empty buffer; a capacity of zero is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { positions: Vec::with_capacity(capacity + 1), capacity }
    }

    /// Add `p` as the newest position, evicting the oldest when over capacity
    pub fn append(&mut self, p: Position) {
        self.positions.push(p);
        if self.positions.len() > self.capacity {
            let excess = self.positions.len() - self.capacity;
            self.positions.drain(..excess);
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Ordered view of the window, oldest first
    pub fn snapshot(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64) -> Position {
        Position::new(x, 0.0)
    }

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = MotionBuffer::new(6);
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 6);
    }

    #[test]
    fn test_zero_capacity_raised_to_one() {
        let mut buffer = MotionBuffer::new(0);
        buffer.append(p(1.0));
        buffer.append(p(2.0));
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.snapshot(), &[p(2.0)]);
    }

    #[test]
    fn test_append_keeps_order() {
        let mut buffer = MotionBuffer::new(6);
        buffer.append(p(1.0));
        buffer.append(p(2.0));
        buffer.append(p(3.0));

        assert_eq!(buffer.snapshot(), &[p(1.0), p(2.0), p(3.0)]);
    }

    #[test]
    fn test_evicts_oldest_at_capacity() {
        let mut buffer = MotionBuffer::new(3);
        for x in 1..=5 {
            buffer.append(p(x as f64));
        }

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.snapshot(), &[p(3.0), p(4.0), p(5.0)]);
    }

    #[test]
    fn test_window_reflects_last_appends() {
        // For every prefix of the sequence, the window is the last
        // min(appends, capacity) points in append order.
        let capacity = 4;
        let mut buffer = MotionBuffer::new(capacity);
        let points: Vec<Position> = (0..11).map(|i| Position::new(i as f64, -(i as f64))).collect();

        for (n, point) in points.iter().enumerate() {
            buffer.append(*point);
            let appended = n + 1;
            assert!(buffer.len() <= capacity);
            let start = appended.saturating_sub(capacity);
            assert_eq!(buffer.snapshot(), &points[start..appended]);
        }
    }

    #[test]
    fn test_clear() {
        let mut buffer = MotionBuffer::new(6);
        buffer.append(p(1.0));
        buffer.append(p(2.0));
        buffer.clear();

        assert!(buffer.is_empty());
        assert!(buffer.snapshot().is_empty());

        // Usable again after clear
        buffer.append(p(7.0));
        assert_eq!(buffer.snapshot(), &[p(7.0)]);
    }

    #[test]
    fn test_snapshot_has_no_side_effects() {
        let mut buffer = MotionBuffer::new(6);
        buffer.append(p(1.0));
        buffer.append(p(2.0));

        let first = buffer.snapshot().to_vec();
        let second = buffer.snapshot().to_vec();
        assert_eq!(first, second);
        assert_eq!(buffer.len(), 2);
    }
}
