//! Bounded per-frame input event queue.

use arrayvec::ArrayVec;

use crate::types::{InputEvent, INPUT_EVENT_CAPACITY};

/// Fixed-capacity buffer the host fills once per frame.
///
/// Pushes past [`INPUT_EVENT_CAPACITY`] are dropped and counted; there is no
/// drop-oldest behaviour.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: ArrayVec<InputEvent, INPUT_EVENT_CAPACITY>,
    dropped: usize,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event. Returns `false` if the queue is full and the event was dropped.
    pub fn push(&mut self, event: InputEvent) -> bool {
        match self.events.try_push(event) {
            Ok(()) => true,
            Err(_) => {
                self.dropped += 1;
                false
            }
        }
    }

    pub fn is_full(&self) -> bool {
        self.events.is_full()
    }

    /// Free slots left this frame.
    pub fn remaining_capacity(&self) -> usize {
        self.events.remaining_capacity()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events dropped since the last [`clear`](Self::clear).
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn as_slice(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_is_dropped_and_counted() {
        let mut q = InputQueue::new();
        for i in 0..40 {
            let accepted = q.push(InputEvent::MouseMoved { x: i, y: 0 });
            assert_eq!(accepted, i < 32);
        }
        assert!(q.is_full());
        assert_eq!(q.remaining_capacity(), 0);
        assert_eq!(q.len(), 32);
        assert_eq!(q.dropped(), 8);
        assert_eq!(
            q.as_slice().last(),
            Some(&InputEvent::MouseMoved { x: 31, y: 0 })
        );

        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.remaining_capacity(), 32);
        assert_eq!(q.dropped(), 0);
    }
}
