//! Viewer intents and the queue that carries them into the tick

use std::collections::VecDeque;

use macroquad::logging::debug;

use crate::camera::{PanAxis, Sign};

/// Queue capacity; far above what one frame of input produces
pub const INTENT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// One tick of held movement along an axis
    Pan { axis: PanAxis, sign: Sign },
    /// One yaw step
    Rotate(Sign),
    /// One wheel notch; positive zooms in
    Zoom(Sign),
}

/// Bounded FIFO of pending intents
#[derive(Debug, Clone)]
pub struct IntentQueue {
    items: VecDeque<Intent>,
    capacity: usize,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::with_capacity(INTENT_QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Enqueue an intent. Returns false (and drops it) when full.
    pub fn push(&mut self, intent: Intent) -> bool {
        if self.items.len() >= self.capacity {
            debug!("intent queue full, dropping {:?}", intent);
            return false;
        }
        self.items.push_back(intent);
        true
    }

    /// Take every pending intent in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = Intent> + '_ {
        self.items.drain(..)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for IntentQueue {
    fn default() -> Self {
        Self::new()
    }
}
