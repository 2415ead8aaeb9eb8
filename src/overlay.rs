//! Bounded recency buffer for rendered detections.
//!
//! A rendering layer keeps one `OverlayBuffer` per view. New detections go
//! in at the front, the oldest fall off the back once capacity is reached,
//! and `decay` retires at most one stale entry per call, so with one tick
//! per frame old boxes fade out gradually instead of vanishing in a batch.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::pipeline::Detection;

/// A detection plus the instant it entered the buffer.
#[derive(Clone, Debug)]
pub struct OverlayBox {
    /// The detection being displayed.
    pub detection: Detection,
    /// When the detection was pushed.
    pub shown_at: Instant,
}

/// Fixed-capacity, newest-first display buffer with time-based decay.
#[derive(Clone, Debug)]
pub struct OverlayBuffer {
    boxes: VecDeque<OverlayBox>,
    capacity: usize,
    ttl: Duration,
}

impl OverlayBuffer {
    /// Creates a buffer holding at most `capacity` boxes, each kept for at
    /// most `ttl` once it reaches the back of the queue.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            boxes: VecDeque::with_capacity(capacity),
            capacity,
            ttl,
        }
    }

    /// Inserts a detection timestamped with `Instant::now()`.
    pub fn push(&mut self, detection: Detection) {
        self.push_at(detection, Instant::now());
    }

    /// Inserts a detection with an explicit timestamp.
    ///
    /// The newest entry sits at the front; anything beyond capacity is
    /// dropped from the back.
    pub fn push_at(&mut self, detection: Detection, now: Instant) {
        self.boxes.push_front(OverlayBox {
            detection,
            shown_at: now,
        });
        self.boxes.truncate(self.capacity);
    }

    /// Drops the oldest entry if it has outlived the TTL as of `now`.
    ///
    /// At most one entry is removed per call. Returns whether one was.
    pub fn decay(&mut self, now: Instant) -> bool {
        match self.boxes.back() {
            Some(oldest) if now.duration_since(oldest.shown_at) > self.ttl => {
                self.boxes.pop_back();
                true
            }
            _ => false,
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    /// Returns the number of buffered boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns true when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Iterates from the newest to the oldest box.
    pub fn iter(&self) -> impl Iterator<Item = &OverlayBox> {
        self.boxes.iter()
    }

    /// Returns the buffer capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the decay TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for OverlayBuffer {
    /// Ten boxes, one-second decay: the usual bounds for a live camera
    /// overlay fed by this pipeline.
    fn default() -> Self {
        Self::new(10, Duration::from_secs(1))
    }
}
