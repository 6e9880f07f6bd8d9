//! A colored barrier scrolling towards the collision threshold.
//!
//! Position and color are stored in atomics so a thread holding a shared
//! reference can read them while the tick thread writes. Writes use
//! `Release`, reads `Acquire`; the f32 is stored as its bit pattern so a
//! reader never observes a torn value.

use super::game_state::ColorTag;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[derive(Debug)]
pub struct Barrier {
    color: AtomicBool,
    position: AtomicU32,
}

impl Barrier {
    pub fn new(color: ColorTag, position: f32) -> Self {
        Self {
            color: AtomicBool::new(color.as_bool()),
            position: AtomicU32::new(position.to_bits()),
        }
    }

    pub fn position(&self) -> f32 {
        f32::from_bits(self.position.load(Ordering::Acquire))
    }

    pub fn set_position(&self, position: f32) {
        self.position.store(position.to_bits(), Ordering::Release);
    }

    pub fn color(&self) -> ColorTag {
        ColorTag::from_bool(self.color.load(Ordering::Acquire))
    }

    pub fn set_color(&self, color: ColorTag) {
        self.color.store(color.as_bool(), Ordering::Release);
    }

    /// Advance the barrier by `speed`.
    ///
    /// Only the tick thread moves barriers, so a load/store pair is enough;
    /// readers see either the old or the new position.
    pub fn advance(&self, speed: f32) {
        self.set_position(self.position() + speed);
    }
}

impl Clone for Barrier {
    fn clone(&self) -> Self {
        Self::new(self.color(), self.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_advance_adds_speed() {
        let barrier = Barrier::new(ColorTag::Primary, -0.5);
        barrier.advance(0.25);
        assert_eq!(barrier.position(), -0.25);
        barrier.advance(0.25);
        assert_eq!(barrier.position(), 0.0);
    }

    #[test]
    fn test_set_color_roundtrips() {
        let barrier = Barrier::new(ColorTag::Primary, 0.0);
        assert_eq!(barrier.color(), ColorTag::Primary);
        barrier.set_color(ColorTag::Secondary);
        assert_eq!(barrier.color(), ColorTag::Secondary);
    }

    #[test]
    fn test_reader_sees_monotonic_positions() {
        let barrier = Arc::new(Barrier::new(ColorTag::Primary, -100.0));
        let reader = {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut last = f32::NEG_INFINITY;
                for _ in 0..10_000 {
                    let now = barrier.position();
                    assert!(now >= last, "position went backwards: {} -> {}", last, now);
                    last = now;
                }
            })
        };
        for _ in 0..10_000 {
            barrier.advance(0.01);
        }
        reader.join().unwrap();
    }
}
