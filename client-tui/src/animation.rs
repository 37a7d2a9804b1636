//! Slide animation for confirmed moves.
//!
//! The sequencer is a two-state machine (`Running` / `Settled`) advanced by
//! explicit `Instant`s, so tests drive it without wall-clock delays. Each
//! `play` carries a payload that is handed back exactly once: when the slide
//! reaches its final frame, or when it is abandoned.

use crate::scene::{Scene, Sprite};
use chess::{Piece, Square};
use std::time::{Duration, Instant};

/// Cubic ease-in-out over normalized time.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Running,
    Settled,
}

struct Slide<P> {
    piece: Piece,
    origin: Square,
    from: (f32, f32),
    to: (f32, f32),
    started: Instant,
    payload: P,
}

pub struct AnimationSequencer<P> {
    duration: Duration,
    square_size: f32,
    active: Option<Slide<P>>,
}

impl<P> AnimationSequencer<P> {
    pub fn new(duration: Duration, square_size: f32) -> Self {
        Self {
            duration,
            square_size,
            active: None,
        }
    }

    pub fn state(&self) -> SequencerState {
        if self.active.is_some() {
            SequencerState::Running
        } else {
            SequencerState::Settled
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Square whose static piece is hidden while the slide runs.
    #[cfg(test)]
    pub fn origin(&self) -> Option<Square> {
        self.active.as_ref().map(|slide| slide.origin)
    }

    /// Start sliding `piece` from `from` to `to`.
    ///
    /// Hides the static piece on `from` and puts a sprite at its pixel
    /// position. A slide still running is abandoned first; its sprite is
    /// removed and its payload returned.
    pub fn play(
        &mut self,
        scene: &mut Scene,
        piece: Piece,
        from: Square,
        to: Square,
        now: Instant,
        payload: P,
    ) -> Option<P> {
        let abandoned = self.abandon(scene);

        let slide = Slide {
            piece,
            origin: from,
            from: self.pixel_offset(from),
            to: self.pixel_offset(to),
            started: now,
            payload,
        };
        scene.clear_piece(from);
        scene.set_sprite(Some(Sprite {
            piece,
            x: slide.from.0,
            y: slide.from.1,
        }));
        self.active = Some(slide);

        abandoned
    }

    /// Move the sprite to its position at `now`. On the final frame the
    /// sprite is removed and the payload returned; otherwise `None`.
    pub fn advance(&mut self, scene: &mut Scene, now: Instant) -> Option<P> {
        let slide = self.active.as_ref()?;
        let progress = self.progress_of(slide, now);
        if progress < 1.0 {
            let eased = ease_in_out_cubic(progress);
            scene.set_sprite(Some(Sprite {
                piece: slide.piece,
                x: lerp(slide.from.0, slide.to.0, eased),
                y: lerp(slide.from.1, slide.to.1, eased),
            }));
            return None;
        }

        scene.set_sprite(None);
        self.active.take().map(|slide| slide.payload)
    }

    /// Stop a running slide without finishing it. Removes the sprite and
    /// returns the payload; `None` when already settled.
    pub fn abandon(&mut self, scene: &mut Scene) -> Option<P> {
        let slide = self.active.take()?;
        scene.set_sprite(None);
        Some(slide.payload)
    }

    /// Normalized time of the running slide at `now`, if any.
    #[cfg(test)]
    pub fn progress(&self, now: Instant) -> Option<f32> {
        self.active
            .as_ref()
            .map(|slide| self.progress_of(slide, now))
    }

    fn progress_of(&self, slide: &Slide<P>, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(slide.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    fn pixel_offset(&self, square: Square) -> (f32, f32) {
        (
            square.col() as f32 * self.square_size,
            square.row() as f32 * self.square_size,
        )
    }
}

fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}
