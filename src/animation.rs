//! Entry animations for the last-typed cell.
//!
//! Two mutually exclusive animations exist: a scale-in "pop" (glyph text
//! size grows from near zero) and a slide-up with fade (baseline offset
//! decays to zero while opacity ramps in). Both use an overshoot easing
//! curve, so the glyph briefly overshoots its resting size/position.
//!
//! An [`EntryAnimation`] is a pure time-based value: the host scheduler
//! advances it with explicit [`tick`](EntryAnimation::tick) calls and reads
//! the current paint adjustments via [`sample`](EntryAnimation::sample).
//! Completion is a return signal, not a callback.

use std::time::Duration;

/// Which entry animation new keystrokes trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationMode {
    /// No animation; text changes redraw immediately.
    #[default]
    None,
    /// Scale the new glyph in from near zero.
    Pop,
    /// Slide the new glyph up onto its baseline while fading in.
    Slide,
}

/// Duration of the pop animation.
pub const POP_DURATION: Duration = Duration::from_millis(200);
/// Duration of the slide-fade animation.
pub const SLIDE_DURATION: Duration = Duration::from_millis(300);

const OVERSHOOT_TENSION: f32 = 2.0;

/// Overshoot easing: accelerates past 1.0 near the end, then settles back.
///
/// Input is clamped to `[0, 1]`; output peaks above 1.0 before returning
/// to exactly 1.0 at `t = 1`.
#[must_use]
pub fn overshoot(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * ((OVERSHOOT_TENSION + 1.0) * t + OVERSHOOT_TENSION) + 1.0
}

/// Result of advancing an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Finished,
}

/// Paint adjustments for the animating glyph at the current instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphSample {
    /// Text size to draw the glyph at.
    pub text_size: f32,
    /// Offset added to the cell's resting baseline Y.
    pub baseline_offset: f32,
    /// Glyph opacity in `[0, 1]`.
    pub alpha: f32,
}

#[derive(Clone, Copy, Debug)]
enum Kind {
    Pop,
    Slide,
}

/// One in-flight entry animation.
#[derive(Clone, Copy, Debug)]
pub struct EntryAnimation {
    kind: Kind,
    text_size: f32,
    elapsed: Duration,
    duration: Duration,
}

impl EntryAnimation {
    /// Start a pop animation toward the configured text size.
    #[must_use]
    pub const fn pop(text_size: f32) -> Self {
        Self {
            kind: Kind::Pop,
            text_size,
            elapsed: Duration::ZERO,
            duration: POP_DURATION,
        }
    }

    /// Start a slide-fade animation; the glyph enters from one text-size
    /// past its resting baseline.
    #[must_use]
    pub const fn slide(text_size: f32) -> Self {
        Self {
            kind: Kind::Slide,
            text_size,
            elapsed: Duration::ZERO,
            duration: SLIDE_DURATION,
        }
    }

    /// Advance by `elapsed` scheduler time.
    pub fn tick(&mut self, elapsed: Duration) -> AnimationStatus {
        self.elapsed = self.elapsed.saturating_add(elapsed);
        if self.is_finished() {
            AnimationStatus::Finished
        } else {
            AnimationStatus::Running
        }
    }

    /// Whether the animation has reached 100% progress.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Current paint adjustments for the animating glyph.
    #[must_use]
    pub fn sample(&self) -> GlyphSample {
        let p = self.progress();
        let eased = overshoot(p);
        match self.kind {
            Kind::Pop => GlyphSample {
                // From 1px up to the configured size, overshooting slightly.
                text_size: 1.0 + (self.text_size - 1.0) * eased,
                baseline_offset: 0.0,
                alpha: 1.0,
            },
            Kind::Slide => GlyphSample {
                text_size: self.text_size,
                // Offset decays from one text-size to zero.
                baseline_offset: self.text_size * (1.0 - eased),
                // Alpha ramps linearly; overshoot would leave [0, 1].
                alpha: p,
            },
        }
    }
}
