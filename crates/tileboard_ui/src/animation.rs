//! Eased value animation.
//!
//! Hosts use these to interpolate element transitions between frames.
//! The board itself never waits on an [`Animation`]: completion is always
//! signalled by the frame scheduler.

use std::time::Duration;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in (accelerating). Tiles fall and vanish with this.
    #[default]
    EaseIn,
    /// Instant (no animation).
    Instant,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::Instant => 1.0,
        }
    }
}

/// A single animated value.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Current value.
    current: f32,
    /// Target value.
    target: f32,
    /// Start value (for interpolation).
    start: f32,
    /// Animation progress (0-1).
    progress: f32,
    /// Animation duration (seconds).
    duration: f32,
    /// Easing function.
    easing: Easing,
}

impl Animation {
    /// Creates a settled animation at the given value.
    #[must_use]
    pub fn new(value: f32, easing: Easing) -> Self {
        Self {
            current: value,
            target: value,
            start: value,
            progress: 1.0,
            duration: 0.0,
            easing,
        }
    }

    /// Creates an animation with custom duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.set_duration(duration);
        self
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Returns true if the animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Changes the duration used by the next [`set_target`](Self::set_target).
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration.as_secs_f32();
    }

    /// Changes the easing used from now on.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Sets a new target value, starting animation from current value.
    ///
    /// Re-targeting the value already being approached is a no-op, so a
    /// host can repaint the same position every frame without restarting
    /// the transition.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() <= 0.0001 {
            return;
        }
        if self.duration <= 0.0 || self.easing == Easing::Instant {
            self.set_immediate(target);
            return;
        }
        self.start = self.current;
        self.target = target;
        self.progress = 0.0;
    }

    /// Immediately sets the value without animation.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.start = value;
        self.progress = 1.0;
    }

    /// Updates the animation.
    ///
    /// `dt` is delta time in seconds.
    pub fn update(&mut self, dt: f32) {
        if self.progress >= 1.0 {
            return;
        }

        if self.duration > 0.0 {
            self.progress += dt / self.duration;
        } else {
            self.progress = 1.0;
        }
        self.progress = self.progress.min(1.0);

        let eased = self.easing.apply(self.progress);
        self.current = self.start + (self.target - self.start) * eased;

        // Snap to target when complete
        if self.progress >= 1.0 {
            self.current = self.target;
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(0.0, Easing::EaseIn)
    }
}
