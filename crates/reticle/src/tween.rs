//! Time-based tweening of cursor properties.
//!
//! A [`Tween`] describes one `from → to` transition over a duration with an
//! easing curve. An [`Animated`] value owns at most one tween at a time:
//! starting a new one overwrites the old, `set` and `cancel` kill it.
//! Everything is sampled against an explicit `Instant`, so the engine stays
//! deterministic under test.

use crate::geometry::Point;
use std::time::{Duration, Instant};
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Easing {
    #[default]
    #[strum(serialize = "none", serialize = "linear")]
    Linear,
    #[strum(serialize = "power1.out")]
    Power1Out,
    #[strum(serialize = "power2.out")]
    Power2Out,
    #[strum(serialize = "power3.out")]
    Power3Out,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;
        match self {
            Self::Linear => t,
            Self::Power1Out => 1.0 - inv.powi(2),
            Self::Power2Out => 1.0 - inv.powi(3),
            Self::Power3Out => 1.0 - inv.powi(4),
        }
    }
}

pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Point {
    fn lerp(self, to: Self, t: f64) -> Self {
        Point::new(self.x.lerp(to.x, t), self.y.lerp(to.y, t))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub start: Instant,
    pub duration: Duration,
    pub easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn animate(from: T, to: T, duration: Duration, easing: Easing, start: Instant) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn sample(&self, now: Instant) -> T {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(t))
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animated<T> {
    value: T,
    tween: Option<Tween<T>>,
}

impl<T: Lerp> Animated<T> {
    pub fn new(value: T) -> Self {
        Self { value, tween: None }
    }

    pub fn get(&self, now: Instant) -> T {
        self.tween.map_or(self.value, |tw| tw.sample(now))
    }

    /// Where the value is heading (the current value when at rest).
    pub fn destination(&self) -> T {
        self.tween.map_or(self.value, |tw| tw.to)
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.tween = None;
    }

    pub fn animate_to(&mut self, to: T, duration: Duration, easing: Easing, now: Instant) {
        let from = self.get(now);
        self.value = to;
        self.tween = Some(Tween::animate(from, to, duration, easing, now));
    }

    /// Kill the running tween, freezing the value where it currently is.
    pub fn cancel(&mut self, now: Instant) {
        self.value = self.get(now);
        self.tween = None;
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.tween.is_some_and(|tw| !tw.is_complete(now))
    }
}
