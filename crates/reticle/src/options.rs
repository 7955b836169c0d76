use derive_more::{AsRef, Deref, Display};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TARGET_SELECTOR: &str = ".cursor-target";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("Invalid target selector '{0}': expected a single class marker such as '.cursor-target'")]
    InvalidSelector(String),
    #[error("Option '{field}' must be a positive number of seconds, got {value}")]
    InvalidDuration { field: &'static str, value: f64 },
}

/// Class marker identifying lockable elements, written like a CSS class
/// selector (`.name`).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, DeserializeFromStr, Display, Deref, AsRef,
)]
#[serde(transparent)]
pub struct TargetSelector(String);

impl TargetSelector {
    /// The class name without the leading dot.
    pub fn class_name(&self) -> &str {
        &self.0[1..]
    }
}

impl FromStr for TargetSelector {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let valid = s.strip_prefix('.').is_some_and(|name| {
            !name.is_empty() && !name.contains(|c: char| c.is_whitespace() || c == '.')
        });

        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(OptionsError::InvalidSelector(s.to_string()))
        }
    }
}

impl Default for TargetSelector {
    fn default() -> Self {
        Self(DEFAULT_TARGET_SELECTOR.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorOptions {
    pub target_selector: TargetSelector,
    /// Seconds per idle revolution.
    pub spin_duration: f64,
    pub hide_default_cursor: bool,
    /// Seconds for the smooth engagement ramp.
    pub hover_duration: f64,
    /// Reserved; the engine behaves as if it were always on.
    pub parallax_on: bool,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self {
            target_selector: TargetSelector::default(),
            spin_duration: 2.0,
            hide_default_cursor: true,
            hover_duration: 0.2,
            parallax_on: true,
        }
    }
}

impl CursorOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        check_seconds("spin_duration", self.spin_duration)?;
        check_seconds("hover_duration", self.hover_duration)?;
        Ok(())
    }

    pub fn spin_period(&self) -> Duration {
        Duration::from_secs_f64(self.spin_duration)
    }

    pub fn hover_ramp(&self) -> Duration {
        Duration::from_secs_f64(self.hover_duration)
    }
}

fn check_seconds(field: &'static str, value: f64) -> Result<(), OptionsError> {
    // rejects NaN, negatives and anything too large for a Duration
    match Duration::try_from_secs_f64(value) {
        Ok(d) if !d.is_zero() => Ok(()),
        _ => Err(OptionsError::InvalidDuration { field, value }),
    }
}
