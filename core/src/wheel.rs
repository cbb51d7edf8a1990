//! What an element needs from the wheel that owns it
//!
//! The wheel container itself lives elsewhere; elements only see it through
//! [`WheelContext`]. [`WheelSettings`] is the persisted tuning block and the
//! stock implementation of that trait.

use radial_types::ConditionalState;
use serde::{Deserialize, Serialize};

use crate::animation::{fade_ratio, MsTime};
use crate::config::ConfigStore;
use crate::element::WheelElement;

const SETTINGS_KEY: &str = "wheel";

/// Source of the per-frame host condition snapshot
pub trait ConditionalStateProvider {
    fn poll(&mut self) -> ConditionalState;
}

/// A fixed snapshot, for hosts without live state and for tests
impl ConditionalStateProvider for ConditionalState {
    fn poll(&mut self) -> ConditionalState {
        *self
    }
}

/// Parent-wheel surface consumed by [`WheelElement`]
pub trait WheelContext {
    /// Hover fade-in length in milliseconds
    fn fade_in_duration_ms(&self) -> u64;

    /// Exit fade length in milliseconds
    fn fade_out_duration_ms(&self) -> u64;

    /// Overall element size multiplier
    fn scale(&self) -> f32 {
        1.0
    }

    /// Size multiplier reached at full hover
    fn hover_scale(&self) -> f32 {
        1.1
    }

    /// Alpha multiplier applied to other elements while one is fully hovered
    fn dim_unhovered(&self) -> f32 {
        1.0
    }

    /// Remaining exit fade for an element that is no longer hovered.
    ///
    /// Starts from the hover level reached at `current_exit_time` and falls to
    /// 0 over the fade-out duration. An element whose exit does not follow a
    /// hover (never hovered, or hover stamped after the exit) is at rest.
    fn exit_fade(&self, element: &WheelElement, now: MsTime) -> f32 {
        let (hover, exit) = (element.current_hover_time(), element.current_exit_time());
        if exit <= hover {
            return 0.0;
        }
        let reached = fade_ratio(hover, exit, self.fade_in_duration_ms());
        reached * (1.0 - fade_ratio(exit, now, self.fade_out_duration_ms()))
    }
}

/// Persisted wheel tuning, stored under the `[wheel]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    pub fade_in_duration_ms: u64,
    pub fade_out_duration_ms: u64,
    pub scale: f32,
    pub hover_scale: f32,
    pub dim_unhovered: f32,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            fade_in_duration_ms: 100,
            fade_out_duration_ms: 100,
            scale: 1.0,
            hover_scale: 1.1,
            dim_unhovered: 0.6,
        }
    }
}

impl WheelSettings {
    /// Load from `store`, falling back to defaults for a missing or invalid table
    pub fn load(store: &ConfigStore) -> Self {
        match store.get::<Self>(SETTINGS_KEY) {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Invalid wheel settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut ConfigStore) -> Result<(), crate::config::ConfigError> {
        store.set(SETTINGS_KEY, self)
    }
}

impl WheelContext for WheelSettings {
    fn fade_in_duration_ms(&self) -> u64 {
        self.fade_in_duration_ms
    }

    fn fade_out_duration_ms(&self) -> u64 {
        self.fade_out_duration_ms
    }

    fn scale(&self) -> f32 {
        self.scale
    }

    fn hover_scale(&self) -> f32 {
        self.hover_scale
    }

    fn dim_unhovered(&self) -> f32 {
        self.dim_unhovered
    }
}
