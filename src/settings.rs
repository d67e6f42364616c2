//! Game tuning and playfield settings
//!
//! Persisted in LocalStorage on the web, read from a JSON file on native.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a settings value cannot drive a session
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("playfield must have positive finite size, got {width}x{height}")]
    InvalidField { width: f32, height: f32 },
    #[error("obstacle radius range [{min}, {max}) must be positive and non-empty")]
    InvalidRadiusRange { min: f32, max: f32 },
    #[error("initial obstacle count must be at least 1")]
    NoObstacles,
    #[error("projectile lifetime must be at least 1 tick")]
    ZeroLifetime,
    #[error("drag factor must be in (0, 1], got {0}")]
    InvalidDrag(f32),
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[error("ship radius must be positive, got {0}")]
    InvalidShipRadius(f32),
}

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,

    // === Ship ===
    pub ship_radius: f32,
    pub ship_thrust: f32,
    pub ship_rotation_speed: f32,
    /// Speed multiplier per tick when not thrusting
    pub ship_drag: f32,

    // === Obstacles ===
    pub initial_obstacles: u32,
    pub obstacle_speed: f32,
    pub obstacle_radius_min: f32,
    pub obstacle_radius_max: f32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_lifetime: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            ship_radius: SHIP_RADIUS,
            ship_thrust: SHIP_THRUST,
            ship_rotation_speed: SHIP_ROTATION_SPEED,
            ship_drag: SHIP_DRAG,

            initial_obstacles: INITIAL_OBSTACLES,
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_radius_min: OBSTACLE_RADIUS_MIN,
            obstacle_radius_max: OBSTACLE_RADIUS_MAX,

            projectile_speed: PROJECTILE_SPEED,
            projectile_lifetime: PROJECTILE_LIFETIME,
        }
    }
}

impl Settings {
    /// Default tuning on a playfield of the given size (e.g. the canvas)
    pub fn with_field(width: f32, height: f32) -> Self {
        Self {
            field_width: width,
            field_height: height,
            ..Self::default()
        }
    }

    /// Reject values the simulation has no sensible behavior for
    pub fn validate(&self) -> Result<(), SettingsError> {
        let finite = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("ship_radius", self.ship_radius),
            ("ship_thrust", self.ship_thrust),
            ("ship_rotation_speed", self.ship_rotation_speed),
            ("ship_drag", self.ship_drag),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_radius_min", self.obstacle_radius_min),
            ("obstacle_radius_max", self.obstacle_radius_max),
            ("projectile_speed", self.projectile_speed),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(SettingsError::NotFinite { name, value });
            }
        }

        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(SettingsError::InvalidField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.ship_radius <= 0.0 {
            return Err(SettingsError::InvalidShipRadius(self.ship_radius));
        }
        // Radii are drawn as whole units, so the range must hold at least one integer
        if self.obstacle_radius_min <= 0.0
            || self.obstacle_radius_max.ceil() <= self.obstacle_radius_min.ceil()
        {
            return Err(SettingsError::InvalidRadiusRange {
                min: self.obstacle_radius_min,
                max: self.obstacle_radius_max,
            });
        }
        if self.initial_obstacles == 0 {
            return Err(SettingsError::NoObstacles);
        }
        if self.projectile_lifetime == 0 {
            return Err(SettingsError::ZeroLifetime);
        }
        if self.ship_drag <= 0.0 || self.ship_drag > 1.0 {
            return Err(SettingsError::InvalidDrag(self.ship_drag));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Option<Self> {
        let settings: Self = match serde_json::from_str(json) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Ignoring unparsable settings: {}", e);
                return None;
            }
        };
        match settings.validate() {
            Ok(()) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                None
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "drift_settings";

    /// Environment variable naming a JSON settings file (native)
    #[allow(dead_code)]
    const ENV_PATH: &'static str = "DRIFT_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `DRIFT_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::ENV_PATH) {
            Ok(path) => Self::load_from(std::path::Path::new(&path)),
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write settings back to the file named by `DRIFT_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        if let Ok(path) = std::env::var(Self::ENV_PATH) {
            self.save_to(std::path::Path::new(&path));
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}", path.display());
            }
            Err(e) => log::warn!("Cannot read settings file {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save_to(&self, path: &std::path::Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved to {}", path.display()),
                Err(e) => log::warn!("Cannot write settings file {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Cannot serialize settings: {}", e),
        }
    }
}
