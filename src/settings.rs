//! Game settings and preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Easy => "Easy",
            DifficultyPreset::Normal => "Normal",
            DifficultyPreset::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyPreset::Easy),
            "normal" | "norm" => Some(DifficultyPreset::Normal),
            "hard" => Some(DifficultyPreset::Hard),
            _ => None,
        }
    }

    /// Balance for this preset, starting from the default layout
    pub fn tuning(&self) -> Tuning {
        let base = Tuning::default();
        match self {
            DifficultyPreset::Easy => Tuning {
                lives: 5,
                time_max: 80,
                speed_step_per_level: 0.1,
                max_speed_multiplier: 1.8,
                min_gap_cells: 2.0,
                predator_min_level: 5,
                ..base
            },
            DifficultyPreset::Normal => base,
            DifficultyPreset::Hard => Tuning {
                lives: 3,
                time_max: 50,
                speed_step_per_level: 0.2,
                max_speed_multiplier: 3.0,
                min_gap_cells: 1.0,
                predator_min_level: 2,
                predator_base_chance: 0.35,
                ..base
            },
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: DifficultyPreset,

    // === Controls ===
    /// Minimum swipe length in CSS pixels
    pub swipe_threshold: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Show the countdown bar
    pub show_timer: bool,

    // === Accessibility ===
    /// Draw submerged turtles and open mouths with stronger contrast
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyPreset::Normal,
            swipe_threshold: 24.0,
            show_fps: false,
            show_timer: true,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        Self {
            difficulty: preset,
            ..Self::default()
        }
    }

    /// Tuning to start a session with
    pub fn tuning(&self) -> Tuning {
        self.difficulty.tuning()
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "frog_crossing_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
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

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
