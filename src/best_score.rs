//! Best score
//!
//! The one value that outlives a session. Persisted to LocalStorage.

use serde::{Deserialize, Serialize};

/// Highest score reached, and the level it was reached on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BestScore {
    pub score: u64,
    pub level: u32,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "frog_crossing_best";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished (or running) score; returns true on a new best
    pub fn submit(&mut self, score: u64, level: u32) -> bool {
        if score == 0 || score <= self.score {
            return false;
        }
        self.score = score;
        self.level = level;
        true
    }

    pub fn is_empty(&self) -> bool {
        self.score == 0
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str::<BestScore>(&json) {
                    log::info!("Loaded best score {}", best.score);
                    return best;
                }
            }
        }

        log::info!("No best score found, starting fresh");
        Self::new()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best score saved ({})", self.score);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
