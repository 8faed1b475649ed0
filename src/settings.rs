//! Viewer settings
//!
//! Persisted separately from the artwork (which is never persisted) in
//! LocalStorage.

use serde::{Deserialize, Serialize};

/// How crowded the field of wheels should be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DensityPreset {
    Sparse,
    #[default]
    Medium,
    Dense,
}

impl DensityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DensityPreset::Sparse => "Sparse",
            DensityPreset::Medium => "Medium",
            DensityPreset::Dense => "Dense",
        }
    }

    /// Wheel count the layout aims for
    pub fn target_wheels(&self) -> usize {
        match self {
            DensityPreset::Sparse => 14,
            DensityPreset::Medium => 22,
            DensityPreset::Dense => 34,
        }
    }

    /// Next preset in the cycle (bound to a key in the host)
    pub fn next(&self) -> Self {
        match self {
            DensityPreset::Sparse => DensityPreset::Medium,
            DensityPreset::Medium => DensityPreset::Dense,
            DensityPreset::Dense => DensityPreset::Sparse,
        }
    }
}

/// Viewer preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Layout density; changing it regenerates the artwork
    pub density: DensityPreset,
    /// Draw the curved links between wheels
    pub show_connectors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            density: DensityPreset::Medium,
            show_connectors: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "wheelburst_settings";

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
