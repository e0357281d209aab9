//! Simulation settings
//!
//! Persisted as JSON in LocalStorage on the web; native builds read an
//! optional file given on the command line.

use serde::{Deserialize, Serialize};

use crate::consts::{
    GRAVITY_SCALE, MAX_FRAME_DT, TARGET_FPS, WAVE_DAMPING, WAVE_MIN_STEP_LENGTH,
    WAVE_SPRING_CONSTANT,
};
use crate::error::{ConfigError, require_non_negative, require_positive};
use crate::renderer::colors;
use crate::sim::WaveParams;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Arc length between wave samples (smaller = finer water)
    pub fn min_step_length(&self) -> f32 {
        match self {
            QualityPreset::Low => WAVE_MIN_STEP_LENGTH * 2.0,
            QualityPreset::Medium => WAVE_MIN_STEP_LENGTH,
            QualityPreset::High => WAVE_MIN_STEP_LENGTH * 0.5,
        }
    }

    /// Goo balls spawned by the demo scene
    pub fn goo_count(&self) -> usize {
        match self {
            QualityPreset::Low => 40,
            QualityPreset::Medium => 100,
            QualityPreset::High => 200,
        }
    }
}

/// Water shell tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSettings {
    /// Gap between the shell center and the water floor
    pub radial_offset: f32,
    /// Undisturbed water depth
    pub height: f32,
    /// Wave height as a fraction of `height`
    pub wave_height_ratio: f32,
    pub spring_constant: f32,
    pub damping: f32,
    /// Overrides the preset step length when set
    pub min_step_length: Option<f32>,
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self {
            radial_offset: 20.0,
            height: 10.0,
            wave_height_ratio: 0.5,
            spring_constant: WAVE_SPRING_CONSTANT,
            damping: WAVE_DAMPING,
            min_step_length: None,
        }
    }
}

impl WaterSettings {
    pub fn wave_params(&self) -> WaveParams {
        WaveParams {
            spring_constant: self.spring_constant,
            damping: self.damping,
            wave_height: self.height * self.wave_height_ratio,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub gravity: [f32; 2],
    pub gravity_scale: f32,
    /// Simulator ticks per second
    pub tick_rate: f32,
    /// Largest delta integrated in one step (seconds)
    pub max_frame_dt: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: [0.0, -0.001],
            gravity_scale: GRAVITY_SCALE,
            tick_rate: TARGET_FPS,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub antialias: bool,
    /// Screen pixels per world unit
    pub zoom: f32,
    /// Clear color, 0xRRGGBB
    pub background: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            antialias: true,
            zoom: 6.0,
            background: colors::BACKGROUND,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub planet_radius: f32,
    /// Overrides the preset goo count when set
    pub goo_count: Option<usize>,
    /// Layout and overlay seed, random when unset
    pub seed: Option<u64>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            planet_radius: 20.0,
            goo_count: None,
            seed: None,
        }
    }
}

/// All settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Quality preset
    pub quality: QualityPreset,
    pub water: WaterSettings,
    pub physics: PhysicsSettings,
    pub render: RenderSettings,
    pub scene: SceneSettings,
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset, dropping overrides it controls
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.water.min_step_length = None;
        self.scene.goo_count = None;
    }

    /// Effective wave sample spacing
    pub fn min_step_length(&self) -> f32 {
        self.water
            .min_step_length
            .unwrap_or_else(|| self.quality.min_step_length())
    }

    /// Effective goo count
    pub fn goo_count(&self) -> usize {
        self.scene.goo_count.unwrap_or_else(|| self.quality.goo_count())
    }

    /// Check every numeric field that construction would reject later
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("water.radial_offset", self.water.radial_offset)?;
        require_positive("water.height", self.water.height)?;
        require_positive("water.wave_height_ratio", self.water.wave_height_ratio)?;
        require_positive("water.min_step_length", self.min_step_length())?;
        self.water.wave_params().validate()?;
        require_positive("physics.tick_rate", self.physics.tick_rate)?;
        require_positive("physics.max_frame_dt", self.physics.max_frame_dt)?;
        require_positive("render.zoom", self.render.zoom)?;
        require_positive("scene.planet_radius", self.scene.planet_radius)?;
        Ok(())
    }

    /// Parse and validate JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "goo_planet_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
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
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file, defaults when no path is given
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Self::from_json(&json)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // Nothing to persist natively
        log::debug!("settings key {} unused on native", Self::STORAGE_KEY);
    }
}
