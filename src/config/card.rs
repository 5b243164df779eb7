use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::ease::{Ease, EasingClock};
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{CardError, CardResult};
use crate::ledger::slot::{Face, StampLayout};

const MAX_TEXTURE_DIM: u32 = 4096;

/// Hinge animation timing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HingeConfig {
    /// Duration of one open or close animation.
    pub duration_ms: f64,
    /// Easing curve.
    pub ease: Ease,
}

impl Default for HingeConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1200.0,
            ease: Ease::OutCubic,
        }
    }
}

impl HingeConfig {
    /// Clock driving the hinge.
    pub fn clock(&self) -> EasingClock {
        EasingClock::new(self.duration_ms, self.ease)
    }
}

/// Face texture resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextureConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
        }
    }
}

/// Solid base colours of the two faces, straight-alpha RGBA8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FacesConfig {
    /// Base colour of face A.
    pub a: [u8; 4],
    /// Base colour of face B.
    pub b: [u8; 4],
}

impl Default for FacesConfig {
    fn default() -> Self {
        Self {
            a: [250, 246, 238, 255],
            b: [250, 246, 238, 255],
        }
    }
}

impl FacesConfig {
    /// Premultiplied base colour of `face`.
    pub fn base_color(&self, face: Face) -> Rgba8Premul {
        let [r, g, b, a] = match face {
            Face::A => self.a,
            Face::B => self.b,
        };
        Rgba8Premul::from_straight_rgba(r, g, b, a)
    }
}

/// Everything tunable about a card session.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardConfig {
    /// Hinge animation timing.
    pub hinge: HingeConfig,
    /// Face texture resolution.
    pub texture: TextureConfig,
    /// Stamp grid geometry.
    pub layout: StampLayout,
    /// Face base colours.
    pub faces: FacesConfig,
    /// Key names that toggle the hinge.
    pub toggle_keys: Vec<String>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            hinge: HingeConfig::default(),
            texture: TextureConfig::default(),
            layout: StampLayout::default(),
            faces: FacesConfig::default(),
            toggle_keys: vec!["Space".to_owned()],
        }
    }
}

impl CardConfig {
    /// Parse a config from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> CardResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| CardError::serde(format!("parse card config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON string.
    pub fn from_json_str(json: &str) -> CardResult<Self> {
        Self::from_reader(json.as_bytes())
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CardError::config(format!("open card config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values the session cannot run with.
    pub fn validate(&self) -> CardResult<()> {
        let d = self.hinge.duration_ms;
        if !d.is_finite() || d <= 0.0 {
            return Err(CardError::config(format!(
                "hinge.duration_ms must be finite and > 0, got {d}"
            )));
        }
        let TextureConfig { width, height } = self.texture;
        if width == 0 || height == 0 {
            return Err(CardError::config("texture size must be non-zero"));
        }
        if width > MAX_TEXTURE_DIM || height > MAX_TEXTURE_DIM {
            return Err(CardError::config(format!(
                "texture size {width}x{height} exceeds {MAX_TEXTURE_DIM}x{MAX_TEXTURE_DIM}"
            )));
        }
        self.layout.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/card.rs"]
mod tests;
