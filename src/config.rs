//! Game settings with defaults matching the shipped prototype.
//! Overrides are stored as JSON (see `components::app`).

use serde::{Deserialize, Serialize};

use crate::error::{Result, RtsError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub columns: u32,
    pub rows: u32,
    /// Tile edge in world pixels.
    pub tile_size: u32,
    /// Fixed map seed; a fresh one is drawn per session when absent.
    pub seed: Option<u64>,
    /// Keyboard/button zoom multiplier (zoom out uses the reciprocal).
    pub zoom_step: f64,
    /// Max scale as a multiple of the fit-to-screen scale.
    pub max_zoom_ratio: f64,
    pub wheel_sensitivity: f64,
    /// Screen pixels per arrow-key or button pan.
    pub pan_step: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 32,
            rows: 24,
            tile_size: 32,
            seed: None,
            zoom_step: 1.1,
            max_zoom_ratio: 3.0,
            wheel_sensitivity: 0.001,
            pan_step: 64.0,
        }
    }
}

impl GameConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: GameConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(RtsError::InvalidDimensions {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.tile_size == 0 {
            return Err(RtsError::InvalidTileSize);
        }
        if !(self.zoom_step > 1.0 && self.zoom_step.is_finite()) {
            return Err(RtsError::InvalidZoomStep(self.zoom_step));
        }
        if !(self.max_zoom_ratio >= 1.0 && self.max_zoom_ratio.is_finite()) {
            return Err(RtsError::InvalidZoomRatio(self.max_zoom_ratio));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!((cfg.columns, cfg.rows, cfg.tile_size), (32, 24, 32));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{"columns": 64, "seed": 12}"#).unwrap();
        assert_eq!(cfg.columns, 64);
        assert_eq!(cfg.rows, 24);
        assert_eq!(cfg.seed, Some(12));
        assert_eq!(cfg.zoom_step, 1.1);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            GameConfig::from_json(r#"{"rows": 0}"#),
            Err(RtsError::InvalidDimensions { rows: 0, .. })
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"tile_size": 0}"#),
            Err(RtsError::InvalidTileSize)
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"zoom_step": 0.9}"#),
            Err(RtsError::InvalidZoomStep(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"max_zoom_ratio": 0.5}"#),
            Err(RtsError::InvalidZoomRatio(_))
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(RtsError::ConfigParse(_))
        ));
    }
}
