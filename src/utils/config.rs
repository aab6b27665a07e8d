use crate::utils::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the extraction engine. Every field has a default, so a config
/// file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Combined confidence below this value records a low-confidence warning.
    pub low_confidence_threshold: f64,
    /// Detections scoring below this are dropped before evidence is built.
    pub min_detection_confidence: f64,
    /// Confidence assigned to every field read from an MRZ.
    pub mrz_confidence: f64,
    pub id_card_model: String,
    pub id_card_model_path: String,
    pub passport_model: String,
    pub mrz_standard: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            low_confidence_threshold: 0.5,
            min_detection_confidence: 0.3,
            mrz_confidence: 0.95,
            id_card_model: "YOLO + EasyOCR".to_string(),
            id_card_model_path: "models/best.pt".to_string(),
            passport_model: "passporteye (MRZ)".to_string(),
            mrz_standard: "ICAO 9303".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load a JSON config file and validate it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: EngineConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("low_confidence_threshold", self.low_confidence_threshold),
            ("min_detection_confidence", self.min_detection_confidence),
            ("mrz_confidence", self.mrz_confidence),
        ];
        for (name, value) in checks {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"low_confidence_threshold": 0.6}}"#).unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.low_confidence_threshold, 0.6);
        assert_eq!(config.mrz_confidence, 0.95);
        assert_eq!(config.passport_model, "passporteye (MRZ)");
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"mrz_confidence": 1.5}}"#).unwrap();

        let err = EngineConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file(Path::new("/nonexistent/idscan.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = EngineConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
