use crate::{DfaError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where grammar files go and where the Julius tools live
///
/// Loaded from JSON; every field is optional:
///
/// ```json
/// { "baseName": "out/command", "mkdfaPath": "/opt/julius/bin/mkdfa.pl" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DfaConfig {
    /// Path prefix shared by `.grammar`, `.voca`, `.dfa`, `.dict` and `.term`
    pub base_name: PathBuf,
    pub mkdfa_path: PathBuf,
    pub generate_path: PathBuf,
}

impl Default for DfaConfig {
    fn default() -> Self {
        DfaConfig {
            base_name: PathBuf::from("tmp"),
            mkdfa_path: PathBuf::from("tool/mkdfa"),
            generate_path: PathBuf::from("tool/generate"),
        }
    }
}

impl DfaConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DfaConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_name.as_os_str().is_empty() {
            return Err(DfaError::Config("baseName must not be empty".to_string()));
        }
        if self.mkdfa_path.as_os_str().is_empty() {
            return Err(DfaError::Config("mkdfaPath must not be empty".to_string()));
        }
        if self.generate_path.as_os_str().is_empty() {
            return Err(DfaError::Config("generatePath must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DfaConfig::from_json("{}").unwrap();
        assert_eq!(config, DfaConfig::default());
        assert_eq!(config.base_name, PathBuf::from("tmp"));
        assert_eq!(config.mkdfa_path, PathBuf::from("tool/mkdfa"));
    }

    #[test]
    fn test_partial_override() {
        let config = DfaConfig::from_json(r#"{ "baseName": "out/cmd" }"#).unwrap();
        assert_eq!(config.base_name, PathBuf::from("out/cmd"));
        assert_eq!(config.generate_path, PathBuf::from("tool/generate"));
    }

    #[test]
    fn test_rejects_empty_base_name() {
        let err = DfaConfig::from_json(r#"{ "baseName": "" }"#).unwrap_err();
        assert!(matches!(err, DfaError::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = DfaConfig::from_json(r#"{ "basename": "x" }"#).unwrap_err();
        assert!(matches!(err, DfaError::Json(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dfa.json");
        fs::write(&path, r#"{ "mkdfaPath": "/usr/local/bin/mkdfa.pl" }"#).unwrap();

        let config = DfaConfig::from_file(&path).unwrap();
        assert_eq!(config.mkdfa_path, PathBuf::from("/usr/local/bin/mkdfa.pl"));

        let missing = DfaConfig::from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, DfaError::Io(_)));
    }
}
