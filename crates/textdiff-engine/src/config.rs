use std::path::Path;

use serde::{Deserialize, Serialize};
use textdiff_types::CleanupMode;

use crate::error::{CompareError, CompareResult};
use crate::sections::DEFAULT_CONTEXT_SIZE;

/// Default edit cost for [`CleanupMode::Efficiency`].
pub const DEFAULT_EDIT_COST: usize = 4;

/// Settings for one comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareOptions {
    /// Parse both inputs as JSON and compare their canonical forms.
    pub json_mode: bool,
    /// Cleanup applied to character diffs of modified lines.
    pub cleanup: CleanupMode,
    /// Break-even length below which efficiency cleanup folds an equality
    /// into the surrounding edits.
    pub edit_cost: usize,
    /// Unchanged rows kept visible around each change.
    pub context_size: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            json_mode: false,
            cleanup: CleanupMode::Semantic,
            edit_cost: DEFAULT_EDIT_COST,
            context_size: DEFAULT_CONTEXT_SIZE,
        }
    }
}

impl CompareOptions {
    /// Options for comparing JSON documents.
    pub fn json() -> Self {
        Self {
            json_mode: true,
            ..Default::default()
        }
    }

    /// Decode options from a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> CompareResult<Self> {
        toml::from_str(text).map_err(|e| CompareError::Config(e.to_string()))
    }

    /// Read options from a TOML file.
    pub fn load(path: &Path) -> CompareResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CompareError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Encode options as a TOML document.
    pub fn to_toml_string(&self) -> CompareResult<String> {
        toml::to_string(self).map_err(|e| CompareError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_options() {
        let options = CompareOptions::default();
        assert!(!options.json_mode);
        assert_eq!(options.cleanup, CleanupMode::Semantic);
        assert_eq!(options.edit_cost, 4);
        assert_eq!(options.context_size, 3);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let text = "cleanup = \"efficiency\"\nedit_cost = 1\n";
        let options = CompareOptions::from_toml_str(text).unwrap();
        assert_eq!(options.cleanup, CleanupMode::Efficiency);
        assert_eq!(options.edit_cost, 1);
        assert_eq!(options.context_size, 3);
        assert!(!options.json_mode);
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = CompareOptions::from_toml_str("colour = true\n").unwrap_err();
        assert!(matches!(err, CompareError::Config(_)));
    }

    #[test]
    fn negative_edit_cost_rejected() {
        assert!(CompareOptions::from_toml_str("edit_cost = -1\n").is_err());
    }

    #[test]
    fn toml_roundtrip() {
        let options = CompareOptions {
            json_mode: true,
            cleanup: CleanupMode::None,
            edit_cost: 7,
            context_size: 0,
        };
        let text = options.to_toml_string().unwrap();
        assert_eq!(CompareOptions::from_toml_str(&text).unwrap(), options);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "json_mode = true\ncontext_size = 5").unwrap();
        let options = CompareOptions::load(file.path()).unwrap();
        assert!(options.json_mode);
        assert_eq!(options.context_size, 5);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CompareOptions::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CompareError::Io { .. }));
    }
}
