use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Cleanup policy applied to character-level diffs of modified lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupMode {
    /// Merge short edits and align them to word and line boundaries.
    #[default]
    Semantic,
    /// Minimize the number of edit operations under an edit cost.
    Efficiency,
    /// Raw edit script.
    None,
}

impl CleanupMode {
    pub const ALL: [CleanupMode; 3] = [
        CleanupMode::Semantic,
        CleanupMode::Efficiency,
        CleanupMode::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CleanupMode::Semantic => "semantic",
            CleanupMode::Efficiency => "efficiency",
            CleanupMode::None => "none",
        }
    }
}

impl fmt::Display for CleanupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CleanupMode {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CleanupMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TypeError::UnknownCleanupMode(s.to_string()))
    }
}

/// Which input of a comparison something refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Original,
    Modified,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Original => f.write_str("original"),
            Side::Modified => f.write_str("modified"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Semantic".parse::<CleanupMode>(), Ok(CleanupMode::Semantic));
        assert_eq!("EFFICIENCY".parse::<CleanupMode>(), Ok(CleanupMode::Efficiency));
        assert_eq!(" none ".parse::<CleanupMode>(), Ok(CleanupMode::None));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(
            "fast".parse::<CleanupMode>(),
            Err(TypeError::UnknownCleanupMode("fast".into()))
        );
    }

    #[test]
    fn default_is_semantic() {
        assert_eq!(CleanupMode::default(), CleanupMode::Semantic);
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&CleanupMode::Efficiency).unwrap();
        assert_eq!(json, "\"efficiency\"");
        let side: Side = serde_json::from_str("\"modified\"").unwrap();
        assert_eq!(side, Side::Modified);
    }
}
