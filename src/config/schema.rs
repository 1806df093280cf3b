//! Configuration data structures for chainwalk.
//!
//! Names the record fields a walk reads (link, identifier, merge property)
//! and how identifiers are compared. Designed for multi-source loading with
//! serde; see [`super::load_config`].

use serde::{Deserialize, Serialize};

use crate::error::{ChainWalkError, Result};

// ---------------------------------------------------------------------------
// ChainConfig
// ---------------------------------------------------------------------------

/// Field names and matching rules for walking JSON records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Field holding the next record (direct) or its identifier (by id).
    #[serde(default = "default_link")]
    pub link: String,

    /// Field holding a record's own identifier.
    #[serde(default = "default_id")]
    pub id: String,

    /// Field whose values are merged along a chain.
    #[serde(default = "default_merge_property")]
    pub merge_property: String,

    /// How link values are compared with identifiers.
    #[serde(default)]
    pub id_match: IdMatch,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            link: default_link(),
            id: default_id(),
            merge_property: default_merge_property(),
            id_match: IdMatch::default(),
        }
    }
}

impl ChainConfig {
    /// Reject configs no walk could use.
    pub fn validate(&self) -> Result<()> {
        for (what, value) in [
            ("link", &self.link),
            ("id", &self.id),
            ("merge_property", &self.merge_property),
        ] {
            if value.trim().is_empty() {
                return Err(ChainWalkError::InvalidConfig {
                    message: format!("{what} field name is empty"),
                });
            }
        }
        if self.link == self.id {
            return Err(ChainWalkError::InvalidConfig {
                message: format!("link and id both name field {:?}", self.link),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// IdMatch
// ---------------------------------------------------------------------------

/// Identifier comparison mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdMatch {
    /// Same JSON type and value: `1` does not match `"1"`.
    #[default]
    Strict,
    /// Scalars compare after numeric coercion: `1`, `"1"` and `true` match.
    Loose,
}

impl IdMatch {
    /// Parse from a loose string (case-insensitive, surrounding space ignored).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "loose" | "coerce" | "coercive" => Some(Self::Loose),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Loose => "loose",
        }
    }
}

impl std::fmt::Display for IdMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_link() -> String {
    "parent".to_string()
}

fn default_id() -> String {
    "id".to_string()
}

fn default_merge_property() -> String {
    "properties".to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
