use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a body in the external catalog (e.g. `"earth"`).
/// The core never validates it against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub String);

impl BodyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BodyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BodyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A close-approach event supplied by the external data feed.
/// Read-only to the core; countdown values are derived from it on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachRecord {
    /// Feed identifier of the approaching object.
    pub id: String,
    /// Display name (e.g. "99942 Apophis").
    pub name: String,
    /// Closest-approach instant as Unix milliseconds. `None` when the feed
    /// omitted or mangled it.
    #[serde(default)]
    pub epoch_millis: Option<f64>,
    #[serde(default)]
    pub miss_distance_km: Option<f64>,
    #[serde(default)]
    pub relative_velocity_kms: Option<f64>,
    #[serde(default)]
    pub hazardous: bool,
}
