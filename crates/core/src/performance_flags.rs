//! Boolean annotations on a performance that can be toggled one at a time.
//!
//! The quick-update endpoint names the field at runtime; only the variants
//! of [`PerformanceFlag`] deserialize, so any other name is rejected with
//! the request body.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceFlag {
    /// The song runs straight into the next one without a break.
    Segue,
    /// First time the song was ever played live.
    Debut,
    /// Only a fragment of the song was played.
    Tease,
}

impl PerformanceFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            PerformanceFlag::Segue => "segue",
            PerformanceFlag::Debut => "debut",
            PerformanceFlag::Tease => "tease",
        }
    }
}

impl fmt::Display for PerformanceFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
