use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A dot-separated numeric version such as `1.0` or `0.3.2`.
///
/// Ordering compares components left to right, padding the shorter sequence
/// with zeroes, so `1.0` and `1.0.0` are the same version. The spelling used
/// at parse time is kept for display.
#[derive(Debug, Clone)]
pub struct UpgradeVersion {
    components: Vec<u64>,
    raw: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("version string is empty")]
    Empty,
    #[error("version '{raw}' has an empty component")]
    EmptyComponent { raw: String },
    #[error("version '{raw}' has a non-numeric component '{component}'")]
    NonNumericComponent { raw: String, component: String },
}

impl UpgradeVersion {
    /// Components with trailing zeroes stripped. `1.0` and `1.0.0` both
    /// normalize to `[1]`; `0` and `0.0` normalize to `[]`.
    fn normalized(&self) -> &[u64] {
        let mut end = self.components.len();
        while end > 0 && self.components[end - 1] == 0 {
            end -= 1;
        }
        &self.components[..end]
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for UpgradeVersion {
    type Err = VersionParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let mut components = Vec::new();
        for part in trimmed.split('.') {
            if part.is_empty() {
                return Err(VersionParseError::EmptyComponent {
                    raw: trimmed.to_string(),
                });
            }
            let value: u64 =
                part.parse()
                    .map_err(|_| VersionParseError::NonNumericComponent {
                        raw: trimmed.to_string(),
                        component: part.to_string(),
                    })?;
            components.push(value);
        }

        Ok(Self {
            components,
            raw: trimmed.to_string(),
        })
    }
}

impl fmt::Display for UpgradeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for UpgradeVersion {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for UpgradeVersion {}

impl Hash for UpgradeVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl Ord for UpgradeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized().cmp(other.normalized())
    }
}

impl PartialOrd for UpgradeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for UpgradeVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for UpgradeVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VersionVisitor;

        impl Visitor<'_> for VersionVisitor {
            type Value = UpgradeVersion;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a dot-separated numeric version string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(VersionVisitor)
    }
}
