use std::fmt;

use anyhow::{anyhow, Result};

/// Category of upgrade target. The string forms are the keys used in the
/// persisted ledger document, so they must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExtensionKind {
    Plugin,
    Theme,
}

impl ExtensionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plugin => "plugin",
            Self::Theme => "theme",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "plugin" => Ok(Self::Plugin),
            "theme" => Ok(Self::Theme),
            _ => Err(anyhow!("invalid extension kind: {value}")),
        }
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of an upgrade target: a kind plus an opaque stable id (a
/// plugin's file path such as `my-plugin/my-plugin.php`, or a theme slug).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtensionKey {
    kind: ExtensionKind,
    id: String,
}

impl ExtensionKey {
    pub fn new(kind: ExtensionKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn plugin(id: impl Into<String>) -> Self {
        Self::new(ExtensionKind::Plugin, id)
    }

    pub fn theme(id: impl Into<String>) -> Self {
        Self::new(ExtensionKind::Theme, id)
    }

    pub fn kind(&self) -> ExtensionKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for ExtensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.id)
    }
}
