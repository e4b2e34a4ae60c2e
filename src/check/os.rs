//! Operating system identification for suggestion lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operating systems a suggestion can be keyed by.
///
/// `Generic` is the fallback key; it always applies when no OS-specific
/// suggestion exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    MacOs,
    Ubuntu,
    Windows,
    Generic,
}

impl Os {
    /// Detect the operating system this process runs on.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Os::MacOs
        } else if cfg!(target_os = "windows") {
            Os::Windows
        } else if cfg!(target_os = "linux") {
            std::fs::read_to_string("/etc/os-release")
                .map(|content| Self::from_os_release(&content))
                .unwrap_or(Os::Generic)
        } else {
            Os::Generic
        }
    }

    /// Classify a Linux distribution from `/etc/os-release` contents.
    pub fn from_os_release(content: &str) -> Self {
        let id = content
            .lines()
            .filter_map(|line| line.trim().strip_prefix("ID="))
            .map(|value| value.trim_matches(|c| c == '"' || c == '\''))
            .next();

        match id {
            Some("ubuntu") => Os::Ubuntu,
            _ => Os::Generic,
        }
    }

    /// Stable lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::MacOs => "macos",
            Os::Ubuntu => "ubuntu",
            Os::Windows => "windows",
            Os::Generic => "generic",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "macos" | "osx" | "darwin" => Ok(Os::MacOs),
            "ubuntu" => Ok(Os::Ubuntu),
            "windows" => Ok(Os::Windows),
            "generic" => Ok(Os::Generic),
            _ => Err(format!("unknown OS: {}", s)),
        }
    }
}
