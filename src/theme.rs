//! Theme preference.
//!
//! Stored as a bare string alongside the project data. Resolving `System`
//! to an effective light/dark appearance is the front end's concern.

use std::fmt;
use std::str::FromStr;

use crate::error::{EngiproError, Result};

/// User-selected color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    /// Stored string form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = EngiproError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(EngiproError::validation(
                "theme",
                format!("unknown theme '{s}' (expected light, dark, or system)"),
            )),
        }
    }
}
