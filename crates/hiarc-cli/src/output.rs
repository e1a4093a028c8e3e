//! Output formatting for the CLI.

use crate::error::Result;
use colored::*;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// What a successful command prints.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Response body, printed as indented JSON
    Json(Value),
    /// One-line human-readable confirmation
    Confirmation(String),
    /// Plain text, printed as is
    Text(String),
}

impl Rendered {
    /// Build a JSON result from any serializable value.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Build a confirmation line.
    pub fn confirm(message: impl Into<String>) -> Self {
        Self::Confirmation(message.into())
    }
}

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Text to print for a command result.
    pub fn render(&self, rendered: &Rendered) -> Result<String> {
        match rendered {
            Rendered::Json(value) => to_pretty_json(value),
            Rendered::Confirmation(message) => Ok(self.success(message)),
            Rendered::Text(text) => Ok(text.clone()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Serialize with four-space indentation.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
