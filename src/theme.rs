//! Theme rules for replacing literal colors with symbolic references
//!
//! A theme is an ordered list of `literal color -> token` rules. Resolution
//! walks the list in order and the first matching literal wins, so a later
//! rule for the same literal is shadowed rather than rejected.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing themes
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read theme file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse theme TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid theme color '{0}': expected 6 or 8 hex digits")]
    InvalidColor(String),
    #[error("Invalid theme token '{0}': expected an identifier")]
    InvalidToken(String),
}

/// One literal-to-symbol substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRule {
    /// Normalized literal (upper-case hex, no prefix)
    pub literal: String,
    /// Symbolic reference emitted in place of the literal
    pub token: String,
}

impl ColorRule {
    pub fn new(literal: impl AsRef<str>, token: impl Into<String>) -> Self {
        Self {
            literal: normalize_color(literal.as_ref()),
            token: token.into(),
        }
    }
}

/// Ordered theme rules
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Optional name for the theme
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub rules: Vec<ColorRule>,
}

/// TOML structure for deserializing themes
#[derive(Deserialize)]
struct TomlTheme {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: Vec<TomlRule>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct TomlRule {
    color: String,
    token: String,
}

/// IntelliJ icon palette
const INTELLIJ_PALETTE: &str = r##"
[metadata]
name = "intellij"
description = "IntelliJ platform icon colors"

[[colors]]
color = "FF6C707E"
token = "generalStroke"

[[colors]]
color = "FFEBECF0"
token = "generalFill"

[[colors]]
color = "FF4682FA"
token = "blueSolid"
"##;

/// Strip `#`/`0x` prefixes and upper-case a hex color literal
pub fn normalize_color(literal: &str) -> String {
    let trimmed = literal.trim();
    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex.to_ascii_uppercase()
}

/// True for literals that normalize to six or eight hex digits
pub fn is_hex_color(literal: &str) -> bool {
    let hex = normalize_color(literal);
    matches!(hex.len(), 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

impl Theme {
    /// Create a theme from `(literal, token)` pairs, in priority order
    pub fn from_pairs<I, L, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, T)>,
        L: AsRef<str>,
        T: Into<String>,
    {
        Self {
            name: None,
            description: None,
            rules: pairs
                .into_iter()
                .map(|(literal, token)| ColorRule::new(literal, token))
                .collect(),
        }
    }

    /// Load theme from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load theme from TOML string
    pub fn from_str(content: &str) -> Result<Self, ThemeError> {
        let parsed: TomlTheme = toml::from_str(content)?;

        let theme = Theme {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            rules: parsed
                .colors
                .into_iter()
                .map(|rule| ColorRule::new(rule.color, rule.token))
                .collect(),
        };
        theme.validate()?;

        for rule in theme.shadowed_rules() {
            tracing::debug!(
                literal = %rule.literal,
                token = %rule.token,
                "theme rule shadowed by an earlier rule for the same color"
            );
        }

        Ok(theme)
    }

    /// Built-in IntelliJ icon palette
    pub fn intellij() -> Self {
        Self::from_str(INTELLIJ_PALETTE).expect("IntelliJ palette should be valid TOML")
    }

    /// Check that every rule has a hex color literal and an identifier token
    pub fn validate(&self) -> Result<(), ThemeError> {
        for rule in &self.rules {
            if !is_hex_color(&rule.literal) {
                return Err(ThemeError::InvalidColor(rule.literal.clone()));
            }
            if !is_identifier(&rule.token) {
                return Err(ThemeError::InvalidToken(rule.token.clone()));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve a literal color to the token of the first matching rule
    ///
    /// Returns None if no rule matches; an empty theme never matches.
    pub fn resolve(&self, literal: &str) -> Option<&str> {
        if self.rules.is_empty() {
            return None;
        }
        let literal = normalize_color(literal);
        let token = self
            .rules
            .iter()
            .find(|rule| rule.literal == literal)
            .map(|rule| rule.token.as_str());
        if let Some(token) = token {
            tracing::trace!(%literal, token, "theme substitution");
        }
        token
    }

    /// Rules that can never match because an earlier rule has the same literal
    pub fn shadowed_rules(&self) -> Vec<&ColorRule> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(i, rule)| self.rules[..*i].iter().any(|r| r.literal == rule.literal))
            .map(|(_, rule)| rule)
            .collect()
    }
}
