//! Configuration for code emission

use crate::symbols::HostNames;

/// Configuration options for generated source
#[derive(Debug, Clone)]
pub struct EmitConfig {
    /// One level of indentation
    pub indent: String,

    /// Name of the builder function parameter that theme tokens are read from
    pub color_scheme_param: String,

    /// Suffix of the private builder function (`FolderComposable`)
    pub builder_suffix: String,

    /// Host symbols for the icon data and color scheme types
    pub host: HostNames,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            color_scheme_param: "colorScheme".to_string(),
            builder_suffix: "Composable".to_string(),
            host: HostNames::default(),
        }
    }
}

impl EmitConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation unit
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set the color scheme parameter name
    pub fn with_color_scheme_param(mut self, name: impl Into<String>) -> Self {
        self.color_scheme_param = name.into();
        self
    }

    /// Set the host symbols
    pub fn with_host(mut self, host: HostNames) -> Self {
        self.host = host;
        self
    }
}
