//! Themed Icons - Compose source generation for vector icon sets
//!
//! This library compiles parsed vector icons into Kotlin/Compose declarations,
//! replacing literal colors with theme references and aggregating every group
//! into a collision-safe "all icons" accessor.
//!
//! # Example
//!
//! ```rust
//! use themed_icons::{generate, GenerateConfig, IconFile, IconGroup, Theme};
//!
//! let group = IconGroup::new("org.example.icons", "Icons").with_icon(IconFile::new(
//!     "Dot",
//!     r#"
//! [[nodes]]
//! type = "path"
//! d = "M0 0h1v1z"
//! fill = { type = "solid", color = "FF0000" }
//! "#,
//! ));
//!
//! let config = GenerateConfig::new().with_theme(Theme::from_pairs([("FF0000", "primary")]));
//! let output = generate(&group, |_| true, &config).unwrap();
//! assert!(output.files[0].contents.contains("SolidColor(colorScheme.primary)"));
//! ```

pub mod accessor;
pub mod batch;
pub mod declaration;
pub mod emit;
pub mod error;
pub mod group;
pub mod symbols;
pub mod theme;
pub mod vector;

pub use accessor::{AccessorBuilder, AccessorDeclaration};
pub use batch::{BatchConfig, BatchOutput, BatchWriter, FailurePolicy, GeneratedIcon};
pub use declaration::{build_declaration, declare_icon, IconDeclaration, NameTable};
pub use emit::{EmitConfig, EmitContext, SourceFile};
pub use error::{EmitError, IconError, IconErrorKind, NameCollision, PathDataError};
pub use group::{GeneratedGroup, GroupGenerator, IconGroup};
pub use symbols::{HostNames, Symbol};
pub use theme::{ColorRule, Theme, ThemeError};
pub use vector::{IconFile, SourceError, TomlVectorParser, Vector, VectorParser};

use thiserror::Error;

/// Errors that abort a generation run
#[derive(Debug, Error)]
pub enum GenerateError {
    /// An icon failed under the fail-fast policy
    #[error(transparent)]
    Icon(#[from] IconError),

    /// Two declarations need the same name in one package
    #[error("in package '{package}': {source}")]
    Collision {
        package: String,
        #[source]
        source: NameCollision,
    },

    /// The theme could not be loaded or has an unusable rule
    #[error("theme error: {0}")]
    Theme(#[from] ThemeError),
}

/// Configuration for a complete generation run
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Name of each group's collection accessor
    pub collection_name: String,
    /// Color substitution rules
    pub theme: Theme,
    pub emit: EmitConfig,
    pub batch: BatchConfig,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            collection_name: "AllIcons".to_string(),
            theme: Theme::default(),
            emit: EmitConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl GenerateConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection_name(mut self, name: impl Into<String>) -> Self {
        self.collection_name = name.into();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Load the theme from a TOML file
    pub fn with_theme_file(self, path: &std::path::Path) -> Result<Self, GenerateError> {
        Ok(self.with_theme(Theme::from_file(path)?))
    }

    pub fn with_emit(mut self, config: EmitConfig) -> Self {
        self.emit = config;
        self
    }

    pub fn with_batch(mut self, config: BatchConfig) -> Self {
        self.batch = config;
        self
    }
}

/// Generate every file of `root` from TOML icon sources
///
/// Icons whose name is rejected by `predicate` are skipped.
pub fn generate<F>(root: &IconGroup, predicate: F, config: &GenerateConfig) -> Result<GeneratedGroup, GenerateError>
where
    F: Fn(&str) -> bool,
{
    generate_with_parser(root, &TomlVectorParser, predicate, config)
}

/// Generate every file of `root`, parsing icons with `parser`
pub fn generate_with_parser<F>(
    root: &IconGroup,
    parser: &dyn VectorParser,
    predicate: F,
    config: &GenerateConfig,
) -> Result<GeneratedGroup, GenerateError>
where
    F: Fn(&str) -> bool,
{
    config.theme.validate()?;
    tracing::info!(
        root = %root.class_symbol(),
        icons = root.icon_count(),
        rules = config.theme.rules.len(),
        "generating icons"
    );
    let ctx = EmitContext::new(&config.theme, &config.emit);
    let generator = GroupGenerator::new(parser, ctx, &config.batch, &config.collection_name);
    generator.generate(root, &predicate, &mut NameTable::new())
}
