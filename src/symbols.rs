//! Host-language symbols referenced by generated code
//!
//! The engine treats these as opaque qualified names; the import table decides
//! how each one is spelled in a given file.

use std::fmt;

/// A qualified host-language name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    pub package: String,
    /// Enclosing class for nested members (`StrokeCap` in `StrokeCap.Round`)
    pub enclosing: Option<String>,
    pub name: String,
    /// Extension members resolve by receiver and may share simple names
    pub extension: bool,
}

impl Symbol {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            enclosing: None,
            name: name.into(),
            extension: false,
        }
    }

    pub fn nested(
        package: impl Into<String>,
        enclosing: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            enclosing: Some(enclosing.into()),
            ..Self::new(package, name)
        }
    }

    pub fn extension(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            extension: true,
            ..Self::new(package, name)
        }
    }

    /// Parse `a.b.Name`; the last segment is the simple name
    pub fn parse(qualified: &str) -> Self {
        match qualified.rsplit_once('.') {
            Some((package, name)) => Self::new(package, name),
            None => Self::new("", qualified),
        }
    }

    /// Simple name that must be imported to use this symbol
    pub fn import_name(&self) -> &str {
        self.enclosing.as_deref().unwrap_or(&self.name)
    }

    /// Fully qualified name of the imported declaration
    pub fn import_path(&self) -> String {
        if self.package.is_empty() {
            self.import_name().to_string()
        } else {
            format!("{}.{}", self.package, self.import_name())
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.enclosing {
            Some(enclosing) => write!(f, "{}.{}.{}", self.package, enclosing, self.name),
            None => write!(f, "{}.{}", self.package, self.name),
        }
    }
}

/// Host symbols that vary between icon libraries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostNames {
    /// Type of the public icon accessor
    pub icon_type: Symbol,
    /// Type of the color scheme parameter that theme tokens are read from
    pub colors_type: Symbol,
    /// Annotation placed on the aggregate accessor getter
    pub composable: Symbol,
}

impl Default for HostNames {
    fn default() -> Self {
        Self {
            icon_type: Symbol::new("org.jetbrains.jewel.icons", "IntellijIconData"),
            colors_type: Symbol::new("org.jetbrains.jewel", "IntelliJIconColors"),
            composable: Symbol::new("androidx.compose.runtime", "Composable"),
        }
    }
}

impl HostNames {
    pub fn with_icon_type(mut self, qualified: &str) -> Self {
        self.icon_type = Symbol::parse(qualified);
        self
    }

    pub fn with_colors_type(mut self, qualified: &str) -> Self {
        self.colors_type = Symbol::parse(qualified);
        self
    }
}

const GRAPHICS: &str = "androidx.compose.ui.graphics";
const VECTOR: &str = "androidx.compose.ui.graphics.vector";

pub fn image_vector() -> Symbol {
    Symbol::new(VECTOR, "ImageVector")
}

pub fn image_vector_builder() -> Symbol {
    Symbol::nested(VECTOR, "ImageVector", "Builder")
}

pub fn path() -> Symbol {
    Symbol::extension(VECTOR, "path")
}

pub fn group() -> Symbol {
    Symbol::extension(VECTOR, "group")
}

pub fn solid_color() -> Symbol {
    Symbol::new(GRAPHICS, "SolidColor")
}

pub fn color() -> Symbol {
    Symbol::new(GRAPHICS, "Color")
}

pub fn linear_gradient() -> Symbol {
    Symbol::nested(GRAPHICS, "Brush", "linearGradient")
}

pub fn radial_gradient() -> Symbol {
    Symbol::nested(GRAPHICS, "Brush", "radialGradient")
}

pub fn offset() -> Symbol {
    Symbol::new("androidx.compose.ui.geometry", "Offset")
}

pub fn stroke_cap(name: &str) -> Symbol {
    Symbol::nested(GRAPHICS, "StrokeCap", name)
}

pub fn stroke_join(name: &str) -> Symbol {
    Symbol::nested(GRAPHICS, "StrokeJoin", name)
}

pub fn path_fill_type(name: &str) -> Symbol {
    Symbol::nested(GRAPHICS, "PathFillType", name)
}

pub fn dp() -> Symbol {
    Symbol::extension("androidx.compose.ui.unit", "dp")
}

pub fn list() -> Symbol {
    Symbol::new("kotlin.collections", "List")
}

pub fn list_of() -> Symbol {
    Symbol::new("kotlin.collections", "listOf")
}
