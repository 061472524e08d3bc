//! Loading already-parsed vector trees from their TOML interchange form
//!
//! An icon file describes the header and the node tree; path geometry is
//! given as SVG path data and parsed with [`parse_path_data`].
//!
//! ```toml
//! width = 16
//! height = 16
//!
//! [[nodes]]
//! type = "path"
//! d = "M2 2h12v12H2z"
//! fill = { type = "solid", color = "FFEBECF0" }
//! stroke = "FF6C707E"
//! ```

use std::path::Path as FsPath;

use serde::Deserialize;
use thiserror::Error;

use super::grammar::parse_path_data;
use super::model::*;
use crate::theme::is_hex_color;
use crate::PathDataError;

/// Errors surfaced by the vector source collaborator
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read icon file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid icon TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid path data at node {node}: {}", join_messages(.errors))]
    PathData {
        node: NodePath,
        data: String,
        errors: Vec<PathDataError>,
    },

    #[error("invalid color '{color}' at node {node}: expected 6 or 8 hex digits")]
    InvalidColor { node: NodePath, color: String },

    #[error("{field} at node {node} is not a finite number")]
    NonFinite { node: NodePath, field: &'static str },
}

impl SourceError {
    /// Render path data errors with source context; other errors as plain text
    pub fn report(&self, filename: &str) -> String {
        match self {
            SourceError::PathData { data, errors, .. } => errors
                .iter()
                .map(|e| e.format(data, filename))
                .collect::<Vec<_>>()
                .join("\n"),
            other => other.to_string(),
        }
    }
}

fn join_messages(errors: &[PathDataError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raw source of one icon, named by the caller
#[derive(Debug, Clone)]
pub struct IconFile {
    /// Generated declaration name
    pub name: String,
    /// Where the contents came from, for diagnostics
    pub origin: String,
    pub contents: String,
}

impl IconFile {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            origin: name.clone(),
            name,
            contents: contents.into(),
        }
    }

    /// Read an icon file from disk under the given declaration name
    pub fn read(name: impl Into<String>, path: &FsPath) -> Result<Self, SourceError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self {
            name: name.into(),
            origin: path.display().to_string(),
            contents,
        })
    }
}

/// Turns an icon's raw source into a vector tree
pub trait VectorParser: Sync {
    fn parse(&self, icon: &IconFile) -> Result<Vector, SourceError>;
}

impl<F> VectorParser for F
where
    F: Fn(&IconFile) -> Result<Vector, SourceError> + Sync,
{
    fn parse(&self, icon: &IconFile) -> Result<Vector, SourceError> {
        self(icon)
    }
}

/// Parser for the TOML interchange format
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlVectorParser;

impl VectorParser for TomlVectorParser {
    fn parse(&self, icon: &IconFile) -> Result<Vector, SourceError> {
        parse_vector(&icon.contents)
    }
}

/// Parse a vector tree from TOML
pub fn parse_vector(content: &str) -> Result<Vector, SourceError> {
    let parsed: TomlVector = toml::from_str(content)?;
    let root = NodePath::root();
    let width = finite(parsed.width, "width", &root)?;
    let height = finite(parsed.height, "height", &root)?;
    let viewport_width = finite(parsed.viewport_width.unwrap_or(width), "viewport_width", &root)?;
    let viewport_height = finite(parsed.viewport_height.unwrap_or(height), "viewport_height", &root)?;
    let nodes = convert_nodes(parsed.nodes, &root)?;

    Ok(Vector {
        width: GraphicUnit::dp(width),
        height: GraphicUnit::dp(height),
        viewport_width,
        viewport_height,
        nodes,
    })
}

fn finite(value: f32, field: &'static str, at: &NodePath) -> Result<f32, SourceError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SourceError::NonFinite {
            node: at.clone(),
            field,
        })
    }
}

fn point(xy: [f32; 2], field: &'static str, at: &NodePath) -> Result<Point, SourceError> {
    Ok(Point::new(finite(xy[0], field, at)?, finite(xy[1], field, at)?))
}

fn color(literal: String, at: &NodePath) -> Result<String, SourceError> {
    if is_hex_color(&literal) {
        Ok(literal)
    } else {
        Err(SourceError::InvalidColor {
            node: at.clone(),
            color: literal,
        })
    }
}

#[derive(Deserialize)]
struct TomlVector {
    #[serde(default = "default_size")]
    width: f32,
    #[serde(default = "default_size")]
    height: f32,
    viewport_width: Option<f32>,
    viewport_height: Option<f32>,
    #[serde(default)]
    nodes: Vec<TomlNode>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TomlNode {
    Group {
        #[serde(default)]
        children: Vec<TomlNode>,
    },
    Path(TomlPath),
}

#[derive(Deserialize)]
struct TomlPath {
    d: String,
    fill: Option<TomlFill>,
    stroke: Option<String>,
    #[serde(default = "default_alpha")]
    fill_alpha: f32,
    #[serde(default = "default_alpha")]
    stroke_alpha: f32,
    stroke_width: Option<TomlUnit>,
    #[serde(default)]
    stroke_cap: TomlCap,
    #[serde(default)]
    stroke_join: TomlJoin,
    #[serde(default = "default_miter")]
    stroke_miter: f32,
    #[serde(default)]
    fill_rule: TomlFillRule,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TomlFill {
    Solid {
        color: String,
    },
    Linear {
        stops: Vec<TomlStop>,
        start: [f32; 2],
        end: [f32; 2],
    },
    Radial {
        stops: Vec<TomlStop>,
        center: [f32; 2],
        radius: f32,
    },
}

#[derive(Deserialize)]
struct TomlStop {
    offset: f32,
    color: String,
}

/// Either a bare number or `{ value = 1, unit = "dp" }`
#[derive(Deserialize)]
#[serde(untagged)]
enum TomlUnit {
    Plain(f32),
    WithUnit { value: f32, unit: TomlUnitName },
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum TomlUnitName {
    Dp,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum TomlCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum TomlJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum TomlFillRule {
    #[default]
    NonZero,
    EvenOdd,
}

fn default_size() -> f32 {
    24.0
}

fn default_alpha() -> f32 {
    1.0
}

fn default_miter() -> f32 {
    4.0
}

fn convert_nodes(nodes: Vec<TomlNode>, parent: &NodePath) -> Result<Vec<VectorNode>, SourceError> {
    nodes
        .into_iter()
        .enumerate()
        .map(|(index, node)| convert_node(node, parent.child(index)))
        .collect()
}

fn convert_node(node: TomlNode, at: NodePath) -> Result<VectorNode, SourceError> {
    match node {
        TomlNode::Group { children } => Ok(VectorNode::Group(Group::new(convert_nodes(
            children, &at,
        )?))),
        TomlNode::Path(path) => {
            let commands = parse_path_data(&path.d).map_err(|errors| SourceError::PathData {
                node: at.clone(),
                data: path.d.clone(),
                errors,
            })?;

            let stroke_width = match path.stroke_width {
                Some(TomlUnit::Plain(value)) => Some(GraphicUnit::plain(finite(value, "stroke_width", &at)?)),
                Some(TomlUnit::WithUnit {
                    value,
                    unit: TomlUnitName::Dp,
                }) => Some(GraphicUnit::dp(finite(value, "stroke_width", &at)?)),
                None => None,
            };

            Ok(VectorNode::Path(Path {
                fill: path.fill.map(|fill| convert_fill(fill, &at)).transpose()?,
                stroke_color: path.stroke.map(|stroke| color(stroke, &at)).transpose()?,
                fill_alpha: finite(path.fill_alpha, "fill_alpha", &at)?,
                stroke_alpha: finite(path.stroke_alpha, "stroke_alpha", &at)?,
                stroke_width,
                stroke_cap: match path.stroke_cap {
                    TomlCap::Butt => StrokeCap::Butt,
                    TomlCap::Round => StrokeCap::Round,
                    TomlCap::Square => StrokeCap::Square,
                },
                stroke_join: match path.stroke_join {
                    TomlJoin::Miter => StrokeJoin::Miter,
                    TomlJoin::Round => StrokeJoin::Round,
                    TomlJoin::Bevel => StrokeJoin::Bevel,
                },
                stroke_miter: finite(path.stroke_miter, "stroke_miter", &at)?,
                fill_rule: match path.fill_rule {
                    TomlFillRule::NonZero => FillRule::NonZero,
                    TomlFillRule::EvenOdd => FillRule::EvenOdd,
                },
                commands,
            }))
        }
    }
}

fn convert_fill(fill: TomlFill, at: &NodePath) -> Result<Fill, SourceError> {
    let stops = |stops: Vec<TomlStop>| -> Result<Vec<ColorStop>, SourceError> {
        stops
            .into_iter()
            .map(|s| -> Result<ColorStop, SourceError> {
                Ok(ColorStop::new(finite(s.offset, "stop offset", at)?, color(s.color, at)?))
            })
            .collect()
    };
    Ok(match fill {
        TomlFill::Solid { color: literal } => Fill::Solid(color(literal, at)?),
        TomlFill::Linear {
            stops: s,
            start,
            end,
        } => Fill::LinearGradient {
            stops: stops(s)?,
            start: point(start, "gradient start", at)?,
            end: point(end, "gradient end", at)?,
        },
        TomlFill::Radial {
            stops: s,
            center,
            radius,
        } => Fill::RadialGradient {
            stops: stops(s)?,
            center: point(center, "gradient center", at)?,
            radius: finite(radius, "gradient radius", at)?,
        },
    })
}
