//! In-memory vector model for a parsed icon
//!
//! Everything here is plain data: the emitters only read it.

use std::fmt;

/// A parsed icon: header dimensions plus the top-level nodes in authored order
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    pub width: GraphicUnit,
    pub height: GraphicUnit,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub nodes: Vec<VectorNode>,
}

impl Vector {
    /// Create a square icon of `size` dp with a matching viewport
    pub fn new(size: f32, nodes: Vec<VectorNode>) -> Self {
        Self {
            width: GraphicUnit::dp(size),
            height: GraphicUnit::dp(size),
            viewport_width: size,
            viewport_height: size,
            nodes,
        }
    }
}

/// A node of the vector tree
#[derive(Debug, Clone, PartialEq)]
pub enum VectorNode {
    Group(Group),
    Path(Path),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub children: Vec<VectorNode>,
}

impl Group {
    pub fn new(children: Vec<VectorNode>) -> Self {
        Self { children }
    }
}

/// A single drawable path with its paint attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub fill: Option<Fill>,
    /// Literal ARGB hex color of the stroke, if stroked
    pub stroke_color: Option<String>,
    pub fill_alpha: f32,
    pub stroke_alpha: f32,
    pub stroke_width: Option<GraphicUnit>,
    pub stroke_cap: StrokeCap,
    pub stroke_join: StrokeJoin,
    pub stroke_miter: f32,
    pub fill_rule: FillRule,
    pub commands: Vec<PathCommand>,
}

impl Default for Path {
    fn default() -> Self {
        Self {
            fill: None,
            stroke_color: None,
            fill_alpha: 1.0,
            stroke_alpha: 1.0,
            stroke_width: None,
            stroke_cap: StrokeCap::default(),
            stroke_join: StrokeJoin::default(),
            stroke_miter: 4.0,
            fill_rule: FillRule::default(),
            commands: Vec::new(),
        }
    }
}

impl Path {
    /// Create an unpainted path from drawing commands
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self {
            commands,
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(color.into());
        self
    }

    pub fn with_stroke_width(mut self, width: GraphicUnit) -> Self {
        self.stroke_width = Some(width);
        self
    }
}

/// Interior paint of a path
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(String),
    LinearGradient {
        stops: Vec<ColorStop>,
        start: Point,
        end: Point,
    },
    RadialGradient {
        stops: Vec<ColorStop>,
        center: Point,
        radius: f32,
    },
}

impl Fill {
    pub fn solid(color: impl Into<String>) -> Self {
        Fill::Solid(color.into())
    }

    /// Human-readable kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Fill::Solid(_) => "solid color",
            Fill::LinearGradient { .. } => "linear gradient",
            Fill::RadialGradient { .. } => "radial gradient",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: String,
}

impl ColorStop {
    pub fn new(offset: f32, color: impl Into<String>) -> Self {
        Self {
            offset,
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Symbolic unit attached to a magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Density-independent pixels
    Dp,
}

/// A magnitude with an optional symbolic unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphicUnit {
    pub value: f32,
    pub unit: Option<Unit>,
}

impl GraphicUnit {
    pub fn plain(value: f32) -> Self {
        Self { value, unit: None }
    }

    pub fn dp(value: f32) -> Self {
        Self {
            value,
            unit: Some(Unit::Dp),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    pub fn name(self) -> &'static str {
        match self {
            StrokeCap::Butt => "Butt",
            StrokeCap::Round => "Round",
            StrokeCap::Square => "Square",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl StrokeJoin {
    pub fn name(self) -> &'static str {
        match self {
            StrokeJoin::Miter => "Miter",
            StrokeJoin::Round => "Round",
            StrokeJoin::Bevel => "Bevel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl FillRule {
    pub fn name(self) -> &'static str {
        match self {
            FillRule::NonZero => "NonZero",
            FillRule::EvenOdd => "EvenOdd",
        }
    }
}

/// A single drawing command, absolute or relative
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    Close,
    MoveTo(Point),
    RelativeMoveTo(Point),
    LineTo(Point),
    RelativeLineTo(Point),
    HorizontalTo(f32),
    RelativeHorizontalTo(f32),
    VerticalTo(f32),
    RelativeVerticalTo(f32),
    CurveTo(Point, Point, Point),
    RelativeCurveTo(Point, Point, Point),
    ReflectiveCurveTo(Point, Point),
    RelativeReflectiveCurveTo(Point, Point),
    QuadTo(Point, Point),
    RelativeQuadTo(Point, Point),
    ReflectiveQuadTo(Point),
    RelativeReflectiveQuadTo(Point),
    ArcTo(ArcParams),
    RelativeArcTo(ArcParams),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub radius_x: f32,
    pub radius_y: f32,
    pub rotation: f32,
    pub large_arc: bool,
    pub sweep: bool,
    pub end: Point,
}

/// Position of a node in the tree, as child indices from the root
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the `index`-th child of this node
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}
