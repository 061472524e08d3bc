//! Path emission: one `path(...) { ... }` block per path node
//!
//! Header parameters are appended to a single [`TemplateBuilder`]; an omitted
//! optional parameter contributes neither text nor arguments.

use super::code::{float, float_literal, fragment, CodeBlock, TemplateBuilder};
use super::EmitContext;
use crate::error::EmitError;
use crate::symbols;
use crate::theme::normalize_color;
use crate::vector::{ColorStop, Fill, GraphicUnit, NodePath, Path, PathCommand, Point, Unit};

/// Emit the block for one path: header, one call per drawing command, end
pub fn emit_path(path: &Path, at: &NodePath, ctx: &EmitContext<'_>) -> Result<CodeBlock, EmitError> {
    let mut block = CodeBlock::new();
    block.begin(path_header(path, at, ctx)?);
    for command in &path.commands {
        block.statement(fragment(&command_call(command)));
    }
    block.end();
    Ok(block)
}

/// The `path(fill = ..., ...)` call opening a path block
pub fn path_header(path: &Path, at: &NodePath, ctx: &EmitContext<'_>) -> Result<TemplateBuilder, EmitError> {
    let mut params = vec![
        param("fill", fill_value(path, at, ctx)?),
        param("stroke", stroke_value(path, ctx)),
    ];
    if path.fill_alpha != 1.0 {
        params.push(param("fillAlpha", fragment(&float_literal(path.fill_alpha))));
    }
    if path.stroke_alpha != 1.0 {
        params.push(param("strokeAlpha", fragment(&float_literal(path.stroke_alpha))));
    }
    if let Some(width) = path.stroke_width {
        params.push(param("strokeLineWidth", unit_value(width)));
    }
    params.push(param(
        "strokeLineCap",
        member(symbols::stroke_cap(path.stroke_cap.name())),
    ));
    params.push(param(
        "strokeLineJoin",
        member(symbols::stroke_join(path.stroke_join.name())),
    ));
    params.push(param(
        "strokeLineMiter",
        fragment(&float_literal(path.stroke_miter)),
    ));
    params.push(param(
        "pathFillType",
        member(symbols::path_fill_type(path.fill_rule.name())),
    ));

    let mut header = TemplateBuilder::new();
    header.member(symbols::path()).text("(").join(params, ", ").text(")");
    Ok(header)
}

fn param(name: &str, value: TemplateBuilder) -> TemplateBuilder {
    let mut p = fragment(name);
    p.text(" = ").append(value);
    p
}

fn member(symbol: crate::symbols::Symbol) -> TemplateBuilder {
    let mut m = TemplateBuilder::new();
    m.member(symbol);
    m
}

fn fill_value(path: &Path, at: &NodePath, ctx: &EmitContext<'_>) -> Result<TemplateBuilder, EmitError> {
    let fill = match &path.fill {
        Some(fill) => fill,
        None => return Ok(fragment("null")),
    };

    match fill {
        Fill::Solid(color) => Ok(solid_paint(color, ctx)),
        Fill::LinearGradient { stops, start, end } => {
            let mut value = gradient_open(symbols::linear_gradient(), stops, fill, at)?;
            value
                .text(", start = ")
                .append(offset(*start))
                .text(", end = ")
                .append(offset(*end))
                .text(")");
            Ok(value)
        }
        Fill::RadialGradient {
            stops,
            center,
            radius,
        } => {
            let mut value = gradient_open(symbols::radial_gradient(), stops, fill, at)?;
            value
                .text(", center = ")
                .append(offset(*center))
                .text(", radius = ")
                .text(&float_literal(*radius))
                .text(")");
            Ok(value)
        }
    }
}

fn stroke_value(path: &Path, ctx: &EmitContext<'_>) -> TemplateBuilder {
    match &path.stroke_color {
        Some(color) => solid_paint(color, ctx),
        None => fragment("null"),
    }
}

/// `SolidColor(colorScheme.token)` when the theme knows the color, else a literal
fn solid_paint(color: &str, ctx: &EmitContext<'_>) -> TemplateBuilder {
    let mut value = TemplateBuilder::new();
    value.member(symbols::solid_color()).text("(");
    match ctx.theme.resolve(color) {
        Some(token) => {
            value
                .text(&ctx.config.color_scheme_param)
                .text(".")
                .name(token);
        }
        None => {
            value.append(color_value(color));
        }
    }
    value.text(")");
    value
}

/// `Brush.linearGradient(0.0f to Color(..), ...` with the stops expanded
fn gradient_open(
    brush: crate::symbols::Symbol,
    stops: &[ColorStop],
    fill: &Fill,
    at: &NodePath,
) -> Result<TemplateBuilder, EmitError> {
    if stops.is_empty() {
        return Err(EmitError::malformed_fill(at.clone(), fill.kind()));
    }
    let stops = stops
        .iter()
        .map(|stop| {
            let mut s = fragment(&float_literal(stop.offset));
            s.text(" to ").append(color_value(&stop.color));
            s
        })
        .collect();

    let mut value = TemplateBuilder::new();
    value.member(brush).text("(").join(stops, ", ");
    Ok(value)
}

/// `Color(0xAARRGGBB)`; six-digit literals are made opaque
fn color_value(color: &str) -> TemplateBuilder {
    let mut hex = normalize_color(color);
    if hex.len() == 6 {
        hex.insert_str(0, "FF");
    }
    let mut value = TemplateBuilder::new();
    value.member(symbols::color()).text(&format!("(0x{})", hex));
    value
}

fn offset(point: Point) -> TemplateBuilder {
    let mut value = TemplateBuilder::new();
    value.member(symbols::offset()).text(&format!(
        "({}, {})",
        float_literal(point.x),
        float_literal(point.y)
    ));
    value
}

/// `16.0.dp` for unit values, `16.0f` otherwise
pub fn unit_value(unit: GraphicUnit) -> TemplateBuilder {
    match unit.unit {
        Some(Unit::Dp) => {
            let mut value = fragment(&format!("{}.", float(unit.value)));
            value.member(symbols::dp());
            value
        }
        None => fragment(&float_literal(unit.value)),
    }
}

fn args(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| float_literal(*v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Host call for one drawing command
pub fn command_call(command: &PathCommand) -> String {
    use PathCommand::*;

    let call = |name: &str, values: &[f32]| format!("{}({})", name, args(values));
    let arc = |name: &str, a: &crate::vector::ArcParams| {
        format!(
            "{}({}, {}, {}, {}, {}, {}, {})",
            name,
            float_literal(a.radius_x),
            float_literal(a.radius_y),
            float_literal(a.rotation),
            a.large_arc,
            a.sweep,
            float_literal(a.end.x),
            float_literal(a.end.y)
        )
    };

    match command {
        Close => "close()".to_string(),
        MoveTo(p) => call("moveTo", &[p.x, p.y]),
        RelativeMoveTo(p) => call("moveToRelative", &[p.x, p.y]),
        LineTo(p) => call("lineTo", &[p.x, p.y]),
        RelativeLineTo(p) => call("lineToRelative", &[p.x, p.y]),
        HorizontalTo(x) => call("horizontalLineTo", &[*x]),
        RelativeHorizontalTo(x) => call("horizontalLineToRelative", &[*x]),
        VerticalTo(y) => call("verticalLineTo", &[*y]),
        RelativeVerticalTo(y) => call("verticalLineToRelative", &[*y]),
        CurveTo(a, b, c) => call("curveTo", &[a.x, a.y, b.x, b.y, c.x, c.y]),
        RelativeCurveTo(a, b, c) => call("curveToRelative", &[a.x, a.y, b.x, b.y, c.x, c.y]),
        ReflectiveCurveTo(a, b) => call("reflectiveCurveTo", &[a.x, a.y, b.x, b.y]),
        RelativeReflectiveCurveTo(a, b) => {
            call("reflectiveCurveToRelative", &[a.x, a.y, b.x, b.y])
        }
        QuadTo(a, b) => call("quadTo", &[a.x, a.y, b.x, b.y]),
        RelativeQuadTo(a, b) => call("quadToRelative", &[a.x, a.y, b.x, b.y]),
        ReflectiveQuadTo(p) => call("reflectiveQuadTo", &[p.x, p.y]),
        RelativeReflectiveQuadTo(p) => call("reflectiveQuadToRelative", &[p.x, p.y]),
        ArcTo(a) => arc("arcTo", a),
        RelativeArcTo(a) => arc("arcToRelative", a),
    }
}
