//! Recursive emission of the vector tree

use super::code::{fragment, CodeBlock, TemplateBuilder};
use super::path::{emit_path, unit_value};
use super::EmitContext;
use crate::error::EmitError;
use crate::symbols;
use crate::vector::{NodePath, Vector, VectorNode};

/// Emit sibling nodes depth-first, in authored order
pub fn emit_nodes(
    nodes: &[VectorNode],
    parent: &NodePath,
    ctx: &EmitContext<'_>,
) -> Result<CodeBlock, EmitError> {
    let mut block = CodeBlock::new();
    for (index, node) in nodes.iter().enumerate() {
        block.extend(emit_node(node, &parent.child(index), ctx)?);
    }
    Ok(block)
}

/// Emit one node; groups wrap their children in a `group { ... }` block
pub fn emit_node(node: &VectorNode, at: &NodePath, ctx: &EmitContext<'_>) -> Result<CodeBlock, EmitError> {
    match node {
        VectorNode::Group(group) => {
            let mut block = CodeBlock::new();
            let mut head = TemplateBuilder::new();
            head.member(symbols::group());
            block.begin(head);
            block.extend(emit_nodes(&group.children, at, ctx)?);
            block.end();
            Ok(block)
        }
        VectorNode::Path(path) => emit_path(path, at, ctx),
    }
}

/// Emit the builder expression for a whole icon:
/// `return ImageVector.Builder(...).apply { ... }.build()`
pub fn emit_vector(name: &str, vector: &Vector, ctx: &EmitContext<'_>) -> Result<CodeBlock, EmitError> {
    let mut head = fragment("return ");
    head.member(symbols::image_vector_builder())
        .text("(name = ")
        .string(name)
        .text(", defaultWidth = ")
        .append(unit_value(vector.width))
        .text(", defaultHeight = ")
        .append(unit_value(vector.height))
        .text(&format!(
            ", viewportWidth = {}, viewportHeight = {}).apply",
            super::code::float_literal(vector.viewport_width),
            super::code::float_literal(vector.viewport_height)
        ));

    let mut block = CodeBlock::new();
    block.begin(head);
    block.extend(emit_nodes(&vector.nodes, &NodePath::root(), ctx)?);
    block.end_with(fragment(".build()"));
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::code::InstructionKind;
    use crate::emit::config::EmitConfig;
    use crate::emit::file::render_block;
    use crate::emit::imports::ImportTable;
    use crate::theme::Theme;
    use crate::vector::{Fill, Group, Path, PathCommand, Point};
    use pretty_assertions::assert_eq;

    fn marked(color: &str) -> VectorNode {
        VectorNode::Path(
            Path::new(vec![PathCommand::MoveTo(Point::new(0.0, 0.0))]).with_fill(Fill::solid(color)),
        )
    }

    #[test]
    fn test_group_order_preserved() {
        let tree = vec![
            marked("FFAAAAAA"),
            VectorNode::Group(Group::new(vec![marked("FFBBBBBB")])),
            marked("FFCCCCCC"),
        ];
        let theme = Theme::default();
        let config = EmitConfig::default();
        let ctx = EmitContext::new(&theme, &config);
        let block = emit_nodes(&tree, &NodePath::root(), &ctx).expect("Should emit");

        let outline: Vec<String> = block
            .instructions()
            .iter()
            .filter(|i| i.kind != InstructionKind::Statement)
            .map(|i| match i.kind {
                InstructionKind::Begin if i.template().contains("0xFFAAAAAA") => "A".to_string(),
                InstructionKind::Begin if i.template().contains("0xFFBBBBBB") => "B".to_string(),
                InstructionKind::Begin if i.template().contains("0xFFCCCCCC") => "C".to_string(),
                InstructionKind::Begin => "group".to_string(),
                _ => "end".to_string(),
            })
            .collect();

        assert_eq!(
            outline,
            vec!["A", "end", "group", "B", "end", "end", "C", "end"]
        );
    }

    #[test]
    fn test_error_carries_nested_node_path() {
        let tree = vec![
            marked("FF000000"),
            VectorNode::Group(Group::new(vec![
                marked("FF000000"),
                VectorNode::Path(Path::new(vec![]).with_fill(Fill::LinearGradient {
                    stops: vec![],
                    start: Point::default(),
                    end: Point::default(),
                })),
            ])),
        ];
        let theme = Theme::default();
        let config = EmitConfig::default();
        let ctx = EmitContext::new(&theme, &config);
        let err = emit_nodes(&tree, &NodePath::root(), &ctx).unwrap_err();
        assert_eq!(err.node().map(|n| n.to_string()), Some("/1/1".to_string()));
    }

    #[test]
    fn test_render_vector() {
        let vector = Vector::new(
            16.0,
            vec![VectorNode::Group(Group::new(vec![VectorNode::Path(
                Path::new(vec![PathCommand::MoveTo(Point::new(2.0, 2.0)), PathCommand::Close])
                    .with_fill(Fill::solid("FFEBECF0")),
            )]))],
        );
        let theme = Theme::intellij();
        let config = EmitConfig::default();
        let ctx = EmitContext::new(&theme, &config);
        let block = emit_vector("Folder", &vector, &ctx).expect("Should emit");
        let text = render_block(&block, &ImportTable::new("icons"), "  ");

        insta::assert_snapshot!(text, @r###"
        return ImageVector.Builder(name = "Folder", defaultWidth = 16.0.dp, defaultHeight = 16.0.dp, viewportWidth = 16.0f, viewportHeight = 16.0f).apply {
          group {
            path(fill = SolidColor(colorScheme.generalFill), stroke = null, strokeLineCap = StrokeCap.Butt, strokeLineJoin = StrokeJoin.Miter, strokeLineMiter = 4.0f, pathFillType = PathFillType.NonZero) {
              moveTo(2.0f, 2.0f)
              close()
            }
          }
        }.build()
        "###);
    }
}
