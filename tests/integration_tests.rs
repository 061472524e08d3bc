//! Integration tests for the themed icon generator

use pretty_assertions::assert_eq;

use themed_icons::{
    generate, BatchConfig, FailurePolicy, GenerateConfig, GenerateError, IconErrorKind, IconFile,
    IconGroup, SourceFile, Theme,
};

const RED_SQUARE: &str = r#"
width = 16
height = 16

[[nodes]]
type = "path"
d = "M0 0h16v16H0z"
fill = { type = "solid", color = "FF0000" }
"#;

const GRADIENT: &str = r##"
width = 16
height = 16

[[nodes]]
type = "group"

[[nodes.children]]
type = "path"
d = "M8 0a8 8 0 1 0 0.001 0"
stroke = "#6C707E"
stroke_width = { value = 1.5, unit = "dp" }
stroke_cap = "round"
fill_rule = "evenodd"
fill = { type = "linear", start = [0, 0], end = [16, 16], stops = [
    { offset = 0, color = "FF000000" },
    { offset = 1, color = "FFFFFFFF" },
] }
"##;

const EMPTY_GRADIENT: &str = r#"
[[nodes]]
type = "path"
d = "M0 0z"

[[nodes]]
type = "group"

[[nodes.children]]
type = "path"
d = "M0 0z"
fill = { type = "radial", center = [8, 8], radius = 8, stops = [] }
"#;

fn file<'a>(files: &'a [SourceFile], name: &str) -> &'a SourceFile {
    files
        .iter()
        .find(|f| f.file_name == name)
        .unwrap_or_else(|| panic!("no file named {}", name))
}

#[test]
fn test_theme_reference_replaces_literal() {
    let group = IconGroup::new("org.example.icons", "Icons").with_icon(IconFile::new("Red", RED_SQUARE));
    let config = GenerateConfig::new().with_theme(Theme::from_pairs([("FF0000", "primary")]));
    let output = generate(&group, |_| true, &config).expect("Should generate");

    let red = file(&output.files, "Red");
    assert!(red.contents.contains(
        "path(fill = SolidColor(colorScheme.primary), stroke = null, strokeLineCap = StrokeCap.Butt, \
         strokeLineJoin = StrokeJoin.Miter, strokeLineMiter = 4.0f, pathFillType = PathFillType.NonZero) {"
    ));
    assert!(!red.contents.contains("fillAlpha"));
    assert!(!red.contents.contains("strokeAlpha"));
    assert!(!red.contents.contains("import androidx.compose.ui.graphics.Color\n"));
}

#[test]
fn test_empty_theme_is_pass_through() {
    let group = IconGroup::new("icons", "Icons").with_icon(IconFile::new("Red", RED_SQUARE));
    let output = generate(&group, |_| true, &GenerateConfig::default()).expect("Should generate");
    assert!(file(&output.files, "Red")
        .contents
        .contains("fill = SolidColor(Color(0xFFFF0000))"));
}

#[test]
fn test_gradient_and_stroke() {
    let group = IconGroup::new("icons", "Icons").with_icon(IconFile::new("Ring", GRADIENT));
    let config = GenerateConfig::new().with_theme(Theme::from_pairs([("6C707E", "generalStroke")]));
    let output = generate(&group, |_| true, &config).expect("Should generate");
    let ring = &file(&output.files, "Ring").contents;

    assert!(ring.contains(
        "path(fill = Brush.linearGradient(0.0f to Color(0xFF000000), 1.0f to Color(0xFFFFFFFF), \
         start = Offset(0.0f, 0.0f), end = Offset(16.0f, 16.0f)), \
         stroke = SolidColor(colorScheme.generalStroke), strokeLineWidth = 1.5.dp, \
         strokeLineCap = StrokeCap.Round, strokeLineJoin = StrokeJoin.Miter, strokeLineMiter = 4.0f, \
         pathFillType = PathFillType.EvenOdd) {"
    ));
    assert!(ring.contains("        group {\n            path("));
    assert!(ring.contains("arcToRelative(8.0f, 8.0f, 0.0f, true, false, 0.001f, 0.0f)"));
    assert!(ring.contains("import androidx.compose.ui.graphics.Brush\n"));
    assert!(ring.contains("import androidx.compose.ui.geometry.Offset\n"));
}

#[test]
fn test_gradient_stops_are_never_themed() {
    let group = IconGroup::new("icons", "Icons").with_icon(IconFile::new("Ring", GRADIENT));
    let config = GenerateConfig::new().with_theme(Theme::from_pairs([("FF000000", "black")]));
    let output = generate(&group, |_| true, &config).expect("Should generate");
    let ring = &file(&output.files, "Ring").contents;
    assert!(ring.contains("0.0f to Color(0xFF000000)"));
    assert!(!ring.contains("colorScheme.black"));
}

#[test]
fn test_malformed_fill_reports_node() {
    let group = IconGroup::new("icons", "Icons").with_icon(IconFile::new("Empty", EMPTY_GRADIENT));
    let config = GenerateConfig::new().with_batch(BatchConfig::new().with_policy(FailurePolicy::FailFast));
    let err = generate(&group, |_| true, &config).unwrap_err();

    match err {
        GenerateError::Icon(err) => {
            assert_eq!(err.icon, "Empty");
            assert_eq!(err.kind.name(), "MalformedFill");
            assert_eq!(err.node().map(|n| n.to_string()), Some("/1/0".to_string()));
            assert_eq!(
                err.to_string(),
                "icon 'Empty' (node /1/0) [MalformedFill]: malformed icon: radial gradient at node /1/0 declares no color stops"
            );
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_output_is_deterministic() {
    let tree = || {
        IconGroup::new("org.example.icons", "Icons")
            .with_icon(IconFile::new("Red", RED_SQUARE))
            .with_icon(IconFile::new("Ring", GRADIENT))
            .with_child(
                IconGroup::new("org.example.icons.actions", "Actions")
                    .with_icon(IconFile::new("Red", RED_SQUARE))
                    .with_icon(IconFile::new("Ring", GRADIENT)),
            )
    };
    let config = GenerateConfig::new().with_theme(Theme::intellij());
    let sequential = config
        .clone()
        .with_batch(BatchConfig::new().with_parallel(false));

    let first = generate(&tree(), |_| true, &config).expect("Should generate");
    let second = generate(&tree(), |_| true, &config).expect("Should generate");
    let third = generate(&tree(), |_| true, &sequential).expect("Should generate");

    assert_eq!(first.files, second.files);
    assert_eq!(first.files, third.files);
}

#[test]
fn test_list_icon_keeps_its_name() {
    let group = IconGroup::new("org.example", "AllAssets")
        .with_icon(IconFile::new("List", RED_SQUARE))
        .with_icon(IconFile::new("Red", RED_SQUARE));
    let output = generate(&group, |_| true, &GenerateConfig::default()).expect("Should generate");

    let accessor = file(&output.files, "AllIcons");
    assert_eq!(
        accessor.contents,
        r#"package org.example

import androidx.compose.runtime.Composable
import kotlin.collections.List as ____List
import kotlin.collections.listOf
import org.jetbrains.jewel.icons.IntellijIconData

private var __AllIcons: ____List<IntellijIconData>? = null

public val AllAssets.AllIcons: ____List<IntellijIconData>
    @Composable
    get() {
        if (__AllIcons != null) {
            return __AllIcons!!
        }
        __AllIcons = listOf(List, Red)
        return __AllIcons!!
    }
"#
    );

    let list = file(&output.files, "List");
    assert!(list.contents.contains("public val AllAssets.List: IntellijIconData"));
}

#[test]
fn test_nested_groups_and_filtering() {
    let group = IconGroup::new("org.example.icons", "Icons")
        .with_icon(IconFile::new("Red", RED_SQUARE))
        .with_icon(IconFile::new("Red_dark", RED_SQUARE))
        .with_child(
            IconGroup::new("org.example.icons.actions", "Actions")
                .with_icon(IconFile::new("Ring", GRADIENT))
                .with_child(
                    IconGroup::new("org.example.icons.actions.debug", "Debug")
                        .with_icon(IconFile::new("Red", RED_SQUARE)),
                ),
        );
    let output = generate(&group, |name| !name.contains("_dark"), &GenerateConfig::default())
        .expect("Should generate");

    assert_eq!(output.generated, 3);
    assert_eq!(output.skipped, 1);
    assert!(output.failures.is_empty());

    let root = output.files.last().expect("Should have root accessor");
    assert!(root.contents.contains("__AllIcons3 = Actions.AllIcons + listOf(Red)"));
    assert!(root.contents.contains("import org.example.icons.actions.Actions\n"));
    assert!(root.contents.contains("import org.example.icons.actions.AllIcons\n"));

    let actions = output
        .files
        .iter()
        .find(|f| f.file_name == "AllIcons" && f.package == "org.example.icons.actions")
        .expect("Should have actions accessor");
    assert!(actions.contents.contains("= Debug.AllIcons + listOf(Ring)"));

    let slots: Vec<&str> = output
        .files
        .iter()
        .filter(|f| f.file_name == "Red")
        .filter_map(|f| f.contents.lines().find(|l| l.starts_with("private var ")))
        .collect();
    assert_eq!(slots, vec!["private var _red: IntellijIconData? = null", "private var _red2: IntellijIconData? = null"]);
}

#[test]
fn test_collect_policy_reports_every_failure() {
    let group = IconGroup::new("icons", "Icons")
        .with_icon(IconFile::new("Empty", EMPTY_GRADIENT))
        .with_icon(IconFile::new("Red", RED_SQUARE))
        .with_icon(IconFile::new("Garbage", "nodes = 3"));
    let output = generate(&group, |_| true, &GenerateConfig::default()).expect("Should collect");

    let kinds: Vec<(&str, &str)> = output
        .failures
        .iter()
        .map(|f| (f.icon.as_str(), f.kind.name()))
        .collect();
    assert_eq!(kinds, vec![("Empty", "MalformedFill"), ("Garbage", "ParseFailure")]);
    assert!(matches!(output.failures[1].kind, IconErrorKind::Parse(_)));

    let accessor = output.files.last().expect("Should have accessor");
    assert!(accessor.contents.contains("listOf(Red)"));
}

#[test]
fn test_icon_named_like_collection_is_fatal() {
    let group = IconGroup::new("icons", "Icons").with_icon(IconFile::new("AllIcons", RED_SQUARE));
    let err = generate(&group, |_| true, &GenerateConfig::default()).unwrap_err();
    assert!(err.to_string().contains("'AllIcons'"));
    assert!(matches!(err, GenerateError::Collision { .. }));
}

#[test]
fn test_invalid_source_values_are_failures() {
    let short_color = RED_SQUARE.replace("FF0000", "#abc");
    let overflow = RED_SQUARE.replace("M0 0h16v16H0z", "M0 0 L1e99 0");
    let unreadable = RED_SQUARE.replace("M0 0h16v16H0z", "M0 0 L1 1 X!! 2 2");
    let group = IconGroup::new("icons", "Icons")
        .with_icon(IconFile::new("Short", short_color))
        .with_icon(IconFile::new("Huge", overflow))
        .with_icon(IconFile::new("Garbled", unreadable))
        .with_icon(IconFile::new("NanWidth", RED_SQUARE.replace("width = 16", "width = nan")))
        .with_icon(IconFile::new("Red", RED_SQUARE));
    let output = generate(&group, |_| true, &GenerateConfig::default()).expect("Should collect");

    let failed: Vec<&str> = output.failures.iter().map(|f| f.icon.as_str()).collect();
    assert_eq!(failed, vec!["Short", "Huge", "Garbled", "NanWidth"]);
    assert!(output.failures.iter().all(|f| f.kind.name() == "ParseFailure"));
    assert_eq!(output.generated, 1);
    assert!(output.files.iter().all(|f| !f.contents.contains("NaN") && !f.contents.contains("inff")));
}

#[test]
fn test_failures_name_their_source() {
    let mut broken = IconFile::new("Red", RED_SQUARE.replace("h16", "h"));
    broken.origin = "actions/red.toml".to_string();
    let group = IconGroup::new("icons", "Icons")
        .with_icon(IconFile::new("Red", RED_SQUARE))
        .with_child(IconGroup::new("icons.actions", "Actions").with_icon(broken));
    let output = generate(&group, |_| true, &GenerateConfig::default()).expect("Should collect");

    assert_eq!(output.failures.len(), 1);
    assert_eq!(output.failures[0].icon, "Red");
    assert_eq!(output.failures[0].origin, "actions/red.toml");
}
