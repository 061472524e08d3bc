//! Themed Icons CLI
//!
//! Usage:
//!   themed-icons [OPTIONS] <INPUT_DIR> -o <OUT_DIR> -p <PACKAGE>
//!
//! Every directory under INPUT_DIR becomes an icon group and every `*.toml`
//! file an icon.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use themed_icons::{
    generate, BatchConfig, FailurePolicy, GenerateConfig, IconErrorKind, IconFile, IconGroup, SourceError,
    Theme,
};

#[derive(Parser)]
#[command(name = "themed-icons")]
#[command(about = "Generate themed Compose icon declarations from vector icons")]
struct Cli {
    /// Directory of icon sources; the root icon group
    input: PathBuf,

    /// Source root to write generated files to
    #[arg(short, long)]
    output: PathBuf,

    /// Package of the root icon group
    #[arg(short, long)]
    package: String,

    /// Name of each group's collection accessor
    #[arg(short, long, default_value = "AllIcons")]
    accessor: String,

    /// Theme file with color substitution rules (TOML format)
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Use the built-in IntelliJ icon palette
    #[arg(long, conflicts_with = "theme")]
    intellij_theme: bool,

    /// Skip icons whose name contains this text
    #[arg(short = 'x', long = "exclude")]
    exclude: Vec<String>,

    /// Stop at the first icon that fails
    #[arg(long)]
    fail_fast: bool,

    /// Build icons on the current thread only
    #[arg(long)]
    sequential: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root_class = match cli.input.file_name().and_then(|n| n.to_str()) {
        Some(name) => group_class_name(name),
        None => {
            eprintln!("Error: input '{}' has no directory name", cli.input.display());
            std::process::exit(1);
        }
    };
    let root = match load_group(&cli.input, &cli.package, &root_class) {
        Ok(group) => group,
        Err(e) => {
            eprintln!("Error reading icons from '{}': {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };

    let policy = if cli.fail_fast {
        FailurePolicy::FailFast
    } else {
        FailurePolicy::Collect
    };
    let config = GenerateConfig::new()
        .with_collection_name(cli.accessor)
        .with_batch(BatchConfig::new().with_policy(policy).with_parallel(!cli.sequential));
    let config = match (&cli.theme, cli.intellij_theme) {
        (Some(path), _) => match config.with_theme_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading theme '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        (None, true) => config.with_theme(Theme::intellij()),
        (None, false) => config,
    };

    let excludes = cli.exclude;
    let output = match generate(&root, |name| !excludes.iter().any(|x| name.contains(x.as_str())), &config) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for file in &output.files {
        let path = cli.output.join(file.relative_path());
        if let Err(e) = write_file(&path, &file.contents) {
            eprintln!("Error writing '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }

    for failure in &output.failures {
        eprintln!("Error: {}", failure);
        if let IconErrorKind::Parse(source @ SourceError::PathData { .. }) = &failure.kind {
            eprintln!("{}", source.report(&failure.origin));
        }
    }

    println!(
        "Generated {} icons into {} ({} skipped, {} failed)",
        output.generated,
        cli.output.display(),
        output.skipped,
        output.failures.len()
    );
    if !output.failures.is_empty() {
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Read `dir` as a group: `*.toml` files are icons, subdirectories are groups
///
/// Entries are sorted by file name so output does not depend on the platform.
fn load_group(dir: &Path, package: &str, class_name: &str) -> io::Result<IconGroup> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut group = IconGroup::new(package, class_name);
    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let child_package = format!("{}.{}", package, package_segment(name));
            if let Some(sibling) = group.children.iter().find(|c| c.package == child_package) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!(
                        "directory '{}' maps to package '{}', already used by group '{}'",
                        path.display(),
                        child_package,
                        sibling.class_name
                    ),
                ));
            }
            let child = load_group(&path, &child_package, &group_class_name(name))?;
            group.children.push(child);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            let Some(stem) = path.file_stem().and_then(|n| n.to_str()) else {
                continue;
            };
            let icon = IconFile::read(icon_name(stem), &path)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
            group.icons.push(icon);
        }
    }
    tracing::debug!(package, icons = group.icons.len(), children = group.children.len(), "loaded group");
    Ok(group)
}

fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

/// `folder-icon@2x` -> `Folder_icon_2x`
fn icon_name(stem: &str) -> String {
    let mut chars = stem.chars();
    let mut name = String::new();
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name.replace(['@', '-'], "_")
}

/// `tool-window` -> `ToolWindow`
fn group_class_name(dir: &str) -> String {
    dir.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// `tool-window` -> `toolwindow`
fn package_segment(dir: &str) -> String {
    dir.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_name() {
        assert_eq!(icon_name("folder"), "Folder");
        assert_eq!(icon_name("add@2x"), "Add_2x");
        assert_eq!(icon_name("tool-window_dark"), "Tool_window_dark");
    }

    #[test]
    fn test_sibling_directories_sharing_a_package() {
        let root = std::env::temp_dir().join(format!("themed-icons-packages-{}", std::process::id()));
        fs::create_dir_all(root.join("tool-window")).expect("Should create dir");
        fs::create_dir_all(root.join("toolwindow")).expect("Should create dir");

        let err = load_group(&root, "icons", "Icons").unwrap_err();
        fs::remove_dir_all(&root).expect("Should clean up");

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("'icons.toolwindow'"));
    }

    #[test]
    fn test_load_group_reads_icons_and_children() {
        let root = std::env::temp_dir().join(format!("themed-icons-load-{}", std::process::id()));
        fs::create_dir_all(root.join("actions")).expect("Should create dir");
        fs::write(root.join("actions").join("add@2x.toml"), "").expect("Should write icon");
        fs::write(root.join("folder.toml"), "").expect("Should write icon");
        fs::write(root.join("notes.txt"), "").expect("Should write file");

        let group = load_group(&root, "icons", "Icons").expect("Should load");
        fs::remove_dir_all(&root).expect("Should clean up");

        assert_eq!(group.icons.len(), 1);
        assert_eq!(group.icons[0].name, "Folder");
        assert_eq!(group.children[0].package, "icons.actions");
        assert_eq!(group.children[0].class_name, "Actions");
        assert_eq!(group.children[0].icons[0].name, "Add_2x");
        assert!(group.children[0].icons[0].origin.ends_with("add@2x.toml"));
    }

    #[test]
    fn test_group_names() {
        assert_eq!(group_class_name("tool-window"), "ToolWindow");
        assert_eq!(group_class_name("actions"), "Actions");
        assert_eq!(package_segment("Tool-Window"), "toolwindow");
    }
}
