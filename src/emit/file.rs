//! Source text generation from instructions

use super::code::{Arg, CodeBlock, Instruction, InstructionKind};
use super::imports::ImportTable;

/// A rendered source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub package: String,
    /// File name without extension
    pub file_name: String,
    pub contents: String,
}

impl SourceFile {
    /// Path of the file relative to a source root (`a/b/Name.kt`)
    pub fn relative_path(&self) -> std::path::PathBuf {
        let mut path: std::path::PathBuf = self.package.split('.').filter(|s| !s.is_empty()).collect();
        path.push(format!("{}.kt", self.file_name));
        path
    }
}

/// Build one source file: a package, its imports and a body
pub struct FileBuilder {
    file_name: String,
    imports: ImportTable,
    body: CodeBlock,
    indent: String,
}

impl FileBuilder {
    pub fn new(package: impl Into<String>, file_name: impl Into<String>, indent: &str) -> Self {
        Self {
            file_name: file_name.into(),
            imports: ImportTable::new(package),
            body: CodeBlock::new(),
            indent: indent.to_string(),
        }
    }

    /// Import table, for claiming user names before the body is rendered
    pub fn imports_mut(&mut self) -> &mut ImportTable {
        &mut self.imports
    }

    /// Append a top-level member, separated from the previous one by a blank line
    pub fn add_member(&mut self, member: CodeBlock) -> &mut Self {
        if !self.body.is_empty() {
            self.body.blank();
        }
        self.body.extend(member);
        self
    }

    pub fn build(mut self) -> SourceFile {
        for symbol in self.body.symbols() {
            self.imports.import(symbol);
        }

        let mut contents = String::new();
        if !self.imports.package().is_empty() {
            contents.push_str(&format!("package {}\n\n", self.imports.package()));
        }
        let lines = self.imports.lines();
        if !lines.is_empty() {
            for line in lines {
                contents.push_str(&line);
                contents.push('\n');
            }
            contents.push('\n');
        }
        contents.push_str(&render_block(&self.body, &self.imports, &self.indent));

        SourceFile {
            package: self.imports.package().to_string(),
            file_name: self.file_name,
            contents,
        }
    }
}

/// Render a block with the spelling decided by `imports`
pub fn render_block(block: &CodeBlock, imports: &ImportTable, indent: &str) -> String {
    let mut out = String::new();
    let mut level = 0usize;

    for instruction in block.instructions() {
        match instruction.kind {
            InstructionKind::Statement => {
                out.push_str(&indent.repeat(level));
                out.push_str(&render_template(instruction, imports));
                out.push('\n');
            }
            InstructionKind::Begin => {
                out.push_str(&indent.repeat(level));
                let head = render_template(instruction, imports);
                if !head.is_empty() {
                    out.push_str(&head);
                    out.push(' ');
                }
                out.push_str("{\n");
                level += 1;
            }
            InstructionKind::End => {
                level = level.saturating_sub(1);
                out.push_str(&indent.repeat(level));
                out.push('}');
                out.push_str(&render_template(instruction, imports));
                out.push('\n');
            }
            InstructionKind::Indent => level += 1,
            InstructionKind::Unindent => level = level.saturating_sub(1),
            InstructionKind::Blank => out.push('\n'),
        }
    }

    out
}

/// Substitute an instruction's arguments into its template
pub fn render_template(instruction: &Instruction, imports: &ImportTable) -> String {
    let mut out = String::new();
    let mut args = instruction.args().iter();
    let mut chars = instruction.template().chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some(_) => match args.next() {
                Some(Arg::Member(symbol)) | Some(Arg::Type(symbol)) => {
                    out.push_str(&imports.resolve(symbol))
                }
                Some(Arg::Name(name)) => out.push_str(name),
                Some(Arg::Str(value)) => out.push_str(&string_literal(value)),
                None => {}
            },
            None => out.push('%'),
        }
    }

    out
}

/// Quote a host string literal
fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
