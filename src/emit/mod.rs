//! Code emission engine
//!
//! The tree emitter walks a [`Vector`](crate::vector::Vector) and produces a
//! [`CodeBlock`] of instructions; [`FileBuilder`] renders blocks into source
//! files, resolving every symbol through a per-file [`ImportTable`].

pub mod code;
pub mod config;
pub mod file;
pub mod imports;
pub mod path;
pub mod tree;

pub use code::{Arg, CodeBlock, Instruction, InstructionKind, TemplateBuilder};
pub use config::EmitConfig;
pub use file::{FileBuilder, SourceFile};
pub use imports::ImportTable;
pub use tree::{emit_node, emit_nodes, emit_vector};

use crate::theme::Theme;

/// Read-only inputs shared by every emission call for one icon
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    pub theme: &'a Theme,
    pub config: &'a EmitConfig,
}

impl<'a> EmitContext<'a> {
    pub fn new(theme: &'a Theme, config: &'a EmitConfig) -> Self {
        Self { theme, config }
    }
}
