//! Per-icon declarations: public accessor, private backing slot, private builder
//!
//! Backing slots are private top-level properties sharing one package per
//! group, and same-named private properties in different files still compete
//! during name resolution. Slot names are therefore allocated from a
//! [`NameTable`] shared by the whole batch.

use std::collections::HashSet;

use crate::emit::code::{fragment, Arg, CodeBlock, Instruction, InstructionKind, TemplateBuilder};
use crate::emit::imports::USER_ALIAS_MARKER;
use crate::emit::{emit_vector, EmitConfig, EmitContext, FileBuilder, SourceFile};
use crate::error::{EmitError, IconErrorKind};
use crate::symbols::{self, Symbol};
use crate::vector::Vector;

/// Reserved marker that starts every backing slot name
pub const SLOT_MARKER: &str = "_";

/// Per-batch allocation table for generated private names
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    taken: HashSet<String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a user-authored name as unavailable for allocation
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_string());
    }

    /// Insert `name` if free; false if it was already taken
    pub fn try_insert(&mut self, name: &str) -> bool {
        self.taken.insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Allocate `base`, or `base2`, `base3`, ... if it is taken
    pub fn allocate(&mut self, base: &str) -> String {
        if self.try_insert(base) {
            return base.to_string();
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{}{}", base, n);
            if self.try_insert(&candidate) {
                tracing::debug!(base, name = %candidate, "name taken, allocated a suffixed one");
                return candidate;
            }
            n += 1;
        }
    }

    /// Allocate the backing slot for an icon
    pub fn allocate_slot(&mut self, icon_name: &str) -> String {
        self.allocate(&slot_base(icon_name))
    }
}

/// `_` followed by the icon name with its first character lower-cased
pub fn slot_base(icon_name: &str) -> String {
    let mut chars = icon_name.chars();
    let mut base = String::from(SLOT_MARKER);
    if let Some(first) = chars.next() {
        base.extend(first.to_lowercase());
        base.push_str(chars.as_str());
    }
    base
}

/// One generated icon declaration
#[derive(Debug, Clone, PartialEq)]
pub struct IconDeclaration {
    pub public_name: String,
    pub backing_slot_name: String,
    /// Private builder function name
    pub builder_name: String,
    /// Body of the builder function
    pub body: CodeBlock,
}

/// Build the declaration for one icon with an already allocated slot
pub fn build_declaration(
    icon_name: &str,
    vector: &Vector,
    backing_slot_name: String,
    ctx: &EmitContext<'_>,
) -> Result<IconDeclaration, EmitError> {
    tracing::debug!(icon = icon_name, slot = %backing_slot_name, "emitting icon");
    let body = emit_vector(icon_name, vector, ctx)?;
    Ok(IconDeclaration {
        public_name: icon_name.to_string(),
        backing_slot_name,
        builder_name: format!("{}{}", icon_name, ctx.config.builder_suffix),
        body,
    })
}

/// Allocate a slot from `slots` and build the declaration
pub fn declare_icon(
    icon_name: &str,
    vector: &Vector,
    slots: &mut NameTable,
    ctx: &EmitContext<'_>,
) -> Result<IconDeclaration, EmitError> {
    slots.reserve(icon_name);
    let slot = slots.allocate_slot(icon_name);
    build_declaration(icon_name, vector, slot, ctx)
}

/// Lazily initialized getter that constructs through `slot` once
pub(crate) fn lazy_getter(slot: &str, annotation: Option<&Symbol>, init: TemplateBuilder) -> CodeBlock {
    let mut getter = CodeBlock::new();
    if let Some(annotation) = annotation {
        let mut line = fragment("@");
        line.type_name(annotation.clone());
        getter.statement(line);
    }
    getter.begin(fragment("get()"));

    let mut check = fragment("if (");
    check.name(slot).text(" != null)");
    getter.begin(check);
    let mut early = fragment("return ");
    early.name(slot).text("!!");
    getter.statement(early);
    getter.end();

    let mut assign = TemplateBuilder::new();
    assign.name(slot).text(" = ").append(init);
    getter.statement(assign);

    let mut ret = fragment("return ");
    ret.name(slot).text("!!");
    getter.statement(ret);
    getter.end();
    getter
}

/// `private var <slot>: <Type>? = null`
pub(crate) fn backing_slot(slot: &str, ty: &TemplateBuilder) -> CodeBlock {
    let mut line = fragment("private var ");
    line.name(slot).text(": ").append(ty.clone()).text("? = null");
    let mut block = CodeBlock::new();
    block.statement(line);
    block
}

impl IconDeclaration {
    /// Symbolic handle other declarations use to reference this icon
    pub fn handle(&self, package: &str) -> Symbol {
        Symbol::new(package, &self.public_name)
    }

    /// Render the icon's source file in `package`, as an extension of `group_class`
    pub fn to_source_file(
        &self,
        package: &str,
        group_class: &Symbol,
        config: &EmitConfig,
    ) -> Result<SourceFile, IconErrorKind> {
        let host = &config.host;
        let mut file = FileBuilder::new(package, &self.public_name, &config.indent);
        {
            let imports = file.imports_mut();
            imports.declare(&self.public_name)?;
            imports.declare(&self.backing_slot_name)?;
            imports.declare(&self.builder_name)?;
            if imports.claim(group_class).is_err() {
                imports.alias(group_class, USER_ALIAS_MARKER);
            }
        }

        let mut accessor = CodeBlock::new();
        accessor.push(Instruction::checked(
            InstructionKind::Statement,
            "public val %T.%N: %T",
            vec![
                Arg::Type(group_class.clone()),
                Arg::Name(self.public_name.clone()),
                Arg::Type(host.icon_type.clone()),
            ],
        )?);
        accessor.indent();
        let mut init = TemplateBuilder::new();
        init.type_name(host.icon_type.clone())
            .text("(imageVector = { ")
            .name(&self.builder_name)
            .text("(it) })");
        accessor.extend(lazy_getter(&self.backing_slot_name, None, init));
        accessor.unindent();
        file.add_member(accessor);

        let mut slot_type = TemplateBuilder::new();
        slot_type.type_name(host.icon_type.clone());
        file.add_member(backing_slot(&self.backing_slot_name, &slot_type));

        let mut builder = CodeBlock::new();
        builder.push(Instruction::checked(
            InstructionKind::Begin,
            "private fun %N(%N: %T): %T",
            vec![
                Arg::Name(self.builder_name.clone()),
                Arg::Name(config.color_scheme_param.clone()),
                Arg::Type(host.colors_type.clone()),
                Arg::Type(symbols::image_vector()),
            ],
        )?);
        builder.extend(self.body.clone());
        builder.end();
        file.add_member(builder);

        Ok(file.build())
    }
}
