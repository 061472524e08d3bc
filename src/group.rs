//! Recursive generation of an icon group tree
//!
//! Child groups are generated first so their collection accessors can be
//! concatenated into the parent's.

use crate::accessor::AccessorBuilder;
use crate::batch::{BatchConfig, BatchWriter};
use crate::declaration::NameTable;
use crate::emit::code::fragment;
use crate::emit::{CodeBlock, EmitContext, FileBuilder, SourceFile};
use crate::error::IconError;
use crate::symbols::Symbol;
use crate::vector::{IconFile, VectorParser};
use crate::GenerateError;

/// A group of icons with nested groups, one per input directory
#[derive(Debug, Clone, Default)]
pub struct IconGroup {
    /// Package of the group's generated files
    pub package: String,
    /// Name of the group object the icon accessors extend
    pub class_name: String,
    pub icons: Vec<IconFile>,
    pub children: Vec<IconGroup>,
}

impl IconGroup {
    pub fn new(package: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class_name: class_name.into(),
            icons: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: IconFile) -> Self {
        self.icons.push(icon);
        self
    }

    pub fn with_child(mut self, child: IconGroup) -> Self {
        self.children.push(child);
        self
    }

    pub fn class_symbol(&self) -> Symbol {
        Symbol::new(&self.package, &self.class_name)
    }

    /// Icons in this group and every nested group
    pub fn icon_count(&self) -> usize {
        self.icons.len() + self.children.iter().map(IconGroup::icon_count).sum::<usize>()
    }
}

/// Everything generated for a group and its descendants
#[derive(Debug)]
pub struct GeneratedGroup {
    /// Group object class
    pub handle: Symbol,
    /// Collection accessor of the group
    pub accessor: Symbol,
    /// Files of descendants first, then the group's own
    pub files: Vec<SourceFile>,
    pub failures: Vec<IconError>,
    pub generated: usize,
    pub skipped: usize,
}

pub struct GroupGenerator<'a> {
    parser: &'a dyn VectorParser,
    ctx: EmitContext<'a>,
    batch: &'a BatchConfig,
    collection_name: &'a str,
}

impl<'a> GroupGenerator<'a> {
    pub fn new(
        parser: &'a dyn VectorParser,
        ctx: EmitContext<'a>,
        batch: &'a BatchConfig,
        collection_name: &'a str,
    ) -> Self {
        Self {
            parser,
            ctx,
            batch,
            collection_name,
        }
    }

    /// Generate `group` and all nested groups, sharing one slot table
    pub fn generate<F>(
        &self,
        group: &IconGroup,
        predicate: &F,
        slots: &mut NameTable,
    ) -> Result<GeneratedGroup, GenerateError>
    where
        F: Fn(&str) -> bool,
    {
        let class = group.class_symbol();
        let mut output = GeneratedGroup {
            handle: class.clone(),
            accessor: Symbol::extension(&group.package, self.collection_name),
            files: Vec::new(),
            failures: Vec::new(),
            generated: 0,
            skipped: 0,
        };

        let mut children = Vec::with_capacity(group.children.len());
        for child in &group.children {
            let generated = self.generate(child, predicate, slots)?;
            children.push(generated.handle.clone());
            output.files.extend(generated.files);
            output.failures.extend(generated.failures);
            output.generated += generated.generated;
            output.skipped += generated.skipped;
        }

        let writer = BatchWriter::new(self.parser, self.ctx, self.batch, &group.package, &class);
        let batch = writer.run(&group.icons, predicate, slots)?;
        let handles = batch.handles();
        output.generated += batch.icons.len();
        output.skipped += batch.skipped;
        output.failures.extend(batch.failures);
        output
            .files
            .extend(batch.icons.into_iter().map(|icon| icon.file));

        output.files.push(self.group_object(group)?);

        let accessor = AccessorBuilder::new(&class, self.collection_name, self.ctx.config)
            .build(&handles, &children, slots)
            .map_err(|source| GenerateError::Collision {
                package: group.package.clone(),
                source,
            })?;
        output.accessor = accessor.handle;
        output.files.push(accessor.file);

        tracing::info!(
            group = %class,
            icons = handles.len(),
            children = children.len(),
            "generated group"
        );
        Ok(output)
    }

    /// `public object <Class>` in the group's package
    fn group_object(&self, group: &IconGroup) -> Result<SourceFile, GenerateError> {
        let mut file = FileBuilder::new(&group.package, &group.class_name, &self.ctx.config.indent);
        file.imports_mut()
            .declare(&group.class_name)
            .map_err(|source| GenerateError::Collision {
                package: group.package.clone(),
                source,
            })?;
        let mut line = fragment("public object ");
        line.name(&group.class_name);
        let mut member = CodeBlock::new();
        member.statement(line);
        file.add_member(member);
        Ok(file.build())
    }
}
