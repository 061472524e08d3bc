//! Aggregate "all icons" accessor of a group
//!
//! The collection is the concatenation of every child group's collection, in
//! the given order, followed by `listOf(...)` over the group's own icons.
//!
//! User-authored names are never renamed. A local icon named like the
//! container class is referenced through a `___` alias, and engine symbols
//! whose simple name is taken by an icon are imported through a `____` alias.

use std::collections::HashSet;

use crate::declaration::{backing_slot, lazy_getter, NameTable, SLOT_MARKER};
use crate::emit::code::{fragment, CodeBlock, TemplateBuilder};
use crate::emit::imports::USER_ALIAS_MARKER;
use crate::emit::{EmitConfig, FileBuilder, SourceFile};
use crate::error::NameCollision;
use crate::symbols::{self, Symbol};

/// Rendered accessor of one group
#[derive(Debug, Clone)]
pub struct AccessorDeclaration {
    /// Extension property parent groups reference
    pub handle: Symbol,
    pub backing_slot_name: String,
    pub file: SourceFile,
}

pub struct AccessorBuilder<'a> {
    container: &'a Symbol,
    collection_name: &'a str,
    config: &'a EmitConfig,
}

impl<'a> AccessorBuilder<'a> {
    pub fn new(container: &'a Symbol, collection_name: &'a str, config: &'a EmitConfig) -> Self {
        Self {
            container,
            collection_name,
            config,
        }
    }

    /// Build the accessor over local `icons` and `children` group classes
    pub fn build(
        &self,
        icons: &[Symbol],
        children: &[Symbol],
        slots: &mut NameTable,
    ) -> Result<AccessorDeclaration, NameCollision> {
        let package = self.container.package.as_str();
        let slot = slots.allocate(&format!("{}{}{}", SLOT_MARKER, SLOT_MARKER, self.collection_name));
        let mut file = FileBuilder::new(package, self.collection_name, &self.config.indent);

        {
            let imports = file.imports_mut();
            imports.declare(self.collection_name)?;
            imports.declare(&slot)?;
            imports.claim(self.container)?;

            let mut seen = HashSet::new();
            for icon in icons {
                if !seen.insert(icon.name.as_str()) {
                    return Err(NameCollision::new(
                        &icon.name,
                        format!("is generated twice in {}", package),
                    ));
                }
                if icon.name == self.container.name {
                    imports.alias(icon, USER_ALIAS_MARKER);
                } else {
                    imports.claim(icon)?;
                }
            }

            for child in children {
                if imports.claim(child).is_err() {
                    imports.alias(child, USER_ALIAS_MARKER);
                }
            }
        }

        let mut list_type = TemplateBuilder::new();
        list_type
            .type_name(symbols::list())
            .text("<")
            .type_name(self.config.host.icon_type.clone())
            .text(">");

        file.add_member(backing_slot(&slot, &list_type));

        let mut parts: Vec<TemplateBuilder> = children
            .iter()
            .map(|child| {
                let mut part = TemplateBuilder::new();
                part.type_name(child.clone())
                    .text(".")
                    .member(Symbol::extension(&child.package, self.collection_name));
                part
            })
            .collect();
        let mut local = TemplateBuilder::new();
        local.member(symbols::list_of()).text("(");
        local.join(
            icons
                .iter()
                .map(|icon| {
                    let mut part = TemplateBuilder::new();
                    part.member(icon.clone());
                    part
                })
                .collect(),
            ", ",
        );
        local.text(")");
        parts.push(local);

        let mut init = TemplateBuilder::new();
        init.join(parts, " + ");

        let mut property = CodeBlock::new();
        let mut head = fragment("public val ");
        head.type_name(self.container.clone())
            .text(".")
            .name(self.collection_name)
            .text(": ")
            .append(list_type);
        property.statement(head);
        property.indent();
        property.extend(lazy_getter(&slot, Some(&self.config.host.composable), init));
        property.unindent();
        file.add_member(property);

        tracing::debug!(
            package,
            icons = icons.len(),
            children = children.len(),
            "built collection accessor"
        );

        Ok(AccessorDeclaration {
            handle: Symbol::extension(package, self.collection_name),
            backing_slot_name: slot,
            file: file.build(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build(
        container: &str,
        collection: &str,
        icons: &[&str],
        children: &[Symbol],
    ) -> Result<AccessorDeclaration, NameCollision> {
        let config = EmitConfig::default();
        let container = Symbol::new("org.example.icons", container);
        let icons: Vec<Symbol> = icons
            .iter()
            .map(|name| Symbol::new("org.example.icons", *name))
            .collect();
        AccessorBuilder::new(&container, collection, &config).build(&icons, children, &mut NameTable::new())
    }

    #[test]
    fn test_accessor_file() {
        let children = vec![
            Symbol::new("org.example.icons.actions", "Actions"),
            Symbol::new("org.example.icons.nodes", "Nodes"),
        ];
        let accessor = build("Icons", "AllIcons", &["Folder", "File"], &children).expect("Should build");

        assert_eq!(accessor.backing_slot_name, "__AllIcons");
        assert_eq!(accessor.handle.import_path(), "org.example.icons.AllIcons");
        assert_eq!(
            accessor.file.contents,
            r#"package org.example.icons

import androidx.compose.runtime.Composable
import kotlin.collections.List
import kotlin.collections.listOf
import org.example.icons.actions.Actions
import org.example.icons.actions.AllIcons
import org.example.icons.nodes.AllIcons
import org.example.icons.nodes.Nodes
import org.jetbrains.jewel.icons.IntellijIconData

private var __AllIcons: List<IntellijIconData>? = null

public val Icons.AllIcons: List<IntellijIconData>
    @Composable
    get() {
        if (__AllIcons != null) {
            return __AllIcons!!
        }
        __AllIcons = Actions.AllIcons + Nodes.AllIcons + listOf(Folder, File)
        return __AllIcons!!
    }
"#
        );
    }

    #[test]
    fn test_icon_named_list_keeps_its_name() {
        let accessor = build("AllAssets", "AllIcons", &["List", "Folder"], &[]).expect("Should build");
        let contents = &accessor.file.contents;
        assert!(contents.contains("import kotlin.collections.List as ____List"));
        assert!(contents.contains("public val AllAssets.AllIcons: ____List<IntellijIconData>"));
        assert!(contents.contains("listOf(List, Folder)"));
    }

    #[test]
    fn test_icon_named_like_container_is_aliased() {
        let accessor = build("Icons", "AllIcons", &["Icons", "Folder"], &[]).expect("Should build");
        let contents = &accessor.file.contents;
        assert!(contents.contains("import org.example.icons.Icons as ___Icons"));
        assert!(contents.contains("listOf(___Icons, Folder)"));
    }

    #[test]
    fn test_icon_named_like_collection_is_collision() {
        let err = build("Icons", "AllIcons", &["AllIcons"], &[]).unwrap_err();
        assert_eq!(err.name, "AllIcons");
    }

    #[test]
    fn test_duplicate_icons_are_collision() {
        let err = build("Icons", "AllIcons", &["Folder", "Folder"], &[]).unwrap_err();
        assert_eq!(err.name, "Folder");
    }

    #[test]
    fn test_empty_group() {
        let accessor = build("Icons", "AllIcons", &[], &[]).expect("Should build");
        assert!(accessor.file.contents.contains("__AllIcons = listOf()"));
    }

    #[test]
    fn test_slot_skips_taken_names() {
        let config = EmitConfig::default();
        let container = Symbol::new("icons", "Icons");
        let mut slots = NameTable::new();
        slots.reserve("__AllIcons");
        let accessor = AccessorBuilder::new(&container, "AllIcons", &config)
            .build(&[], &[], &mut slots)
            .expect("Should build");
        assert_eq!(accessor.backing_slot_name, "__AllIcons2");
    }
}
