//! Per-file import table with scoped simple-name lookup
//!
//! Every simple name visible in a generated file has exactly one owner.
//! User-authored names claim their name and are never renamed; engine symbols
//! that arrive later under a taken name are imported through an alias.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::NameCollision;
use crate::symbols::Symbol;

/// Marker prepended to aliases of generic engine symbols (`____List`)
pub const ENGINE_ALIAS_MARKER: &str = "____";
/// Marker prepended to aliases of user-authored references (`___Icons`)
pub const USER_ALIAS_MARKER: &str = "___";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Owner {
    /// Declared in this file
    Declared,
    /// Imported (or same-package) symbol, by import path
    Symbol(String),
}

#[derive(Debug, Clone)]
pub struct ImportTable {
    package: String,
    owners: BTreeMap<String, Owner>,
    /// import path -> alias
    aliases: BTreeMap<String, String>,
    extensions: BTreeSet<String>,
}

impl ImportTable {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            owners: BTreeMap::new(),
            aliases: BTreeMap::new(),
            extensions: BTreeSet::new(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Whether a simple name is already visible in this file
    pub fn is_taken(&self, name: &str) -> bool {
        self.owners.contains_key(name) || self.aliases.values().any(|a| a == name)
    }

    /// Claim a name declared by this file
    pub fn declare(&mut self, name: &str) -> Result<(), NameCollision> {
        match self.owners.get(name) {
            None if !self.is_taken(name) => {
                self.owners.insert(name.to_string(), Owner::Declared);
                Ok(())
            }
            Some(Owner::Declared) => Err(NameCollision::new(name, "is declared twice in the same file")),
            _ => Err(NameCollision::new(name, "clashes with a referenced declaration")),
        }
    }

    /// Claim the simple name of a user-authored symbol
    pub fn claim(&mut self, symbol: &Symbol) -> Result<(), NameCollision> {
        let path = symbol.import_path();
        let name = symbol.import_name();
        match self.owners.get(name) {
            Some(Owner::Symbol(owner)) if *owner == path => Ok(()),
            Some(Owner::Declared) => Err(NameCollision::new(
                name,
                format!("is declared in this file and also referenced as {}", path),
            )),
            Some(Owner::Symbol(owner)) => Err(NameCollision::new(
                name,
                format!("refers to both {} and {}", owner, path),
            )),
            None if self.is_taken(name) => Err(NameCollision::new(
                name,
                "is already used as an import alias",
            )),
            None => {
                self.owners.insert(name.to_string(), Owner::Symbol(path));
                Ok(())
            }
        }
    }

    /// Reference a symbol through an alias built from `marker`
    pub fn alias(&mut self, symbol: &Symbol, marker: &str) -> String {
        let path = symbol.import_path();
        if let Some(alias) = self.aliases.get(&path) {
            return alias.clone();
        }
        let mut alias = format!("{}{}", marker, symbol.import_name());
        while self.is_taken(&alias) {
            alias.insert(0, '_');
        }
        self.aliases.insert(path, alias.clone());
        alias
    }

    /// Import an engine symbol, aliasing it if its simple name is taken
    pub fn import(&mut self, symbol: &Symbol) -> String {
        if symbol.extension {
            self.extensions.insert(symbol.import_path());
            return symbol.name.clone();
        }
        let path = symbol.import_path();
        if let Some(alias) = self.aliases.get(&path) {
            return alias.clone();
        }
        match self.owners.get(symbol.import_name()) {
            Some(Owner::Symbol(owner)) if *owner == path => symbol.import_name().to_string(),
            None if !self.is_taken(symbol.import_name()) => {
                self.owners
                    .insert(symbol.import_name().to_string(), Owner::Symbol(path));
                symbol.import_name().to_string()
            }
            _ => {
                let alias = self.alias(symbol, ENGINE_ALIAS_MARKER);
                tracing::debug!(symbol = %symbol, %alias, "aliased engine symbol");
                alias
            }
        }
    }

    /// Spelling of a symbol in this file
    ///
    /// Symbols never registered are spelled by their simple name.
    pub fn resolve(&self, symbol: &Symbol) -> String {
        if symbol.extension {
            return symbol.name.clone();
        }
        let head = self
            .aliases
            .get(&symbol.import_path())
            .cloned()
            .unwrap_or_else(|| symbol.import_name().to_string());
        match &symbol.enclosing {
            Some(_) => format!("{}.{}", head, symbol.name),
            None => head,
        }
    }

    /// Sorted import lines
    pub fn lines(&self) -> Vec<String> {
        let mut lines = BTreeSet::new();
        for owner in self.owners.values() {
            if let Owner::Symbol(path) = owner {
                if self.needs_import(path) {
                    lines.insert(format!("import {}", path));
                }
            }
        }
        for (path, alias) in &self.aliases {
            lines.insert(format!("import {} as {}", path, alias));
        }
        for path in &self.extensions {
            if self.needs_import(path) {
                lines.insert(format!("import {}", path));
            }
        }
        lines.into_iter().collect()
    }

    fn needs_import(&self, path: &str) -> bool {
        match path.rsplit_once('.') {
            Some((package, _)) => package != self.package,
            None => false,
        }
    }
}
