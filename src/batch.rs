//! Batch writer: one declaration per selected icon
//!
//! Slots are allocated sequentially in filtered order before any icon is
//! built, so the per-icon work is independent and may run on the rayon pool.
//! Results are always reported in filtered order.

use rayon::prelude::*;

use crate::declaration::{build_declaration, IconDeclaration, NameTable};
use crate::emit::{EmitContext, SourceFile};
use crate::error::{IconError, IconErrorKind};
use crate::symbols::Symbol;
use crate::vector::{IconFile, VectorParser};

/// What a batch does when an icon fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort with the first failure in filtered order
    FailFast,
    /// Keep going and report every failure alongside the successes
    #[default]
    Collect,
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub policy: FailurePolicy,
    /// Build icons on the rayon pool
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            policy: FailurePolicy::default(),
            parallel: true,
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// One successfully generated icon
#[derive(Debug, Clone)]
pub struct GeneratedIcon {
    /// Symbolic handle the accessor references
    pub handle: Symbol,
    pub declaration: IconDeclaration,
    pub file: SourceFile,
}

#[derive(Debug, Default)]
pub struct BatchOutput {
    /// Generated icons, in filtered order
    pub icons: Vec<GeneratedIcon>,
    /// Failures, in filtered order (always empty under fail-fast)
    pub failures: Vec<IconError>,
    /// Icons rejected by the predicate
    pub skipped: usize,
}

impl BatchOutput {
    pub fn handles(&self) -> Vec<Symbol> {
        self.icons.iter().map(|icon| icon.handle.clone()).collect()
    }
}

/// Builds the icons of one group
pub struct BatchWriter<'a> {
    parser: &'a dyn VectorParser,
    ctx: EmitContext<'a>,
    config: &'a BatchConfig,
    /// Package of the generated icons
    package: &'a str,
    /// Class the icon accessors extend
    group_class: &'a Symbol,
}

impl<'a> BatchWriter<'a> {
    pub fn new(
        parser: &'a dyn VectorParser,
        ctx: EmitContext<'a>,
        config: &'a BatchConfig,
        package: &'a str,
        group_class: &'a Symbol,
    ) -> Self {
        Self {
            parser,
            ctx,
            config,
            package,
            group_class,
        }
    }

    /// Generate every icon accepted by `predicate`
    ///
    /// Public names of the selected icons are reserved in `slots` before any
    /// backing slot is allocated.
    pub fn run<F>(
        &self,
        icons: &[IconFile],
        predicate: F,
        slots: &mut NameTable,
    ) -> Result<BatchOutput, IconError>
    where
        F: Fn(&str) -> bool,
    {
        let selected: Vec<&IconFile> = icons.iter().filter(|icon| predicate(&icon.name)).collect();
        let skipped = icons.len() - selected.len();
        if skipped > 0 {
            tracing::debug!(package = self.package, skipped, "icons rejected by predicate");
        }

        for icon in &selected {
            slots.reserve(&icon.name);
        }
        let jobs: Vec<(&IconFile, String)> = selected
            .into_iter()
            .map(|icon| (icon, slots.allocate_slot(&icon.name)))
            .collect();

        let results: Vec<Result<GeneratedIcon, IconError>> = if self.config.parallel {
            jobs.into_par_iter()
                .map(|(icon, slot)| self.generate(icon, slot))
                .collect()
        } else {
            match self.config.policy {
                // Stops at the first failure without building the rest
                FailurePolicy::FailFast => {
                    let icons = jobs
                        .into_iter()
                        .map(|(icon, slot)| self.generate(icon, slot))
                        .collect::<Result<Vec<_>, _>>()?;
                    return Ok(self.finish(icons, Vec::new(), skipped));
                }
                FailurePolicy::Collect => jobs
                    .into_iter()
                    .map(|(icon, slot)| self.generate(icon, slot))
                    .collect(),
            }
        };

        let mut generated = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(icon) => generated.push(icon),
                Err(err) if self.config.policy == FailurePolicy::FailFast => return Err(err),
                Err(err) => {
                    tracing::warn!(%err, "icon failed");
                    failures.push(err);
                }
            }
        }
        Ok(self.finish(generated, failures, skipped))
    }

    fn finish(&self, icons: Vec<GeneratedIcon>, failures: Vec<IconError>, skipped: usize) -> BatchOutput {
        tracing::info!(
            package = self.package,
            generated = icons.len(),
            failed = failures.len(),
            skipped,
            "batch finished"
        );
        BatchOutput {
            icons,
            failures,
            skipped,
        }
    }

    fn generate(&self, icon: &IconFile, slot: String) -> Result<GeneratedIcon, IconError> {
        let wrap = |kind: IconErrorKind| IconError::new(&icon.name, kind).with_origin(&icon.origin);
        let vector = self
            .parser
            .parse(icon)
            .map_err(|err| wrap(err.into()))?;
        let declaration =
            build_declaration(&icon.name, &vector, slot, &self.ctx).map_err(|err| wrap(err.into()))?;
        let file = declaration
            .to_source_file(self.package, self.group_class, self.ctx.config)
            .map_err(wrap)?;
        Ok(GeneratedIcon {
            handle: declaration.handle(self.package),
            declaration,
            file,
        })
    }
}
