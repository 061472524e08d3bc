//! Emission instructions and the builder that keeps template and arguments in step
//!
//! A template is host-language text with positional placeholders:
//! `%M` member, `%T` type, `%N` name, `%S` string literal, and `%%` for a
//! literal percent sign. Every instruction carries exactly one argument per
//! placeholder, of the matching kind.

use crate::error::EmitError;
use crate::symbols::Symbol;

/// A positional argument of an instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Member(Symbol),
    Type(Symbol),
    Name(String),
    Str(String),
}

impl Arg {
    /// The placeholder token this argument fills
    pub fn placeholder(&self) -> &'static str {
        match self {
            Arg::Member(_) => "%M",
            Arg::Type(_) => "%T",
            Arg::Name(_) => "%N",
            Arg::Str(_) => "%S",
        }
    }

    fn accepts(&self, marker: char) -> bool {
        matches!(
            (self, marker),
            (Arg::Member(_), 'M') | (Arg::Type(_), 'T') | (Arg::Name(_), 'N') | (Arg::Str(_), 'S')
        )
    }

    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Arg::Member(s) | Arg::Type(s) => Some(s),
            Arg::Name(_) | Arg::Str(_) => None,
        }
    }
}

/// Placeholder markers of a template, in order
pub fn placeholders(template: &str) -> Vec<char> {
    let mut markers = Vec::new();
    let mut chars = template.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        match chars.next() {
            Some('%') | None => {}
            Some(marker) => markers.push(marker),
        }
    }
    markers
}

/// Number of positional placeholders in a template
pub fn count_placeholders(template: &str) -> usize {
    placeholders(template).len()
}

/// How an instruction shapes the block structure of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionKind {
    /// A single line
    Statement,
    /// A line opening a `{` block
    Begin,
    /// Closes the innermost block; the template is appended after `}`
    End,
    /// Indents following lines without a brace
    Indent,
    Unindent,
    /// An empty line
    Blank,
}

/// One emission instruction: a template and its positional arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub kind: InstructionKind,
    template: String,
    args: Vec<Arg>,
}

impl Instruction {
    /// Build an instruction from a fixed template, checking it against its arguments
    pub fn checked(kind: InstructionKind, template: &str, args: Vec<Arg>) -> Result<Self, EmitError> {
        let markers = placeholders(template);
        let agrees = markers.len() == args.len()
            && markers.iter().zip(&args).all(|(m, a)| a.accepts(*m));
        if !agrees {
            return Err(EmitError::PlaceholderMismatch {
                template: template.to_string(),
                placeholders: markers.len(),
                arguments: args.len(),
            });
        }
        Ok(Self {
            kind,
            template: template.to_string(),
            args,
        })
    }

    fn structural(kind: InstructionKind) -> Self {
        Self {
            kind,
            template: String::new(),
            args: Vec::new(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }
}

/// Append-only builder for one template and its arguments
///
/// Text and arguments are only ever appended together, so the placeholder
/// count of the template always equals the argument count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateBuilder {
    template: String,
    args: Vec<Arg>,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal text; `%` is escaped
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.template.push_str(&text.replace('%', "%%"));
        self
    }

    /// Append a placeholder together with the argument that fills it
    pub fn arg(&mut self, arg: Arg) -> &mut Self {
        self.template.push_str(arg.placeholder());
        self.args.push(arg);
        self
    }

    pub fn member(&mut self, symbol: Symbol) -> &mut Self {
        self.arg(Arg::Member(symbol))
    }

    pub fn type_name(&mut self, symbol: Symbol) -> &mut Self {
        self.arg(Arg::Type(symbol))
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.arg(Arg::Name(name.into()))
    }

    pub fn string(&mut self, value: impl Into<String>) -> &mut Self {
        self.arg(Arg::Str(value.into()))
    }

    /// Append another fragment with its arguments
    pub fn append(&mut self, fragment: TemplateBuilder) -> &mut Self {
        self.template.push_str(&fragment.template);
        self.args.extend(fragment.args);
        self
    }

    /// Append fragments separated by literal text
    pub fn join(&mut self, fragments: Vec<TemplateBuilder>, separator: &str) -> &mut Self {
        for (i, fragment) in fragments.into_iter().enumerate() {
            if i > 0 {
                self.text(separator);
            }
            self.append(fragment);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.template.is_empty()
    }

    pub fn build(self, kind: InstructionKind) -> Instruction {
        Instruction {
            kind,
            template: self.template,
            args: self.args,
        }
    }
}

/// Ordered sequence of instructions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeBlock {
    instructions: Vec<Instruction>,
}

impl CodeBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    pub fn statement(&mut self, template: TemplateBuilder) -> &mut Self {
        self.push(template.build(InstructionKind::Statement))
    }

    pub fn begin(&mut self, template: TemplateBuilder) -> &mut Self {
        self.push(template.build(InstructionKind::Begin))
    }

    /// Close the innermost block
    pub fn end(&mut self) -> &mut Self {
        self.push(Instruction::structural(InstructionKind::End))
    }

    /// Close the innermost block with trailing text, e.g. `}.build()`
    pub fn end_with(&mut self, suffix: TemplateBuilder) -> &mut Self {
        self.push(suffix.build(InstructionKind::End))
    }

    pub fn indent(&mut self) -> &mut Self {
        self.push(Instruction::structural(InstructionKind::Indent))
    }

    pub fn unindent(&mut self) -> &mut Self {
        self.push(Instruction::structural(InstructionKind::Unindent))
    }

    pub fn blank(&mut self) -> &mut Self {
        self.push(Instruction::structural(InstructionKind::Blank))
    }

    pub fn extend(&mut self, other: CodeBlock) -> &mut Self {
        self.instructions.extend(other.instructions);
        self
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Every symbol referenced by the block, in order of first use
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut seen = Vec::new();
        for symbol in self
            .instructions
            .iter()
            .flat_map(|i| i.args.iter())
            .filter_map(Arg::symbol)
        {
            if !seen.contains(&symbol) {
                seen.push(symbol);
            }
        }
        seen
    }
}

/// Float literal in host syntax without the `f` suffix (`1.0`, `0.5`)
pub fn float(value: f32) -> String {
    let text = format!("{:?}", value);
    if text.contains(['.', 'e', 'E']) || !value.is_finite() {
        text
    } else {
        format!("{}.0", text)
    }
}

/// Float literal with the host float suffix (`1.0f`)
pub fn float_literal(value: f32) -> String {
    format!("{}f", float(value))
}

/// A fragment starting with literal text
pub fn fragment(text: &str) -> TemplateBuilder {
    let mut builder = TemplateBuilder::new();
    builder.text(text);
    builder
}
