//! Error types for path data parsing and code emission

use std::fmt;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::vector::lexer::Token;
use crate::vector::model::NodePath;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A syntax error in SVG path data
#[derive(Error, Debug)]
pub enum PathDataError {
    #[error("path data error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl PathDataError {
    pub fn span(&self) -> &Span {
        match self {
            PathDataError::Syntax { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            PathDataError::Syntax {
                span,
                message,
                expected,
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };

                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(format!("{}{}", message, expected_str))
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8(buf).unwrap_or_else(|_| self.to_string())
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for PathDataError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        PathDataError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

fn format_token(tok: &Token) -> String {
    match tok {
        Token::Command(c) => format!("command '{}'", c),
        Token::Number(n) => format!("number {}", n),
        Token::Error => "unreadable input".to_string(),
    }
}

/// Errors raised while emitting a single icon
#[derive(Debug, Error)]
pub enum EmitError {
    /// A gradient fill with no color stops
    #[error("{kind} at node {node} declares no color stops")]
    MalformedFill { node: NodePath, kind: &'static str },

    /// A fixed template disagrees with its argument list
    #[error("template `{template}` has {placeholders} placeholders but {arguments} arguments")]
    PlaceholderMismatch {
        template: String,
        placeholders: usize,
        arguments: usize,
    },
}

impl EmitError {
    pub fn malformed_fill(node: NodePath, kind: &'static str) -> Self {
        Self::MalformedFill { node, kind }
    }

    /// The offending node, if the error is tied to one
    pub fn node(&self) -> Option<&NodePath> {
        match self {
            Self::MalformedFill { node, .. } => Some(node),
            Self::PlaceholderMismatch { .. } => None,
        }
    }
}

/// An identifier clash that no alias rule can resolve
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("name collision: '{name}' {conflict}")]
pub struct NameCollision {
    pub name: String,
    pub conflict: String,
}

impl NameCollision {
    pub fn new(name: impl Into<String>, conflict: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conflict: conflict.into(),
        }
    }
}

/// What went wrong for a single icon
#[derive(Debug, Error)]
pub enum IconErrorKind {
    #[error("malformed icon: {0}")]
    Emit(#[from] EmitError),

    #[error("parse failure: {0}")]
    Parse(#[from] crate::vector::SourceError),

    #[error("{0}")]
    Collision(#[from] NameCollision),
}

impl IconErrorKind {
    /// Short taxonomy name for reports
    pub fn name(&self) -> &'static str {
        match self {
            IconErrorKind::Emit(EmitError::MalformedFill { .. }) => "MalformedFill",
            IconErrorKind::Emit(EmitError::PlaceholderMismatch { .. }) => "PlaceholderMismatch",
            IconErrorKind::Parse(_) => "ParseFailure",
            IconErrorKind::Collision(_) => "NameCollision",
        }
    }
}

/// A per-icon failure, tagged with the icon it belongs to
#[derive(Debug, Error)]
pub struct IconError {
    pub icon: String,
    /// Where the icon's source came from; the icon name unless set
    pub origin: String,
    #[source]
    pub kind: IconErrorKind,
}

impl IconError {
    pub fn new(icon: impl Into<String>, kind: impl Into<IconErrorKind>) -> Self {
        let icon = icon.into();
        Self {
            origin: icon.clone(),
            icon,
            kind: kind.into(),
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn node(&self) -> Option<&NodePath> {
        match &self.kind {
            IconErrorKind::Emit(e) => e.node(),
            _ => None,
        }
    }
}

impl fmt::Display for IconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "icon '{}'", self.icon)?;
        if let Some(node) = self.node() {
            write!(f, " (node {})", node)?;
        }
        write!(f, " [{}]: {}", self.kind.name(), self.kind)
    }
}
