//! Vector model and its TOML/path-data source format

mod grammar;
pub mod lexer;
pub mod model;
pub mod source;

pub use grammar::parse_path_data;
pub use model::*;
pub use source::{parse_vector, IconFile, SourceError, TomlVectorParser, VectorParser};
