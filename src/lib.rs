pub mod ast;
pub mod compiler;
pub mod error;
pub mod interpreter;
pub mod json;
pub mod options;

pub use ast::{ConstantTable, Dictionary, Value};
pub use error::{ConfigError, ConfigResult, ErrorKind, Position};
pub use options::{ParseOptions, ProjectConfig};

/// Parses a configuration document with the default (permissive) options.
pub fn parse_config(source: &str) -> ConfigResult<Value> {
    compiler::compile(source, &ParseOptions::default())
}

pub fn parse_config_with(source: &str, options: &ParseOptions) -> ConfigResult<Value> {
    compiler::compile(source, options)
}
