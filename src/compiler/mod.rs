pub mod lexer;
pub mod parser;

use log::trace;

use crate::ast::{ConstantTable, Value};
use crate::error::ConfigResult;
use crate::options::ParseOptions;
use lexer::Lexer;
use parser::Parser;

/// Source text -> resolved value tree. Every call starts from an empty constant table.
pub fn compile(source: &str, options: &ParseOptions) -> ConfigResult<Value> {
    let mut constants = ConstantTable::new();
    compile_with(source, options, &mut constants)
}

/// Like [`compile`], but leaves the declared constants in `constants` for inspection.
pub fn compile_with(source: &str, options: &ParseOptions, constants: &mut ConstantTable) -> ConfigResult<Value> {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize()?;
    trace!("lexed {} tokens", tokens.len());
    let mut parser = Parser::new(tokens, *options);
    parser.parse(constants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_with_exposes_declared_constants() {
        let mut constants = ConstantTable::new();
        let value = compile_with("set A = 2; set B = $A + 3$;", &ParseOptions::default(), &mut constants).unwrap();
        assert_eq!(value, Value::Dictionary(Default::default()));
        assert_eq!(constants.resolve("B"), Some(&Value::Integer(5)));
    }

    #[test]
    fn each_compile_starts_fresh() {
        let options = ParseOptions::default();
        compile("set A = 1;", &options).unwrap();
        // A from the previous call must not leak into this one
        let value = compile("@{ a = A; }", &options).unwrap();
        assert_eq!(value.get("a"), Some(&Value::from("A")));
    }
}
