use super::value::Value;
use crate::error::Position;

/// Expression tree of a `$...$` block, alive only until it is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstExpr {
    Literal(Value),
    VariableRef { name: String, pos: Position },
    Add(Box<ConstExpr>, Box<ConstExpr>),
    FuncCall { name: String, arg: Box<ConstExpr>, pos: Position },
}

impl ConstExpr {
    pub fn var(name: impl Into<String>, pos: Position) -> Self {
        ConstExpr::VariableRef { name: name.into(), pos }
    }

    pub fn add(left: ConstExpr, right: ConstExpr) -> Self {
        ConstExpr::Add(Box::new(left), Box::new(right))
    }

    pub fn call(name: impl Into<String>, arg: ConstExpr, pos: Position) -> Self {
        ConstExpr::FuncCall { name: name.into(), arg: Box::new(arg), pos }
    }
}
