use log::trace;

use crate::ast::{ConstExpr, ConstantTable, Value};
use crate::error::{ConfigError, ConfigResult, Position};
use crate::options::ParseOptions;

/// Resolves a symbol against the constants declared so far.
///
/// Outside strict mode an undeclared symbol stands for its own name.
pub fn resolve_symbol(name: &str, pos: Position, constants: &ConstantTable, options: &ParseOptions) -> ConfigResult<Value> {
    match constants.resolve(name) {
        Some(v) => Ok(v.clone()),
        None if options.strict => Err(ConfigError::unknown_variable(name, Some(pos))),
        None => {
            trace!("'{}' is not a constant, using it as a string", name);
            Ok(Value::String(name.to_string()))
        }
    }
}

/// Reduces an expression tree to a value.
pub fn evaluate(expr: &ConstExpr, constants: &ConstantTable, options: &ParseOptions) -> ConfigResult<Value> {
    match expr {
        ConstExpr::Literal(v) => Ok(v.clone()),
        ConstExpr::VariableRef { name, pos } => resolve_symbol(name, *pos, constants, options),

        ConstExpr::Add(left, right) => {
            let l = evaluate(left, constants, options)?;
            let r = evaluate(right, constants, options)?;
            add(l, r, expr_position(left))
        }

        ConstExpr::FuncCall { name, arg, pos } => {
            let func = builtin(name).ok_or_else(|| ConfigError::unknown_function(name, Some(*pos)))?;
            let arg = evaluate(arg, constants, options)?;
            func(arg, *pos)
        }
    }
}

fn add(left: Value, right: Value, pos: Option<Position>) -> ConfigResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a
            .checked_add(b)
            .map(Value::Integer)
            .ok_or_else(|| ConfigError::unsupported(format!("integer overflow in {} + {}", a, b), pos)),
        (l @ Value::String(_), r) | (l, r @ Value::String(_)) => match (l.scalar_text(), r.scalar_text()) {
            (Some(a), Some(b)) => Ok(Value::String(a + &b)),
            _ => Err(non_scalar(&l, &r, pos)),
        },
        (l, r) => Err(non_scalar(&l, &r, pos)),
    }
}

fn non_scalar(left: &Value, right: &Value, pos: Option<Position>) -> ConfigError {
    ConfigError::unsupported(
        format!("cannot add non-scalar ({} + {})", left.type_name(), right.type_name()),
        pos,
    )
}

// Literals carry no position of their own; the nearest reference or call does.
fn expr_position(expr: &ConstExpr) -> Option<Position> {
    match expr {
        ConstExpr::Literal(_) => None,
        ConstExpr::VariableRef { pos, .. } | ConstExpr::FuncCall { pos, .. } => Some(*pos),
        ConstExpr::Add(left, right) => expr_position(left).or_else(|| expr_position(right)),
    }
}

// --- Built-ins ---

type Builtin = fn(Value, Position) -> ConfigResult<Value>;

fn builtin(name: &str) -> Option<Builtin> {
    match name {
        "len" => Some(len),
        _ => None,
    }
}

fn len(arg: Value, pos: Position) -> ConfigResult<Value> {
    let count = match &arg {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        other => {
            return Err(ConfigError::unsupported(format!("len() cannot be applied to {}", other.type_name()), Some(pos)));
        }
    };
    i64::try_from(count)
        .map(Value::Integer)
        .map_err(|_| ConfigError::unsupported("len() result does not fit in an integer", Some(pos)))
}
