use log::debug;

use super::lexer::{SpannedToken, Token};
use crate::ast::{ConstExpr, ConstantTable, Dictionary, Value};
use crate::error::{ConfigError, ConfigResult, Position};
use crate::interpreter;
use crate::options::ParseOptions;

/// Deepest allowed nesting of arrays, dictionaries and parentheses.
pub const MAX_DEPTH: usize = 256;

/// Most terms allowed in one `a + b + ...` chain.
pub const MAX_CHAIN_TERMS: usize = 1024;

/// Single-pass recursive descent parser.
///
/// Declarations and `$...$` blocks are evaluated as soon as they are
/// recognized, against the constants declared before them.
pub struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    depth: usize,
    options: ParseOptions,
}

impl Parser {
    /// `tokens` must end with `Token::EOF`, as produced by the lexer.
    pub fn new(tokens: Vec<SpannedToken>, options: ParseOptions) -> Self {
        Parser { tokens, pos: 0, depth: 0, options }
    }

    /// Parses the whole document. The last top-level value wins; a document
    /// with only declarations yields an empty dictionary.
    pub fn parse(&mut self, constants: &mut ConstantTable) -> ConfigResult<Value> {
        let mut result: Option<Value> = None;
        while !self.is_at_end() {
            if self.check(&Token::Set) {
                self.parse_const_decl(constants)?;
                continue;
            }
            let start = self.peek().pos;
            let value = self.parse_value(constants)?;
            if let Some(previous) = result.replace(value) {
                debug!("top-level value at {} replaces the {} before it", start, previous.type_name());
            }
        }
        Ok(result.unwrap_or_else(|| Value::Dictionary(Dictionary::new())))
    }

    fn peek(&self) -> &SpannedToken {
        &self.tokens[self.pos]
    }

    fn peek_next(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos + 1)
    }

    fn advance(&mut self) -> SpannedToken {
        let current = self.tokens[self.pos].clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        current
    }

    fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(&self.peek().token) == std::mem::discriminant(token)
    }

    fn is_at_end(&self) -> bool {
        self.peek().token == Token::EOF
    }

    fn consume(&mut self, expected: Token, what: &str) -> ConfigResult<SpannedToken> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(what))
        }
    }

    fn consume_symbol(&mut self, what: &str) -> ConfigResult<(String, Position)> {
        match &self.peek().token {
            Token::Symbol(name) => {
                let name = name.clone();
                let pos = self.advance().pos;
                Ok((name, pos))
            }
            _ => Err(self.error_expected(what)),
        }
    }

    // Arrays, dictionaries and parentheses deeper than MAX_DEPTH are a syntax error.
    fn enter(&mut self) -> ConfigResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(ConfigError::syntax(format!("nesting too deep (limit {})", MAX_DEPTH), self.peek().pos));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn error_expected(&self, what: &str) -> ConfigError {
        let found = self.peek();
        ConfigError::expected(what, &found.token, found.pos)
    }

    /// `+` glued to the digits that follow it, as in `+5`.
    fn signed_plus_literal(&self) -> Option<i64> {
        let plus = self.peek();
        if plus.token != Token::Plus {
            return None;
        }
        match self.peek_next() {
            Some(SpannedToken { token: Token::Integer(n), pos, .. }) if pos.offset == plus.end && *n >= 0 => Some(*n),
            _ => None,
        }
    }

    // --- Declarations ---

    fn parse_const_decl(&mut self, constants: &mut ConstantTable) -> ConfigResult<()> {
        self.advance(); // 'set'
        let (name, _) = self.consume_symbol("a constant name after 'set'")?;
        self.consume(Token::Eq, "'=' after the constant name")?;
        let value = self.parse_value(constants)?;
        self.consume(Token::Semicolon, "';' after the constant value")?;
        constants.declare(name, value);
        Ok(())
    }

    // --- Values ---

    fn parse_value(&mut self, constants: &ConstantTable) -> ConfigResult<Value> {
        if let Some(n) = self.signed_plus_literal() {
            self.advance();
            self.advance();
            return Ok(Value::Integer(n));
        }

        match &self.peek().token {
            Token::Integer(n) => {
                let v = *n;
                self.advance();
                Ok(Value::Integer(v))
            }
            Token::StringLiteral(s) => {
                let v = s.clone();
                self.advance();
                Ok(Value::String(v))
            }
            Token::Symbol(name) => {
                let name = name.clone();
                let pos = self.advance().pos;
                interpreter::resolve_symbol(&name, pos, constants, &self.options)
            }
            Token::LBracket => self.parse_array(constants),
            Token::DictOpen => self.parse_dict(constants),
            Token::Dollar => self.parse_const_expr(constants),
            _ => Err(self.error_expected("a value")),
        }
    }

    fn parse_array(&mut self, constants: &ConstantTable) -> ConfigResult<Value> {
        self.enter()?;
        self.advance(); // '['
        let mut items = Vec::new();
        while !self.check(&Token::RBracket) {
            if self.is_at_end() {
                return Err(self.error_expected("']' to close the array"));
            }
            items.push(self.parse_value(constants)?);
        }
        self.advance(); // ']'
        self.leave();
        Ok(Value::Array(items))
    }

    fn parse_dict(&mut self, constants: &ConstantTable) -> ConfigResult<Value> {
        self.enter()?;
        self.advance(); // '@{'
        let mut dict = Dictionary::new();
        while !self.check(&Token::RBrace) {
            let (key, pos) = self.consume_symbol("a key or '}'")?;
            self.consume(Token::Eq, "'=' after the key")?;
            let value = self.parse_value(constants)?;
            self.consume(Token::Semicolon, "';' after the value")?;
            // Same key again: the later value wins, the key keeps its first slot
            if dict.insert(key.clone(), value).is_some() {
                debug!("duplicate key '{}' at {} overwrites the earlier value", key, pos);
            }
        }
        self.advance(); // '}'
        self.leave();
        Ok(Value::Dictionary(dict))
    }

    fn parse_const_expr(&mut self, constants: &ConstantTable) -> ConfigResult<Value> {
        self.advance(); // '$'
        let expr = self.parse_add_chain(constants)?;
        self.consume(Token::Dollar, "'+' or '$' to close the expression")?;
        interpreter::evaluate(&expr, constants, &self.options)
    }

    // --- Expressions ---

    fn parse_add_chain(&mut self, constants: &ConstantTable) -> ConfigResult<ConstExpr> {
        let mut left = self.parse_term(constants)?;
        let mut terms = 1;
        while self.check(&Token::Plus) {
            if terms >= MAX_CHAIN_TERMS {
                return Err(ConfigError::syntax(format!("expression has more than {} terms", MAX_CHAIN_TERMS), self.peek().pos));
            }
            terms += 1;
            self.advance();
            let right = self.parse_term(constants)?;
            left = ConstExpr::add(left, right);
        }
        Ok(left)
    }

    fn parse_term(&mut self, constants: &ConstantTable) -> ConfigResult<ConstExpr> {
        if let Some(n) = self.signed_plus_literal() {
            self.advance();
            self.advance();
            return Ok(ConstExpr::Literal(Value::Integer(n)));
        }

        match &self.peek().token {
            Token::Integer(n) => {
                let v = *n;
                self.advance();
                Ok(ConstExpr::Literal(Value::Integer(v)))
            }
            Token::StringLiteral(s) => {
                let v = s.clone();
                self.advance();
                Ok(ConstExpr::Literal(Value::String(v)))
            }
            Token::Symbol(_) if matches!(self.peek_next(), Some(t) if t.token == Token::LParen) => {
                self.parse_func_call(constants)
            }
            Token::Symbol(name) => {
                let name = name.clone();
                let pos = self.advance().pos;
                Ok(ConstExpr::var(name, pos))
            }
            Token::LParen => {
                self.enter()?;
                self.advance();
                let expr = self.parse_add_chain(constants)?;
                self.consume(Token::RParen, "')'")?;
                self.leave();
                Ok(expr)
            }
            _ => Err(self.error_expected("a constant name, number, string or '('")),
        }
    }

    fn parse_func_call(&mut self, constants: &ConstantTable) -> ConfigResult<ConstExpr> {
        let (name, pos) = self.consume_symbol("a function name")?;
        self.advance(); // '('

        let arg = match &self.peek().token {
            Token::StringLiteral(s) => {
                let v = s.clone();
                self.advance();
                ConstExpr::Literal(Value::String(v))
            }
            Token::LBracket => ConstExpr::Literal(self.parse_array(constants)?),
            Token::Symbol(arg_name) => {
                let arg_name = arg_name.clone();
                let arg_pos = self.advance().pos;
                ConstExpr::var(arg_name, arg_pos)
            }
            Token::RParen => {
                return Err(ConfigError::syntax(format!("{}() takes exactly one argument, found none", name), self.peek().pos));
            }
            _ => return Err(self.error_expected("a string, array or constant name as the argument")),
        };

        if !self.check(&Token::RParen) {
            if self.is_at_end() {
                return Err(self.error_expected("')'"));
            }
            return Err(ConfigError::syntax(
                format!("{}() takes exactly one argument, found {} after it", name, self.peek().token),
                self.peek().pos,
            ));
        }
        self.advance(); // ')'
        Ok(ConstExpr::call(name, arg, pos))
    }
}
