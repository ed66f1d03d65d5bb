use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::{ConfigError, ConfigResult, Position};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Set,
    Symbol(String), Integer(i64), StringLiteral(String),
    DictOpen, // @{
    RBrace, LBracket, RBracket, LParen, RParen,
    Eq, Semicolon, Dollar, Plus,
    EOF,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Set => write!(f, "'set'"),
            Token::Symbol(s) => write!(f, "symbol '{}'", s),
            Token::Integer(i) => write!(f, "integer {}", i),
            Token::StringLiteral(s) => write!(f, "string '{}'", s),
            Token::DictOpen => write!(f, "'@{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Eq => write!(f, "'='"),
            Token::Semicolon => write!(f, "';'"),
            Token::Dollar => write!(f, "'$'"),
            Token::Plus => write!(f, "'+'"),
            Token::EOF => write!(f, "end of input"),
        }
    }
}

/// A token with the position of its first character and the byte offset just past its last one.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub pos: Position,
    pub end: usize,
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    pos: Position,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { chars: input.chars().peekable(), pos: Position::start() }
    }

    pub fn tokenize(&mut self) -> ConfigResult<Vec<SpannedToken>> {
        let mut tokens = Vec::new();
        while let Some(&c) = self.chars.peek() {
            let start = self.pos;
            let token = match c {
                ' ' | '\t' | '\n' | '\r' | '\x0c' => { self.bump(); continue; }
                '/' => {
                    self.bump();
                    if self.chars.peek() == Some(&'#') {
                        self.bump();
                        self.skip_comment(start)?;
                        continue;
                    }
                    return Err(ConfigError::syntax("unexpected character '/' (comments are written /# ... #/)", start));
                }
                '@' => {
                    self.bump();
                    if self.chars.peek() != Some(&'{') {
                        return Err(ConfigError::syntax("expected '{' after '@'", start));
                    }
                    self.bump();
                    Token::DictOpen
                }
                '}' => { self.bump(); Token::RBrace }
                '[' => { self.bump(); Token::LBracket }
                ']' => { self.bump(); Token::RBracket }
                '(' => { self.bump(); Token::LParen }
                ')' => { self.bump(); Token::RParen }
                '=' => { self.bump(); Token::Eq }
                ';' => { self.bump(); Token::Semicolon }
                '$' => { self.bump(); Token::Dollar }
                // "+5" is folded into an integer by the parser when the two are adjacent
                '+' => { self.bump(); Token::Plus }
                '\'' => self.read_string(start)?,
                '-' => self.read_number(start)?,
                c if c.is_ascii_digit() => self.read_number(start)?,
                c if c.is_ascii_alphabetic() || c == '_' => self.read_identifier(),
                other => {
                    return Err(ConfigError::syntax(format!("unexpected character '{}'", other), start));
                }
            };
            tokens.push(SpannedToken { token, pos: start, end: self.pos.offset });
        }
        tokens.push(SpannedToken { token: Token::EOF, pos: self.pos, end: self.pos.offset });
        Ok(tokens)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.pos.offset += c.len_utf8();
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Some(c)
    }

    // Shortest span: stops at the first "#/" after the opener.
    fn skip_comment(&mut self, start: Position) -> ConfigResult<()> {
        while let Some(c) = self.bump() {
            if c == '#' && self.chars.peek() == Some(&'/') {
                self.bump();
                return Ok(());
            }
        }
        Err(ConfigError::syntax("unterminated comment", start))
    }

    fn read_string(&mut self, start: Position) -> ConfigResult<Token> {
        self.bump();
        let mut s = String::new();
        while let Some(c) = self.bump() {
            if c == '\'' {
                return Ok(Token::StringLiteral(s));
            }
            s.push(c);
        }
        Err(ConfigError::syntax("unterminated string", start))
    }

    fn read_number(&mut self, start: Position) -> ConfigResult<Token> {
        let mut s = String::new();
        if self.chars.peek() == Some(&'-') {
            s.push('-');
            self.bump();
        }
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() { break; }
            s.push(c);
            self.bump();
        }
        if s == "-" {
            return Err(ConfigError::syntax("'-' must be followed by digits", start));
        }
        s.parse::<i64>()
            .map(Token::Integer)
            .map_err(|_| ConfigError::syntax(format!("integer literal {} is out of range", s), start))
    }

    fn read_identifier(&mut self) -> Token {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_') { break; }
            s.push(c);
            self.bump();
        }
        match s.as_str() {
            "set" => Token::Set,
            _ => Token::Symbol(s),
        }
    }
}
