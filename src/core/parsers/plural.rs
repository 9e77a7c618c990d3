//! `Plural-Forms` header parsing and evaluation.
//!
//! The plural expression is the C subset gettext uses: the variable `n`,
//! unsigned integer literals, `!`, `* / %`, `+ -`, `< <= > >=`, `== !=`,
//! `&&`, `||`, the ternary `?:` and parentheses. Arithmetic wraps, and
//! division or modulo by zero evaluates to 0 instead of trapping.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::error::MoError;

static NPLURALS_RE: OnceLock<Regex> = OnceLock::new();
static PLURAL_RE: OnceLock<Regex> = OnceLock::new();

fn nplurals_re() -> &'static Regex {
    NPLURALS_RE.get_or_init(|| Regex::new(r"nplurals\s*=\s*(\d+)").expect("valid regex"))
}

fn plural_re() -> &'static Regex {
    PLURAL_RE.get_or_init(|| Regex::new(r"plural\s*=\s*([^;]+)").expect("valid regex"))
}

/// Number of plural forms plus the expression that selects one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralRule {
    pub nplurals: usize,
    pub expr: PluralExpr,
}

impl PluralRule {
    /// The rule GNU gettext assumes when a catalog has no `Plural-Forms`: `n != 1`.
    pub fn germanic() -> Self {
        Self {
            nplurals: 2,
            expr: PluralExpr::Binary(
                BinOp::Ne,
                Box::new(PluralExpr::N),
                Box::new(PluralExpr::Const(1)),
            ),
        }
    }

    /// Parse a header value such as `nplurals=2; plural=(n != 1);`.
    pub fn parse(header: &str) -> Result<Self, MoError> {
        let nplurals = nplurals_re()
            .captures(header)
            .and_then(|c| c[1].parse::<usize>().ok())
            .ok_or_else(|| MoError::PluralForms(format!("missing nplurals in '{}'", header)))?;
        let source = plural_re()
            .captures(header)
            .map(|c| c[1].trim().to_string())
            .ok_or_else(|| MoError::PluralForms(format!("missing plural in '{}'", header)))?;
        let expr = PluralExpr::parse(&source).map_err(MoError::PluralForms)?;
        Ok(Self { nplurals, expr })
    }

    pub fn select(&self, n: u64) -> usize {
        usize::try_from(self.expr.evaluate(n)).unwrap_or(usize::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluralExpr {
    N,
    Const(u64),
    Not(Box<PluralExpr>),
    Binary(BinOp, Box<PluralExpr>, Box<PluralExpr>),
    Ternary(Box<PluralExpr>, Box<PluralExpr>, Box<PluralExpr>),
}

impl PluralExpr {
    pub fn parse(source: &str) -> Result<Self, String> {
        let tokens = tokenize(source)?;
        let mut parser = ExprParser { tokens, pos: 0 };
        let expr = parser.ternary()?;
        match parser.peek() {
            None => Ok(expr),
            Some(token) => Err(format!("unexpected '{}' in '{}'", token, source)),
        }
    }

    pub fn evaluate(&self, n: u64) -> u64 {
        match self {
            PluralExpr::N => n,
            PluralExpr::Const(value) => *value,
            PluralExpr::Not(inner) => u64::from(inner.evaluate(n) == 0),
            PluralExpr::Ternary(cond, then, otherwise) => {
                if cond.evaluate(n) != 0 {
                    then.evaluate(n)
                } else {
                    otherwise.evaluate(n)
                }
            }
            PluralExpr::Binary(op, lhs, rhs) => {
                let a = lhs.evaluate(n);
                // Short-circuit before touching the right-hand side.
                match op {
                    BinOp::And if a == 0 => return 0,
                    BinOp::Or if a != 0 => return 1,
                    _ => {}
                }
                let b = rhs.evaluate(n);
                match op {
                    BinOp::Mul => a.wrapping_mul(b),
                    BinOp::Div => a.checked_div(b).unwrap_or(0),
                    BinOp::Rem => a.checked_rem(b).unwrap_or(0),
                    BinOp::Add => a.wrapping_add(b),
                    BinOp::Sub => a.wrapping_sub(b),
                    BinOp::Lt => u64::from(a < b),
                    BinOp::Le => u64::from(a <= b),
                    BinOp::Gt => u64::from(a > b),
                    BinOp::Ge => u64::from(a >= b),
                    BinOp::Eq => u64::from(a == b),
                    BinOp::Ne => u64::from(a != b),
                    BinOp::And | BinOp::Or => u64::from(b != 0),
                }
            }
        }
    }
}

// ============================================================
// Tokenizer
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    N,
    Num(u64),
    Op(&'static str),
    LParen,
    RParen,
    Question,
    Colon,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::N => write!(f, "n"),
            Token::Num(value) => write!(f, "{}", value),
            Token::Op(op) => write!(f, "{}", op),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Question => write!(f, "?"),
            Token::Colon => write!(f, ":"),
        }
    }
}

const OPERATORS: &[&str] = &[
    "||", "&&", "==", "!=", "<=", ">=", "<", ">", "+", "-", "*", "/", "%", "!",
];

fn tokenize(source: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut rest = source;

    while let Some(c) = rest.chars().next() {
        if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
            continue;
        }
        if c.is_ascii_digit() {
            let end = rest
                .find(|ch: char| !ch.is_ascii_digit())
                .unwrap_or(rest.len());
            let value = rest[..end]
                .parse::<u64>()
                .map_err(|e| format!("bad number '{}': {}", &rest[..end], e))?;
            tokens.push(Token::Num(value));
            rest = &rest[end..];
            continue;
        }
        let single = match c {
            'n' => Some(Token::N),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '?' => Some(Token::Question),
            ':' => Some(Token::Colon),
            _ => None,
        };
        if let Some(token) = single {
            tokens.push(token);
            rest = &rest[1..];
            continue;
        }
        match OPERATORS.iter().copied().find(|op| rest.starts_with(op)) {
            Some(op) => {
                tokens.push(Token::Op(op));
                rest = &rest[op.len()..];
            }
            None => return Err(format!("unexpected character '{}' in '{}'", c, source)),
        }
    }

    Ok(tokens)
}

// ============================================================
// Recursive descent parser (C precedence, lowest first)
// ============================================================

struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat_op(&mut self, ops: &[&'static str]) -> Option<&'static str> {
        if let Some(Token::Op(op)) = self.peek()
            && ops.contains(op)
        {
            let op = *op;
            self.pos += 1;
            return Some(op);
        }
        None
    }

    fn expect(&mut self, expected: Token) -> Result<(), String> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(format!("expected '{}', found '{}'", expected, token)),
            None => Err(format!("expected '{}', found end of expression", expected)),
        }
    }

    fn ternary(&mut self) -> Result<PluralExpr, String> {
        let cond = self.binary(0)?;
        if self.peek() == Some(&Token::Question) {
            self.pos += 1;
            let then = self.ternary()?;
            self.expect(Token::Colon)?;
            let otherwise = self.ternary()?;
            return Ok(PluralExpr::Ternary(
                Box::new(cond),
                Box::new(then),
                Box::new(otherwise),
            ));
        }
        Ok(cond)
    }

    /// Left-associative binary operators, one precedence level per slot.
    fn binary(&mut self, level: usize) -> Result<PluralExpr, String> {
        const LEVELS: &[&[&str]] = &[
            &["||"],
            &["&&"],
            &["==", "!="],
            &["<", "<=", ">", ">="],
            &["+", "-"],
            &["*", "/", "%"],
        ];

        let Some(ops) = LEVELS.get(level) else {
            return self.unary();
        };

        let mut lhs = self.binary(level + 1)?;
        while let Some(op) = self.eat_op(ops) {
            let rhs = self.binary(level + 1)?;
            lhs = PluralExpr::Binary(bin_op(op), Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<PluralExpr, String> {
        if self.eat_op(&["!"]).is_some() {
            return Ok(PluralExpr::Not(Box::new(self.unary()?)));
        }
        match self.next() {
            Some(Token::N) => Ok(PluralExpr::N),
            Some(Token::Num(value)) => Ok(PluralExpr::Const(value)),
            Some(Token::LParen) => {
                let inner = self.ternary()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(token) => Err(format!("unexpected '{}'", token)),
            None => Err("unexpected end of expression".to_string()),
        }
    }
}

fn bin_op(op: &str) -> BinOp {
    match op {
        "*" => BinOp::Mul,
        "/" => BinOp::Div,
        "%" => BinOp::Rem,
        "+" => BinOp::Add,
        "-" => BinOp::Sub,
        "<" => BinOp::Lt,
        "<=" => BinOp::Le,
        ">" => BinOp::Gt,
        ">=" => BinOp::Ge,
        "==" => BinOp::Eq,
        "!=" => BinOp::Ne,
        "&&" => BinOp::And,
        _ => BinOp::Or,
    }
}
