//! Token types and the extended token set of the expression grammar.

use std::fmt;

/// The kind of a lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    Or,
    And,
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
    Ne,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Number,
    Variable,
    Pi,
    E,
    Abs,
    Sqrt,
    Exp,
    Ln,
    Log,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    /// Implicit multiplication, kept distinct from `Star` so the emitter can
    /// render it with no operator character.
    ImpMul,
    Eof,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Or => "|",
            Self::And => "&",
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Ne => "<>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Caret => "^",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Number => "number",
            Self::Variable => "variable",
            Self::Pi => "pi",
            Self::E => "e",
            Self::Abs => "abs",
            Self::Sqrt => "sqrt",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::ImpMul => "<impmul>",
            Self::Eof => "<eof>",
        };
        write!(f, "{s}")
    }
}

/// A single lexical token: its type, source text, and byte offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
    pub offset: usize,
}

impl Token {
    #[must_use]
    pub fn new(token_type: TokenType, value: impl Into<String>, offset: usize) -> Self {
        Self {
            token_type,
            value: value.into(),
            offset,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})@{}", self.token_type, self.value, self.offset)
    }
}

/// The recognized function names. A run of uppercase letters is matched
/// against this table before falling back to the math-constant table (see
/// [`super::lexer::Lexer`]); lowercase runs are always variables.
pub const FUNCTION_NAMES: &[(&str, TokenType)] = &[
    ("ABS", TokenType::Abs),
    ("SQRT", TokenType::Sqrt),
    ("EXP", TokenType::Exp),
    ("LN", TokenType::Ln),
    ("LOG", TokenType::Log),
    ("SIN", TokenType::Sin),
    ("COS", TokenType::Cos),
    ("TAN", TokenType::Tan),
    ("ASIN", TokenType::Asin),
    ("ACOS", TokenType::Acos),
    ("ATAN", TokenType::Atan),
];

/// The recognized upper-case math-constant names. A run of uppercase
/// letters is either one function name or a concatenation of these,
/// matched greedy-longest left to right.
pub const MATH_CONST_NAMES: &[(&str, TokenType)] = &[("PI", TokenType::Pi), ("E", TokenType::E)];
