//! Recursive-descent parser: token stream → binary AST.
//!
//! ```text
//! block     = boolexp
//! boolexp   = boolterm   { "|" boolterm }
//! boolterm  = boolfactor { "&" boolfactor }
//! boolfactor= boolatom | "[" boolexp "]"
//! boolatom  = expression [ cmpop expression ]
//! cmpop     = "=" | ">" | ">=" | "<" | "<=" | "<>"
//! expression= [ "-" ] term { ("+"|"-") term }
//! term      = factor { ("*"|"/"|impMul) factor }
//! factor    = ( atom | "(" expression ")" ) [ "^" factor ]
//! atom      = mathconst | number | variable | funct
//! funct     = functionname "(" expression ")"
//! ```
//!
//! Square brackets delimit boolean sub-expressions; round parentheses
//! delimit arithmetic sub-expressions, so the parser never needs to guess
//! which kind of grouping it is in. `^` is right-associative; every other
//! binary operator is left-associative.

use std::collections::BTreeSet;

use super::ast::{BinOpKind, BoolOpKind, CompareOpKind, FunctKind, MathConst, Node};
use super::tokens::{Token, TokenType};
use crate::error::CasError;

/// The result of a successful parse: the binary AST plus the sorted,
/// deduplicated list of free variable names it references.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub root: Node,
    pub variables: Vec<String>,
}

/// Parses a token stream produced by [`super::lexer::Lexer`] into a binary
/// AST, per the grammar above.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    variables: BTreeSet<String>,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            variables: BTreeSet::new(),
        }
    }

    /// Parses the whole token stream as a `block`.
    ///
    /// # Errors
    ///
    /// Returns a positional [`CasError`] naming the non-terminal the parser
    /// expected to find, at the offset of the offending (or final) token.
    ///
    /// # Examples
    ///
    /// ```
    /// use nanocas::expr::lexer::{Lexer, LexerConfig};
    /// use nanocas::expr::parser::Parser;
    ///
    /// let tokens = Lexer::new(LexerConfig::default()).tokenize("a+b*c").unwrap();
    /// let out = Parser::new(tokens).parse().unwrap();
    /// assert_eq!(out.variables, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
    /// ```
    pub fn parse(mut self) -> Result<ParseOutput, CasError> {
        let root = self.boolexp()?;
        if !self.at(TokenType::Eof) {
            return Err(CasError::ExpectedBoolExp {
                offset: self.current().offset,
            });
        }
        Ok(ParseOutput {
            root,
            variables: self.variables.into_iter().collect(),
        })
    }

    // --- token stream helpers --------------------------------------------

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn at(&self, tt: TokenType) -> bool {
        self.current().token_type == tt
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, tt: TokenType) -> Option<Token> {
        if self.at(tt) {
            Some(self.advance())
        } else {
            None
        }
    }

    // --- boolean layer -----------------------------------------------------

    fn boolexp(&mut self) -> Result<Node, CasError> {
        let mut left = self.boolterm()?;
        while self.at(TokenType::Or) {
            let tok = self.advance();
            let right = self.boolterm()?;
            left = Node::BoolOp {
                op: BoolOpKind::Or,
                left: Box::new(left),
                right: Box::new(right),
                startpos: Some(tok.offset),
            };
        }
        Ok(left)
    }

    fn boolterm(&mut self) -> Result<Node, CasError> {
        let mut left = self.boolfactor()?;
        while self.at(TokenType::And) {
            let tok = self.advance();
            let right = self.boolfactor()?;
            left = Node::BoolOp {
                op: BoolOpKind::And,
                left: Box::new(left),
                right: Box::new(right),
                startpos: Some(tok.offset),
            };
        }
        Ok(left)
    }

    fn boolfactor(&mut self) -> Result<Node, CasError> {
        if self.at(TokenType::LBracket) {
            self.advance();
            let inner = self.boolexp()?;
            if self.eat(TokenType::RBracket).is_none() {
                return Err(CasError::ExpectedRParen {
                    offset: self.current().offset,
                });
            }
            Ok(inner)
        } else {
            self.boolatom()
        }
    }

    fn boolatom(&mut self) -> Result<Node, CasError> {
        let left = self.expression()?;
        if let Some(op) = self.try_cmp_op() {
            let tok = self.advance();
            let right = self.expression()?;
            Ok(Node::CompareOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                startpos: Some(tok.offset),
            })
        } else {
            Ok(left)
        }
    }

    fn try_cmp_op(&self) -> Option<CompareOpKind> {
        match self.current().token_type {
            TokenType::Eq => Some(CompareOpKind::Eq),
            TokenType::Gt => Some(CompareOpKind::Gt),
            TokenType::Ge => Some(CompareOpKind::Ge),
            TokenType::Lt => Some(CompareOpKind::Lt),
            TokenType::Le => Some(CompareOpKind::Le),
            TokenType::Ne => Some(CompareOpKind::Ne),
            _ => None,
        }
    }

    // --- arithmetic layer --------------------------------------------------

    fn expression(&mut self) -> Result<Node, CasError> {
        let mut left = if let Some(minus) = self.eat(TokenType::Minus) {
            let child = self.term()?;
            Node::UnaryMinus {
                child: Box::new(child),
                startpos: Some(minus.offset),
            }
        } else {
            self.term()?
        };

        loop {
            let op = match self.current().token_type {
                TokenType::Plus => BinOpKind::Add,
                TokenType::Minus => BinOpKind::Sub,
                _ => break,
            };
            let tok = self.advance();
            let right = self.term()?;
            left = Node::BinOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                startpos: Some(tok.offset),
            };
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Node, CasError> {
        let mut left = self.factor()?;
        loop {
            let op = match self.current().token_type {
                TokenType::Star => BinOpKind::Mul,
                TokenType::Slash => BinOpKind::Div,
                TokenType::ImpMul => BinOpKind::ImpMul,
                _ => break,
            };
            let tok = self.advance();
            let right = self.factor()?;
            left = Node::BinOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                startpos: Some(tok.offset),
            };
        }
        Ok(left)
    }

    /// `factor = ( atom | "(" expression ")" ) [ "^" factor ]`; `^` recurses
    /// into another `factor`, not `expression`, which is what makes it
    /// right-associative.
    fn factor(&mut self) -> Result<Node, CasError> {
        let base = if self.eat(TokenType::LParen).is_some() {
            let inner = self.expression()?;
            if self.eat(TokenType::RParen).is_none() {
                return Err(CasError::ExpectedRParen {
                    offset: self.current().offset,
                });
            }
            inner
        } else {
            self.atom()?
        };

        if let Some(tok) = self.eat(TokenType::Caret) {
            let exponent = self.factor()?;
            Ok(Node::BinOp {
                op: BinOpKind::Pow,
                left: Box::new(base),
                right: Box::new(exponent),
                startpos: Some(tok.offset),
            })
        } else {
            Ok(base)
        }
    }

    fn atom(&mut self) -> Result<Node, CasError> {
        let tok = self.current().clone();
        match tok.token_type {
            TokenType::Number => {
                self.advance();
                Ok(Node::Number {
                    value: tok.value,
                    startpos: Some(tok.offset),
                })
            }
            TokenType::Variable => {
                self.advance();
                self.variables.insert(tok.value.clone());
                Ok(Node::Variable {
                    name: tok.value,
                    startpos: Some(tok.offset),
                })
            }
            TokenType::Pi => {
                self.advance();
                Ok(Node::MathConst {
                    which: MathConst::Pi,
                    startpos: Some(tok.offset),
                })
            }
            TokenType::E => {
                self.advance();
                Ok(Node::MathConst {
                    which: MathConst::E,
                    startpos: Some(tok.offset),
                })
            }
            TokenType::Abs
            | TokenType::Sqrt
            | TokenType::Exp
            | TokenType::Ln
            | TokenType::Log
            | TokenType::Sin
            | TokenType::Cos
            | TokenType::Tan
            | TokenType::Asin
            | TokenType::Acos
            | TokenType::Atan => self.funct(),
            _ => Err(CasError::ExpectedAtom { offset: tok.offset }),
        }
    }

    fn funct(&mut self) -> Result<Node, CasError> {
        let tok = self.advance();
        let which = function_kind(&tok.token_type).expect("caller only dispatches function tokens");
        if self.eat(TokenType::LParen).is_none() {
            return Err(CasError::ExpectedLParen {
                offset: self.current().offset,
            });
        }
        let child = self.expression()?;
        if self.eat(TokenType::RParen).is_none() {
            return Err(CasError::ExpectedRParen {
                offset: self.current().offset,
            });
        }
        Ok(Node::Funct {
            which,
            child: Box::new(child),
            startpos: Some(tok.offset),
        })
    }
}

fn function_kind(tt: &TokenType) -> Option<FunctKind> {
    Some(match tt {
        TokenType::Abs => FunctKind::Abs,
        TokenType::Sqrt => FunctKind::Sqrt,
        TokenType::Exp => FunctKind::Exp,
        TokenType::Ln => FunctKind::Ln,
        TokenType::Log => FunctKind::Log10,
        TokenType::Sin => FunctKind::Sin,
        TokenType::Cos => FunctKind::Cos,
        TokenType::Tan => FunctKind::Tan,
        TokenType::Asin => FunctKind::Asin,
        TokenType::Acos => FunctKind::Acos,
        TokenType::Atan => FunctKind::Atan,
        _ => return None,
    })
}
