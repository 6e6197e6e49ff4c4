//! The expression engine: lexer → parser → binary AST →
//! { evaluator | LaTeX emitter | multinode builder → { expander | binary } }.
//!
//! Module order mirrors the pipeline: [`tokens`] and [`lexer`]
//! produce a token stream; [`parser`] consumes it into the [`ast::Node`]
//! binary tree; [`evaluator`], [`latex`], and [`multinode`] all operate on
//! that tree, with [`expander`] operating on the multinode form.

pub mod ast;
pub mod evaluator;
pub mod expander;
pub mod latex;
pub mod lexer;
pub mod multinode;
pub mod parser;
pub mod tokens;

pub use ast::Node;
pub use evaluator::{EvalConfig, Evaluator, Value};
pub use expander::Expander;
pub use latex::LatexEmitter;
pub use lexer::{Lexer, LexerConfig};
pub use multinode::MultinodeBuilder;
pub use parser::{ParseOutput, Parser};
pub use tokens::{Token, TokenType};
