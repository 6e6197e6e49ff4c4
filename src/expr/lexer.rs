//! Translates an expression string into a token stream.

use super::tokens::{Token, TokenType, FUNCTION_NAMES, MATH_CONST_NAMES};
use crate::error::CasError;

/// Lexer behavior fixed at construction. Two lexer instances with
/// different configurations can coexist side by side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexerConfig {
    /// `true`: each lowercase letter is its own variable token.
    /// `false`: a whole run of lowercase letters is one variable token.
    pub one_char_variables: bool,
    /// If set, numeric literals are rounded to this many decimal places.
    pub round_digits: Option<u32>,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            one_char_variables: true,
            round_digits: None,
        }
    }
}

/// Converts an ASCII expression string into a `Vec<Token>` terminated by
/// `Eof`, inserting implicit-multiplication tokens where the grammar
/// requires them.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    config: LexerConfig,
}

/// Tokens after which an implicit multiplication may be inserted.
fn starts_impmul_left(tt: &TokenType) -> bool {
    matches!(
        tt,
        TokenType::Number | TokenType::Variable | TokenType::Pi | TokenType::E | TokenType::RParen
    )
}

/// Tokens before which an implicit multiplication may be inserted.
fn starts_impmul_right(tt: &TokenType) -> bool {
    matches!(
        tt,
        TokenType::Number
            | TokenType::Variable
            | TokenType::Pi
            | TokenType::E
            | TokenType::LParen
            | TokenType::Abs
            | TokenType::Sqrt
            | TokenType::Exp
            | TokenType::Ln
            | TokenType::Log
            | TokenType::Sin
            | TokenType::Cos
            | TokenType::Tan
            | TokenType::Asin
            | TokenType::Acos
            | TokenType::Atan
    )
}

impl Lexer {
    #[must_use]
    pub fn new(config: LexerConfig) -> Self {
        Self {
            chars: Vec::new(),
            pos: 0,
            config,
        }
    }

    /// Tokenizes `source`, returning tokens terminated by a single `Eof`.
    ///
    /// # Errors
    ///
    /// Returns [`CasError::NonAscii`] on any byte `>= 0x80`,
    /// [`CasError::EmptyInput`] if nothing but whitespace remains,
    /// [`CasError::PrematureEnd`] on a trailing bare `<`/`>`,
    /// [`CasError::IllegalChar`] on an unrecognized character or leftover
    /// uppercase letters after constant decomposition, and
    /// [`CasError::MissingDigit`] on a decimal point with no following
    /// digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use nanocas::expr::lexer::{Lexer, LexerConfig};
    /// use nanocas::expr::tokens::TokenType;
    ///
    /// let mut lexer = Lexer::new(LexerConfig::default());
    /// let tokens = lexer.tokenize("2x(y+1)").unwrap();
    /// let kinds: Vec<_> = tokens.iter().map(|t| t.token_type.clone()).collect();
    /// assert_eq!(
    ///     kinds,
    ///     vec![
    ///         TokenType::Number,
    ///         TokenType::ImpMul,
    ///         TokenType::Variable,
    ///         TokenType::ImpMul,
    ///         TokenType::LParen,
    ///         TokenType::Variable,
    ///         TokenType::Plus,
    ///         TokenType::Number,
    ///         TokenType::RParen,
    ///         TokenType::Eof,
    ///     ]
    /// );
    /// ```
    pub fn tokenize(&mut self, source: &str) -> Result<Vec<Token>, CasError> {
        for (i, b) in source.bytes().enumerate() {
            if b >= 0x80 {
                return Err(CasError::NonAscii { offset: i });
            }
        }
        self.chars = source.chars().collect();
        self.pos = 0;

        let mut raw = Vec::new();
        self.skip_whitespace();
        while !self.at_end() {
            raw.push(self.scan_token()?);
            self.skip_whitespace();
        }

        if raw.is_empty() {
            return Err(CasError::EmptyInput);
        }

        let eof_offset = self.chars.len();
        let with_impmul = Self::insert_impmul(raw);
        let mut tokens = with_impmul;
        tokens.push(Token::new(TokenType::Eof, "", eof_offset));
        Ok(tokens)
    }

    fn insert_impmul(raw: Vec<Token>) -> Vec<Token> {
        let mut out = Vec::with_capacity(raw.len() + raw.len() / 2);
        let mut iter = raw.into_iter().peekable();
        while let Some(tok) = iter.next() {
            let needs_impmul = match iter.peek() {
                Some(next) => starts_impmul_left(&tok.token_type) && starts_impmul_right(&next.token_type),
                None => false,
            };
            let next_offset = iter.peek().map(|n| n.offset);
            out.push(tok);
            if needs_impmul {
                out.push(Token::new(TokenType::ImpMul, "", next_offset.unwrap_or(0)));
            }
        }
        out
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.pos];
        self.pos += 1;
        c
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn scan_token(&mut self) -> Result<Token, CasError> {
        let start = self.pos;
        let c = self.peek().expect("scan_token called at end of input");

        match c {
            '0'..='9' => self.scan_number(),
            c if c.is_ascii_lowercase() => Ok(self.scan_lowercase_run(start)),
            c if c.is_ascii_uppercase() => self.scan_uppercase_run(start),
            '+' => {
                self.advance();
                Ok(Token::new(TokenType::Plus, "+", start))
            }
            '-' => {
                self.advance();
                Ok(Token::new(TokenType::Minus, "-", start))
            }
            '*' => {
                self.advance();
                Ok(Token::new(TokenType::Star, "*", start))
            }
            '/' => {
                self.advance();
                Ok(Token::new(TokenType::Slash, "/", start))
            }
            '^' => {
                self.advance();
                Ok(Token::new(TokenType::Caret, "^", start))
            }
            '(' => {
                self.advance();
                Ok(Token::new(TokenType::LParen, "(", start))
            }
            ')' => {
                self.advance();
                Ok(Token::new(TokenType::RParen, ")", start))
            }
            '[' => {
                self.advance();
                Ok(Token::new(TokenType::LBracket, "[", start))
            }
            ']' => {
                self.advance();
                Ok(Token::new(TokenType::RBracket, "]", start))
            }
            '|' => {
                self.advance();
                Ok(Token::new(TokenType::Or, "|", start))
            }
            '&' => {
                self.advance();
                Ok(Token::new(TokenType::And, "&", start))
            }
            '=' => {
                self.advance();
                Ok(Token::new(TokenType::Eq, "=", start))
            }
            '>' => {
                self.advance();
                match self.peek() {
                    None => Err(CasError::PrematureEnd { offset: start }),
                    Some('=') => {
                        self.advance();
                        Ok(Token::new(TokenType::Ge, ">=", start))
                    }
                    Some(_) => Ok(Token::new(TokenType::Gt, ">", start)),
                }
            }
            '<' => {
                self.advance();
                match self.peek() {
                    None => Err(CasError::PrematureEnd { offset: start }),
                    Some('=') => {
                        self.advance();
                        Ok(Token::new(TokenType::Le, "<=", start))
                    }
                    Some('>') => {
                        self.advance();
                        Ok(Token::new(TokenType::Ne, "<>", start))
                    }
                    Some(_) => Ok(Token::new(TokenType::Lt, "<", start)),
                }
            }
            _ => Err(CasError::IllegalChar { offset: start }),
        }
    }

    /// Scans a run of digits, optionally followed by `.` and one or more
    /// digits (a bare trailing `.` with no following digit is a
    /// [`CasError::MissingDigit`], never silently accepted). Applies
    /// `config.round_digits` to the resulting literal, if set.
    fn scan_number(&mut self) -> Result<Token, CasError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            let dot_pos = self.pos;
            self.advance();
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(CasError::MissingDigit {
                    offset: dot_pos + 1,
                });
            }
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        let rendered = match self.config.round_digits {
            Some(places) => round_decimal_string(&text, places),
            None => text,
        };
        Ok(Token::new(TokenType::Number, rendered, start))
    }

    fn scan_lowercase_run(&mut self, start: usize) -> Token {
        if self.config.one_char_variables {
            let c = self.advance();
            Token::new(TokenType::Variable, c.to_string(), start)
        } else {
            while matches!(self.peek(), Some(c) if c.is_ascii_lowercase()) {
                self.advance();
            }
            let text: String = self.chars[start..self.pos].iter().collect();
            Token::new(TokenType::Variable, text, start)
        }
    }

    /// A run of uppercase letters is either a single function name or a
    /// greedy-longest-match concatenation of math-constant names; leftover
    /// unmatched uppercase letters are an error.
    ///
    /// Returns only the *first* token of the run; the caller's main loop
    /// re-enters `scan_token` for any remaining constants in the run, since
    /// each constant is its own token (implicit multiplication is inserted
    /// between adjacent constant tokens by the post-pass).
    fn scan_uppercase_run(&mut self, start: usize) -> Result<Token, CasError> {
        let run_start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_uppercase()) {
            self.advance();
        }
        let run_end = self.pos;
        let run: String = self.chars[run_start..run_end].iter().collect();

        if let Some(entry) = FUNCTION_NAMES.iter().find(|entry| entry.0 == run) {
            return Ok(Token::new(entry.1.clone(), run, start));
        }

        // Not a function: rewind and decompose into constants one at a
        // time, letting the main loop collect the rest via repeated calls.
        self.pos = run_start;
        self.scan_one_math_const(run_end)
    }

    fn scan_one_math_const(&mut self, run_end: usize) -> Result<Token, CasError> {
        let start = self.pos;
        let mut sorted_consts: Vec<&(&str, TokenType)> = MATH_CONST_NAMES.iter().collect();
        sorted_consts.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));

        for (name, tt) in sorted_consts {
            let name_len = name.chars().count();
            if start + name_len > run_end {
                continue;
            }
            let candidate: String = self.chars[start..start + name_len].iter().collect();
            if candidate == *name {
                for _ in 0..name_len {
                    self.advance();
                }
                return Ok(Token::new(tt.clone(), candidate, start));
            }
        }
        Err(CasError::IllegalChar { offset: start })
    }
}

/// Rounds a plain (unsigned) decimal-literal string to `places` decimal
/// digits, re-rendering without trailing zeros collapsing the integer part.
fn round_decimal_string(text: &str, places: u32) -> String {
    let value: f64 = text.parse().unwrap_or(0.0);
    let factor = 10f64.powi(places as i32);
    let rounded = (value * factor).round() / factor;
    if places == 0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.*}", places as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(LexerConfig::default()).tokenize(source).unwrap()
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenType> {
        tokens.iter().map(|t| t.token_type.clone()).collect()
    }

    #[test]
    fn rejects_non_ascii() {
        let err = Lexer::new(LexerConfig::default())
            .tokenize("1 + \u{00e9}")
            .unwrap_err();
        assert!(matches!(err, CasError::NonAscii { .. }));
    }

    #[test]
    fn rejects_empty_input() {
        let err = Lexer::new(LexerConfig::default()).tokenize("   ").unwrap_err();
        assert_eq!(err, CasError::EmptyInput);
    }

    #[test]
    fn scenario_2x_times_y_plus_1() {
        let tokens = lex("2x(y+1)");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenType::Number,
                TokenType::ImpMul,
                TokenType::Variable,
                TokenType::ImpMul,
                TokenType::LParen,
                TokenType::Variable,
                TokenType::Plus,
                TokenType::Number,
                TokenType::RParen,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn multichar_operators_win_over_prefixes() {
        assert_eq!(kinds(&lex("a>=b")), vec![
            TokenType::Variable,
            TokenType::Ge,
            TokenType::Variable,
            TokenType::Eof
        ]);
        assert_eq!(kinds(&lex("a<=b")), vec![
            TokenType::Variable,
            TokenType::Le,
            TokenType::Variable,
            TokenType::Eof
        ]);
        assert_eq!(kinds(&lex("a<>b")), vec![
            TokenType::Variable,
            TokenType::Ne,
            TokenType::Variable,
            TokenType::Eof
        ]);
    }

    #[test]
    fn trailing_lt_or_gt_is_premature_end() {
        assert_eq!(
            Lexer::new(LexerConfig::default()).tokenize("a<").unwrap_err(),
            CasError::PrematureEnd { offset: 1 }
        );
        assert_eq!(
            Lexer::new(LexerConfig::default()).tokenize("a>").unwrap_err(),
            CasError::PrematureEnd { offset: 1 }
        );
    }

    #[test]
    fn trailing_decimal_point_is_missing_digit() {
        let err = Lexer::new(LexerConfig::default()).tokenize("3.").unwrap_err();
        assert_eq!(err, CasError::MissingDigit { offset: 2 });
    }

    #[test]
    fn decimal_number_parses() {
        let tokens = lex("3.14");
        assert_eq!(tokens[0].value, "3.14");
        assert_eq!(tokens[0].token_type, TokenType::Number);
    }

    #[test]
    fn one_char_variable_mode_inserts_impmul_between_letters() {
        let tokens = lex("xy");
        assert_eq!(
            kinds(&tokens),
            vec![TokenType::Variable, TokenType::ImpMul, TokenType::Variable, TokenType::Eof]
        );
    }

    #[test]
    fn multi_char_variable_mode_keeps_run_as_one_token() {
        let config = LexerConfig {
            one_char_variables: false,
            round_digits: None,
        };
        let tokens = Lexer::new(config).tokenize("xyz*abc").unwrap();
        assert_eq!(tokens[0].value, "xyz");
        assert_eq!(tokens[0].token_type, TokenType::Variable);
        assert_eq!(tokens[2].value, "abc");
    }

    #[test]
    fn uppercase_run_matches_function_name() {
        let tokens = lex("SIN(x)");
        assert_eq!(tokens[0].token_type, TokenType::Sin);
    }

    #[test]
    fn uppercase_run_decomposes_into_constants() {
        let tokens = lex("PIE");
        assert_eq!(
            kinds(&tokens),
            vec![TokenType::Pi, TokenType::ImpMul, TokenType::E, TokenType::Eof]
        );
    }

    #[test]
    fn leftover_uppercase_after_constant_decomposition_errors() {
        let err = Lexer::new(LexerConfig::default()).tokenize("PIX").unwrap_err();
        assert!(matches!(err, CasError::IllegalChar { .. }));
    }

    #[test]
    fn illegal_character_rejected() {
        let err = Lexer::new(LexerConfig::default()).tokenize("1 @ 2").unwrap_err();
        assert_eq!(err, CasError::IllegalChar { offset: 2 });
    }

    #[test]
    fn implicit_mult_between_rparen_and_variable() {
        let tokens = lex("(a)b");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenType::LParen,
                TokenType::Variable,
                TokenType::RParen,
                TokenType::ImpMul,
                TokenType::Variable,
                TokenType::Eof
            ]
        );
    }

    #[test]
    fn implicit_mult_before_function_call() {
        let tokens = lex("2SIN(x)");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenType::Number,
                TokenType::ImpMul,
                TokenType::Sin,
                TokenType::LParen,
                TokenType::Variable,
                TokenType::RParen,
                TokenType::Eof
            ]
        );
    }
}
