//! logos-based tokenizer for sx text blocks.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `#fff` as HexColor beats `#` as Hash)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `&:hover::after` matches [`Token::NestedSelector`] up to the `{`
//! - `20px` matches [`Token::Dimension`], not `Number` + `Ident`
//! - `-webkit-box` matches [`Token::Ident`], not `Minus` + `Ident`
//!
//! Anything else outside a string literal lexes as [`Token::Delim`], so the
//! only lex failure is an unterminated quote.

use logos::Logos;

/// Token produced by the sx lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // ── Compound tokens (longer matches, defined first) ──────────────

    /// `!important` flag, optionally with blanks after the `!`.
    #[regex(r"![ \t]*important")]
    Important,

    /// Nested selector: `&` and everything up to the next `{`, `}` or `;`.
    #[regex(r"&[^{};]*")]
    NestedSelector,

    /// Hex color: `#fff`, `#ff00aa`, `#ff00aa80` (3-8 hex digits).
    #[regex(r"#[0-9a-fA-F]{3,8}")]
    HexColor,

    /// Number with a unit suffix: `20px`, `1.5rem`, `-10%`, `.5em`.
    #[regex(r"[-+]?([0-9]+(\.[0-9]+)?|\.[0-9]+)([a-zA-Z]+|%)")]
    Dimension,

    /// Unitless number, possibly signed or fractional.
    #[regex(r"[-+]?([0-9]+(\.[0-9]+)?|\.[0-9]+)")]
    Number,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Identifier: property names, keywords, vendor-prefixed and custom names.
    /// Non-ASCII characters are identifier characters (`Über`, `微软雅黑`).
    #[regex(r"-{0,2}[a-zA-Z_\u{80}-\u{10FFFF}][a-zA-Z0-9_\-\u{80}-\u{10FFFF}]*")]
    Ident,

    // ── Single-character punctuation ─────────────────────────────────

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("/")]
    Slash,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token(".")]
    Dot,

    #[token("#")]
    Hash,

    /// Any other single character: `@`, `=`, `?`, `%`, a lone `!`.
    #[regex(r#"[^ \t\n\r\f{}:;,()/*+.#&"'a-zA-Z0-9_\-\u{80}-\u{10FFFF}]"#)]
    Delim,
}

/// A token with its position in the token stream and its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    /// Index in the token stream (for error reporting).
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl SpannedToken {
    /// The token's text in `source`.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Input no token matches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized input {text:?} at byte {offset}")]
pub struct LexError {
    /// Index the failed token would have had in the token stream.
    pub index: usize,
    pub offset: usize,
    pub text: String,
}

/// Tokenize an sx string into spanned tokens, stopping at the first lex error.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, LexError> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(input).spanned() {
        let index = tokens.len();
        match result {
            Ok(token) => tokens.push(SpannedToken {
                token,
                index,
                start: span.start,
                end: span.end,
            }),
            Err(()) => {
                return Err(LexError {
                    index,
                    offset: span.start,
                    text: input[span].to_string(),
                })
            }
        }
    }
    Ok(tokens)
}
