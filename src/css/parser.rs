//! Recursive descent parser for sx text blocks.
//!
//! Parses a nested declaration block into a [`StyleDirective`]:
//!
//! ```text
//! background-color: red;
//! &:hover { background-color: blue; }
//! ```
//!
//! Property names are converted to camelCase. A value is kept as the raw
//! source text between its first and last token, so functional notation,
//! commas and slashes survive untouched.

use std::str::FromStr;

use crate::css::case::kebab_to_camel;
use crate::css::directive::{StyleDeclarations, StyleDirective};
use crate::css::tokenizer::{tokenize, SpannedToken, Token};
use crate::css::value::StyleValue;

/// Errors from sx parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("pseudo-selector `{selector}` cannot be nested inside `{parent}`")]
    NestedPseudo { selector: String, parent: String },
    #[error("property `{property}` has no value")]
    EmptyValue { property: String },
}

/// Replace each `/* ... */` comment with a single space.
///
/// An unterminated comment swallows the rest of the input.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        result.push(' ');
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => rest = "",
        }
    }
    result.push_str(rest);

    result
}

/// Parse an sx text block into a [`StyleDirective`].
pub fn parse_sx(input: &str) -> Result<StyleDirective, ParseError> {
    let source = strip_comments(input);
    let tokens = tokenize(&source).map_err(|err| ParseError::UnexpectedToken {
        position: err.index,
        message: err.to_string(),
    })?;

    let mut parser = Parser {
        source: &source,
        tokens,
        cursor: 0,
    };
    parser.parse_directive()
}

impl StyleDirective {
    /// Parse an sx text block. See [`parse_sx`].
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parse_sx(input)
    }
}

impl FromStr for StyleDirective {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_sx(s)
    }
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<SpannedToken>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<SpannedToken> {
        self.tokens.get(self.cursor).copied()
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        let tok = self.peek()?;
        self.cursor += 1;
        Some(tok)
    }

    fn text(&self, tok: SpannedToken) -> &'a str {
        tok.text(self.source)
    }

    fn expect(&mut self, expected: Token) -> Result<SpannedToken, ParseError> {
        match self.advance() {
            Some(tok) if tok.token == expected => Ok(tok),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.index,
                message: format!(
                    "expected {:?}, got {:?} '{}'",
                    expected,
                    tok.token,
                    self.text(tok)
                ),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {expected:?}"))),
        }
    }

    /// Top level: declarations and `&` blocks in any order.
    fn parse_directive(&mut self) -> Result<StyleDirective, ParseError> {
        let mut directive = StyleDirective::new();

        while let Some(tok) = self.peek() {
            match tok.token {
                Token::NestedSelector => {
                    self.advance();
                    let selector = self.text(tok).trim_end();
                    self.expect(Token::BraceOpen)?;
                    let block = self.parse_block(selector)?;
                    self.expect(Token::BraceClose)?;
                    directive.insert(selector, block);
                }
                Token::Semicolon => {
                    self.advance();
                }
                _ => {
                    let (property, value) = self.parse_declaration()?;
                    directive.insert(property, value);
                }
            }
        }

        Ok(directive)
    }

    /// Declarations inside `{ ... }` of a pseudo-selector; stops before `}`.
    fn parse_block(&mut self, parent: &str) -> Result<StyleDeclarations, ParseError> {
        let mut decls = StyleDeclarations::new();

        loop {
            let Some(tok) = self.peek() else {
                return Err(ParseError::UnexpectedEof(format!(
                    "expected `}}` closing `{parent}`"
                )));
            };
            match tok.token {
                Token::BraceClose => break,
                Token::Semicolon => {
                    self.advance();
                }
                Token::NestedSelector => {
                    return Err(ParseError::NestedPseudo {
                        selector: self.text(tok).trim_end().to_string(),
                        parent: parent.to_string(),
                    });
                }
                _ => {
                    let (property, value) = self.parse_declaration()?;
                    decls.insert(property, value);
                }
            }
        }

        Ok(decls)
    }

    /// Parse `property: value [!important] [;]`.
    fn parse_declaration(&mut self) -> Result<(String, StyleValue), ParseError> {
        let prop_tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected property name".into()))?;
        if prop_tok.token != Token::Ident {
            return Err(ParseError::UnexpectedToken {
                position: prop_tok.index,
                message: format!(
                    "expected property name, got {:?} '{}'",
                    prop_tok.token,
                    self.text(prop_tok)
                ),
            });
        }
        let property = self.text(prop_tok);

        self.expect(Token::Colon)?;

        let mut first: Option<SpannedToken> = None;
        let mut last: Option<SpannedToken> = None;
        let mut count = 0usize;
        let mut important = false;

        loop {
            match self.peek() {
                None => break,
                Some(tok) => match tok.token {
                    Token::Semicolon | Token::BraceClose | Token::NestedSelector => break,
                    Token::Important => {
                        self.advance();
                        important = true;
                        break;
                    }
                    Token::BraceOpen => {
                        return Err(ParseError::UnexpectedToken {
                            position: tok.index,
                            message: format!("unexpected '{{' in value of `{property}`"),
                        });
                    }
                    _ => {
                        self.advance();
                        first.get_or_insert(tok);
                        last = Some(tok);
                        count += 1;
                    }
                },
            }
        }

        if self.peek().is_some_and(|t| t.token == Token::Semicolon) {
            self.advance();
        }

        let (Some(first), Some(last)) = (first, last) else {
            return Err(ParseError::EmptyValue {
                property: property.to_string(),
            });
        };

        let raw = &self.source[first.start..last.end];
        let value = if count == 1 && first.token == Token::Number && !important {
            raw.parse::<f64>()
                .map(StyleValue::Number)
                .unwrap_or_else(|_| StyleValue::Str(raw.to_string()))
        } else if important {
            StyleValue::Str(format!("{raw} !important"))
        } else {
            StyleValue::Str(raw.to_string())
        };

        Ok((kebab_to_camel(property), value))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::css::directive::DirectiveValue;

    fn parse(input: &str) -> StyleDirective {
        parse_sx(input).unwrap_or_else(|e| panic!("parse failed: {e}"))
    }

    #[test]
    fn parse_empty() {
        assert!(parse("").is_empty());
        assert!(parse("  /* nothing */ ").is_empty());
    }

    #[test]
    fn parse_base_declarations() {
        let sx = parse("background-color: red; padding: 20px;");
        assert_eq!(
            sx,
            StyleDirective::new()
                .set("backgroundColor", "red")
                .set("padding", "20px")
        );
    }

    #[test]
    fn parse_trailing_semicolon_optional() {
        let sx = parse("color: red");
        assert_eq!(sx, StyleDirective::new().set("color", "red"));
    }

    #[test]
    fn parse_unitless_number() {
        let sx = parse("opacity: 0.5; z-index: 10; line-height: 1.5rem;");
        assert_eq!(
            sx,
            StyleDirective::new()
                .set("opacity", 0.5)
                .set("zIndex", 10)
                .set("lineHeight", "1.5rem")
        );
    }

    #[test]
    fn parse_multi_token_value_keeps_source_text() {
        let sx = parse("border: 1px  solid #000; box-shadow: 0 1px 2px rgba(0, 0, 0, .2);");
        assert_eq!(
            sx.get("border"),
            Some(&DirectiveValue::from("1px  solid #000"))
        );
        assert_eq!(
            sx.get("boxShadow"),
            Some(&DirectiveValue::from("0 1px 2px rgba(0, 0, 0, .2)"))
        );
    }

    #[test]
    fn parse_url_value() {
        let sx = parse("background-image: url(https://example.com/a.png);");
        assert_eq!(
            sx.get("backgroundImage"),
            Some(&DirectiveValue::from("url(https://example.com/a.png)"))
        );
    }

    #[test]
    fn parse_important() {
        let sx = parse("color: red !important; z-index: 1 !important;");
        assert_eq!(
            sx,
            StyleDirective::new()
                .set("color", "red !important")
                .set("zIndex", "1 !important")
        );
    }

    #[test]
    fn parse_pseudo_blocks() {
        let sx = parse(
            r#"
            background-color: red;
            &:hover { background-color: blue; }
            &::before { content: '""'; width: 0; }
            &:hover::after{opacity:1}
            "#,
        );
        assert_eq!(
            sx,
            StyleDirective::new()
                .set("backgroundColor", "red")
                .set(
                    "&:hover",
                    StyleDeclarations::new().set("backgroundColor", "blue")
                )
                .set(
                    "&::before",
                    StyleDeclarations::new().set("content", "'\"\"'").set("width", 0)
                )
                .set("&:hover::after", StyleDeclarations::new().set("opacity", 1))
        );
    }

    #[test]
    fn parse_functional_pseudo_selector() {
        let sx = parse("&:hover:not(:checked) { border-color: gray; }");
        assert!(sx.contains_key("&:hover:not(:checked)"));
    }

    #[test]
    fn parse_comments_are_stripped() {
        let sx = parse("/* base */ color: red; /* hover */ &:hover { color: /* inline */ blue; }");
        assert_eq!(
            sx,
            StyleDirective::new()
                .set("color", "red")
                .set("&:hover", StyleDeclarations::new().set("color", "blue"))
        );
    }

    #[test]
    fn parse_duplicate_property_replaces_in_place() {
        let sx = parse("color: red; margin: 0; color: blue;");
        let keys: Vec<_> = sx.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["color", "margin"]);
        assert_eq!(sx.get("color"), Some(&DirectiveValue::from("blue")));
    }

    #[test]
    fn parse_non_ascii_font_families() {
        let sx = parse("font-family: Über, sans-serif; &:lang(zh) { font-family: 微软雅黑; }");
        assert_eq!(
            sx,
            StyleDirective::new()
                .set("fontFamily", "Über, sans-serif")
                .set(
                    "&:lang(zh)",
                    StyleDeclarations::new().set("fontFamily", "微软雅黑")
                )
        );
    }

    #[test]
    fn parse_other_characters_stay_in_value() {
        let sx = parse("background-image: url(a.png?v=2); grid-area: 1 / 2 / 3 / 4;");
        assert_eq!(
            sx.get("backgroundImage"),
            Some(&DirectiveValue::from("url(a.png?v=2)"))
        );
        assert_eq!(sx.get("gridArea"), Some(&DirectiveValue::from("1 / 2 / 3 / 4")));
    }

    #[test]
    fn parse_custom_property_keeps_name() {
        let sx = parse("--brand-color: #ff00aa;");
        assert!(sx.contains_key("--brand-color"));
    }

    #[test]
    fn parse_vendor_prefix() {
        let sx = parse("-webkit-line-clamp: 3;");
        assert_eq!(sx.get("WebkitLineClamp"), Some(&DirectiveValue::from(3)));
    }

    #[test]
    fn parse_missing_semicolon_before_block() {
        let sx = parse("color: red &:hover { color: blue }");
        assert_eq!(sx.len(), 2);
        assert_eq!(sx.get("color"), Some(&DirectiveValue::from("red")));
    }

    #[test]
    fn error_nested_pseudo() {
        let err = parse_sx("&:hover { &::after { color: red; } }").unwrap_err();
        assert_eq!(
            err,
            ParseError::NestedPseudo {
                selector: "&::after".into(),
                parent: "&:hover".into(),
            }
        );
    }

    #[test]
    fn error_unclosed_block() {
        let err = parse_sx("&:hover { color: red;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof(_)));
    }

    #[test]
    fn error_empty_value() {
        let err = parse_sx("color: ;").unwrap_err();
        assert_eq!(
            err,
            ParseError::EmptyValue {
                property: "color".into()
            }
        );
    }

    #[test]
    fn error_missing_colon() {
        let err = parse_sx("color red;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { position: 1, .. }));
    }

    #[test]
    fn error_property_must_be_ident() {
        let err = parse_sx("10px: red;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { position: 0, .. }));
    }

    #[test]
    fn error_unterminated_string() {
        let err = parse_sx("color: red; content: \"abc;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { position: 6, .. }));
    }

    #[test]
    fn error_brace_in_value() {
        let err = parse_sx("color: { red }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn from_str_and_parse_agree() {
        let a: StyleDirective = "color: red; &:focus { outline: none; }".parse().unwrap();
        let b = StyleDirective::parse("color: red; &:focus { outline: none; }").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn strip_comments_unterminated() {
        assert_eq!(strip_comments("a /* b"), "a  ");
        assert_eq!(strip_comments("a/**/b"), "a b");
    }
}
