//! Emitted CSS model: scoped rules and their text form.
//!
//! The compiler builds a [`ScopedStylesheet`] and serializes it with
//! [`Display`](std::fmt::Display). One rule per line:
//!
//! ```text
//! .sx-a1B2c3D4 { transition: all 0.2s ease-in-out; }
//! .sx-a1B2c3D4:hover { background-color: blue; }
//! ```

use std::fmt;

use crate::css::case::camel_to_kebab;
use crate::css::directive::StyleDeclarations;

/// A single emitted declaration with a kebab-case property name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssDeclaration {
    pub property: String,
    pub value: String,
}

impl CssDeclaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for CssDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.property, self.value)
    }
}

/// A rule: one selector and its declarations, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedRule {
    pub selector: String,
    pub declarations: Vec<CssDeclaration>,
}

impl ScopedRule {
    /// Create a rule with no declarations.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    /// Build a rule from camelCase declarations, converting names to kebab-case.
    pub fn from_declarations(selector: impl Into<String>, decls: &StyleDeclarations) -> Self {
        let mut rule = ScopedRule::new(selector);
        for (property, value) in decls.iter() {
            rule.push(camel_to_kebab(property), value.to_string());
        }
        rule
    }

    /// Append a declaration. `property` is written as given.
    pub fn push(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.declarations.push(CssDeclaration::new(property, value));
    }
}

impl fmt::Display for ScopedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.selector)?;
        for decl in &self.declarations {
            write!(f, " {decl}")?;
        }
        if self.declarations.is_empty() {
            f.write_str("}")
        } else {
            f.write_str(" }")
        }
    }
}

/// An ordered list of scoped rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopedStylesheet {
    pub rules: Vec<ScopedRule>,
}

impl ScopedStylesheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn push(&mut self, rule: ScopedRule) {
        self.rules.push(rule);
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for ScopedStylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_display() {
        assert_eq!(
            CssDeclaration::new("background-color", "red").to_string(),
            "background-color: red;"
        );
    }

    #[test]
    fn test_rule_display() {
        let mut rule = ScopedRule::new(".sx-x:hover");
        rule.push("color", "blue");
        rule.push("width", "80%");
        assert_eq!(rule.to_string(), ".sx-x:hover { color: blue; width: 80%; }");
    }

    #[test]
    fn test_empty_rule_display() {
        assert_eq!(ScopedRule::new(".sx-x:focus").to_string(), ".sx-x:focus {}");
    }

    #[test]
    fn test_rule_from_declarations_converts_case() {
        let decls = StyleDeclarations::new()
            .set("borderTopColor", "red")
            .set("opacity", 0.5);
        let rule = ScopedRule::from_declarations(".s:hover", &decls);
        assert_eq!(
            rule.declarations,
            vec![
                CssDeclaration::new("border-top-color", "red"),
                CssDeclaration::new("opacity", "0.5"),
            ]
        );
    }

    #[test]
    fn test_stylesheet_display_joins_lines() {
        let mut sheet = ScopedStylesheet::new();
        let mut a = ScopedRule::new(".a");
        a.push("color", "red");
        sheet.push(a);
        sheet.push(ScopedRule::new(".a:hover"));
        assert_eq!(sheet.to_string(), ".a { color: red; }\n.a:hover {}");
    }

    #[test]
    fn test_empty_stylesheet() {
        let sheet = ScopedStylesheet::default();
        assert!(sheet.is_empty());
        assert_eq!(sheet.to_string(), "");
    }
}
