//! The sx directive compiler.
//!
//! Splits a [`StyleDirective`] into a camelCase base style for the element's
//! inline `style` and a stylesheet of pseudo-selector rules scoped to a freshly
//! generated class name.

use tracing::{trace, warn};

use crate::css::case::camel_to_kebab;
use crate::css::config::{CompilerConfig, ConfigError};
use crate::css::directive::{is_pseudo_key, DirectiveValue, StyleDeclarations, StyleDirective};
use crate::css::scope::{RandomScope, ScopeClass, ScopeSource};
use crate::css::stylesheet::{ScopedRule, ScopedStylesheet};

/// The result of compiling a directive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledStyle {
    /// Every non-`&` entry of the directive, camelCase, in insertion order.
    pub base: StyleDeclarations,
    /// The generated scope class, or empty when no directive was given.
    pub scope_class_name: String,
    /// Scoped pseudo-selector rules; empty when the directive had no `&` keys.
    pub stylesheet_text: String,
}

impl CompiledStyle {
    /// Returns `true` if there is stylesheet text to inject.
    pub fn has_stylesheet(&self) -> bool {
        !self.stylesheet_text.is_empty()
    }

    /// Append the scope class to a space-separated class list.
    ///
    /// Empty segments are dropped and the scope class is not added twice.
    pub fn class_list(&self, existing: &str) -> String {
        let mut classes: Vec<&str> = existing.split_whitespace().collect();
        if !self.scope_class_name.is_empty() && !classes.contains(&self.scope_class_name.as_str())
        {
            classes.push(&self.scope_class_name);
        }
        classes.join(" ")
    }

    /// Render `base` as an HTML `style` attribute value with kebab-case names.
    pub fn inline_style(&self) -> String {
        self.base
            .iter()
            .map(|(property, value)| format!("{}: {};", camel_to_kebab(property), value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Wrap the stylesheet text in a `<style>` element, if there is any.
    pub fn style_element(&self) -> Option<String> {
        self.has_stylesheet()
            .then(|| format!("<style>{}</style>", self.stylesheet_text))
    }
}

/// A compiler owning its configuration and scope source.
#[derive(Debug, Clone)]
pub struct StyleCompiler<S = RandomScope> {
    config: CompilerConfig,
    source: S,
}

impl StyleCompiler<RandomScope> {
    /// A compiler with the default config and thread-local random scopes.
    pub fn new() -> Self {
        Self {
            config: CompilerConfig::default(),
            source: RandomScope,
        }
    }

    /// A compiler with a custom config and thread-local random scopes.
    pub fn with_config(config: CompilerConfig) -> Result<Self, ConfigError> {
        Self::with_source(config, RandomScope)
    }
}

impl Default for StyleCompiler<RandomScope> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ScopeSource> StyleCompiler<S> {
    /// A compiler with a custom config and scope source.
    pub fn with_source(config: CompilerConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, source })
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Generate a new scope class from the configured prefix and source.
    ///
    /// Characters other than ASCII alphanumerics are dropped from the suffix.
    pub fn next_scope(&mut self) -> ScopeClass {
        let mut suffix = self.source.next_suffix(self.config.suffix_len);
        if !suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
            warn!(suffix = suffix.as_str(), "scope source returned invalid class characters");
            suffix.retain(|c| c.is_ascii_alphanumeric());
        }
        ScopeClass::from_parts(&self.config.prefix, &suffix)
    }

    /// Compile a directive, generating a fresh scope class.
    ///
    /// `None` yields an empty [`CompiledStyle`] without generating a scope.
    pub fn compile(&mut self, directive: Option<&StyleDirective>) -> CompiledStyle {
        match directive {
            None => CompiledStyle::default(),
            Some(directive) => {
                let scope = self.next_scope();
                self.compile_scoped(directive, &scope)
            }
        }
    }

    /// Compile a directive against an existing scope class.
    pub fn compile_scoped(&self, directive: &StyleDirective, scope: &ScopeClass) -> CompiledStyle {
        let mut base = StyleDeclarations::new();
        let mut pseudo = Vec::new();

        for (key, value) in directive.iter() {
            if is_pseudo_key(key) {
                pseudo.push((key, value));
                continue;
            }
            match value {
                DirectiveValue::Value(v) => {
                    base.insert(key, v.clone());
                }
                DirectiveValue::Block(_) => {
                    warn!(key, "skipping nested block under a non-`&` key");
                }
            }
        }

        let stylesheet_text = if pseudo.is_empty() {
            String::new()
        } else {
            let scope_selector = scope.selector();
            let mut sheet = ScopedStylesheet::new();

            if let Some(transition) = &self.config.transition {
                let mut rule = ScopedRule::new(scope_selector.as_str());
                rule.push("transition", transition.as_str());
                sheet.push(rule);
            }

            for (key, value) in pseudo {
                // Everything after the leading `&` attaches directly to the class.
                let selector = format!("{scope_selector}{}", &key[1..]);
                let rule = match value {
                    DirectiveValue::Block(decls) => ScopedRule::from_declarations(selector, decls),
                    DirectiveValue::Value(_) => {
                        warn!(key, "pseudo-selector holds a plain value; emitting an empty rule");
                        ScopedRule::new(selector)
                    }
                };
                sheet.push(rule);
            }

            sheet.to_string()
        };

        trace!(
            scope = %scope,
            base = base.len(),
            stylesheet_bytes = stylesheet_text.len(),
            "compiled sx directive"
        );

        CompiledStyle {
            base,
            scope_class_name: scope.to_string(),
            stylesheet_text,
        }
    }
}

/// Compile a directive with the default config and a random scope class.
///
/// ```
/// use scoped_sx::css::compiler::compile;
/// use scoped_sx::css::directive::{StyleDeclarations, StyleDirective};
///
/// let sx = StyleDirective::new()
///     .set("backgroundColor", "red")
///     .set("&:hover", StyleDeclarations::new().set("backgroundColor", "blue"));
/// let compiled = compile(Some(&sx));
///
/// assert_eq!(compiled.base, StyleDeclarations::new().set("backgroundColor", "red"));
/// assert!(compiled
///     .stylesheet_text
///     .contains(&format!(".{}:hover {{ background-color: blue; }}", compiled.scope_class_name)));
/// ```
pub fn compile(directive: Option<&StyleDirective>) -> CompiledStyle {
    StyleCompiler::new().compile(directive)
}
