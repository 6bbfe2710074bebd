//! Style directive input model: `StyleDirective`, `StyleDeclarations`, `DirectiveValue`.
//!
//! A directive is an insertion-ordered map. Keys starting with `&` are
//! pseudo-selector rules whose value is a block of declarations; every other
//! key is a camelCase style property with a primitive value.

use crate::css::value::StyleValue;

/// Returns `true` if `key` names a pseudo-selector rule (first character `&`).
pub fn is_pseudo_key(key: &str) -> bool {
    key.starts_with('&')
}

/// Errors from [`StyleDirective::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    #[error("pseudo-selector `{key}` must map to a declaration block, not a plain value")]
    PseudoKeyWithValue { key: String },
    #[error("property `{key}` holds a declaration block; only `&` keys may nest")]
    BlockOutsidePseudo { key: String },
}

/// An insertion-ordered list of camelCase property declarations.
///
/// Setting a property that already exists replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDeclarations {
    entries: Vec<(String, StyleValue)>,
}

impl StyleDeclarations {
    /// Create an empty declaration list.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set a property (builder).
    pub fn set(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(property, value);
        self
    }

    /// Set a property, returning the value it replaced.
    pub fn insert(
        &mut self,
        property: impl Into<String>,
        value: impl Into<StyleValue>,
    ) -> Option<StyleValue> {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == property) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((property, value));
                None
            }
        }
    }

    /// Look up a property value.
    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    /// Iterate over `(property, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Property names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for StyleDeclarations
where
    K: Into<String>,
    V: Into<StyleValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut decls = StyleDeclarations::new();
        for (k, v) in iter {
            decls.insert(k, v);
        }
        decls
    }
}

/// The value stored under a directive key.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveValue {
    /// A primitive property value.
    Value(StyleValue),
    /// A nested declaration block (only meaningful under an `&` key).
    Block(StyleDeclarations),
}

impl From<StyleValue> for DirectiveValue {
    fn from(v: StyleValue) -> Self {
        DirectiveValue::Value(v)
    }
}

impl From<StyleDeclarations> for DirectiveValue {
    fn from(block: StyleDeclarations) -> Self {
        DirectiveValue::Block(block)
    }
}

impl From<&str> for DirectiveValue {
    fn from(s: &str) -> Self {
        DirectiveValue::Value(s.into())
    }
}

impl From<String> for DirectiveValue {
    fn from(s: String) -> Self {
        DirectiveValue::Value(s.into())
    }
}

impl From<f64> for DirectiveValue {
    fn from(n: f64) -> Self {
        DirectiveValue::Value(n.into())
    }
}

impl From<f32> for DirectiveValue {
    fn from(n: f32) -> Self {
        DirectiveValue::Value(n.into())
    }
}

impl From<i32> for DirectiveValue {
    fn from(n: i32) -> Self {
        DirectiveValue::Value(n.into())
    }
}

impl From<u32> for DirectiveValue {
    fn from(n: u32) -> Self {
        DirectiveValue::Value(n.into())
    }
}

/// An sx style directive: plain properties plus `&`-keyed pseudo rules.
///
/// ```
/// use scoped_sx::css::directive::{StyleDeclarations, StyleDirective};
///
/// let sx = StyleDirective::new()
///     .set("backgroundColor", "red")
///     .set("&:hover", StyleDeclarations::new().set("backgroundColor", "blue"));
/// assert_eq!(sx.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDirective {
    entries: Vec<(String, DirectiveValue)>,
}

impl StyleDirective {
    /// Create an empty directive.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set an entry (builder).
    pub fn set(mut self, key: impl Into<String>, value: impl Into<DirectiveValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set an entry, returning the value it replaced. The key keeps its
    /// original position when replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<DirectiveValue>,
    ) -> Option<DirectiveValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&DirectiveValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DirectiveValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if any key is a pseudo-selector rule.
    pub fn has_pseudo_rules(&self) -> bool {
        self.entries.iter().any(|(k, _)| is_pseudo_key(k))
    }

    /// Check that every `&` key holds a block and every other key a value.
    ///
    /// Compilation never requires this; it lets callers reject malformed
    /// directives up front instead of getting empty or skipped rules.
    pub fn validate(&self) -> Result<(), DirectiveError> {
        for (key, value) in &self.entries {
            match (is_pseudo_key(key), value) {
                (true, DirectiveValue::Value(_)) => {
                    return Err(DirectiveError::PseudoKeyWithValue { key: key.clone() })
                }
                (false, DirectiveValue::Block(_)) => {
                    return Err(DirectiveError::BlockOutsidePseudo { key: key.clone() })
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for StyleDirective
where
    K: Into<String>,
    V: Into<DirectiveValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut directive = StyleDirective::new();
        for (k, v) in iter {
            directive.insert(k, v);
        }
        directive
    }
}
