//! Scope class names and the sources that generate them.
//!
//! Every compilation that needs scoping gets a class name of the form
//! `{prefix}-{suffix}`. The suffix comes from a [`ScopeSource`]; uniqueness is
//! practical (random or counter based), not cryptographic.

use std::fmt;

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Errors from [`ScopeClass::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    #[error("scope class name is empty")]
    Empty,
    #[error("scope class name `{0}` must start with an ASCII letter")]
    InvalidStart(String),
    #[error("scope class name `{name}` contains invalid character {ch:?}")]
    InvalidChar { name: String, ch: char },
}

/// A validated CSS class name used to scope pseudo-selector rules.
///
/// Always non-empty, starts with an ASCII letter, and holds only ASCII
/// alphanumerics and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeClass(String);

impl ScopeClass {
    /// Validate and wrap a class name.
    pub fn new(name: impl Into<String>) -> Result<Self, ScopeError> {
        let name = name.into();
        validate_class_chars(&name)?;
        Ok(ScopeClass(name))
    }

    /// Build `{prefix}-{suffix}`. The config validates the prefix and the
    /// compiler filters the suffix.
    pub(crate) fn from_parts(prefix: &str, suffix: &str) -> Self {
        ScopeClass(format!("{prefix}-{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The class as a CSS selector (`.name`).
    pub fn selector(&self) -> String {
        format!(".{}", self.0)
    }
}

impl fmt::Display for ScopeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScopeClass {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check the class-name rules shared by scope classes and config prefixes.
pub(crate) fn validate_class_chars(name: &str) -> Result<(), ScopeError> {
    let first = name.chars().next().ok_or(ScopeError::Empty)?;
    if !first.is_ascii_alphabetic() {
        return Err(ScopeError::InvalidStart(name.to_string()));
    }
    if let Some(ch) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-')
    {
        return Err(ScopeError::InvalidChar {
            name: name.to_string(),
            ch,
        });
    }
    Ok(())
}

/// A generator of scope class suffixes.
///
/// Implementations return exactly `len` ASCII alphanumeric characters.
pub trait ScopeSource {
    fn next_suffix(&mut self, len: usize) -> String;
}

impl<S: ScopeSource + ?Sized> ScopeSource for &mut S {
    fn next_suffix(&mut self, len: usize) -> String {
        (**self).next_suffix(len)
    }
}

impl<S: ScopeSource + ?Sized> ScopeSource for Box<S> {
    fn next_suffix(&mut self, len: usize) -> String {
        (**self).next_suffix(len)
    }
}

/// Random suffixes from the thread-local RNG. The default source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomScope;

impl ScopeSource for RandomScope {
    fn next_suffix(&mut self, len: usize) -> String {
        alphanumeric(&mut rand::rng(), len)
    }
}

/// Random suffixes from a seeded RNG, reproducible across runs.
#[derive(Debug, Clone)]
pub struct SeededScope {
    rng: StdRng,
}

impl SeededScope {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ScopeSource for SeededScope {
    fn next_suffix(&mut self, len: usize) -> String {
        alphanumeric(&mut self.rng, len)
    }
}

/// Length of the random nonce picked by [`SequentialScope::new`].
pub const SEQUENTIAL_NONCE_LEN: usize = 6;

/// Counter-based suffixes: a fixed nonce followed by a base-36 counter.
///
/// Never repeats within one source until the counter wraps. Suffixes longer
/// than `len` are not truncated, so uniqueness wins over length.
#[derive(Debug, Clone)]
pub struct SequentialScope {
    nonce: String,
    counter: u64,
}

impl SequentialScope {
    /// Create a source with a random mixed-case nonce of
    /// [`SEQUENTIAL_NONCE_LEN`] characters, so separate sources in one
    /// document are unlikely to overlap.
    pub fn new() -> Self {
        Self::with_nonce(alphanumeric(&mut rand::rng(), SEQUENTIAL_NONCE_LEN))
    }

    /// Create a source with a fixed nonce. Non-alphanumeric characters are dropped.
    pub fn with_nonce(nonce: impl Into<String>) -> Self {
        let nonce: String = nonce
            .into()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        Self { nonce, counter: 0 }
    }

    /// Number of suffixes issued so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }
}

impl Default for SequentialScope {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeSource for SequentialScope {
    fn next_suffix(&mut self, len: usize) -> String {
        let count = to_base36(self.counter);
        self.counter = self.counter.wrapping_add(1);
        let width = len.saturating_sub(self.nonce.len());
        format!("{}{:0>width$}", self.nonce, count, width = width)
    }
}

fn alphanumeric<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_scope_class_valid() {
        let class = ScopeClass::new("sx-Ab12cd9").unwrap();
        assert_eq!(class.as_str(), "sx-Ab12cd9");
        assert_eq!(class.selector(), ".sx-Ab12cd9");
        assert_eq!(class.to_string(), "sx-Ab12cd9");
    }

    #[test]
    fn test_scope_class_rejects_empty() {
        assert_eq!(ScopeClass::new(""), Err(ScopeError::Empty));
    }

    #[test]
    fn test_scope_class_rejects_leading_digit() {
        assert!(matches!(ScopeClass::new("1abc"), Err(ScopeError::InvalidStart(_))));
        assert!(matches!(ScopeClass::new("-abc"), Err(ScopeError::InvalidStart(_))));
    }

    #[test]
    fn test_scope_class_rejects_invalid_char() {
        assert_eq!(
            ScopeClass::new("sx_abc"),
            Err(ScopeError::InvalidChar {
                name: "sx_abc".into(),
                ch: '_'
            })
        );
        assert!(ScopeClass::new("sx abc").is_err());
    }

    #[test]
    fn test_random_scope_length_and_charset() {
        let mut source = RandomScope;
        for len in [7, 8, 16] {
            let suffix = source.next_suffix(len);
            assert_eq!(suffix.len(), len);
            assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_seeded_scope_is_reproducible() {
        let mut a = SeededScope::new(42);
        let mut b = SeededScope::new(42);
        for _ in 0..5 {
            assert_eq!(a.next_suffix(8), b.next_suffix(8));
        }
    }

    #[test]
    fn test_seeded_scope_differs_by_seed() {
        let mut a = SeededScope::new(1);
        let mut b = SeededScope::new(2);
        assert_ne!(a.next_suffix(12), b.next_suffix(12));
    }

    #[test]
    fn test_sequential_scope_format() {
        let mut source = SequentialScope::with_nonce("t");
        assert_eq!(source.next_suffix(8), "t0000000");
        assert_eq!(source.next_suffix(8), "t0000001");
        assert_eq!(source.issued(), 2);
    }

    #[test]
    fn test_sequential_scope_base36_rollover() {
        let mut source = SequentialScope::with_nonce("q");
        for _ in 0..36 {
            source.next_suffix(4);
        }
        assert_eq!(source.next_suffix(4), "q010");
    }

    #[test]
    fn test_sequential_scope_never_repeats() {
        let mut source = SequentialScope::new();
        let seen: HashSet<String> = (0..5_000).map(|_| source.next_suffix(7)).collect();
        assert_eq!(seen.len(), 5_000);
    }

    #[test]
    fn test_sequential_default_nonce() {
        let mut a = SequentialScope::new();
        let mut b = SequentialScope::new();
        let first = a.next_suffix(8);
        assert_eq!(first.len(), 8);
        assert!(first.ends_with("00"));
        assert!(first[..SEQUENTIAL_NONCE_LEN].chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(first, b.next_suffix(8));
    }

    #[test]
    fn test_sequential_nonce_filters_characters() {
        let mut source = SequentialScope::with_nonce("a-b_c");
        assert!(source.next_suffix(7).starts_with("abc"));
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn test_boxed_source() {
        let mut source: Box<dyn ScopeSource> = Box::new(SequentialScope::with_nonce("b"));
        assert_eq!(source.next_suffix(3), "b00");
    }
}
