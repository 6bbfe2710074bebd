//! Compiler configuration.

use crate::css::scope::{validate_class_chars, ScopeError};

/// Shortest allowed random suffix.
pub const MIN_SUFFIX_LEN: usize = 7;

/// Default class name prefix.
pub const DEFAULT_PREFIX: &str = "sx";

/// Default suffix length.
pub const DEFAULT_SUFFIX_LEN: usize = 8;

/// Default transition bound to the scope class whenever pseudo rules are emitted.
pub const DEFAULT_TRANSITION: &str = "all 0.2s ease-in-out";

/// Errors from [`CompilerConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid class prefix: {0}")]
    InvalidPrefix(#[from] ScopeError),
    #[error("suffix length {len} is below the minimum of {min}")]
    SuffixTooShort { len: usize, min: usize },
}

/// When a mounted component gets a new scope class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopePolicy {
    /// Every compilation generates a fresh scope class, even for unchanged input.
    #[default]
    PerRender,
    /// A component instance keeps the first scope class it was given.
    PerInstance,
}

/// Settings for a [`StyleCompiler`](crate::css::compiler::StyleCompiler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Class name prefix; the scope class is `{prefix}-{suffix}`.
    pub prefix: String,
    /// Number of generated suffix characters.
    pub suffix_len: usize,
    /// Transition written on the scope class ahead of the pseudo rules.
    /// `None` omits the transition rule.
    pub transition: Option<String>,
    /// Scope reuse across re-renders in a [`StyleRegistry`](crate::registry::StyleRegistry).
    pub scope_policy: ScopePolicy,
}

impl CompilerConfig {
    /// Create a config with the default settings.
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix_len: DEFAULT_SUFFIX_LEN,
            transition: Some(DEFAULT_TRANSITION.to_string()),
            scope_policy: ScopePolicy::PerRender,
        }
    }

    /// Set the class prefix (builder).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the suffix length (builder).
    pub fn with_suffix_len(mut self, len: usize) -> Self {
        self.suffix_len = len;
        self
    }

    /// Set the default transition (builder).
    pub fn with_transition(mut self, transition: impl Into<String>) -> Self {
        self.transition = Some(transition.into());
        self
    }

    /// Omit the transition rule (builder).
    pub fn without_transition(mut self) -> Self {
        self.transition = None;
        self
    }

    /// Set the scope policy (builder).
    pub fn with_scope_policy(mut self, policy: ScopePolicy) -> Self {
        self.scope_policy = policy;
        self
    }

    /// Check the prefix and suffix length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_class_chars(&self.prefix)?;
        if self.suffix_len < MIN_SUFFIX_LEN {
            return Err(ConfigError::SuffixTooShort {
                len: self.suffix_len,
                min: MIN_SUFFIX_LEN,
            });
        }
        Ok(())
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::new()
    }
}
