//! # scoped-sx
//!
//! Compiles "sx" style directives, the CSS-in-JS style objects that web UI
//! components accept for custom styling, into a base inline style plus a
//! stylesheet of pseudo-selector rules scoped to a generated class name.
//!
//! ```
//! use scoped_sx::{compile, StyleDeclarations, StyleDirective};
//!
//! let sx = StyleDirective::new()
//!     .set("backgroundColor", "red")
//!     .set("&:hover", StyleDeclarations::new().set("backgroundColor", "blue"));
//! let compiled = compile(Some(&sx));
//!
//! assert_eq!(compiled.base.get("backgroundColor").map(|v| v.to_string()), Some("red".into()));
//! assert!(compiled.stylesheet_text.contains("background-color: blue;"));
//! ```
//!
//! ## Core Systems
//!
//! - **[`css`]**: Directive model, case conversion, scope classes, compiler, sx text parser
//! - **[`registry`]**: Mounted stylesheet lifetime and per-instance scope reuse for hosts
//! - **`sx!`**: Compile-time directive literals (feature `macros`)

// Core engine
pub mod css;

// Host integration
pub mod registry;

pub use css::compiler::{compile, CompiledStyle, StyleCompiler};
pub use css::config::{CompilerConfig, ConfigError, ScopePolicy};
pub use css::directive::{DirectiveError, DirectiveValue, StyleDeclarations, StyleDirective};
pub use css::parser::{parse_sx, ParseError};
pub use css::scope::{RandomScope, ScopeClass, ScopeError, ScopeSource, SeededScope, SequentialScope};
pub use css::value::StyleValue;
pub use registry::{StyleHandle, StyleRegistry};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use scoped_sx_macros::sx;
