//! Proc macros for scoped-sx: `sx!` compile-time style directives.
//!
//! This crate is not meant to be used directly; enable the `macros` feature on `scoped-sx`.

use proc_macro::TokenStream;

mod sx_macro;

/// Compile-time style directive macro.
///
/// Parses CSS-like declarations and `&` pseudo-selector blocks at compile
/// time and produces a `scoped_sx::StyleDirective`.
///
/// # Syntax
///
/// ```ignore
/// let sx = sx! {
///     background-color: red;
///     padding: 20px;
///     transition: opacity 150ms ease-in-out;
///     &:hover { background-color: "#00f"; opacity: 0.8; }
///     &::before { content: "\"\""; }
///     "&:hover:not(:checked)" { border-color: gray; }
/// };
/// ```
///
/// Property names use kebab-case and become camelCase directive keys.
/// Unitless numbers become `StyleValue::Number`; everything else becomes a
/// string. Values Rust cannot tokenize (`2em`, `rgba(...)`) go in string
/// literals, as do selectors with arguments.
#[proc_macro]
pub fn sx(input: TokenStream) -> TokenStream {
    sx_macro::sx_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
