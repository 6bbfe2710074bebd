//! sx! macro: parse declarations and `&` blocks at compile time and generate StyleDirective code.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{braced, Error, Ident, LitFloat, LitInt, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// A single parsed value token.
#[derive(Debug, Clone)]
pub(crate) enum SxValue {
    /// A unitless number, with its source digits for joined values.
    Number(f64, String, Span),
    /// Anything else, already in CSS text form (`20px`, `50%`, `#fff`, `solid`).
    Text(String, Span),
}

impl SxValue {
    fn css_text(&self) -> &str {
        match self {
            SxValue::Number(_, text, _) | SxValue::Text(text, _) => text,
        }
    }
}

/// A single declaration: `property-name: value1 value2;`
#[derive(Debug, Clone)]
pub(crate) struct SxDeclaration {
    /// The property name in kebab-case (e.g. "background-color").
    pub name: String,
    /// The span of the property name, for error reporting.
    pub name_span: Span,
    pub values: Vec<SxValue>,
}

/// A top-level item: a base declaration or a pseudo-selector block.
#[derive(Debug, Clone)]
pub(crate) enum SxItem {
    Declaration(SxDeclaration),
    Block {
        selector: String,
        declarations: Vec<SxDeclaration>,
    },
}

/// The top-level input to the sx! macro.
#[derive(Debug)]
struct SxInput {
    items: Vec<SxItem>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for SxInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut items = Vec::new();
        while !input.is_empty() {
            if input.peek(Token![&]) {
                let selector = parse_bare_selector(input)?;
                items.push(parse_block(input, selector)?);
            } else if input.peek(LitStr) {
                let lit: LitStr = input.parse()?;
                let selector = lit.value();
                if !selector.starts_with('&') {
                    return Err(Error::new(
                        lit.span(),
                        format!("selector `{}` must start with `&`", selector),
                    ));
                }
                items.push(parse_block(input, selector)?);
            } else {
                items.push(SxItem::Declaration(parse_declaration(input)?));
            }
        }
        Ok(SxInput { items })
    }
}

/// Parse a hyphenated name: `background-color`, `-webkit-box`, `--brand`, `first-child`.
fn parse_hyphenated(input: ParseStream) -> Result<(String, Span)> {
    let mut name = String::new();
    let mut span = None;

    while input.peek(Token![-]) {
        let dash = input.parse::<Token![-]>()?;
        span.get_or_insert(dash.span);
        name.push('-');
    }

    let first = input.call(Ident::parse_any)?;
    let span = span.unwrap_or_else(|| first.span());
    name.push_str(&first.unraw().to_string());

    while input.peek(Token![-]) && input.peek2(Ident::peek_any) {
        input.parse::<Token![-]>()?;
        let next = input.call(Ident::parse_any)?;
        name.push('-');
        name.push_str(&next.unraw().to_string());
    }

    Ok((name, span))
}

/// Parse `&` followed by `:name` / `::name` segments, e.g. `&:hover::after`.
fn parse_bare_selector(input: ParseStream) -> Result<String> {
    let amp = input.parse::<Token![&]>()?;
    let mut selector = String::from("&");

    loop {
        if input.peek(Token![::]) {
            input.parse::<Token![::]>()?;
            selector.push_str("::");
        } else if input.peek(Token![:]) {
            input.parse::<Token![:]>()?;
            selector.push(':');
        } else {
            break;
        }
        let (name, _) = parse_hyphenated(input)?;
        selector.push_str(&name);
    }

    if selector == "&" {
        return Err(Error::new(
            amp.span,
            "expected `:` or `::` after `&`",
        ));
    }
    if input.peek(syn::token::Paren) {
        return Err(input.error(
            "selectors with arguments must be string literals, e.g. \"&:not(:checked)\"",
        ));
    }

    Ok(selector)
}

/// Parse the `{ ... }` body following a selector.
fn parse_block(input: ParseStream, selector: String) -> Result<SxItem> {
    let content;
    braced!(content in input);

    let mut declarations = Vec::new();
    while !content.is_empty() {
        if content.peek(Token![&]) || content.peek(LitStr) {
            return Err(content.error(format!(
                "pseudo-selector blocks cannot be nested inside `{}`",
                selector
            )));
        }
        declarations.push(parse_declaration(&content)?);
    }

    Ok(SxItem::Block {
        selector,
        declarations,
    })
}

/// Parse a single declaration: `property-name: values;` (final `;` optional).
pub(crate) fn parse_declaration(input: ParseStream) -> Result<SxDeclaration> {
    let (name, name_span) = parse_hyphenated(input)?;

    input.parse::<Token![:]>()?;

    let mut values = Vec::new();
    while !input.is_empty() && !input.peek(Token![;]) {
        values.push(parse_sx_value(input)?);
    }
    if !input.is_empty() {
        input.parse::<Token![;]>()?;
    }

    if values.is_empty() {
        return Err(Error::new(name_span, format!("property `{}` has no value", name)));
    }

    Ok(SxDeclaration {
        name,
        name_span,
        values,
    })
}

/// Parse a numeric literal (already past any `-` sign) with optional unit.
fn parse_number(input: ParseStream, sign: &str, span: Span) -> Result<SxValue> {
    let (digits, suffix) = if input.peek(LitFloat) {
        let lit: LitFloat = input.parse()?;
        (lit.base10_digits().to_string(), lit.suffix().to_string())
    } else {
        let lit: LitInt = input.parse()?;
        (lit.base10_digits().to_string(), lit.suffix().to_string())
    };
    let text = format!("{}{}", sign, digits);

    if !suffix.is_empty() {
        return Ok(SxValue::Text(format!("{}{}", text, suffix), span));
    }
    if input.peek(Token![%]) {
        input.parse::<Token![%]>()?;
        return Ok(SxValue::Text(format!("{}%", text), span));
    }

    let val: f64 = text
        .parse()
        .map_err(|_| Error::new(span, format!("invalid number `{}`", text)))?;
    Ok(SxValue::Number(val, text, span))
}

/// Parse a single value token.
pub(crate) fn parse_sx_value(input: ParseStream) -> Result<SxValue> {
    // Hash color: `#` followed by an identifier or a literal (`#fff`, `#1a1a2e`).
    if input.peek(Token![#]) {
        let hash_token = input.parse::<Token![#]>()?;
        let span = hash_token.span;
        let hex = if input.peek(Ident::peek_any) {
            input.call(Ident::parse_any)?.to_string()
        } else if input.peek(LitInt) {
            input.parse::<LitInt>()?.to_string()
        } else if input.peek(LitFloat) {
            input.parse::<LitFloat>()?.to_string()
        } else {
            return Err(input.error("expected hex color value after `#`"));
        };
        return Ok(SxValue::Text(format!("#{}", hex), span));
    }

    if input.peek(LitStr) {
        let lit: LitStr = input.parse()?;
        return Ok(SxValue::Text(lit.value(), lit.span()));
    }

    if input.peek(LitFloat) || input.peek(LitInt) {
        let span = input.span();
        return parse_number(input, "", span);
    }

    if input.peek(Ident::peek_any) {
        let (word, span) = parse_hyphenated(input)?;
        return Ok(SxValue::Text(word, span));
    }

    // Leading `-`: a negative number or a vendor-prefixed keyword.
    if input.peek(Token![-]) {
        if input.peek2(LitFloat) || input.peek2(LitInt) {
            let neg_token = input.parse::<Token![-]>()?;
            return parse_number(input, "-", neg_token.span);
        }
        let (word, span) = parse_hyphenated(input)?;
        return Ok(SxValue::Text(word, span));
    }

    Err(input.error("unexpected token in sx value"))
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Convert a kebab-case property name to the camelCase directive key.
///
/// Mirrors `scoped_sx::css::case::kebab_to_camel`. A proc-macro crate cannot
/// depend on the crate that re-exports it, so the rules live in both places.
fn kebab_to_camel(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    if upper_next {
        out.push('-');
    }
    out
}

/// Generate a `StyleValue` expression for a declaration's values.
fn value_expr(decl: &SxDeclaration) -> TokenStream {
    if let [SxValue::Number(n, _, _)] = decl.values.as_slice() {
        let abs = n.abs();
        return if *n < 0.0 {
            quote! { ::scoped_sx::StyleValue::Number(-#abs) }
        } else {
            quote! { ::scoped_sx::StyleValue::Number(#abs) }
        };
    }

    let text = decl
        .values
        .iter()
        .map(SxValue::css_text)
        .collect::<Vec<_>>()
        .join(" ");
    quote! { ::scoped_sx::StyleValue::Str(::std::string::String::from(#text)) }
}

fn declaration_pair(decl: &SxDeclaration) -> (String, TokenStream) {
    (kebab_to_camel(&decl.name), value_expr(decl))
}

/// Generate the insert statement for one top-level item.
fn generate_item(item: &SxItem) -> TokenStream {
    match item {
        SxItem::Declaration(decl) => {
            let (key, value) = declaration_pair(decl);
            quote! { __sx.insert(#key, #value); }
        }
        SxItem::Block {
            selector,
            declarations,
        } => {
            let inserts = declarations.iter().map(|decl| {
                let (key, value) = declaration_pair(decl);
                quote! { __decls.insert(#key, #value); }
            });
            quote! {
                __sx.insert(#selector, {
                    let mut __decls = ::scoped_sx::StyleDeclarations::new();
                    #(#inserts)*
                    __decls
                });
            }
        }
    }
}

/// Entry point for the sx! macro.
pub(crate) fn sx_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: SxInput = syn::parse2(input)?;

    if parsed.items.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            "sx! macro requires at least one declaration or `&` block",
        ));
    }

    let statements = parsed.items.iter().map(generate_item);

    Ok(quote! {
        {
            let mut __sx = ::scoped_sx::StyleDirective::new();
            #(#statements)*
            __sx
        }
    })
}

// ===========================================================================
// Tests
// ===========================================================================
