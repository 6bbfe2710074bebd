//! Property name case conversion between camelCase and kebab-case.
//!
//! Directive keys are camelCase (the form consumed by inline styles); emitted
//! stylesheet text uses kebab-case CSS property names.

/// Convert a camelCase property name to kebab-case.
///
/// A hyphen is inserted before every uppercase letter, which is then
/// lowercased. Consecutive capitals each get their own hyphen, and a leading
/// capital yields a leading hyphen, so vendor-prefixed names come out right:
///
/// ```
/// use scoped_sx::css::case::camel_to_kebab;
///
/// assert_eq!(camel_to_kebab("borderTopColor"), "border-top-color");
/// assert_eq!(camel_to_kebab("WebkitTransition"), "-webkit-transition");
/// assert_eq!(camel_to_kebab("background-color"), "background-color");
/// ```
pub fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_uppercase() {
            out.push('-');
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Convert a kebab-case property name to camelCase.
///
/// Each hyphen followed by a letter is dropped and the letter uppercased.
/// Custom properties (`--name`) are case-sensitive and returned unchanged.
///
/// ```
/// use scoped_sx::css::case::kebab_to_camel;
///
/// assert_eq!(kebab_to_camel("border-top-color"), "borderTopColor");
/// assert_eq!(kebab_to_camel("-webkit-transition"), "WebkitTransition");
/// assert_eq!(kebab_to_camel("--accent"), "--accent");
/// ```
pub fn kebab_to_camel(name: &str) -> String {
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
    // Trailing hyphen has nothing to capitalize.
    if upper_next {
        out.push('-');
    }
    out
}
