//! Identifier forms used by generated option code.
//!
//! Only the first character changes case; the rest of the identifier is kept
//! verbatim, so `myType` becomes `MyType` and `HTTPPort` becomes `hTTPPort`.

/// Returns `name` with its first character lower-cased.
///
/// # Examples
///
/// ```
/// use configify::naming::lower_form;
///
/// assert_eq!(lower_form("Height"), "height");
/// assert_eq!(lower_form("myType"), "myType");
/// ```
#[must_use]
pub fn lower_form(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// Returns `name` with its first character upper-cased.
///
/// # Examples
///
/// ```
/// use configify::naming::upper_form;
///
/// assert_eq!(upper_form("color"), "Color");
/// assert_eq!(upper_form("myType"), "MyType");
/// ```
#[must_use]
pub fn upper_form(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Name of the option factory for a field (`color` -> `WithColor`).
#[must_use]
pub fn factory_name(name: &str) -> String {
    format!("With{}", upper_form(name))
}

/// Name of the private option carrier type for a field (`Height` -> `heightOption`).
#[must_use]
pub fn carrier_name(name: &str) -> String {
    format!("{}Option", lower_form(name))
}
