//! Naming rules for generated members.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `player_health` | [`derive_name`] | `playerHealth` |
//! | `_health` | [`derive_name`] | `Health` |
//! | `trailing_` | [`derive_name`] | `trailing` |
//! | member + optional override | [`resolve_name`] | validated surface name |

use thiserror::Error;

/// Reserved words of the target language; usable only with an `@` prefix
const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Why a surface name could not be produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("generated name for `{member}` is empty")]
    Empty { member: String },

    #[error("`{name}` is not a valid identifier")]
    InvalidIdentifier { name: String },

    #[error("generated name `{name}` is identical to the member it forwards to")]
    SelfReference { name: String },
}

/// Convert a raw member name into its public surface name.
///
/// Every underscore is removed and the character after it is upper-cased.
/// The first character of the input is not upper-cased on its own, and a
/// trailing underscore is simply dropped.
///
/// # Examples
///
/// ```
/// use partialgen_core::naming::derive_name;
///
/// assert_eq!(derive_name("player_health"), "playerHealth");
/// assert_eq!(derive_name("_x"), "X");
/// assert_eq!(derive_name("trailing_"), "trailing");
/// ```
pub fn derive_name(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut capitalize_next = false;

    for c in raw.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Pick the surface name for `member`: the override verbatim when present,
/// otherwise [`derive_name`]. The result is validated before it is returned.
pub fn resolve_name(member: &str, override_name: Option<&str>) -> Result<String, NameError> {
    let name = match override_name {
        Some(name) => name.to_string(),
        None => derive_name(member),
    };

    if name.is_empty() {
        return Err(NameError::Empty {
            member: member.to_string(),
        });
    }

    if !is_valid_identifier(&name) || is_reserved_keyword(&name) {
        return Err(NameError::InvalidIdentifier { name });
    }

    if name == member {
        return Err(NameError::SelfReference { name });
    }

    Ok(name)
}

/// Check identifier syntax: a letter or `_` followed by letters, digits or `_`,
/// optionally prefixed with `@`.
///
/// # Examples
///
/// ```
/// use partialgen_core::naming::is_valid_identifier;
///
/// assert!(is_valid_identifier("Health"));
/// assert!(is_valid_identifier("@class"));
/// assert!(!is_valid_identifier("2fast"));
/// assert!(!is_valid_identifier("has space"));
/// ```
pub fn is_valid_identifier(name: &str) -> bool {
    let body = name.strip_prefix('@').unwrap_or(name);
    let mut chars = body.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Whether `name` is a reserved word (an `@`-prefixed name never is)
pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name)
}

/// Last segment of a dotted name
///
/// ```
/// use partialgen_core::naming::simple_name;
///
/// assert_eq!(simple_name("Game.Player"), "Player");
/// assert_eq!(simple_name("Config"), "Config");
/// ```
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}
