//! Typed paths into JSON trees.
//!
//! A [`Path`] is an ordered sequence of [`PathStep`]s, each either an object
//! field name or an array index. Paths display as
//! [JSON Pointers (RFC 6901)](https://tools.ietf.org/html/rfc6901).
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tardis_path::{path, resolve, Path};
//!
//! let doc = json!({"users": [{"name": "Ada"}]});
//! let p = path!["users", 0, "name"];
//! assert_eq!(p.to_string(), "/users/0/name");
//! assert_eq!(resolve(&doc, &p).unwrap(), &json!("Ada"));
//! assert_eq!(Path::parse_pointer("/users/0/name").unwrap(), p);
//! ```

use thiserror::Error;

pub mod find;
pub mod types;

pub use find::{get, locate, resolve, resolve_mut, Site};
pub use types::{Path, PathStep};

/// Builds a [`Path`] from field names and indices.
///
/// ```
/// use tardis_path::{path, PathStep};
///
/// let p = path!["items", 2];
/// assert_eq!(p[0], PathStep::Field("items".into()));
/// assert_eq!(p[1], PathStep::Index(2));
/// assert!(path![].is_root());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($step:expr),+ $(,)?) => {
        $crate::Path::from(vec![$($crate::PathStep::from($step)),+])
    };
}

/// Unescapes a JSON Pointer component: `~1` becomes `/`, `~0` becomes `~`.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 before ~0, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer component: `~` becomes `~0`, `/` becomes `~1`.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Returns `true` for canonical non-negative integers (`"0"`, `"17"`, not `"07"`).
pub fn is_valid_index(component: &str) -> bool {
    let bytes = component.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return false;
    }
    bytes.iter().all(u8::is_ascii_digit)
}

/// Failure to resolve a path against a tree.
///
/// `at` is the pointer of the prefix that was being traversed when the
/// failure happened.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path names no mutation site")]
    Empty,
    #[error("pointer {0:?} must be empty or start with '/'")]
    PointerInvalid(String),
    #[error("no field {field:?} in object at {at:?}")]
    MissingField { at: String, field: String },
    #[error("index {index} out of bounds for array of length {len} at {at:?}")]
    IndexOutOfBounds { at: String, index: usize, len: usize },
    #[error("value at {at:?} is {found}, not a container")]
    NotAContainer { at: String, found: &'static str },
    #[error("step {step:?} cannot address {found} at {at:?}")]
    StepMismatch {
        at: String,
        step: PathStep,
        found: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_round_trip() {
        assert_eq!(escape_component("a~b/c"), "a~0b~1c");
        assert_eq!(unescape_component("a~0b~1c"), "a~b/c");
        assert_eq!(unescape_component("~01"), "~1");
        assert_eq!(escape_component("plain"), "plain");
    }

    #[test]
    fn index_validation() {
        assert!(is_valid_index("0"));
        assert!(is_valid_index("42"));
        assert!(!is_valid_index(""));
        assert!(!is_valid_index("07"));
        assert!(!is_valid_index("-1"));
        assert!(!is_valid_index("1.5"));
    }

    #[test]
    fn macro_builds_mixed_steps() {
        let p = path!["a", 0, String::from("b")];
        assert_eq!(
            p.steps(),
            &[
                PathStep::Field("a".into()),
                PathStep::Index(0),
                PathStep::Field("b".into()),
            ]
        );
    }
}
