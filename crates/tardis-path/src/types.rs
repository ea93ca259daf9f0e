//! Path step and path types.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::{escape_component, is_valid_index, unescape_component, PathError};

/// One step of a [`Path`].
///
/// Serializes untagged, so a path reads as a plain JSON array such as
/// `["items", 1, "name"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathStep {
    /// Array index.
    Index(usize),
    /// Object field name.
    Field(String),
}

impl From<&str> for PathStep {
    fn from(name: &str) -> Self {
        PathStep::Field(name.to_string())
    }
}

impl From<String> for PathStep {
    fn from(name: String) -> Self {
        PathStep::Field(name)
    }
}

impl From<usize> for PathStep {
    fn from(idx: usize) -> Self {
        PathStep::Index(idx)
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Field(name) => f.write_str(&escape_component(name)),
            PathStep::Index(idx) => write!(f, "{idx}"),
        }
    }
}

/// Ordered sequence of steps from the root of a tree to a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<PathStep>);

impl Path {
    /// The empty path, addressing the root itself.
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The path without its last step, `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        self.0.split_last().map(|(_, rest)| Path(rest.to_vec()))
    }

    /// Parses a JSON Pointer.
    ///
    /// Components that are canonical non-negative integers become
    /// [`PathStep::Index`]; everything else becomes [`PathStep::Field`].
    pub fn parse_pointer(pointer: &str) -> Result<Path, PathError> {
        if pointer.is_empty() {
            return Ok(Path::root());
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(PathError::PointerInvalid(pointer.to_string()));
        };
        Ok(rest
            .split('/')
            .map(|component| match component.parse::<usize>() {
                Ok(idx) if is_valid_index(component) => PathStep::Index(idx),
                _ => PathStep::Field(unescape_component(component)),
            })
            .collect())
    }
}

/// Formats steps as a JSON Pointer; the root is the empty string.
pub(crate) fn format_pointer(steps: &[PathStep]) -> String {
    let mut out = String::with_capacity(steps.len() * 8);
    for step in steps {
        out.push('/');
        out.push_str(&step.to_string());
    }
    out
}

impl Deref for Path {
    type Target = [PathStep];

    fn deref(&self) -> &[PathStep] {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_pointer(&self.0))
    }
}

impl From<Vec<PathStep>> for Path {
    fn from(steps: Vec<PathStep>) -> Self {
        Path(steps)
    }
}

impl From<&[PathStep]> for Path {
    fn from(steps: &[PathStep]) -> Self {
        Path(steps.to_vec())
    }
}

impl<const N: usize> From<[PathStep; N]> for Path {
    fn from(steps: [PathStep; N]) -> Self {
        Path(steps.into())
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
