//! Walking paths through a `serde_json::Value` tree.

use serde_json::{Map, Value};

use crate::types::format_pointer;
use crate::{PathError, PathStep};

/// Short name of a value's shape, used in error messages.
pub(crate) fn value_kind(val: &Value) -> &'static str {
    match val {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn missing_field(walked: &[PathStep], name: &str) -> PathError {
    PathError::MissingField {
        at: format_pointer(walked),
        field: name.to_string(),
    }
}

fn out_of_bounds(walked: &[PathStep], index: usize, len: usize) -> PathError {
    PathError::IndexOutOfBounds {
        at: format_pointer(walked),
        index,
        len,
    }
}

fn mismatch(walked: &[PathStep], step: &PathStep, container: &Value) -> PathError {
    PathError::StepMismatch {
        at: format_pointer(walked),
        step: step.clone(),
        found: value_kind(container),
    }
}

fn not_a_container(walked: &[PathStep], val: &Value) -> PathError {
    PathError::NotAContainer {
        at: format_pointer(walked),
        found: value_kind(val),
    }
}

/// Follows `steps` from `root` and returns the value they address.
pub fn resolve<'a>(root: &'a Value, steps: &[PathStep]) -> Result<&'a Value, PathError> {
    let mut current = root;
    for (i, step) in steps.iter().enumerate() {
        let walked = &steps[..i];
        current = match (current, step) {
            (Value::Object(map), PathStep::Field(name)) => {
                map.get(name).ok_or_else(|| missing_field(walked, name))?
            }
            (Value::Array(arr), PathStep::Index(idx)) => {
                arr.get(*idx).ok_or_else(|| out_of_bounds(walked, *idx, arr.len()))?
            }
            (container @ (Value::Object(_) | Value::Array(_)), _) => {
                return Err(mismatch(walked, step, container));
            }
            (other, _) => return Err(not_a_container(walked, other)),
        };
    }
    Ok(current)
}

/// Mutable counterpart of [`resolve`].
pub fn resolve_mut<'a>(root: &'a mut Value, steps: &[PathStep]) -> Result<&'a mut Value, PathError> {
    let mut current = root;
    for (i, step) in steps.iter().enumerate() {
        let walked = &steps[..i];
        current = match current {
            Value::Object(map) => match step {
                PathStep::Field(name) => map.get_mut(name).ok_or_else(|| missing_field(walked, name))?,
                PathStep::Index(_) => {
                    return Err(PathError::StepMismatch {
                        at: format_pointer(walked),
                        step: step.clone(),
                        found: "an object",
                    })
                }
            },
            Value::Array(arr) => match step {
                PathStep::Index(idx) => {
                    let len = arr.len();
                    arr.get_mut(*idx).ok_or_else(|| out_of_bounds(walked, *idx, len))?
                }
                PathStep::Field(_) => {
                    return Err(PathError::StepMismatch {
                        at: format_pointer(walked),
                        step: step.clone(),
                        found: "an array",
                    })
                }
            },
            other => return Err(not_a_container(walked, other)),
        };
    }
    Ok(current)
}

/// Like [`resolve`] but returns `None` instead of an error.
pub fn get<'a>(root: &'a Value, steps: &[PathStep]) -> Option<&'a Value> {
    resolve(root, steps).ok()
}

/// The place a mutation acts on: a container plus the last path step.
#[derive(Debug)]
pub enum Site<'a> {
    Field {
        parent: &'a [PathStep],
        map: &'a mut Map<String, Value>,
        key: &'a str,
    },
    Element {
        parent: &'a [PathStep],
        array: &'a mut Vec<Value>,
        index: usize,
    },
}

impl Site<'_> {
    /// Error describing that the last step does not name an existing value.
    pub fn missing(&self) -> PathError {
        match self {
            Site::Field { parent, key, .. } => missing_field(parent, key),
            Site::Element { parent, array, index } => out_of_bounds(parent, *index, array.len()),
        }
    }
}

/// Resolves every step but the last and pairs the container found there
/// with the last step.
///
/// Fails with [`PathError::Empty`] for the root path, and when the parent is
/// not a container or does not match the kind of the last step.
pub fn locate<'a>(root: &'a mut Value, steps: &'a [PathStep]) -> Result<Site<'a>, PathError> {
    let (last, parent) = steps.split_last().ok_or(PathError::Empty)?;
    match (resolve_mut(root, parent)?, last) {
        (Value::Object(map), PathStep::Field(key)) => Ok(Site::Field {
            parent,
            map,
            key: key.as_str(),
        }),
        (Value::Array(array), PathStep::Index(index)) => Ok(Site::Element {
            parent,
            array,
            index: *index,
        }),
        (container @ (Value::Object(_) | Value::Array(_)), step) => Err(mismatch(parent, step, container)),
        (other, _) => Err(not_a_container(parent, other)),
    }
}
