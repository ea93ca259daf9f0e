//! Primitive mutations and their inverses.

use serde_json::{Map, Value};
use tardis_path::{locate, Path, PathError, Site};

use crate::command::{Command, CommandKind};

/// Kind, payload and key position of the command that undoes a primitive.
struct Inverse {
    kind: CommandKind,
    data: Option<Value>,
    key_index: Option<usize>,
}

impl Inverse {
    fn new(kind: CommandKind, data: Option<Value>) -> Self {
        Self {
            kind,
            data,
            key_index: None,
        }
    }
}

/// Sets `key` to `value`. Undone by restoring the previous value, or by
/// deleting the field if it did not exist.
///
/// A new field goes to position `at` among the keys when given, otherwise
/// it is appended. An existing field keeps its position.
fn set_field(map: &mut Map<String, Value>, key: &str, value: Value, at: Option<usize>) -> Inverse {
    let old = match at {
        Some(index) if !map.contains_key(key) => {
            let index = index.min(map.len());
            map.shift_insert(index, key.to_string(), value)
        }
        _ => map.insert(key.to_string(), value),
    };
    match old {
        Some(old) => Inverse::new(CommandKind::Update, Some(old)),
        None => Inverse::new(CommandKind::Delete, None),
    }
}

fn apply_insert(tree: &mut Value, path: &Path, value: Value, at: Option<usize>) -> Result<Inverse, PathError> {
    match locate(tree, path)? {
        Site::Field { map, key, .. } => Ok(set_field(map, key, value, at)),
        Site::Element { array, index, .. } if index <= array.len() => {
            array.insert(index, value);
            Ok(Inverse::new(CommandKind::Delete, None))
        }
        site => Err(site.missing()),
    }
}

fn apply_update(tree: &mut Value, path: &Path, value: Value) -> Result<Inverse, PathError> {
    if path.is_root() {
        let old = std::mem::replace(tree, value);
        return Ok(Inverse::new(CommandKind::Update, Some(old)));
    }
    match locate(tree, path)? {
        Site::Field { map, key, .. } => Ok(set_field(map, key, value, None)),
        Site::Element { array, index, .. } if index < array.len() => {
            let old = std::mem::replace(&mut array[index], value);
            Ok(Inverse::new(CommandKind::Update, Some(old)))
        }
        site => Err(site.missing()),
    }
}

/// Removes a field or element. A removed field remembers its key position so
/// undo puts it back in the same place.
fn apply_delete(tree: &mut Value, path: &Path) -> Result<Inverse, PathError> {
    match locate(tree, path)? {
        Site::Field { map, key, .. } if map.contains_key(key) => {
            let key_index = map.keys().position(|k| k == key);
            Ok(Inverse {
                kind: CommandKind::Insert,
                data: map.shift_remove(key),
                key_index,
            })
        }
        Site::Element { array, index, .. } if index < array.len() => {
            Ok(Inverse::new(CommandKind::Insert, Some(array.remove(index))))
        }
        site => Err(site.missing()),
    }
}

/// Applies `command` to `tree` in place and returns the command that
/// reverses it.
///
/// The inverse carries the same path and batch id. On error the tree is
/// left untouched.
pub fn apply_command(tree: &mut Value, command: &Command) -> Result<Command, PathError> {
    let data = command.data.clone().unwrap_or(Value::Null);
    let inverse = match command.kind {
        CommandKind::Insert => apply_insert(tree, &command.path, data, command.key_index)?,
        CommandKind::Update => apply_update(tree, &command.path, data)?,
        CommandKind::Delete => apply_delete(tree, &command.path)?,
    };
    Ok(Command {
        batch_id: command.batch_id.clone(),
        kind: inverse.kind,
        path: command.path.clone(),
        data: inverse.data,
        key_index: inverse.key_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::BatchId;
    use serde_json::json;
    use tardis_path::path;

    fn cmd(kind: CommandKind, path: Path, data: Option<Value>) -> Command {
        Command::new(kind, path, data, BatchId::from("t"))
    }

    /// Applies `command`, then its inverse, and checks the tree is restored.
    fn round_trip(doc: Value, command: Command, expected: Value) {
        let mut tree = doc.clone();
        let inverse = apply_command(&mut tree, &command).unwrap();
        assert_eq!(tree, expected);
        apply_command(&mut tree, &inverse).unwrap();
        assert_eq!(tree, doc);
    }

    #[test]
    fn insert_into_array_shifts_right() {
        round_trip(
            json!({"items": [{"id": 1}]}),
            cmd(CommandKind::Insert, path!["items", 1], Some(json!({"id": 2}))),
            json!({"items": [{"id": 1}, {"id": 2}]}),
        );
        round_trip(
            json!({"items": ["b"]}),
            cmd(CommandKind::Insert, path!["items", 0], Some(json!("a"))),
            json!({"items": ["a", "b"]}),
        );
    }

    #[test]
    fn insert_into_object_sets_field() {
        round_trip(
            json!({"user": {}}),
            cmd(CommandKind::Insert, path!["user", "name"], Some(json!("Ada"))),
            json!({"user": {"name": "Ada"}}),
        );
    }

    #[test]
    fn insert_over_existing_field_restores_old_value() {
        let mut tree = json!({"user": {"name": "John"}});
        let inverse = apply_command(&mut tree, &cmd(CommandKind::Insert, path!["user", "name"], Some(json!("Jane")))).unwrap();
        assert_eq!(inverse.kind, CommandKind::Update);
        assert_eq!(inverse.data, Some(json!("John")));
        apply_command(&mut tree, &inverse).unwrap();
        assert_eq!(tree, json!({"user": {"name": "John"}}));
    }

    #[test]
    fn update_replaces_in_place() {
        round_trip(
            json!({"items": ["a", "b", "c", "d"]}),
            cmd(CommandKind::Update, path!["items", 2], Some(json!("z"))),
            json!({"items": ["a", "b", "z", "d"]}),
        );
        round_trip(
            json!({"user": {"name": "John", "age": 30}}),
            cmd(CommandKind::Update, path!["user", "name"], Some(json!("Jane"))),
            json!({"user": {"name": "Jane", "age": 30}}),
        );
    }

    #[test]
    fn update_of_missing_field_inverts_to_delete() {
        let mut tree = json!({"user": {}});
        let inverse = apply_command(&mut tree, &cmd(CommandKind::Update, path!["user", "name"], Some(json!("Ada")))).unwrap();
        assert_eq!(inverse.kind, CommandKind::Delete);
        apply_command(&mut tree, &inverse).unwrap();
        assert_eq!(tree, json!({"user": {}}));
    }

    #[test]
    fn update_root_replaces_tree() {
        round_trip(json!({"a": 1}), cmd(CommandKind::Update, Path::root(), Some(json!([1, 2]))), json!([1, 2]));
    }

    #[test]
    fn delete_snapshots_removed_value() {
        round_trip(
            json!({"tags": ["one", "two", "three"]}),
            cmd(CommandKind::Delete, path!["tags", 1], None),
            json!({"tags": ["one", "three"]}),
        );
        round_trip(
            json!({"user": {"name": "John", "prefs": {"theme": ["dark"]}}}),
            cmd(CommandKind::Delete, path!["user", "prefs"], None),
            json!({"user": {"name": "John"}}),
        );
    }

    #[test]
    fn deleted_field_returns_to_its_key_position() {
        let mut tree = json!({"a": 1, "b": 2, "c": 3});
        let inverse = apply_command(&mut tree, &cmd(CommandKind::Delete, path!["a"], None)).unwrap();
        assert_eq!(serde_json::to_string(&tree).unwrap(), r#"{"b":2,"c":3}"#);
        assert_eq!(inverse.key_index, Some(0));

        apply_command(&mut tree, &inverse).unwrap();
        assert_eq!(serde_json::to_string(&tree).unwrap(), r#"{"a":1,"b":2,"c":3}"#);
    }

    #[test]
    fn positioned_insert_clamps_to_key_count() {
        let mut tree = json!({"a": 1});
        let mut insert = cmd(CommandKind::Insert, path!["z"], Some(json!(0)));
        insert.key_index = Some(9);
        apply_command(&mut tree, &insert).unwrap();
        assert_eq!(serde_json::to_string(&tree).unwrap(), r#"{"a":1,"z":0}"#);
    }

    #[test]
    fn missing_data_is_null() {
        let mut tree = json!({});
        apply_command(&mut tree, &cmd(CommandKind::Insert, path!["x"], None)).unwrap();
        assert_eq!(tree, json!({"x": null}));
    }

    #[test]
    fn unresolvable_paths_fail_without_mutation() {
        let doc = json!({"items": [1, 2], "n": 5});
        let failures = [
            cmd(CommandKind::Insert, path!["items", 3], Some(json!(0))),
            cmd(CommandKind::Update, path!["items", 2], Some(json!(0))),
            cmd(CommandKind::Delete, path!["items", 2], None),
            cmd(CommandKind::Delete, path!["missing"], None),
            cmd(CommandKind::Insert, path!["nope", "x"], Some(json!(0))),
            cmd(CommandKind::Update, path!["n", "x"], Some(json!(0))),
            cmd(CommandKind::Insert, path!["items", "first"], Some(json!(0))),
            cmd(CommandKind::Delete, Path::root(), None),
        ];
        for command in failures {
            let mut tree = doc.clone();
            assert!(apply_command(&mut tree, &command).is_err(), "{command:?} should fail");
            assert_eq!(tree, doc);
        }
    }

    #[test]
    fn inverse_keeps_path_and_batch() {
        let mut tree = json!({"a": [1]});
        let forward = Command::new(CommandKind::Delete, path!["a", 0], None, BatchId::from("b-7"));
        let inverse = apply_command(&mut tree, &forward).unwrap();
        assert_eq!(inverse.path, forward.path);
        assert_eq!(inverse.batch_id, forward.batch_id);
        assert_eq!(inverse.data, Some(json!(1)));
    }
}
