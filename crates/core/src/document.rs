//! Path-addressed updates on profile documents.
//!
//! The profile is persisted as one nested JSON document; the form layer edits
//! it through dotted paths like `"skills.technical"`. Paths are parsed once
//! into a [`FieldPath`] instead of being split at every call site, and every
//! operation returns a fresh root without touching its input.

use serde_json::{Map, Value};

/// Error parsing a dotted field path.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    /// The path string was empty
    #[error("empty field path")]
    Empty,

    /// A segment between dots was empty, e.g. `"a..b"`
    #[error("empty segment at position {0} in field path")]
    EmptySegment(usize),
}

/// A parsed dotted path into a nested document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path such as `"user_profile.name"`.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if let Some(pos) = segments.iter().position(String::is_empty) {
            return Err(PathError::EmptySegment(pos));
        }
        Ok(Self { segments })
    }

    /// All segments except the last.
    fn parents(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// The final segment.
    fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl std::str::FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Set the value at `path`, returning the new document.
///
/// Missing intermediate objects are created; an intermediate that is not an
/// object is replaced by one. The input document is never mutated.
pub fn set_path(root: &Value, path: &FieldPath, value: Value) -> Value {
    let mut updated = as_map(root);
    let target = walk_parents(&mut updated, path.parents());
    target.insert(path.leaf().to_string(), value);
    Value::Object(updated)
}

/// Append `item` to the array at `path`, returning the new document.
///
/// An absent or non-array value at the path becomes a one-element array.
pub fn push_path(root: &Value, path: &FieldPath, item: Value) -> Value {
    let mut updated = as_map(root);
    let target = walk_parents(&mut updated, path.parents());
    match target.get_mut(path.leaf()).and_then(Value::as_array_mut) {
        Some(array) => array.push(item),
        None => {
            target.insert(path.leaf().to_string(), Value::Array(vec![item]));
        }
    }
    Value::Object(updated)
}

/// Remove the element at `index` from the array at `path`.
///
/// Out-of-bounds indices and non-array targets are no-ops; removing the last
/// remaining element leaves an empty array, not an absent field.
pub fn remove_at(root: &Value, path: &FieldPath, index: usize) -> Value {
    let mut updated = root.clone();
    let mut current = &mut updated;
    for key in path.parents() {
        match current.get_mut(key) {
            Some(next) => current = next,
            None => return updated,
        }
    }
    if let Some(array) = current.get_mut(path.leaf()).and_then(Value::as_array_mut) {
        if index < array.len() {
            array.remove(index);
        }
    }
    updated
}

/// Start the update from an object root, coercing anything else.
fn as_map(root: &Value) -> Map<String, Value> {
    root.as_object().cloned().unwrap_or_default()
}

/// Descend through the parent segments, creating missing intermediates and
/// replacing non-object ones.
fn walk_parents<'a>(
    mut map: &'a mut Map<String, Value>,
    parents: &[String],
) -> &'a mut Map<String, Value> {
    for key in parents {
        let entry = map.entry(key.clone()).or_insert(Value::Null);
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        map = entry.as_object_mut().expect("entry was just made an object");
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(p: &str) -> FieldPath {
        FieldPath::parse(p).unwrap()
    }

    #[test]
    fn test_parse_rejects_degenerate_paths() {
        assert_eq!(FieldPath::parse(""), Err(PathError::Empty));
        assert_eq!(FieldPath::parse("a..b"), Err(PathError::EmptySegment(1)));
        assert!(FieldPath::parse("a.b.c").is_ok());
    }

    #[test]
    fn test_set_path_preserves_siblings_and_input() {
        let original = json!({ "a": { "b": 1, "c": 2 } });
        let updated = set_path(&original, &path("a.b"), json!(9));

        assert_eq!(updated, json!({ "a": { "b": 9, "c": 2 } }));
        // The input document is untouched.
        assert_eq!(original, json!({ "a": { "b": 1, "c": 2 } }));
    }

    #[test]
    fn test_set_path_creates_missing_intermediates() {
        let updated = set_path(&json!({}), &path("career_goal.target_role"), json!("SRE"));
        assert_eq!(updated, json!({ "career_goal": { "target_role": "SRE" } }));
    }

    #[test]
    fn test_set_path_replaces_non_object_intermediate() {
        let updated = set_path(&json!({ "a": 5 }), &path("a.b"), json!(1));
        assert_eq!(updated, json!({ "a": { "b": 1 } }));
    }

    #[test]
    fn test_push_then_remove_leaves_empty_array() {
        let base = json!({ "education": [] });
        let pushed = push_path(&base, &path("education"), json!({ "degree": "BSc" }));
        assert_eq!(pushed["education"].as_array().unwrap().len(), 1);

        let removed = remove_at(&pushed, &path("education"), 0);
        assert_eq!(removed, json!({ "education": [] }));
    }

    #[test]
    fn test_push_creates_array_when_absent() {
        let updated = push_path(&json!({}), &path("skills.technical"), json!("Rust"));
        assert_eq!(updated, json!({ "skills": { "technical": ["Rust"] } }));
    }

    #[test]
    fn test_remove_at_out_of_bounds_is_noop() {
        let base = json!({ "languages": ["en"] });
        assert_eq!(remove_at(&base, &path("languages"), 5), base);
        assert_eq!(remove_at(&base, &path("missing"), 0), base);
    }
}
