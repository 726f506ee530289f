// src/core/navigator.rs

//! Walks a [`Value`] tree along a [`Path`] to read, overwrite, create or remove values.
//!
//! All write operations share [`walk_parent_mut`], which descends to the parent of the
//! final segment under a [`MissingPolicy`]. The final segment is then applied by the
//! caller. Every check that can fail runs before the tree is modified, so a failed write
//! leaves the document untouched.

use super::errors::{Result, SpinelJsonError};
use super::path::{Path, Segment};
use super::type_tag::TypeTag;
use super::value::Value;
use tracing::debug;

/// What to do when an intermediate object key is missing during a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Report `KeyNotFound`. Used by plain overwrites so that a typo fails loudly.
    Fail,
    /// Insert a new empty object and keep walking.
    Synthesize,
}

/// Resolves `path` for reading and returns the value with its type tag.
pub fn read<'a>(root: &'a Value, path: &Path) -> Result<(&'a Value, TypeTag)> {
    reject_append(path)?;
    let mut current = root;
    for (pos, seg) in path.iter().enumerate() {
        current = step(current, seg, path, pos)?;
    }
    Ok((current, TypeTag::of(current)))
}

/// Returns true when [`read`] would succeed.
pub fn exists(root: &Value, path: &Path) -> bool {
    read(root, path).is_ok()
}

/// Sets the value at `path`, which must already lead to an existing parent.
///
/// The final segment may create a new object key, replace an existing array element,
/// or append to an array. Indices equal to or past the array length are rejected;
/// only `[]` grows an array.
pub fn overwrite_set(root: &mut Value, path: &Path, new_value: Value) -> Result<()> {
    let parent = walk_parent_mut(root, path, MissingPolicy::Fail)?;
    assign(parent, path, new_value)
}

/// Like [`overwrite_set`], but missing intermediate object keys are created as empty
/// objects. Intermediate indices must still address existing elements.
pub fn create_set(root: &mut Value, path: &Path, new_value: Value) -> Result<()> {
    let parent = walk_parent_mut(root, path, MissingPolicy::Synthesize)?;
    assign(parent, path, new_value)
}

/// Removes and returns the value at `path`. Later array elements shift down by one.
pub fn remove(root: &mut Value, path: &Path) -> Result<Value> {
    reject_append(path)?;
    let parent = walk_parent_mut(root, path, MissingPolicy::Fail)?;
    let pos = path.len() - 1;
    match (parent, &path.segments()[pos]) {
        (Value::Object(map), Segment::Key(key)) => map
            .shift_remove(key)
            .ok_or_else(|| key_not_found(path, pos, key)),
        (Value::Array(arr), Segment::Index(index)) => {
            if *index < arr.len() {
                Ok(arr.remove(*index))
            } else {
                Err(out_of_range(path, pos, *index, arr.len()))
            }
        }
        (other, seg) => Err(type_mismatch(path, pos, seg, other.kind())),
    }
}

/// Descends through every segment except the last and returns the parent node.
///
/// With [`MissingPolicy::Synthesize`], the first missing key starts a chain of new
/// empty objects. A freshly created object can only be descended by keys, so the
/// remaining segments are checked up front and an `Index` or `Append` among them fails
/// with `TypeMismatch` before anything is inserted.
pub fn walk_parent_mut<'a>(
    root: &'a mut Value,
    path: &Path,
    policy: MissingPolicy,
) -> Result<&'a mut Value> {
    let segments = path.segments();
    let Some((_, parents)) = segments.split_last() else {
        return Err(SpinelJsonError::EmptyPath);
    };

    let mut current = root;
    for (pos, seg) in parents.iter().enumerate() {
        current = match seg {
            Segment::Key(key) => {
                let map = match current {
                    Value::Object(map) => map,
                    other => return Err(type_mismatch(path, pos, seg, other.kind())),
                };
                if !map.contains_key(key) {
                    match policy {
                        MissingPolicy::Fail => return Err(key_not_found(path, pos, key)),
                        MissingPolicy::Synthesize => {
                            ensure_keys_only(path, pos + 1)?;
                            debug!(
                                "Creating missing object levels from '{}' for path '{}'",
                                path.prefix_text(pos + 1),
                                path
                            );
                        }
                    }
                }
                map.entry(key.clone()).or_insert_with(Value::object)
            }
            Segment::Index(index) => match current {
                Value::Array(arr) => {
                    let len = arr.len();
                    arr.get_mut(*index)
                        .ok_or_else(|| out_of_range(path, pos, *index, len))?
                }
                other => return Err(type_mismatch(path, pos, seg, other.kind())),
            },
            Segment::Append => {
                return Err(SpinelJsonError::MalformedPath {
                    path: path.to_string(),
                    reason: "append marker '[]' must be the last segment".to_string(),
                });
            }
        };
    }
    Ok(current)
}

/// Applies the final segment of `path` to `parent`.
fn assign(parent: &mut Value, path: &Path, new_value: Value) -> Result<()> {
    let pos = path.len() - 1;
    match (parent, &path.segments()[pos]) {
        (Value::Object(map), Segment::Key(key)) => {
            map.insert(key.clone(), new_value);
        }
        (Value::Array(arr), Segment::Index(index)) => {
            let len = arr.len();
            let slot = arr
                .get_mut(*index)
                .ok_or_else(|| out_of_range(path, pos, *index, len))?;
            *slot = new_value;
        }
        (Value::Array(arr), Segment::Append) => arr.push(new_value),
        (other, seg) => return Err(type_mismatch(path, pos, seg, other.kind())),
    }
    Ok(())
}

/// A single read step from `node` through `seg`.
fn step<'a>(node: &'a Value, seg: &Segment, path: &Path, pos: usize) -> Result<&'a Value> {
    match (node, seg) {
        (Value::Object(map), Segment::Key(key)) => {
            map.get(key).ok_or_else(|| key_not_found(path, pos, key))
        }
        (Value::Array(arr), Segment::Index(index)) => arr
            .get(*index)
            .ok_or_else(|| out_of_range(path, pos, *index, arr.len())),
        (_, Segment::Append) => Err(SpinelJsonError::InvalidSegmentForRead {
            path: path.to_string(),
        }),
        (other, seg) => Err(type_mismatch(path, pos, seg, other.kind())),
    }
}

fn reject_append(path: &Path) -> Result<()> {
    if path.iter().any(Segment::is_append) {
        return Err(SpinelJsonError::InvalidSegmentForRead {
            path: path.to_string(),
        });
    }
    Ok(())
}

/// Checks that every segment from `from` onwards can be applied to a new empty object.
fn ensure_keys_only(path: &Path, from: usize) -> Result<()> {
    match path
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, seg)| !matches!(seg, Segment::Key(_)))
    {
        Some((pos, seg)) => Err(type_mismatch(path, pos, seg, "object")),
        None => Ok(()),
    }
}

fn key_not_found(path: &Path, pos: usize, key: &str) -> SpinelJsonError {
    SpinelJsonError::KeyNotFound {
        path: path.prefix_text(pos + 1),
        key: key.to_string(),
    }
}

fn out_of_range(path: &Path, pos: usize, index: usize, len: usize) -> SpinelJsonError {
    SpinelJsonError::IndexOutOfRange {
        path: path.prefix_text(pos + 1),
        index,
        len,
    }
}

fn type_mismatch(path: &Path, pos: usize, seg: &Segment, found: &'static str) -> SpinelJsonError {
    SpinelJsonError::TypeMismatch {
        path: path.prefix_text(pos + 1),
        segment: seg.to_string(),
        found,
    }
}
