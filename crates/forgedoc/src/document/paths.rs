//! Lexical path arithmetic
//!
//! Paths inside generated docs are never resolved against the filesystem.
//! They are normalized and diffed purely by their components.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by resolving `.` and `..` without touching the filesystem.
///
/// Leading `..` components that have nothing left to cancel are kept, so
/// `../a/../../b` normalizes to `../../b`. A `..` directly under the root is
/// dropped, matching how `/..` behaves on disk.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            other => components.push(other),
        }
    }
    components.iter().collect()
}

/// Compute `target` relative to the directory `base`.
///
/// Both paths are normalized first and must be in the same space (both
/// relative to the same root, or both absolute). Returns `.` when they are
/// the same directory.
pub fn relative_path(target: &Path, base: &Path) -> PathBuf {
    let target = normalize_path(target);
    let base = normalize_path(base);

    let target_parts: Vec<Component> = target.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    let common = target_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..base_parts.len() {
        result.push("..");
    }
    for part in &target_parts[common..] {
        result.push(part);
    }

    if result.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        result
    }
}

/// Render a path with `/` separators regardless of platform.
///
/// Links written into Markdown always use forward slashes.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|component| match component {
            Component::RootDir => String::new(),
            other => other.as_os_str().to_string_lossy().into_owned(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
