//! Path eligibility predicates.
//!
//! Extension matching compares the final dot suffix of the file name.
//! Ignore matching works on whole path components: an ignore entry matches
//! when its components appear contiguously, in order, somewhere in the path.
//! No wildcard expansion and no substring matching.

use std::ffi::OsStr;
use std::path::{Component, Path};

/// True when the file name's last dot suffix equals one of `extensions`.
///
/// `file.cpp.bak` has suffix `.bak`; a name without a dot has no suffix.
pub fn extension_eligible(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(OsStr::to_str) else {
        return false;
    };
    let Some(dot) = name.rfind('.') else {
        return false;
    };
    let suffix = &name[dot..];
    extensions.iter().any(|ext| ext == suffix)
}

/// True when any entry of `ignore_paths` matches a contiguous run of the
/// path's components.
pub fn should_ignore(path: &Path, ignore_paths: &[String]) -> bool {
    if ignore_paths.is_empty() {
        return false;
    }
    let path_segments: Vec<&OsStr> = segments(path);
    ignore_paths.iter().any(|entry| {
        let wanted: Vec<&OsStr> = segments(Path::new(entry));
        !wanted.is_empty()
            && wanted.len() <= path_segments.len()
            && path_segments.windows(wanted.len()).any(|w| w == wanted.as_slice())
    })
}

fn segments(path: &Path) -> Vec<&OsStr> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(Component::as_os_str)
        .collect()
}
