//! Filesystem helpers
//!
//! Path cleanup, existence assertions, temporary paths, and a
//! pretty-printable directory tree.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Error, Result};

/// Expand a leading tilde and return the path unchanged otherwise
///
/// No existence check is performed.
pub fn expand(path: impl AsRef<Path>) -> PathBuf {
    let raw = path.as_ref().to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

/// Clean `path` and verify that it exists
///
/// Tilde-expands, resolves symlinks, and normalizes redundant separators.
/// Returns `None` when the path does not exist.
pub fn real_path(path: impl AsRef<Path>) -> Option<PathBuf> {
    std::fs::canonicalize(expand(path)).ok()
}

/// Clean `path`, creating the directory (and parents) if missing
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
    let expanded = expand(&path);
    if !expanded.exists() {
        tracing::debug!("creating directory {}", expanded.display());
        std::fs::create_dir_all(&expanded)?;
    }
    let real = std::fs::canonicalize(&expanded)?;
    if !real.is_dir() {
        return Err(Error::NotADirectory {
            path: real.to_string_lossy().into_owned(),
        });
    }
    Ok(real)
}

/// Clean `path` and fail if it does not exist
pub fn existing_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    real_path(&path).ok_or_else(|| Error::PathNotFound {
        path: path.as_ref().to_string_lossy().into_owned(),
    })
}

/// Clean `path` and fail unless it is an existing file
pub fn existing_file(path: impl AsRef<Path>) -> Result<PathBuf> {
    let real = existing_path(path)?;
    if !real.is_file() {
        return Err(Error::NotAFile {
            path: real.to_string_lossy().into_owned(),
        });
    }
    Ok(real)
}

/// Clean `path` and fail unless it is an existing directory
pub fn existing_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
    let real = existing_path(path)?;
    if !real.is_dir() {
        return Err(Error::NotADirectory {
            path: real.to_string_lossy().into_owned(),
        });
    }
    Ok(real)
}

/// Create a named path inside a fresh temporary directory
///
/// Unlike a bare temporary file, the returned path has a predictable file
/// name, which matters for tools that key on names or extensions. Nothing is
/// created at the path itself; the directory (and anything inside it) is
/// removed when the returned [`TempDir`] guard drops.
pub fn temp_path(name: &str) -> Result<(TempDir, PathBuf)> {
    if name.is_empty() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "temporary path needs a name",
        )));
    }
    let dir = TempDir::new()?;
    let path = dir.path().join(name);
    Ok((dir, path))
}

const TREE_SPACE: &str = "    ";
const TREE_BRANCH: &str = "│   ";
const TREE_TEE: &str = "├── ";
const TREE_LAST: &str = "└── ";

/// Build a pretty-printable directory tree rooted at `root`
pub fn tree(root: impl AsRef<Path>) -> Result<String> {
    let root = existing_path(root)?;
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.to_string_lossy().into_owned());

    let mut lines = vec![name];
    if root.is_dir() {
        tree_lines(&root, "", &mut lines)?;
    }
    Ok(lines.join("\n"))
}

fn tree_lines(dir: &Path, prefix: &str, lines: &mut Vec<String>) -> Result<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    let last = entries.len().saturating_sub(1);
    for (i, path) in entries.iter().enumerate() {
        let pointer = if i < last { TREE_TEE } else { TREE_LAST };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        lines.push(format!("{}{}{}", prefix, pointer, name));

        if path.is_dir() {
            let extension = if i < last { TREE_BRANCH } else { TREE_SPACE };
            tree_lines(path, &format!("{}{}", prefix, extension), lines)?;
        }
    }
    Ok(())
}

/// Find the deepest directory common to two absolute paths
///
/// A file contributes its parent directory; a directory contributes itself.
/// Returns `None` when either path is relative.
pub fn common_root(a: &Path, b: &Path) -> Option<PathBuf> {
    if !a.is_absolute() || !b.is_absolute() {
        return None;
    }

    let mut root = None;
    for (x, y) in dir_chain(a).iter().zip(dir_chain(b).iter()) {
        if x == y {
            root = Some(x.to_path_buf());
        } else {
            break;
        }
    }
    root
}

/// Ancestor directories of `p` from the root down, ending at `p` itself for
/// a directory or at its parent for a file
fn dir_chain(p: &Path) -> Vec<&Path> {
    let base = if p.is_dir() {
        p
    } else {
        p.parent().unwrap_or(p)
    };
    let mut chain: Vec<&Path> = base.ancestors().collect();
    chain.reverse();
    chain
}

/// Return the deepest directory common to all `paths`
pub fn common_ancestor<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Option<PathBuf> {
    let mut common: Option<PathBuf> = None;
    for path in paths {
        let dir = if path.is_dir() {
            path.to_path_buf()
        } else {
            path.parent().unwrap_or(path).to_path_buf()
        };
        common = match common {
            None => Some(dir),
            Some(current) if current == dir => Some(current),
            Some(current) => Some(common_root(&current, &dir)?),
        };
    }
    common
}

/// Return the immediate parent directory, if all `paths` share one
pub fn common_parent<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Option<PathBuf> {
    let mut common: Option<PathBuf> = None;
    for path in paths {
        let parent = path.parent().unwrap_or(path).to_path_buf();
        match &common {
            None => common = Some(parent),
            Some(current) if *current == parent => {}
            Some(_) => return None,
        }
    }
    common
}
