//! Writing a [`ProjectTree`] straight to disk.

use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::tree::ProjectTree;

/// Materialize `tree` as `<dest>/<project>/...`, returning the project root.
///
/// Every directory is created before the first file is written, so a
/// directory failure leaves no files behind.
pub fn write_to_dir(tree: &ProjectTree, dest: &Path) -> Result<PathBuf, ExportError> {
    tree.validate()?;

    for dir in tree.directories() {
        let path = dest.join(dir.trim_end_matches('/'));
        if path.is_file() {
            return Err(ExportError::Directory {
                source: std::io::Error::new(std::io::ErrorKind::AlreadyExists, "file in the way"),
                path,
            });
        }
        std::fs::create_dir_all(&path).map_err(|source| ExportError::Directory {
            path: path.clone(),
            source,
        })?;
    }

    let root = dest.join(tree.name());
    for file in tree.files() {
        std::fs::write(root.join(&file.path), &file.contents)?;
    }

    tracing::info!(path = %root.display(), files = tree.files().len(), "wrote project");
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let tree = ProjectTree::new("demo")
            .file("README.md", "# demo")
            .file("src/App.vue", "<template />");

        let root = write_to_dir(&tree, dir.path()).unwrap();
        assert_eq!(root, dir.path().join("demo"));
        assert_eq!(std::fs::read_to_string(root.join("src/App.vue")).unwrap(), "<template />");
        assert_eq!(std::fs::read_to_string(root.join("README.md")).unwrap(), "# demo");
    }

    #[test]
    fn blocked_directory_emits_no_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("demo")).unwrap();
        std::fs::write(dir.path().join("demo").join("src"), "not a dir").unwrap();

        let tree = ProjectTree::new("demo")
            .file("README.md", "# demo")
            .file("src/main.js", "");
        let err = write_to_dir(&tree, dir.path()).unwrap_err();

        assert!(matches!(err, ExportError::Directory { .. }));
        assert!(!dir.path().join("demo").join("README.md").exists());
    }

    #[test]
    fn invalid_tree_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let tree = ProjectTree::new("demo").file("a/../../b", "");
        assert!(write_to_dir(&tree, dir.path()).is_err());
        assert!(!dir.path().join("demo").exists());
    }
}
