//! Declarative project trees: an ordered list of relative paths and their
//! contents under a fixed project root.

use std::collections::BTreeSet;

use crate::error::ExportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    pub path: String,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTree {
    name: String,
    files: Vec<ProjectFile>,
}

impl ProjectTree {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
        }
    }

    pub fn file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.push(ProjectFile {
            path: path.into(),
            contents: contents.into(),
        });
        self
    }

    /// Top-level project directory name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[ProjectFile] {
        &self.files
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.contents.as_str())
    }

    /// Every directory node, root first, parents before children, each
    /// ending in `/`.
    pub fn directories(&self) -> Vec<String> {
        let mut dirs = BTreeSet::new();
        for file in &self.files {
            let mut prefix = self.name.clone();
            let mut segments: Vec<&str> = file.path.split('/').collect();
            segments.pop();
            for segment in segments {
                prefix.push('/');
                prefix.push_str(segment);
                dirs.insert(format!("{prefix}/"));
            }
        }
        let mut ordered = vec![format!("{}/", self.name)];
        let mut rest: Vec<String> = dirs.into_iter().collect();
        rest.sort_by_key(|d| d.matches('/').count());
        ordered.extend(rest);
        ordered
    }

    /// Reject trees whose directory nodes cannot exist: empty, absolute or
    /// parent-relative segments, duplicate files, and a file that another
    /// path uses as a directory.
    pub fn validate(&self) -> Result<(), ExportError> {
        check_segment(&self.name, &self.name)?;

        let mut seen = BTreeSet::new();
        for file in &self.files {
            if file.path.starts_with('/') || file.path.contains('\\') {
                return Err(ExportError::InvalidPath(file.path.clone()));
            }
            for segment in file.path.split('/') {
                check_segment(segment, &file.path)?;
            }
            if !seen.insert(file.path.as_str()) {
                return Err(ExportError::InvalidPath(format!("duplicate file {}", file.path)));
            }
        }

        for file in &self.files {
            let as_dir = format!("{}/", file.path);
            if self.files.iter().any(|other| other.path.starts_with(&as_dir)) {
                return Err(ExportError::InvalidPath(format!(
                    "{} is both a file and a directory",
                    file.path
                )));
            }
        }
        Ok(())
    }
}

fn check_segment(segment: &str, path: &str) -> Result<(), ExportError> {
    if segment.is_empty() || segment == "." || segment == ".." {
        return Err(ExportError::InvalidPath(path.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_are_parent_first() {
        let tree = ProjectTree::new("demo")
            .file("README.md", "")
            .file("src/components/Button.jsx", "")
            .file("src/main.jsx", "");
        assert_eq!(
            tree.directories(),
            vec!["demo/", "demo/src/", "demo/src/components/"]
        );
    }

    #[test]
    fn rejects_escaping_paths() {
        for bad in ["../evil", "/etc/passwd", "src//main.js", "src/./x", "a\\b"] {
            let tree = ProjectTree::new("demo").file(bad, "");
            assert!(tree.validate().is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn rejects_file_used_as_directory() {
        let tree = ProjectTree::new("demo").file("src", "").file("src/main.js", "");
        assert!(matches!(tree.validate(), Err(ExportError::InvalidPath(_))));
    }

    #[test]
    fn rejects_duplicates_and_bad_root() {
        let dup = ProjectTree::new("demo").file("a", "1").file("a", "2");
        assert!(dup.validate().is_err());
        assert!(ProjectTree::new("..").file("a", "").validate().is_err());
    }
}
