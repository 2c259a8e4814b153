//! Starter project skeletons. Only `src/styles.css` depends on the tokens.

use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;
use crate::tree::ProjectTree;

pub const STYLES_PATH: &str = "src/styles.css";

/// What an export produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Css,
    React,
    Vue,
}

impl ExportKind {
    pub const ALL: [ExportKind; 3] = [ExportKind::Css, ExportKind::React, ExportKind::Vue];

    pub fn id(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::React => "react",
            Self::Vue => "vue",
        }
    }

    /// Top-level directory of the archive, `None` for a bare stylesheet.
    pub fn project_name(self) -> Option<&'static str> {
        match self {
            Self::Css => None,
            Self::React => Some("thero-react-starter"),
            Self::Vue => Some("thero-vue-starter"),
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ExportKind {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(Self::Css),
            "react" => Ok(Self::React),
            "vue" => Ok(Self::Vue),
            other => Err(ExportError::UnknownKind(other.to_string())),
        }
    }
}

// ── Templates ───────────────────────────────────────────────────

fn react(css: &str) -> ProjectTree {
    ProjectTree::new("thero-react-starter")
        .file("package.json", include_str!("../templates/react/package.json"))
        .file("vite.config.js", include_str!("../templates/react/vite.config.js"))
        .file("index.html", include_str!("../templates/react/index.html"))
        .file("src/main.jsx", include_str!("../templates/react/src/main.jsx"))
        .file("src/App.jsx", include_str!("../templates/react/src/App.jsx"))
        .file(STYLES_PATH, css)
        .file("README.md", include_str!("../templates/react/README.md"))
}

fn vue(css: &str) -> ProjectTree {
    ProjectTree::new("thero-vue-starter")
        .file("package.json", include_str!("../templates/vue/package.json"))
        .file("vite.config.js", include_str!("../templates/vue/vite.config.js"))
        .file("index.html", include_str!("../templates/vue/index.html"))
        .file("src/main.js", include_str!("../templates/vue/src/main.js"))
        .file("src/App.vue", include_str!("../templates/vue/src/App.vue"))
        .file(STYLES_PATH, css)
        .file("README.md", include_str!("../templates/vue/README.md"))
}

/// The project tree for `kind` carrying `css`, or `None` for [`ExportKind::Css`].
pub fn skeleton(kind: ExportKind, css: &str) -> Option<ProjectTree> {
    match kind {
        ExportKind::Css => None,
        ExportKind::React => Some(react(css)),
        ExportKind::Vue => Some(vue(css)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parsing() {
        assert_eq!("css".parse::<ExportKind>().unwrap(), ExportKind::Css);
        assert_eq!(" React ".parse::<ExportKind>().unwrap(), ExportKind::React);
        assert_eq!("vue".parse::<ExportKind>().unwrap(), ExportKind::Vue);
        for kind in ExportKind::ALL {
            assert_eq!(kind.id().parse::<ExportKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.id());
        }
        assert!(matches!(
            "svelte".parse::<ExportKind>(),
            Err(ExportError::UnknownKind(k)) if k == "svelte"
        ));
    }

    #[test]
    fn react_file_list() {
        let tree = skeleton(ExportKind::React, "body {}").unwrap();
        assert_eq!(tree.name(), "thero-react-starter");
        assert_eq!(
            tree.paths(),
            vec![
                "package.json",
                "vite.config.js",
                "index.html",
                "src/main.jsx",
                "src/App.jsx",
                "src/styles.css",
                "README.md",
            ]
        );
        tree.validate().unwrap();
    }

    #[test]
    fn vue_file_list() {
        let tree = skeleton(ExportKind::Vue, "body {}").unwrap();
        assert_eq!(tree.name(), "thero-vue-starter");
        assert_eq!(
            tree.paths(),
            vec![
                "package.json",
                "vite.config.js",
                "index.html",
                "src/main.js",
                "src/App.vue",
                "src/styles.css",
                "README.md",
            ]
        );
        tree.validate().unwrap();
    }

    #[test]
    fn only_styles_carry_the_css() {
        let css = "/* marker-7f3a */";
        for kind in [ExportKind::React, ExportKind::Vue] {
            let tree = skeleton(kind, css).unwrap();
            assert_eq!(tree.get(STYLES_PATH), Some(css));
            for file in tree.files().iter().filter(|f| f.path != STYLES_PATH) {
                assert!(!file.contents.contains("marker-7f3a"), "{}", file.path);
            }
        }
    }

    #[test]
    fn entry_files_import_styles() {
        let react = skeleton(ExportKind::React, "").unwrap();
        assert!(react.get("src/main.jsx").unwrap().contains("./styles.css"));
        let vue = skeleton(ExportKind::Vue, "").unwrap();
        assert!(vue.get("src/main.js").unwrap().contains("./styles.css"));
        assert!(react.get("package.json").unwrap().contains("thero-react-starter"));
        assert!(vue.get("package.json").unwrap().contains("thero-vue-starter"));
    }

    #[test]
    fn css_has_no_skeleton() {
        assert!(skeleton(ExportKind::Css, "x").is_none());
        assert_eq!(ExportKind::Css.project_name(), None);
    }
}
