//! Extension declarations and the compiled extension index.
//!
//! Compiled output directories carry a generated index listing every
//! extension implementation together with its dynamic-loadability marker.
//! Indexes are looked up through a [`ResourceScope`], which layers the
//! output directories over an optional parent scope the same way a child
//! class loader delegates to its parent.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ops::errors::ManifestError;

/// Tri-state dynamic-loadability marker.
///
/// Variants are ordered by precedence: a `No` outweighs a `Maybe`, which
/// outweighs a `Yes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DynamicLoading {
    Yes,
    #[default]
    Maybe,
    No,
}

impl DynamicLoading {
    /// Reduce a sequence of markers to a single verdict.
    ///
    /// An empty sequence is `Yes`: nothing prevents dynamic loading.
    pub fn reduce<I>(markers: I) -> DynamicLoading
    where
        I: IntoIterator<Item = DynamicLoading>,
    {
        markers
            .into_iter()
            .fold(DynamicLoading::Yes, std::cmp::max)
    }

    /// Boolean projection; `None` for `Maybe`.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            DynamicLoading::Yes => Some(true),
            DynamicLoading::No => Some(false),
            DynamicLoading::Maybe => None,
        }
    }
}

impl fmt::Display for DynamicLoading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicLoading::Yes => write!(f, "YES"),
            DynamicLoading::Maybe => write!(f, "MAYBE"),
            DynamicLoading::No => write!(f, "NO"),
        }
    }
}

/// One entry of the extension index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionDeclaration {
    /// Implementation class name
    #[serde(rename = "class")]
    pub class_name: String,

    /// Declared dynamic-loadability; undeclared means `Maybe`
    #[serde(default)]
    pub dynamic_loadable: DynamicLoading,
}

impl ExtensionDeclaration {
    pub fn new(class_name: impl Into<String>, dynamic_loadable: DynamicLoading) -> Self {
        ExtensionDeclaration {
            class_name: class_name.into(),
            dynamic_loadable,
        }
    }
}

/// Parse the contents of one extension index file.
pub fn parse_index(path: &Path, contents: &str) -> Result<Vec<ExtensionDeclaration>, ManifestError> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(contents).map_err(|e| ManifestError::InvalidIndex {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resource lookup rooted at a set of directories, delegating to a parent first.
#[derive(Debug)]
pub struct ResourceScope<'p> {
    roots: Vec<PathBuf>,
    parent: Option<&'p ResourceScope<'p>>,
}

impl<'p> ResourceScope<'p> {
    /// A scope with no parent.
    pub fn new(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        ResourceScope {
            roots: roots.into_iter().collect(),
            parent: None,
        }
    }

    /// A child scope over `roots` that sees everything `parent` sees.
    pub fn child(roots: impl IntoIterator<Item = PathBuf>, parent: &'p ResourceScope<'p>) -> Self {
        ResourceScope {
            roots: roots.into_iter().collect(),
            parent: Some(parent),
        }
    }

    /// Every file named `relative` visible from this scope, parent matches first.
    pub fn resources(&self, relative: &str) -> Vec<PathBuf> {
        let mut found = match self.parent {
            Some(parent) => parent.resources(relative),
            None => Vec::new(),
        };
        found.extend(
            self.roots
                .iter()
                .map(|root| root.join(relative))
                .filter(|path| path.is_file()),
        );
        found
    }

    /// Lazily read every extension declaration visible from this scope.
    pub fn extensions<'s>(
        &'s self,
        index: &str,
    ) -> impl Iterator<Item = anyhow::Result<ExtensionDeclaration>> + 's {
        self.resources(index).into_iter().flat_map(|path| {
            let loaded = crate::util::fs::read_to_string(&path).and_then(|contents| {
                parse_index(&path, &contents).map_err(anyhow::Error::from)
            });
            match loaded {
                Ok(declarations) => {
                    tracing::debug!(
                        "{} extension(s) declared in {}",
                        declarations.len(),
                        path.display()
                    );
                    declarations.into_iter().map(Ok).collect::<Vec<_>>()
                }
                Err(e) => vec![Err(e)],
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use crate::core::conventions::EXTENSION_INDEX;

    #[test]
    fn test_reduce_precedence() {
        use DynamicLoading::*;
        assert_eq!(DynamicLoading::reduce([Yes, Yes]), Yes);
        assert_eq!(DynamicLoading::reduce([Yes, No]), No);
        assert_eq!(DynamicLoading::reduce([Yes, Maybe]), Maybe);
        assert_eq!(DynamicLoading::reduce([Maybe, No, Yes]), No);
        assert_eq!(DynamicLoading::reduce(Vec::new()), Yes);
    }

    #[test]
    fn test_as_bool() {
        assert_eq!(DynamicLoading::Yes.as_bool(), Some(true));
        assert_eq!(DynamicLoading::No.as_bool(), Some(false));
        assert_eq!(DynamicLoading::Maybe.as_bool(), None);
    }

    #[test]
    fn test_parse_index_defaults_to_maybe() {
        let decls = parse_index(
            Path::new("idx"),
            r#"[{"class": "a.A", "dynamicLoadable": "YES"}, {"class": "b.B", "ordinal": 10}]"#,
        )
        .unwrap();

        assert_eq!(
            decls,
            vec![
                ExtensionDeclaration::new("a.A", DynamicLoading::Yes),
                ExtensionDeclaration::new("b.B", DynamicLoading::Maybe),
            ]
        );
    }

    #[test]
    fn test_parse_index_rejects_malformed() {
        let err = parse_index(Path::new("broken"), "{not json").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidIndex { .. }));
        assert!(parse_index(Path::new("empty"), "  \n").unwrap().is_empty());
    }

    #[test]
    fn test_scope_delegates_to_parent_first() {
        let tmp = TempDir::new().unwrap();
        let parent_root = tmp.path().join("parent");
        let child_root = tmp.path().join("child");
        for (root, class) in [(&parent_root, "p.P"), (&child_root, "c.C")] {
            let index = root.join(EXTENSION_INDEX);
            fs::create_dir_all(index.parent().unwrap()).unwrap();
            fs::write(&index, format!(r#"[{{"class": "{}", "dynamicLoadable": "YES"}}]"#, class)).unwrap();
        }

        let parent = ResourceScope::new(vec![parent_root]);
        let scope = ResourceScope::child(vec![child_root, tmp.path().join("missing")], &parent);

        let classes: Vec<_> = scope
            .extensions(EXTENSION_INDEX)
            .map(|d| d.unwrap().class_name)
            .collect();
        assert_eq!(classes, vec!["p.P", "c.C"]);
    }
}
