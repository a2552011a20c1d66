//! Path specs and path-spec lists.
//!
//! A `FileSpec` names an image or compilation unit by an optional directory
//! plus a filename. Comparison semantics are explicit rather than assumed:
//! when either side lacks a directory the specs compare by filename only,
//! and case sensitivity is a [`PathStyle`] option (default: case-sensitive,
//! ASCII folding when insensitive).

use std::fmt;

use probe_core::config::SearchConfig;
use probe_core::constants;
use probe_core::types::collections::SmallVec4;
use serde::{Deserialize, Serialize};

/// Comparison style for path specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStyle {
    /// Whether comparisons are case-sensitive.
    pub case_sensitive: bool,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            case_sensitive: constants::DEFAULT_CASE_SENSITIVE_PATHS,
        }
    }
}

impl PathStyle {
    /// Derive the style from the session's search configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            case_sensitive: config.effective_case_sensitive(),
        }
    }

    fn eq_component(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.eq_ignore_ascii_case(b)
        }
    }
}

/// A path spec: optional directory plus filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileSpec {
    directory: Option<String>,
    filename: String,
}

impl FileSpec {
    /// Parse a spec from a `/`-separated path string.
    ///
    /// `"a.so"` has no directory; `"/usr/lib/a.so"` splits at the last
    /// separator.
    pub fn new(path: &str) -> Self {
        match path.rsplit_once('/') {
            Some((dir, file)) => Self {
                directory: if dir.is_empty() {
                    Some("/".to_string())
                } else {
                    Some(dir.to_string())
                },
                filename: file.to_string(),
            },
            None => Self {
                directory: None,
                filename: path.to_string(),
            },
        }
    }

    /// Build a spec from explicit components.
    pub fn from_parts(directory: Option<&str>, filename: &str) -> Self {
        Self {
            directory: directory.map(str::to_string),
            filename: filename.to_string(),
        }
    }

    /// The directory component, if the spec carries one.
    pub fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }

    /// The filename component.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Whether this spec matches `other` under `style`.
    ///
    /// If either spec lacks a directory, only filenames are compared.
    /// Otherwise both components must match.
    pub fn matches(&self, other: &FileSpec, style: PathStyle) -> bool {
        match (&self.directory, &other.directory) {
            (Some(a), Some(b)) => {
                style.eq_component(a, b) && style.eq_component(&self.filename, &other.filename)
            }
            _ => style.eq_component(&self.filename, &other.filename),
        }
    }
}

impl fmt::Display for FileSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.directory {
            Some(dir) if dir == "/" => write!(f, "/{}", self.filename),
            Some(dir) => write!(f, "{}/{}", dir, self.filename),
            None => f.write_str(&self.filename),
        }
    }
}

/// An ordered list of path specs.
///
/// Lists are short in practice, so storage is a `SmallVec`. Emptiness is
/// reported as-is; the "empty list matches everything" sentinel is the
/// filters' contract, not the list's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSpecList {
    specs: SmallVec4<FileSpec>,
}

impl FileSpecList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a spec.
    pub fn push(&mut self, spec: FileSpec) {
        self.specs.push(spec);
    }

    /// Number of specs in the list.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the list holds no specs.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// The first spec, if any.
    pub fn first(&self) -> Option<&FileSpec> {
        self.specs.first()
    }

    /// Iterate the specs in order.
    pub fn iter(&self) -> impl Iterator<Item = &FileSpec> {
        self.specs.iter()
    }

    /// Index of the first member matching `spec` under `style`.
    pub fn find_index(&self, spec: &FileSpec, style: PathStyle) -> Option<usize> {
        self.specs.iter().position(|member| member.matches(spec, style))
    }

    /// Whether any member matches `spec` under `style`.
    pub fn contains(&self, spec: &FileSpec, style: PathStyle) -> bool {
        self.find_index(spec, style).is_some()
    }
}

impl FromIterator<FileSpec> for FileSpecList {
    fn from_iter<I: IntoIterator<Item = FileSpec>>(iter: I) -> Self {
        Self {
            specs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_splits_directory_and_filename() {
        let spec = FileSpec::new("/usr/lib/a.so");
        assert_eq!(spec.directory(), Some("/usr/lib"));
        assert_eq!(spec.filename(), "a.so");
        assert_eq!(spec.to_string(), "/usr/lib/a.so");

        let bare = FileSpec::new("a.so");
        assert_eq!(bare.directory(), None);
        assert_eq!(bare.filename(), "a.so");
    }

    #[test]
    fn root_directory_is_preserved() {
        let spec = FileSpec::new("/init");
        assert_eq!(spec.directory(), Some("/"));
        assert_eq!(spec.to_string(), "/init");
    }

    #[test]
    fn bare_filename_matches_any_directory() {
        let style = PathStyle::default();
        let bare = FileSpec::new("a.so");
        let full = FileSpec::new("/usr/lib/a.so");
        assert!(bare.matches(&full, style));
        assert!(full.matches(&bare, style));
    }

    #[test]
    fn full_paths_compare_both_components() {
        let style = PathStyle::default();
        let a = FileSpec::new("/usr/lib/a.so");
        let b = FileSpec::new("/opt/lib/a.so");
        assert!(!a.matches(&b, style));
        assert!(a.matches(&FileSpec::new("/usr/lib/a.so"), style));
    }

    #[test]
    fn case_sensitivity_is_an_explicit_option() {
        let sensitive = PathStyle { case_sensitive: true };
        let insensitive = PathStyle { case_sensitive: false };
        let lower = FileSpec::new("a.so");
        let upper = FileSpec::new("A.SO");
        assert!(!lower.matches(&upper, sensitive));
        assert!(lower.matches(&upper, insensitive));
    }

    #[test]
    fn style_follows_search_config() {
        let config = SearchConfig {
            case_sensitive_paths: Some(false),
        };
        let style = PathStyle::from_config(&config);
        assert!(!style.case_sensitive);
        assert!(FileSpec::new("x.c").matches(&FileSpec::new("X.C"), style));
    }

    #[test]
    fn list_membership_uses_spec_matching() {
        let style = PathStyle::default();
        let list: FileSpecList = ["a.so", "b.so"].iter().map(|p| FileSpec::new(p)).collect();
        assert_eq!(list.len(), 2);
        assert_eq!(list.find_index(&FileSpec::new("/usr/lib/b.so"), style), Some(1));
        assert!(!list.contains(&FileSpec::new("c.so"), style));
    }

    #[test]
    fn empty_list_reports_empty_and_matches_nothing_itself() {
        let list = FileSpecList::new();
        assert!(list.is_empty());
        assert!(!list.contains(&FileSpec::new("a.so"), PathStyle::default()));
    }
}
