//! Path relationship checking.
//!
//! This module determines how two canonical paths relate to each other in
//! the filesystem hierarchy, under a given [`Comparer`].

use super::segments;
use crate::comparer::Comparer;

/// Relationship between two paths.
///
/// This enum describes how two paths relate to each other in the filesystem
/// hierarchy.
///
/// # Examples
///
/// ```
/// # #[cfg(unix)] {
/// use fspath::{Comparer, PathRelationship};
///
/// let cmp = Comparer::case_sensitive();
/// assert_eq!(
///     PathRelationship::between("/home/user", "/home/user/project", &cmp),
///     PathRelationship::Ancestor
/// );
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The first path is an ancestor of the second.
    ///
    /// This means the second path is somewhere beneath the first in the
    /// directory hierarchy.
    Ancestor,

    /// The first path is a descendant of the second.
    ///
    /// This means the first path is somewhere beneath the second in the
    /// directory hierarchy.
    Descendant,

    /// The paths are the same under the comparer.
    Same,

    /// The paths are unrelated.
    ///
    /// Neither path is an ancestor or descendant of the other; they are
    /// in different branches of the filesystem tree.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two canonical paths.
    ///
    /// Both arguments must already be normalized. Prefix checks only match
    /// whole segments, so `/ab` is unrelated to `/a`.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(unix)] {
    /// use fspath::{Comparer, PathRelationship};
    ///
    /// let cmp = Comparer::case_insensitive();
    ///
    /// let rel = PathRelationship::between("/a", "/A/b", &cmp);
    /// assert_eq!(rel, PathRelationship::Ancestor);
    ///
    /// let rel = PathRelationship::between("/a/b", "/a", &cmp);
    /// assert_eq!(rel, PathRelationship::Descendant);
    ///
    /// let rel = PathRelationship::between("/a", "/A", &cmp);
    /// assert_eq!(rel, PathRelationship::Same);
    ///
    /// let rel = PathRelationship::between("/a", "/ab", &cmp);
    /// assert_eq!(rel, PathRelationship::Unrelated);
    /// # }
    /// ```
    #[must_use]
    pub fn between(path1: &str, path2: &str, comparer: &Comparer) -> Self {
        if comparer.equals(path1, path2) {
            return Self::Same;
        }

        if is_strict_descendant(path2, path1, comparer) {
            return Self::Ancestor;
        }

        if is_strict_descendant(path1, path2, comparer) {
            return Self::Descendant;
        }

        Self::Unrelated
    }

    /// Check if the relationship is hierarchical (not unrelated).
    ///
    /// Returns `true` for `Ancestor`, `Descendant`, or `Same`, and `false`
    /// for `Unrelated`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::PathRelationship;
    ///
    /// assert!(PathRelationship::Ancestor.is_hierarchical());
    /// assert!(PathRelationship::Descendant.is_hierarchical());
    /// assert!(PathRelationship::Same.is_hierarchical());
    /// assert!(!PathRelationship::Unrelated.is_hierarchical());
    /// ```
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        matches!(self, Self::Ancestor | Self::Descendant | Self::Same)
    }

    /// Check if a path is within a directory (descendant or same).
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(unix)] {
    /// use fspath::{Comparer, PathRelationship};
    ///
    /// let cmp = Comparer::case_sensitive();
    /// assert!(PathRelationship::is_within("/home/user/file.txt", "/home/user", &cmp));
    /// assert!(PathRelationship::is_within("/home/user", "/home/user", &cmp));
    /// # }
    /// ```
    #[must_use]
    pub fn is_within(path: &str, directory: &str, comparer: &Comparer) -> bool {
        let rel = Self::between(path, directory, comparer);
        matches!(rel, Self::Descendant | Self::Same)
    }

    /// Check if a path contains another path (ancestor or same).
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(unix)] {
    /// use fspath::{Comparer, PathRelationship};
    ///
    /// let cmp = Comparer::case_sensitive();
    /// assert!(PathRelationship::contains("/home/user", "/home/user/file.txt", &cmp));
    /// assert!(PathRelationship::contains("/home/user", "/home/user", &cmp));
    /// # }
    /// ```
    #[must_use]
    pub fn contains(path: &str, other: &str, comparer: &Comparer) -> bool {
        let rel = Self::between(path, other, comparer);
        matches!(rel, Self::Ancestor | Self::Same)
    }

    /// Get a human-readable description of the relationship.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::PathRelationship;
    ///
    /// let desc = PathRelationship::Ancestor.description("/a", "/a/b");
    /// assert!(desc.contains("/a/b"));
    /// assert!(desc.contains("ancestor"));
    /// ```
    #[must_use]
    pub fn description(&self, path1: &str, path2: &str) -> String {
        match self {
            Self::Ancestor => format!("{path1} is an ancestor of {path2}"),
            Self::Descendant => format!("{path1} is a descendant of {path2}"),
            Self::Same => format!("{path1} and {path2} are the same path"),
            Self::Unrelated => format!("{path1} and {path2} are unrelated paths"),
        }
    }
}

/// Whether `path` lies strictly beneath `ancestor`.
///
/// Walks the parents of `path`, so a match is always segment-aligned and a
/// path is never its own descendant.
pub(crate) fn is_strict_descendant(path: &str, ancestor: &str, comparer: &Comparer) -> bool {
    segments::parents(path).any(|parent| comparer.equals(parent, ancestor))
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;

    fn sensitive() -> Comparer {
        Comparer::case_sensitive()
    }

    #[test]
    fn test_relationship_ancestor() {
        assert_eq!(
            PathRelationship::between("/a", "/a/b", &sensitive()),
            PathRelationship::Ancestor
        );
        assert_eq!(
            PathRelationship::between("/a/b", "/a/b/c/d", &sensitive()),
            PathRelationship::Ancestor
        );
        assert_eq!(
            PathRelationship::between("/", "/a", &sensitive()),
            PathRelationship::Ancestor
        );
    }

    #[test]
    fn test_relationship_descendant() {
        assert_eq!(
            PathRelationship::between("/a/b", "/a", &sensitive()),
            PathRelationship::Descendant
        );
        assert_eq!(
            PathRelationship::between("/a/b/c/d", "/a/b", &sensitive()),
            PathRelationship::Descendant
        );
    }

    #[test]
    fn test_relationship_same() {
        assert_eq!(
            PathRelationship::between("/a", "/a", &sensitive()),
            PathRelationship::Same
        );
        assert_eq!(
            PathRelationship::between("/", "/", &sensitive()),
            PathRelationship::Same
        );
    }

    #[test]
    fn test_relationship_unrelated() {
        assert_eq!(
            PathRelationship::between("/a", "/b", &sensitive()),
            PathRelationship::Unrelated
        );
        assert_eq!(
            PathRelationship::between("/a/b", "/a/c", &sensitive()),
            PathRelationship::Unrelated
        );
    }

    #[test]
    fn test_prefix_must_align_on_segments() {
        assert_eq!(
            PathRelationship::between("/foo", "/foobar", &sensitive()),
            PathRelationship::Unrelated
        );
        assert!(!is_strict_descendant("/foobar/x", "/foo", &sensitive()));
    }

    #[test]
    fn test_relationship_respects_comparer() {
        let insensitive = Comparer::case_insensitive();
        assert_eq!(
            PathRelationship::between("/A", "/a/b", &insensitive),
            PathRelationship::Ancestor
        );
        assert_eq!(
            PathRelationship::between("/A", "/a/b", &sensitive()),
            PathRelationship::Unrelated
        );
    }

    #[test]
    fn test_path_is_not_its_own_descendant() {
        assert!(!is_strict_descendant("/a/b", "/a/b", &sensitive()));
        assert!(!is_strict_descendant("/", "/", &sensitive()));
        assert!(is_strict_descendant("/a/b", "/", &sensitive()));
    }

    #[test]
    fn test_is_hierarchical() {
        assert!(PathRelationship::Ancestor.is_hierarchical());
        assert!(PathRelationship::Descendant.is_hierarchical());
        assert!(PathRelationship::Same.is_hierarchical());
        assert!(!PathRelationship::Unrelated.is_hierarchical());
    }

    #[test]
    fn test_is_within() {
        assert!(PathRelationship::is_within("/a/b", "/a", &sensitive()));
        assert!(PathRelationship::is_within("/a", "/a", &sensitive()));
        assert!(!PathRelationship::is_within("/a", "/a/b", &sensitive()));
        assert!(!PathRelationship::is_within("/a", "/b", &sensitive()));
    }

    #[test]
    fn test_contains() {
        assert!(PathRelationship::contains("/a", "/a/b", &sensitive()));
        assert!(PathRelationship::contains("/a", "/a", &sensitive()));
        assert!(!PathRelationship::contains("/a/b", "/a", &sensitive()));
        assert!(!PathRelationship::contains("/a", "/b", &sensitive()));
    }

    #[test]
    fn test_description() {
        let desc = PathRelationship::Descendant.description("/a/b", "/a");
        assert!(desc.contains("/a/b"));
        assert!(desc.contains("descendant"));

        let desc = PathRelationship::Same.description("/a", "/a");
        assert!(desc.contains("same"));

        let desc = PathRelationship::Unrelated.description("/a", "/b");
        assert!(desc.contains("/b"));
        assert!(desc.contains("unrelated"));
    }

    // Property-based tests
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn path_strategy() -> impl Strategy<Value = String> {
            prop::collection::vec("[a-cA-C]{1,3}", 1..=4)
                .prop_map(|parts| format!("/{}", parts.join("/")))
        }

        fn comparer_strategy() -> impl Strategy<Value = Comparer> {
            prop_oneof![
                Just(Comparer::case_sensitive()),
                Just(Comparer::case_insensitive()),
            ]
        }

        proptest! {
            /// A path related to itself is Same
            #[test]
            fn relationship_reflexive(s in path_strategy(), cmp in comparer_strategy()) {
                prop_assert_eq!(PathRelationship::between(&s, &s, &cmp), PathRelationship::Same);
            }

            /// If A is ancestor of B, then B is descendant of A
            #[test]
            fn relationship_symmetric(
                s1 in path_strategy(),
                s2 in path_strategy(),
                cmp in comparer_strategy(),
            ) {
                let rel1 = PathRelationship::between(&s1, &s2, &cmp);
                let rel2 = PathRelationship::between(&s2, &s1, &cmp);

                match (rel1, rel2) {
                    (PathRelationship::Ancestor, PathRelationship::Descendant)
                    | (PathRelationship::Descendant, PathRelationship::Ancestor)
                    | (PathRelationship::Same, PathRelationship::Same)
                    | (PathRelationship::Unrelated, PathRelationship::Unrelated) => {}
                    _ => prop_assert!(false, "Invalid relationship symmetry: {:?} vs {:?}", rel1, rel2),
                }
            }

            /// Appending segments always yields a descendant
            #[test]
            fn relationship_transitive(s in path_strategy(), cmp in comparer_strategy()) {
                let child = format!("{s}/subdir");
                let grandchild = format!("{child}/nested");

                prop_assert_eq!(PathRelationship::between(&s, &child, &cmp), PathRelationship::Ancestor);
                prop_assert_eq!(PathRelationship::between(&child, &grandchild, &cmp), PathRelationship::Ancestor);
                prop_assert_eq!(PathRelationship::between(&s, &grandchild, &cmp), PathRelationship::Ancestor);
            }

            /// is_within and contains are consistent
            #[test]
            fn is_within_contains_consistent(
                s1 in path_strategy(),
                s2 in path_strategy(),
                cmp in comparer_strategy(),
            ) {
                prop_assert_eq!(
                    PathRelationship::is_within(&s1, &s2, &cmp),
                    PathRelationship::contains(&s2, &s1, &cmp)
                );
            }
        }
    }
}
