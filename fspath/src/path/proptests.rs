//! Property-based tests for path entities.
//!
//! Note: The normalize and relationship modules carry their own property
//! tests. This module focuses on how entities derive paths from each other.

use super::{DirectoryPath, FilePath, FileSystemPath};
use crate::comparer::Comparer;
use proptest::prelude::*;

// Strategy for generating path-like strings
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,12}(\\.[a-z]{1,4})?"
}

fn absolute_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..8).prop_map(|parts| format!("/{}", parts.join("/")))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // A child's parent is the directory it was joined onto
    #[test]
    fn child_parent_inverse(dir in absolute_path_strategy(), name in segment_strategy()) {
        let dir = DirectoryPath::new(&dir).unwrap();
        let file = dir.child_file(&name).unwrap();
        prop_assert_eq!(file.parent().unwrap(), dir.clone());
        prop_assert_eq!(file.name(), name.as_str());
        prop_assert!(file.is_descendant_of(&dir));
    }

    // Ancestors shrink strictly and end at the root
    #[test]
    fn ancestors_end_at_root(path in absolute_path_strategy()) {
        let file = FilePath::new(&path).unwrap();
        let ancestors: Vec<DirectoryPath> = file.ancestors().collect();
        prop_assert_eq!(ancestors.len(), path.matches('/').count());
        prop_assert!(ancestors.last().unwrap().is_root());
        for pair in ancestors.windows(2) {
            prop_assert!(pair[0].full_name().len() > pair[1].full_name().len());
            prop_assert!(pair[0].is_descendant_of(&pair[1]));
        }
    }

    // Nothing is its own descendant
    #[test]
    fn descendant_is_irreflexive(path in absolute_path_strategy()) {
        let dir = DirectoryPath::new(&path).unwrap();
        prop_assert!(!dir.is_descendant_of(&dir));
    }

    // Changing the extension keeps the parent and the stem
    #[test]
    fn with_extension_keeps_stem(path in absolute_path_strategy(), ext in "[a-z]{1,4}") {
        let file = FilePath::new(&path).unwrap();
        let changed = file.with_extension(&ext).unwrap();
        prop_assert_eq!(changed.parent().unwrap(), file.parent().unwrap());
        prop_assert_eq!(changed.name_without_extension(), file.name_without_extension());
        prop_assert!(changed.extension_equals_with(&ext, &Comparer::case_sensitive()));
    }

    // Case-insensitive equality ignores the case of every segment
    #[test]
    fn case_insensitive_equals_upper(path in absolute_path_strategy()) {
        let lower = FilePath::new(&path.to_lowercase()).unwrap();
        let upper = FilePath::new(&path.to_uppercase()).unwrap();
        let cmp = Comparer::case_insensitive();
        prop_assert!(lower.equals_with(&upper, &cmp));
        prop_assert_eq!(cmp.hash_str(lower.full_name()), cmp.hash_str(upper.full_name()));
    }
}
