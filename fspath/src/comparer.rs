//! Path comparison policies.
//!
//! A [`PathComparer`] decides when two canonical path strings name the same
//! entry, how to hash them consistently with that decision, and how glob
//! patterns match. Two canonical policies exist: [`Comparer::case_sensitive`]
//! and [`Comparer::case_insensitive`]. Case folding is ordinal, one char at a
//! time through its uppercase mapping, and never locale-aware.
//!
//! When an operation is not given a comparer explicitly it consults the
//! ambient comparer state (see [`Comparer::ambient_for`]), whose fallback is
//! case-insensitive.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};

use crate::ambient::{LayerGuard, LayeredState};

/// Equality, hashing and pattern-matching strategy over path strings.
///
/// `hash_str` must agree with `equals`: equal strings hash equally.
pub trait PathComparer: fmt::Debug + Send + Sync {
    /// Whether `a` and `b` name the same path.
    fn equals(&self, a: &str, b: &str) -> bool;

    /// A hash of `s` consistent with [`equals`](Self::equals).
    fn hash_str(&self, s: &str) -> u64;

    /// Whether letter case is significant.
    fn is_case_sensitive(&self) -> bool;

    /// Whether `input` matches the glob `pattern` (`*`, `?`, `[...]`).
    ///
    /// An invalid pattern matches nothing.
    fn matches(&self, input: &str, pattern: &str) -> bool {
        glob_matches(input, pattern, self.is_case_sensitive())
    }
}

/// Exact, ordinal comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseSensitive;

impl PathComparer for CaseSensitive {
    fn equals(&self, a: &str, b: &str) -> bool {
        a == b
    }

    fn hash_str(&self, s: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    }

    fn is_case_sensitive(&self) -> bool {
        true
    }
}

/// Ordinal comparison ignoring letter case.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitive;

impl PathComparer for CaseInsensitive {
    fn equals(&self, a: &str, b: &str) -> bool {
        a.chars().map(fold).eq(b.chars().map(fold))
    }

    fn hash_str(&self, s: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        for c in s.chars().map(fold) {
            c.hash(&mut hasher);
        }
        hasher.finish()
    }

    fn is_case_sensitive(&self) -> bool {
        false
    }
}

/// Uppercase `c` when its mapping is a single char; otherwise keep it.
fn fold(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

fn glob_matches(input: &str, pattern: &str, case_sensitive: bool) -> bool {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };
    if case_sensitive {
        Pattern::new(pattern).is_ok_and(|p| p.matches_with(input, options))
    } else {
        let pattern: String = pattern.chars().map(fold).collect();
        let input: String = input.chars().map(fold).collect();
        Pattern::new(&pattern).is_ok_and(|p| p.matches_with(&input, options))
    }
}

static CASE_SENSITIVE: LazyLock<Comparer> = LazyLock::new(|| Comparer::new(CaseSensitive));
static CASE_INSENSITIVE: LazyLock<Comparer> = LazyLock::new(|| Comparer::new(CaseInsensitive));
static STATE: LazyLock<LayeredState<Comparer, str>> =
    LazyLock::new(|| LayeredState::new(Comparer::case_insensitive()));

/// A shared handle to a [`PathComparer`].
///
/// # Examples
///
/// ```
/// use fspath::Comparer;
///
/// let insensitive = Comparer::case_insensitive();
/// assert!(insensitive.equals("/Foo/BAR", "/foo/bar"));
/// assert!(!Comparer::case_sensitive().equals("/Foo", "/foo"));
/// assert!(insensitive.matches("Report.TXT", "*.txt"));
/// ```
#[derive(Clone)]
pub struct Comparer(Arc<dyn PathComparer>);

impl fmt::Debug for Comparer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Comparer").field(&self.0).finish()
    }
}

impl Comparer {
    /// Wrap a custom policy.
    pub fn new(policy: impl PathComparer + 'static) -> Self {
        Self(Arc::new(policy))
    }

    /// The canonical exact comparer.
    #[must_use]
    pub fn case_sensitive() -> Self {
        CASE_SENSITIVE.clone()
    }

    /// The canonical case-folding comparer.
    #[must_use]
    pub fn case_insensitive() -> Self {
        CASE_INSENSITIVE.clone()
    }

    /// The canonical comparer for `kind`.
    #[must_use]
    pub fn for_kind(kind: ComparisonKind) -> Self {
        match kind {
            ComparisonKind::CaseSensitive => Self::case_sensitive(),
            ComparisonKind::CaseInsensitive => Self::case_insensitive(),
        }
    }

    /// The ambient comparer state.
    ///
    /// Conditions receive the canonical path of the entity being compared.
    #[must_use]
    pub fn state() -> &'static LayeredState<Comparer, str> {
        &STATE
    }

    /// Resolve the comparer that applies to `path` right now.
    #[must_use]
    pub fn ambient_for(path: &str) -> Self {
        STATE.resolve_for(path)
    }

    /// Make `self` the ambient comparer until the guard drops.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::Comparer;
    ///
    /// assert!(Comparer::ambient_for("/a").equals("FOO", "foo"));
    /// {
    ///     let _scope = Comparer::case_sensitive().begin_default();
    ///     assert!(!Comparer::ambient_for("/a").equals("FOO", "foo"));
    /// }
    /// assert!(Comparer::ambient_for("/a").equals("FOO", "foo"));
    /// ```
    #[must_use = "the override ends as soon as the guard drops"]
    pub fn begin_default(&self) -> LayerGuard {
        STATE.begin_with(self.clone())
    }

    /// Whether `a` and `b` name the same path.
    #[must_use]
    pub fn equals(&self, a: &str, b: &str) -> bool {
        self.0.equals(a, b)
    }

    /// Hash of `s` consistent with [`equals`](Self::equals).
    #[must_use]
    pub fn hash_str(&self, s: &str) -> u64 {
        self.0.hash_str(s)
    }

    /// Whether `input` matches the glob `pattern`.
    #[must_use]
    pub fn matches(&self, input: &str, pattern: &str) -> bool {
        self.0.matches(input, pattern)
    }

    /// Whether letter case is significant.
    #[must_use]
    pub fn is_case_sensitive(&self) -> bool {
        self.0.is_case_sensitive()
    }
}

/// The built-in comparison policies, as named in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonKind {
    /// Exact comparison.
    CaseSensitive,
    /// Case-folding comparison.
    #[default]
    CaseInsensitive,
}

impl ComparisonKind {
    /// Parses a comparison kind from a string.
    ///
    /// Recognizes "case-sensitive" and "case-insensitive" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "case-sensitive" => Ok(Self::CaseSensitive),
            "case-insensitive" => Ok(Self::CaseInsensitive),
            _ => Err(format!("invalid comparison: {s}")),
        }
    }
}

impl fmt::Display for ComparisonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CaseSensitive => write!(f, "case-sensitive"),
            Self::CaseInsensitive => write!(f, "case-insensitive"),
        }
    }
}

/// A value keyed by one fixed [`Comparer`] for hashed containers.
///
/// `Eq` and `Hash` use the key's own comparer. Keys built with different
/// comparers must not be mixed in one container.
///
/// # Examples
///
/// ```
/// use fspath::{Comparer, PathKey};
/// use std::collections::HashSet;
///
/// let cmp = Comparer::case_insensitive();
/// let mut set = HashSet::new();
/// set.insert(PathKey::new("/Foo", cmp.clone()));
/// assert!(set.contains(&PathKey::new("/foo", cmp)));
/// ```
#[derive(Debug, Clone)]
pub struct PathKey<T> {
    value: T,
    comparer: Comparer,
}

impl<T: AsRef<str>> PathKey<T> {
    /// Pair `value` with `comparer`.
    pub fn new(value: T, comparer: Comparer) -> Self {
        Self { value, comparer }
    }

    /// The wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Unwrap the value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: AsRef<str>> PartialEq for PathKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.comparer
            .equals(self.value.as_ref(), other.value.as_ref())
    }
}

impl<T: AsRef<str>> Eq for PathKey<T> {}

impl<T: AsRef<str>> Hash for PathKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.comparer.hash_str(self.value.as_ref()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_sensitive_equality() {
        let cmp = Comparer::case_sensitive();
        assert!(cmp.equals("/a/B", "/a/B"));
        assert!(!cmp.equals("/a/B", "/a/b"));
        assert!(cmp.is_case_sensitive());
    }

    #[test]
    fn test_case_insensitive_equality() {
        let cmp = Comparer::case_insensitive();
        assert!(cmp.equals("/Work/FOO", "/work/foo"));
        assert!(cmp.equals("ÄÖÜ", "äöü"));
        assert!(!cmp.equals("/a", "/ab"));
        assert!(!cmp.is_case_sensitive());
    }

    #[test]
    fn test_case_insensitive_is_ordinal() {
        let cmp = Comparer::case_insensitive();
        // Dotted capital I does not fold to ASCII i.
        assert!(!cmp.equals("\u{130}", "i"));
        // Multi-char uppercase mappings stay as they are.
        assert!(!cmp.equals("\u{df}", "SS"));
    }

    #[test]
    fn test_hash_consistent_with_equals() {
        let cmp = Comparer::case_insensitive();
        assert_eq!(cmp.hash_str("/Foo/Bar"), cmp.hash_str("/FOO/bar"));

        let cmp = Comparer::case_sensitive();
        assert_eq!(cmp.hash_str("/foo"), cmp.hash_str("/foo"));
    }

    #[test]
    fn test_glob_matching() {
        let sensitive = Comparer::case_sensitive();
        assert!(sensitive.matches("file.txt", "*.txt"));
        assert!(sensitive.matches("file1.txt", "file?.txt"));
        assert!(!sensitive.matches("FILE.TXT", "*.txt"));
        assert!(sensitive.matches(".hidden", "*"));

        let insensitive = Comparer::case_insensitive();
        assert!(insensitive.matches("FILE.TXT", "*.txt"));
        assert!(insensitive.matches("file.txt", "F*.[T]XT"));
    }

    #[test]
    fn test_invalid_pattern_matches_nothing() {
        assert!(!Comparer::case_sensitive().matches("a", "[a"));
    }

    #[test]
    fn test_ambient_comparer_scope() {
        assert!(Comparer::ambient_for("/x").equals("FOO", "foo"));
        {
            let _guard = Comparer::case_sensitive().begin_default();
            assert!(!Comparer::ambient_for("/x").equals("FOO", "foo"));
        }
        assert!(Comparer::ambient_for("/x").equals("FOO", "foo"));
    }

    #[test]
    fn test_ambient_comparer_condition() {
        let _guard = Comparer::state()
            .begin_with_condition(Comparer::case_sensitive(), |path: &str| path.starts_with("/src"));
        assert!(Comparer::ambient_for("/src/a").is_case_sensitive());
        assert!(!Comparer::ambient_for("/doc/a").is_case_sensitive());
    }

    #[test]
    fn test_comparison_kind_parse_and_display() {
        assert_eq!(
            ComparisonKind::parse("Case-Sensitive").unwrap(),
            ComparisonKind::CaseSensitive
        );
        assert!(ComparisonKind::parse("exact").is_err());
        assert_eq!(ComparisonKind::CaseInsensitive.to_string(), "case-insensitive");
        assert_eq!(ComparisonKind::default(), ComparisonKind::CaseInsensitive);
    }

    #[test]
    fn test_for_kind() {
        assert!(Comparer::for_kind(ComparisonKind::CaseSensitive).is_case_sensitive());
        assert!(!Comparer::for_kind(ComparisonKind::CaseInsensitive).is_case_sensitive());
    }

    #[test]
    fn test_path_key_in_hash_set() {
        use std::collections::HashSet;

        let cmp = Comparer::case_insensitive();
        let mut set = HashSet::new();
        assert!(set.insert(PathKey::new("/A/b".to_string(), cmp.clone())));
        assert!(!set.insert(PathKey::new("/a/B".to_string(), cmp.clone())));
        assert_eq!(set.len(), 1);

        let exact = Comparer::case_sensitive();
        let mut set = HashSet::new();
        set.insert(PathKey::new("/A", exact.clone()));
        set.insert(PathKey::new("/a", exact));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_custom_comparer() {
        #[derive(Debug)]
        struct AlwaysEqual;

        impl PathComparer for AlwaysEqual {
            fn equals(&self, _: &str, _: &str) -> bool {
                true
            }
            fn hash_str(&self, _: &str) -> u64 {
                0
            }
            fn is_case_sensitive(&self) -> bool {
                true
            }
        }

        let cmp = Comparer::new(AlwaysEqual);
        assert!(cmp.equals("/a", "/b"));
        assert!(cmp.matches("abc", "a*"));
    }
}
