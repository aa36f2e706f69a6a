//! Class and method predicates.
//!
//! A [`Matcher`] is plain data: its kind and parameters are all there is to
//! it, which is what lets pointcuts survive a structural snapshot. The
//! metadata it is evaluated against arrives as a [`Candidate`] assembled from
//! the attribute reader.

use serde::{Deserialize, Serialize};

/// Everything a matcher may inspect about a class or a method.
#[derive(Debug, Clone, Copy, Default)]
pub struct Candidate<'a> {
    /// Class identifier or method name.
    pub name: &'a str,
    /// Annotation tags carried by the declaration.
    pub annotations: &'a [String],
    /// Ancestor class identifiers (always empty for methods).
    pub ancestors: &'a [String],
}

impl<'a> Candidate<'a> {
    /// A candidate with a name and no metadata.
    #[must_use]
    pub const fn named(name: &'a str) -> Self {
        Self {
            name,
            annotations: &[],
            ancestors: &[],
        }
    }

    /// Attaches annotation tags.
    #[must_use]
    pub const fn with_annotations(mut self, annotations: &'a [String]) -> Self {
        self.annotations = annotations;
        self
    }

    /// Attaches ancestor class identifiers.
    #[must_use]
    pub const fn with_ancestors(mut self, ancestors: &'a [String]) -> Self {
        self.ancestors = ancestors;
        self
    }
}

/// A predicate over a [`Candidate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Matcher {
    /// Matches every candidate.
    Any,
    /// Matches candidates carrying the given annotation tag.
    AnnotatedWith(String),
    /// Matches a candidate with exactly this name.
    Named(String),
    /// Matches candidates whose name starts with the prefix.
    StartsWith(String),
    /// Matches the class itself or any class deriving from it.
    SubclassOf(String),
    /// Inverts the inner matcher.
    Not(Box<Self>),
}

impl Matcher {
    /// Matches every candidate.
    #[must_use]
    pub const fn any() -> Self {
        Self::Any
    }

    /// Matches candidates annotated with `tag`.
    #[must_use]
    pub fn annotated_with(tag: impl Into<String>) -> Self {
        Self::AnnotatedWith(tag.into())
    }

    /// Matches the candidate named `name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Matches candidates whose name starts with `prefix`.
    #[must_use]
    pub fn starts_with(prefix: impl Into<String>) -> Self {
        Self::StartsWith(prefix.into())
    }

    /// Matches `class` and its descendants.
    #[must_use]
    pub fn subclass_of(class: impl Into<String>) -> Self {
        Self::SubclassOf(class.into())
    }

    /// Negates `inner`.
    #[must_use]
    pub fn not(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Evaluates the predicate.
    #[must_use]
    pub fn matches(&self, candidate: &Candidate<'_>) -> bool {
        match self {
            Self::Any => true,
            Self::AnnotatedWith(tag) => candidate.annotations.iter().any(|a| a == tag),
            Self::Named(name) => candidate.name == name,
            Self::StartsWith(prefix) => candidate.name.starts_with(prefix.as_str()),
            Self::SubclassOf(class) => {
                same_class(candidate.name, class)
                    || candidate.ancestors.iter().any(|a| same_class(a, class))
            }
            Self::Not(inner) => !inner.matches(candidate),
        }
    }
}

fn same_class(left: &str, right: &str) -> bool {
    left.trim_start_matches('\\') == right.trim_start_matches('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn any_matches_everything() {
        assert!(Matcher::any().matches(&Candidate::named("chargeOrder")));
        assert!(Matcher::any().matches(&Candidate::named("")));
    }

    #[test]
    fn annotated_with_requires_tag() {
        let annotations = tags(&["Tax", "Log"]);
        let tagged = Candidate::named("chargeOrder").with_annotations(&annotations);
        assert!(Matcher::annotated_with("Tax").matches(&tagged));
        assert!(!Matcher::annotated_with("Cache").matches(&tagged));
        assert!(!Matcher::annotated_with("Tax").matches(&Candidate::named("chargeOrder")));
    }

    #[test]
    fn named_and_prefix() {
        let candidate = Candidate::named("chargeOrderWithNoTax");
        assert!(Matcher::named("chargeOrderWithNoTax").matches(&candidate));
        assert!(!Matcher::named("chargeOrder").matches(&candidate));
        assert!(Matcher::starts_with("charge").matches(&candidate));
        assert!(!Matcher::starts_with("refund").matches(&candidate));
    }

    #[test]
    fn subclass_of_checks_self_and_ancestors() {
        let ancestors = tags(&["App\\BillingService"]);
        let candidate = Candidate::named("App\\RealBillingService").with_ancestors(&ancestors);
        assert!(Matcher::subclass_of("App\\BillingService").matches(&candidate));
        assert!(Matcher::subclass_of("\\App\\RealBillingService").matches(&candidate));
        assert!(!Matcher::subclass_of("App\\Other").matches(&candidate));
    }

    #[test]
    fn not_inverts() {
        let candidate = Candidate::named("toString");
        assert!(Matcher::not(Matcher::named("chargeOrder")).matches(&candidate));
        assert!(!Matcher::not(Matcher::any()).matches(&candidate));
    }

    #[test]
    fn serialized_form_is_tagged() {
        let json = serde_json::to_string(&Matcher::annotated_with("Tax")).expect("serialize");
        assert_eq!(json, r#"{"kind":"annotated_with","value":"Tax"}"#);
        let any = serde_json::to_string(&Matcher::Any).expect("serialize");
        assert_eq!(any, r#"{"kind":"any"}"#);
    }
}
