//! Topic resolution seam.
//!
//! Topics are free-text labels with no registry. All topic comparisons in the
//! survey engine go through a [`TopicResolver`] so that a canonicalisation
//! layer can be slotted in without touching aggregation.

/// Decides whether a topic written in a survey entry refers to a requested
/// topic, and which key a raw topic is grouped under.
pub trait TopicResolver: Send + Sync {
    /// Key under which a raw topic string is grouped.
    fn canonical<'t>(&self, raw: &'t str) -> std::borrow::Cow<'t, str>;

    /// Whether an entry's raw topic belongs to `requested`.
    fn matches(&self, entry_topic: &str, requested: &str) -> bool {
        self.canonical(entry_topic) == self.canonical(requested)
    }
}

/// Exact, case-sensitive string matching. `"RLHF"` and `"rlhf"` are
/// different topics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactTopicResolver;

impl TopicResolver for ExactTopicResolver {
    fn canonical<'t>(&self, raw: &'t str) -> std::borrow::Cow<'t, str> {
        std::borrow::Cow::Borrowed(raw)
    }

    fn matches(&self, entry_topic: &str, requested: &str) -> bool {
        entry_topic == requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_resolver_is_case_sensitive() {
        let r = ExactTopicResolver;
        assert!(r.matches("RLHF", "RLHF"));
        assert!(!r.matches("RLHF", "rlhf"));
        assert!(!r.matches("RLHF ", "RLHF"));
    }

    struct Lowercase;

    impl TopicResolver for Lowercase {
        fn canonical<'t>(&self, raw: &'t str) -> std::borrow::Cow<'t, str> {
            std::borrow::Cow::Owned(raw.to_lowercase())
        }
    }

    #[test]
    fn test_custom_resolver_uses_default_matches() {
        assert!(Lowercase.matches("RLHF", "rlhf"));
    }
}
