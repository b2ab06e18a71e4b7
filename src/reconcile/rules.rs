/// An ordered keyword rule table.
///
/// Rules are evaluated top-to-bottom, first match wins; a rule matches when
/// any of its trigger phrases is contained in the (already lower-cased)
/// text. Phrases are stored lower-case; matching is plain substring
/// containment, exactly as broad as the product rules require.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    /// Label this rule resolves to
    pub label: &'static str,

    /// Trigger phrases, lower-case
    pub phrases: &'static [&'static str],
}

impl KeywordRule {
    pub const fn new(label: &'static str, phrases: &'static [&'static str]) -> Self {
        Self { label, phrases }
    }

    pub fn matches(&self, lower_text: &str) -> bool {
        self.phrases.iter().any(|phrase| lower_text.contains(phrase))
    }
}

/// Ordered list of keyword rules with first-match-wins evaluation
#[derive(Debug, Clone, Copy)]
pub struct KeywordRuleSet {
    rules: &'static [KeywordRule],
}

impl KeywordRuleSet {
    pub const fn new(rules: &'static [KeywordRule]) -> Self {
        Self { rules }
    }

    /// Label of the first matching rule, if any.
    ///
    /// `lower_text` must already be lower-cased; callers lower-case the
    /// request text once, not per rule.
    pub fn evaluate(&self, lower_text: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(lower_text))
            .map(|rule| rule.label)
    }

    pub fn rules(&self) -> &'static [KeywordRule] {
        self.rules
    }
}
