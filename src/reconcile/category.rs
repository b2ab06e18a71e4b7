use crate::models::{OverrideDecision, ReasonCode};
use crate::reconcile::rules::{KeywordRule, KeywordRuleSet};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Raw model category key (lower-cased) -> business-facing category name
static BUSINESS_CATEGORY_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("problem", "Technical"),
        ("incident", "Technical"),
        ("request", "General"),
        ("question", "General"),
        ("hardware", "Hardware"),
        ("software", "Technical"),
        ("billing", "Billing"),
    ])
});

/// Category keyword overrides, highest priority first.
///
/// High-signal phrases are more reliable indicators of business intent than
/// the trained classifier, and misrouting these categories is not
/// acceptable; a match wins regardless of model confidence.
static CATEGORY_RULES: KeywordRuleSet = KeywordRuleSet::new(&[
    KeywordRule::new(
        "Billing",
        &[
            "refund",
            "payment",
            "charged",
            "billing",
            "invoice",
            "money",
            "transaction",
            "subscription",
            "deducted",
            "amount",
            "paid",
        ],
    ),
    KeywordRule::new(
        "Account",
        &[
            "login",
            "password",
            "otp",
            "signin",
            "verification",
            "account locked",
            "cannot access account",
        ],
    ),
    KeywordRule::new(
        "Hardware",
        &[
            "laptop",
            "keyboard",
            "screen",
            "battery",
            "mouse",
            "charger",
            "device not turning on",
        ],
    ),
    KeywordRule::new(
        "Feature Request",
        &[
            "feature",
            "suggestion",
            "enhancement",
            "add option",
            "improve",
            "dark mode",
        ],
    ),
]);

/// Maps raw category labels to business-facing names, then applies keyword
/// overrides against the ticket text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryReconciler;

impl CategoryReconciler {
    pub fn new() -> Self {
        Self
    }

    /// Business-facing name for a raw model label; the raw label itself
    /// when the map has no entry
    pub fn business_category(&self, raw_label: &str) -> String {
        let key = raw_label.trim().to_lowercase();
        BUSINESS_CATEGORY_MAP
            .get(key.as_str())
            .map(|name| name.to_string())
            .unwrap_or_else(|| raw_label.to_string())
    }

    /// Reconcile a resolved raw category label against the ticket text
    pub fn reconcile(&self, raw_label: &str, text: &str) -> OverrideDecision {
        let base = self.business_category(raw_label);
        let lower = text.to_lowercase();

        match CATEGORY_RULES.evaluate(&lower) {
            Some(label) if label != base => OverrideDecision {
                final_label: label.to_string(),
                was_overridden: true,
                reason: ReasonCode::KeywordEscalation,
            },
            _ => OverrideDecision::model(base),
        }
    }
}
