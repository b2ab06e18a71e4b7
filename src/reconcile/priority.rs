use crate::models::{ClassDistribution, OverrideDecision, ReasonCode};
use crate::reconcile::rules::{KeywordRule, KeywordRuleSet};

pub const PRIORITY_LOW: &str = "Low";
pub const PRIORITY_MEDIUM: &str = "Medium";
pub const PRIORITY_HIGH: &str = "High";

/// Unconditional escalations: urgency or clear billing harm forces High no
/// matter what the model predicted.
static ESCALATION_RULES: KeywordRuleSet = KeywordRuleSet::new(&[
    KeywordRule::new(
        PRIORITY_HIGH,
        &[
            "urgent",
            "immediately",
            "asap",
            "critical",
            "emergency",
            "not working",
            "server down",
            "system down",
            "blocked",
            "quickly",
            "as soon as possible",
            "production down",
            "outage",
            "shutdown",
            "shut down",
            "cannot access",
            "can't access",
        ],
    ),
    KeywordRule::new(
        PRIORITY_HIGH,
        &[
            "wrong amount",
            "overcharged",
            "charged twice",
            "duplicate charge",
            "payment failed",
            "debited twice",
        ],
    ),
]);

/// Dampening rules, applied only when the raw label is Low: finance topics
/// and obvious service issues should not remain Low. Finance is evaluated
/// before service issues.
static DAMPENING_RULES: KeywordRuleSet = KeywordRuleSet::new(&[
    KeywordRule::new(
        PRIORITY_MEDIUM,
        &[
            "refund",
            "payment",
            "finance",
            "billing",
            "invoice",
            "money",
            "transaction",
            "subscription",
            "deducted",
            "amount",
            "paid",
            "charge",
            "charged",
            "wallet",
            "reimbursement",
            "payout",
        ],
    ),
    KeywordRule::new(
        PRIORITY_MEDIUM,
        &[
            "unable to login",
            "login fails",
            "otp delay",
            "disconnect",
            "timeout",
            "not received",
            "failed",
            "error",
            "issue",
            "cannot login",
            "can't login",
            "overheating",
            "fan issue",
            "refund pending",
        ],
    ),
]);

/// Applies keyword escalations and the borderline adjustment to a raw
/// priority prediction.
///
/// Priority errors are asymmetric: under-escalating an outage costs more
/// than over-escalating a trivial request, so every rule here only ever
/// raises the label.
#[derive(Debug, Clone, Copy)]
pub struct PriorityReconciler {
    /// Low-minus-Medium score gap under which Low is nudged to Medium
    borderline_margin: f64,
}

impl Default for PriorityReconciler {
    fn default() -> Self {
        Self {
            borderline_margin: 0.10,
        }
    }
}

impl PriorityReconciler {
    pub fn new(borderline_margin: f64) -> Self {
        Self { borderline_margin }
    }

    /// Reconcile a raw priority label with its class distribution and the
    /// ticket text. Precedence: keyword escalation, then keyword dampening
    /// (raw Low only), then the borderline adjustment, then the model.
    pub fn reconcile(
        &self,
        raw_label: &str,
        distribution: &ClassDistribution,
        text: &str,
    ) -> OverrideDecision {
        let lower = text.to_lowercase();

        if let Some(label) = ESCALATION_RULES.evaluate(&lower) {
            return OverrideDecision {
                final_label: label.to_string(),
                was_overridden: label != raw_label,
                reason: ReasonCode::KeywordEscalation,
            };
        }

        if raw_label == PRIORITY_LOW {
            if let Some(label) = DAMPENING_RULES.evaluate(&lower) {
                return OverrideDecision {
                    final_label: label.to_string(),
                    was_overridden: label != raw_label,
                    reason: ReasonCode::KeywordEscalation,
                };
            }

            if self.is_borderline(distribution) {
                return OverrideDecision {
                    final_label: PRIORITY_MEDIUM.to_string(),
                    was_overridden: true,
                    reason: ReasonCode::BorderlineAdjustment,
                };
            }
        }

        OverrideDecision::model(raw_label)
    }

    /// Low vs Medium too close to trust: nudge up to reduce false-low
    fn is_borderline(&self, distribution: &ClassDistribution) -> bool {
        let low = distribution.score(PRIORITY_LOW);
        let medium = distribution.score(PRIORITY_MEDIUM);
        medium > 0.0 && (low - medium) <= self.borderline_margin
    }
}
