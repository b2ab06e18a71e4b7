/// Prediction-reconciliation engine
///
/// Takes raw classifier output and reconciles it with domain knowledge:
/// keyword rule tables, the business category map, and the Low/Medium
/// borderline adjustment. Deterministic with guaranteed precedence: a
/// keyword rule beats the borderline nudge, which beats the raw model.

pub mod category;
pub mod pipeline;
pub mod priority;
pub mod rules;

pub use category::CategoryReconciler;
pub use pipeline::{ReconciliationPipeline, TicketPrediction};
pub use priority::PriorityReconciler;
pub use rules::{KeywordRule, KeywordRuleSet};
