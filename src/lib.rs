/// Ticket Triage: support-ticket classification service
///
/// An external, already-trained pair of linear classifiers predicts a raw
/// category and priority for a ticket description; the reconciliation
/// engine applies business keyword rules, optional confidence calibration,
/// and a Low/Medium borderline adjustment to produce the final, explainable
/// decision served over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod inference;
pub mod models;
pub mod reconcile;
