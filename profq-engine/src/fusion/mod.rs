// Fusion Module - Multi-Source Reconciliation
//
// Candidates (scored by validators::QualityScorer) → Reconciler → CanonicalRecord

pub mod candidate_selector;
pub mod reconciler;

pub use candidate_selector::CandidateSelector;
pub use reconciler::Reconciler;
