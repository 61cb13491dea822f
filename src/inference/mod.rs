//! Stub AI integration against a hosted inference endpoint.
//!
//! Three capabilities are consumed: free-form text continuation for the
//! chat assistant, zero-shot classification of CV text and sentiment
//! scoring. All of them share one retry policy and map failures to fixed
//! advisory strings instead of surfacing errors.

pub mod analysis;
pub mod client;
pub mod worker;

pub use analysis::{analyze, document_text, CvAnalysis};
pub use client::{
    advisory, retry_delay, Classification, InferenceClient, InferenceError, LabelScore,
    CANDIDATE_LABELS,
};
pub use worker::InferenceWorker;
