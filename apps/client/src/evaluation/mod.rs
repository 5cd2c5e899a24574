// Evaluation service boundary: wire model + HTTP transport.
// Nothing outside this module builds requests or parses service JSON.

pub mod client;
pub mod model;

pub use client::{EvaluationTransport, HttpEvaluationClient};
pub use model::{Evaluation, SuggestedImprovement};
