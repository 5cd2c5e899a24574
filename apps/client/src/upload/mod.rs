// Upload Controller: candidate files, the client-side validation gate, and
// the request lifecycle state machine.

pub mod candidate;
pub mod controller;
pub mod validation;

pub use candidate::CandidateFile;
pub use controller::{UploadController, UploadState};
pub use validation::ValidationPolicy;
