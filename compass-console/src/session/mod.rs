//! Analysis-session state owners
//!
//! Three sibling components each own their slice of session state and
//! mutate it only through their defined operations:
//! - [`SessionController`]: the upload/analyze/result state machine
//! - [`RubricSynchronizer`]: the working rubric list and its commit protocol
//! - [`ModelSelector`]: the active model identifier
//!
//! The presentation layer gets read-only views; all remote effects go
//! through the service traits.

pub mod controller;
pub mod model_select;
pub mod rubric;

pub use controller::{SessionController, SessionPhase, SessionProvenance, SubmitRejection};
pub use model_select::ModelSelector;
pub use rubric::RubricSynchronizer;
