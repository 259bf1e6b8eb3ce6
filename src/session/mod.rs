//! Episode management.
//!
//! [`GameSession`] owns a board and drives it through `reset`/`step` the way
//! a gym environment does. The returned [`Observation`] values are copies, so
//! a training loop can buffer them freely.
//!
//! ## Lifecycle
//!
//! ```text
//! reset() ──> InProgress ──step()──> InProgress ...
//!                  │
//!                  └──step()──> Terminated (rules, illegal action, turn limit)
//! ```

pub mod env;
pub mod observation;

pub use env::{GameSession, SessionState};
pub use observation::{Observation, StepInfo, StepResult};
