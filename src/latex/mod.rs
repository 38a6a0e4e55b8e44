//! LaTeX line heuristics
//!
//! - `environment`: tracks `\begin`/`\end` nesting to decide whether a line
//!   may be indexed at all
//! - `validate`: rejects matches that belong to markup rather than prose

mod environment;
pub mod validate;

pub use environment::EnvironmentTracker;
pub use validate::{check_match, InvalidReason, Verdict};
