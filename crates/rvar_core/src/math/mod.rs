//! Mathematical utilities for log-space probability arithmetic.
//!
//! This module provides:
//! - Log-Gamma via the Lanczos approximation (`special`)
//! - Stable pairwise log-sum-exp (`special`)

pub mod special;

pub use special::{ln_gamma, log_sum_exp};
