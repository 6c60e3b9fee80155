//! Constant folding and strength reduction.

pub mod optimizer;
