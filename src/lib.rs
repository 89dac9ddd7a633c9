//! Computes the commission owed for each transaction of a batch of cash-ins
//! and cash-outs, from three externally supplied fee configurations.

pub mod commission;
pub mod config;
pub mod input;
pub mod output;
pub mod run;
