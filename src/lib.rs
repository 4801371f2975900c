// Problem Validator: Reddit-backed validation of product problem statements
//
// This is the library root. Each module corresponds to a stage of the
// validation pipeline: collect records from Reddit, analyze them, and
// report a score.

pub mod analysis;
pub mod collector;
pub mod config;
pub mod error;
pub mod output;
pub mod reddit;

#[cfg(feature = "web")]
pub mod web;
