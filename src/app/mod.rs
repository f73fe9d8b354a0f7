//! Application module
//!
//! Command-line parsing, scenario files and the startup sequence that
//! turns a scenario into running workers.

pub mod cli;
pub mod scenario;
pub mod startup;
