//! Library components of the xlsx2xml batch converter.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
