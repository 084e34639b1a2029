pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod intake;
pub mod logging;
pub mod matcher;
pub mod report;
pub mod rules;
pub mod scanner;
