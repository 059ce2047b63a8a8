//! Scripts for deploying the AlgorithmicMusicCollab contract.

#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod logger;

/// Our build output utils
pub mod build;

/// Our deploy utils
pub mod deploy;

/// Our output utils
pub mod output_writer;

pub mod tx;
