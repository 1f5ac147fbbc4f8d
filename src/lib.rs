//! Scripts for declaring and deploying the resolver delegation Starknet contracts.

#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;

/// Per-network declaration & deployment records
pub mod registry;

pub mod tx;
