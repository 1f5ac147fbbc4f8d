//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// A required configuration value is absent from the environment
    ConfigurationMissing(String),
    /// A configuration value is present but unusable
    ConfigurationInvalid(String),
    /// Error when creating the account-bound RPC client
    ClientInitialization(String),
    /// Error reading or parsing a compiled contract artifact
    ArtifactLoading(String),
    /// Error declaring a contract class
    Declaration(String),
    /// Error deploying a contract instance
    Deployment(String),
    /// Deploy attempted for a class with no recorded declaration
    UndeclaredClass(String),
    /// Error reading or writing a record file
    Registry(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ConfigurationMissing(s) => {
                write!(f, "missing configuration value: {}", s)
            }
            ScriptError::ConfigurationInvalid(s) => {
                write!(f, "invalid configuration value: {}", s)
            }
            ScriptError::ClientInitialization(s) => write!(f, "error during client init: {}", s),
            ScriptError::ArtifactLoading(s) => {
                write!(f, "error loading compiled artifact: {}", s)
            }
            ScriptError::Declaration(s) => write!(f, "error declaring class: {}", s),
            ScriptError::Deployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::UndeclaredClass(s) => {
                write!(f, "no declared class recorded for contract: {}", s)
            }
            ScriptError::Registry(s) => write!(f, "error accessing record file: {}", s),
        }
    }
}

impl Error for ScriptError {}
