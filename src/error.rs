//! Error types for building and evaluating a Tsukamoto system.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FisError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FisError {
    #[error("Invalid variable '{name}': {reason}")]
    InvalidVariable { name: String, reason: String },
    #[error("Variable '{name}' is already declared")]
    DuplicateVariable { name: String },
    #[error("No output variable has been declared")]
    MissingOutput,
    #[error("Variable '{name}' is not declared")]
    UnknownVariable { name: String },
    #[error("Variable '{variable}' has no domain named '{domain}'")]
    UnknownDomain { variable: String, domain: String },
    #[error("Invalid rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },
    #[error("Cannot parse rule '{line}': {reason}")]
    RuleSyntax { line: String, reason: String },
    #[error("No observation given for input variable '{variable}'")]
    MissingObservation { variable: String },
    #[error("Observation {value} for '{variable}' is not a finite number")]
    NonFiniteObservation { variable: String, value: f64 },
    #[error("Rule table has {entries} entries for combination [{combination}], expected exactly 1")]
    RuleTableIncomplete { combination: String, entries: usize },
    #[error("No rule matches combination [{combination}]")]
    RuleLookup { combination: String },
    #[error("The domains of {inputs} input variables have too many combinations to enumerate")]
    TooManyCombinations { inputs: usize },
    #[error("Rule table was built for a different set of variables")]
    MismatchedRuleTable,
    #[error("Every rule has a firing strength of zero")]
    DegenerateInference,
}
