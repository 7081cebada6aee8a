use std::fmt;

use powhash_algorithms::AlgorithmError;
use serde::Serialize;
use thiserror::Error;

use crate::registry::{CallingConvention, LengthRule};
use crate::value::ValueKind;

/// Inclusive range of accepted argument counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArgumentRange {
    pub min: usize,
    pub max: usize,
}

impl fmt::Display for ArgumentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{} to {}", self.min, self.max)
        }
    }
}

/// Dispatch error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HashError {
    #[error("{algorithm}: expected {expected} arguments, got {actual}")]
    ArgumentCount {
        algorithm: &'static str,
        expected: ArgumentRange,
        actual: usize,
    },

    #[error("{algorithm}: argument {index} ({name}) should be {expected}, got {actual}")]
    TypeMismatch {
        algorithm: &'static str,
        index: usize,
        name: &'static str,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("{algorithm}: argument {index} ({name}) must be a separate buffer from argument 0")]
    AliasedBuffer {
        algorithm: &'static str,
        index: usize,
        name: &'static str,
    },

    #[error("{algorithm}: argument {index} ({name}) must be {requirement}, got {actual} bytes")]
    LengthConstraint {
        algorithm: &'static str,
        index: usize,
        name: &'static str,
        requirement: LengthRule,
        actual: usize,
    },

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("{algorithm}: argument {index} ({name}) = {value} is out of range: {reason}")]
    ParameterOutOfRange {
        algorithm: &'static str,
        index: usize,
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{algorithm}: parameters need {required} bytes of working memory, limit is {limit}")]
    CostLimitExceeded {
        algorithm: &'static str,
        required: u64,
        limit: u64,
    },

    #[error("{algorithm}: request does not fit the {convention:?} calling convention")]
    RequestMismatch {
        algorithm: &'static str,
        convention: CallingConvention,
    },

    #[error("{algorithm}: {source}")]
    Library {
        algorithm: &'static str,
        #[source]
        source: AlgorithmError,
    },
}

/// Fieldless error category, for hosts mapping errors onto their own types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ArgumentCount,
    TypeMismatch,
    LengthConstraint,
    UnknownAlgorithm,
    ParameterOutOfRange,
    CostLimitExceeded,
    Library,
}

impl HashError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HashError::ArgumentCount { .. } => ErrorKind::ArgumentCount,
            HashError::TypeMismatch { .. }
            | HashError::AliasedBuffer { .. }
            | HashError::RequestMismatch { .. } => ErrorKind::TypeMismatch,
            HashError::LengthConstraint { .. } => ErrorKind::LengthConstraint,
            HashError::UnknownAlgorithm(_) => ErrorKind::UnknownAlgorithm,
            HashError::ParameterOutOfRange { .. } => ErrorKind::ParameterOutOfRange,
            HashError::CostLimitExceeded { .. } => ErrorKind::CostLimitExceeded,
            HashError::Library { .. } => ErrorKind::Library,
        }
    }

    /// Algorithm the failed call named
    pub fn algorithm(&self) -> &str {
        match self {
            HashError::UnknownAlgorithm(id) => id.as_str(),
            HashError::ArgumentCount { algorithm, .. }
            | HashError::TypeMismatch { algorithm, .. }
            | HashError::AliasedBuffer { algorithm, .. }
            | HashError::LengthConstraint { algorithm, .. }
            | HashError::ParameterOutOfRange { algorithm, .. }
            | HashError::CostLimitExceeded { algorithm, .. }
            | HashError::RequestMismatch { algorithm, .. }
            | HashError::Library { algorithm, .. } => *algorithm,
        }
    }

    /// Zero-based index of the offending argument, when there is one
    pub fn argument_index(&self) -> Option<usize> {
        match self {
            HashError::TypeMismatch { index, .. }
            | HashError::AliasedBuffer { index, .. }
            | HashError::LengthConstraint { index, .. }
            | HashError::ParameterOutOfRange { index, .. } => Some(*index),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HashError>;
