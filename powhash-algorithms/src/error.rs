use thiserror::Error;

/// Errors raised by the hash routines themselves
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmError {
    #[error("invalid scrypt parameters N={n}, R={r}: {reason}")]
    InvalidScryptParams {
        n: u64,
        r: u32,
        reason: &'static str,
    },

    #[error("invalid neoscrypt profile {profile:#x}: {reason}")]
    InvalidNeoscryptProfile { profile: u32, reason: &'static str },

    #[error("scratchpad must not be empty")]
    EmptyScratchpad,
}

pub type Result<T> = std::result::Result<T, AlgorithmError>;
