//! Powhash - uniform dispatch over proof-of-work hash algorithms
//!
//! One calling interface for the scrypt family, the Keccak sponge
//! constructions, the memory-hard routines and the chained X-series hashes
//! used by mining pools and pool-validation software.
//!
//! # Features
//!
//! - Immutable registry of 35 algorithm identifiers and their calling conventions
//! - Validation of every argument before any computation or allocation
//! - Zero-copy input views, one owned 32-byte output per call
//! - Configurable ceilings on working memory and input size
//! - Typed errors that name the failing argument and constraint
//!
//! # Example
//!
//! ```
//! use powhash::{Dispatcher, Registry, Value};
//!
//! fn main() -> Result<(), powhash::HashError> {
//!     let registry = Registry::new();
//!     let dispatcher = Dispatcher::new(&registry);
//!
//!     // Generic host boundary
//!     let digest = dispatcher.invoke("scryptn", &[Value::Bytes(b"header"), 9u32.into()])?;
//!     assert_eq!(digest.as_bytes().len(), 32);
//!
//!     // Named entry points go through the same validation
//!     assert_eq!(digest, dispatcher.scrypt(b"header", 1024, 1)?);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod marshal;
pub mod registry;
pub mod request;
mod validate;
pub mod value;

// Re-export main types
pub use config::DispatchConfig;
pub use dispatch::Dispatcher;
pub use error::{ArgumentRange, ErrorKind, HashError, Result};
pub use marshal::{HashResult, InputView};
pub use registry::{
    AlgorithmSpec, ArityKind, BufferSpec, CallingConvention, LengthRule, ParamKind, ParamSpec,
    ParamValue, Registry,
};
pub use request::{InvocationRequest, Request};
pub use value::{Value, ValueKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
