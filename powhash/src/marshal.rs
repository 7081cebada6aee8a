/// Buffer marshaling
///
/// Inputs are seen through `InputView`, a borrowed read-only window that is
/// never copied or retained past the call. Each successful call allocates
/// exactly one `OutputBuffer`, which the library fills and which then moves
/// to the caller as a `HashResult`.

use std::fmt;

use powhash_algorithms::{Digest, DIGEST_LEN};
use serde::{Deserialize, Serialize};

/// Borrowed view over a caller-owned buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputView<'a>(&'a [u8]);

impl<'a> InputView<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the two views share any byte of memory
    pub fn overlaps(&self, other: &InputView<'_>) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let a = self.0.as_ptr_range();
        let b = other.0.as_ptr_range();
        a.start < b.end && b.start < a.end
    }
}

/// Fresh output region for one call
pub(crate) struct OutputBuffer(Box<Digest>);

impl OutputBuffer {
    pub(crate) fn new() -> Self {
        Self(Box::new([0u8; DIGEST_LEN]))
    }

    pub(crate) fn digest_mut(&mut self) -> &mut Digest {
        &mut self.0
    }

    pub(crate) fn into_result(self) -> HashResult {
        HashResult(self.0)
    }
}

/// Owned 32-byte digest returned by every successful call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashResult(Box<Digest>);

impl HashResult {
    pub fn from_bytes(bytes: Digest) -> Self {
        Self(Box::new(bytes))
    }

    /// Create from slice (must be 32 bytes)
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: Digest = slice.try_into().ok()?;
        Some(Self::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &Digest {
        &self.0
    }

    pub fn into_bytes(self) -> Box<Digest> {
        self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn len(&self) -> usize {
        DIGEST_LEN
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(*self.0)
    }

    /// Parse from hex string
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(hex)?;
        Self::from_slice(&bytes).ok_or(hex::FromHexError::InvalidStringLength)
    }
}

impl AsRef<[u8]> for HashResult {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl fmt::Display for HashResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
