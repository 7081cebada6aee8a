/// NeoScrypt over an 80-byte block header
///
/// Profile word layout:
///
/// | bits | meaning                                         |
/// |------|-------------------------------------------------|
/// | 0    | 1 = legacy scrypt mode, 0 = neoscrypt mode      |
/// | 1-5  | log2(N), 0 selects the mode default             |
/// | 6-8  | log2(R)                                         |
/// | 9+   | reserved, must be zero                          |
///
/// Legacy scrypt mode defaults to N = 1024, R = 1 and matches plain scrypt
/// over the header. Neoscrypt mode defaults to N = 128, R = 2 and salts the
/// derivation with the BLAKE2s digest of the header.

use blake2::{Blake2s256, Digest as _};
use tracing::debug;

use super::scrypt::{derive, ScryptCost};
use crate::error::{AlgorithmError, Result};
use crate::Digest;

/// Required header length
pub const NEOSCRYPT_INPUT_LEN: usize = 80;

const MODE_BIT: u32 = 0x1;
const LOG_N_SHIFT: u32 = 1;
const LOG_N_MASK: u32 = 0x1f;
const LOG_R_SHIFT: u32 = 6;
const LOG_R_MASK: u32 = 0x7;
const RESERVED_SHIFT: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeoscryptMode {
    Neoscrypt,
    Scrypt,
}

impl NeoscryptMode {
    fn default_log_n(&self) -> u8 {
        match self {
            NeoscryptMode::Neoscrypt => 7,
            NeoscryptMode::Scrypt => 10,
        }
    }

    fn default_r(&self) -> u32 {
        match self {
            NeoscryptMode::Neoscrypt => 2,
            NeoscryptMode::Scrypt => 1,
        }
    }
}

/// Decoded profile word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeoscryptProfile {
    pub mode: NeoscryptMode,
    pub cost: ScryptCost,
}

impl NeoscryptProfile {
    pub fn decode(profile: u32) -> Result<Self> {
        if profile >> RESERVED_SHIFT != 0 {
            return Err(AlgorithmError::InvalidNeoscryptProfile {
                profile,
                reason: "reserved bits are set",
            });
        }

        let mode = if profile & MODE_BIT != 0 {
            NeoscryptMode::Scrypt
        } else {
            NeoscryptMode::Neoscrypt
        };

        let log_n = match ((profile >> LOG_N_SHIFT) & LOG_N_MASK) as u8 {
            0 => mode.default_log_n(),
            explicit => explicit,
        };
        let r = match (profile >> LOG_R_SHIFT) & LOG_R_MASK {
            0 => mode.default_r(),
            log_r => 1u32 << log_r,
        };

        let cost = ScryptCost::from_log_n(log_n, r).map_err(|_| {
            AlgorithmError::InvalidNeoscryptProfile {
                profile,
                reason: "decoded cost is not a valid scrypt cost",
            }
        })?;

        Ok(Self { mode, cost })
    }

    /// Scratch memory the profile demands
    pub fn memory_bytes(&self) -> u64 {
        self.cost.memory_bytes()
    }
}

pub fn neoscrypt_hash(
    input: &[u8; NEOSCRYPT_INPUT_LEN],
    profile: u32,
    output: &mut Digest,
) -> Result<()> {
    let decoded = NeoscryptProfile::decode(profile)?;
    debug!(
        profile,
        mode = ?decoded.mode,
        n = decoded.cost.n(),
        r = decoded.cost.r(),
        "neoscrypt profile decoded"
    );

    match decoded.mode {
        NeoscryptMode::Scrypt => derive(input, input, &decoded.cost, output),
        NeoscryptMode::Neoscrypt => {
            let salt = Blake2s256::digest(input);
            derive(input, &salt, &decoded.cost, output)
        }
    }
}
