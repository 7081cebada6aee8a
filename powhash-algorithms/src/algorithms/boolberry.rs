/// Boolberry wild Keccak
///
/// Each pass XORs every state lane with a scratchpad word picked by the
/// lane's current value, then runs Keccak-f[1600]. The scratchpad is read
/// in place as little-endian 64-bit words; a short tail word is
/// zero-padded. The block height selects the variant.

use byteorder::{ByteOrder, LittleEndian};
use tracing::trace;

use crate::common::sponge::{self, KeccakState};
use crate::error::{AlgorithmError, Result};
use crate::Digest;

/// First height served by the second variant
pub const WILD_KECCAK2_HEIGHT: u64 = 10_000;

const PASSES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildKeccakVariant {
    /// One scratchpad mix per pass
    V1,
    /// Scratchpad mix on both sides of each permutation
    V2,
}

impl WildKeccakVariant {
    pub fn for_height(height: u64) -> Self {
        if height < WILD_KECCAK2_HEIGHT {
            WildKeccakVariant::V1
        } else {
            WildKeccakVariant::V2
        }
    }
}

/// Read-only view of a scratchpad as 64-bit words
struct Scratchpad<'a> {
    bytes: &'a [u8],
    words: u64,
}

impl<'a> Scratchpad<'a> {
    fn new(bytes: &'a [u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(AlgorithmError::EmptyScratchpad);
        }
        Ok(Self {
            bytes,
            words: bytes.len().div_ceil(8) as u64,
        })
    }

    fn word(&self, selector: u64) -> u64 {
        let start = (selector % self.words) as usize * 8;
        let end = (start + 8).min(self.bytes.len());
        let mut buf = [0u8; 8];
        buf[..end - start].copy_from_slice(&self.bytes[start..end]);
        LittleEndian::read_u64(&buf)
    }

    fn mix(&self, state: &mut KeccakState) {
        for lane in state.iter_mut() {
            *lane ^= self.word(*lane);
        }
    }
}

pub fn boolberry_hash(input: &[u8], scratchpad: &[u8], height: u64, output: &mut Digest) -> Result<()> {
    let pad = Scratchpad::new(scratchpad)?;
    let variant = WildKeccakVariant::for_height(height);
    trace!(height, ?variant, words = pad.words, "wild keccak");

    let mut state = sponge::absorb(input);
    for _ in 0..PASSES {
        pad.mix(&mut state);
        keccak::f1600(&mut state);
        if variant == WildKeccakVariant::V2 {
            pad.mix(&mut state);
        }
    }
    keccak::f1600(&mut state);

    LittleEndian::write_u64_into(&state[..4], output);
    Ok(())
}
