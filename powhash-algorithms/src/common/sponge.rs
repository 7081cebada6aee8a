/// Keccak-f[1600] sponge helpers for the memory-hard routines
///
/// Absorption uses the original Keccak padding (0x01 .. 0x80) at the
/// 256-bit capacity rate, so the first 32 bytes of an absorbed state are the
/// Keccak-256 digest of the input.

use byteorder::{ByteOrder, LittleEndian};

/// Rate in bytes (1600 - 2 * 256 bits)
pub const KECCAK_RATE: usize = 136;

/// Number of 64-bit lanes in the permutation state
pub const KECCAK_LANES: usize = 25;

/// Size of the full state in bytes
pub const KECCAK_STATE_BYTES: usize = KECCAK_LANES * 8;

/// Keccak-f[1600] state (25 x 64-bit lanes)
pub type KeccakState = [u64; KECCAK_LANES];

/// XOR a rate-sized block into the leading lanes of the state
fn xor_block(state: &mut KeccakState, block: &[u8]) {
    for (lane, word) in state.iter_mut().zip(block.chunks_exact(8)) {
        *lane ^= LittleEndian::read_u64(word);
    }
}

/// Absorb arbitrary-length data into a fresh state
pub fn absorb(data: &[u8]) -> KeccakState {
    let mut state = [0u64; KECCAK_LANES];

    let mut chunks = data.chunks_exact(KECCAK_RATE);
    for chunk in &mut chunks {
        xor_block(&mut state, chunk);
        keccak::f1600(&mut state);
    }

    let remainder = chunks.remainder();
    let mut last = [0u8; KECCAK_RATE];
    last[..remainder.len()].copy_from_slice(remainder);
    last[remainder.len()] ^= 0x01;
    last[KECCAK_RATE - 1] ^= 0x80;
    xor_block(&mut state, &last);
    keccak::f1600(&mut state);

    state
}

/// Serialize the state lanes little-endian
pub fn state_bytes(state: &KeccakState) -> [u8; KECCAK_STATE_BYTES] {
    let mut bytes = [0u8; KECCAK_STATE_BYTES];
    LittleEndian::write_u64_into(state, &mut bytes);
    bytes
}
