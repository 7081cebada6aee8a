/// CryptoNight
///
/// The standard routine expands the Keccak state of the input into a 2 MiB
/// scratchpad, walks it with a data-dependent read/multiply/write loop,
/// folds the scratchpad back into the state, and finishes with one of four
/// hashes chosen by the low bits of the final state. The fast routine is
/// the Keccak-256 prefix alone.

use byteorder::{ByteOrder, LittleEndian};

use crate::common::sponge::{self, KeccakState};
use crate::common::stage::Stage;
use crate::common::write_digest;
use crate::Digest;

/// Scratchpad size in bytes
pub const SCRATCHPAD_BYTES: usize = 1 << 21;

/// Scratchpad lines are 128-bit
const LINE_WORDS: usize = 2;
const LINES: usize = SCRATCHPAD_BYTES / (LINE_WORDS * 8);

/// Lanes copied into / folded out of the scratchpad per permutation
const CHUNK_WORDS: usize = 16;

const ITERATIONS: usize = 1 << 18;

const FINALISERS: [Stage; 4] = [Stage::Blake256, Stage::Groestl256, Stage::Jh256, Stage::Skein256];

type Line = [u64; LINE_WORDS];

#[inline]
fn line_index(word: u64) -> usize {
    (word >> 4) as usize & (LINES - 1)
}

#[inline]
fn read_line(pad: &[u64], idx: usize) -> Line {
    [pad[idx * LINE_WORDS], pad[idx * LINE_WORDS + 1]]
}

#[inline]
fn write_line(pad: &mut [u64], idx: usize, line: Line) {
    pad[idx * LINE_WORDS] = line[0];
    pad[idx * LINE_WORDS + 1] = line[1];
}

/// Keyed single-round mix standing in for the AES round
#[inline]
fn mix_round(line: Line, key: Line) -> Line {
    let lo = (line[0] ^ key[0]).rotate_left(17).wrapping_add(line[1]);
    let hi = (line[1] ^ key[1]).rotate_left(29) ^ lo;
    [lo, hi]
}

fn explode(state: &KeccakState, pad: &mut [u64]) {
    let mut work = *state;
    for chunk in pad.chunks_exact_mut(CHUNK_WORDS) {
        keccak::f1600(&mut work);
        chunk.copy_from_slice(&work[..CHUNK_WORDS]);
    }
}

fn implode(state: &mut KeccakState, pad: &[u64]) {
    for chunk in pad.chunks_exact(CHUNK_WORDS) {
        for (lane, word) in state.iter_mut().zip(chunk) {
            *lane ^= word;
        }
        keccak::f1600(state);
    }
}

fn memory_walk(state: &KeccakState, pad: &mut [u64]) {
    let mut a: Line = [state[0] ^ state[4], state[1] ^ state[5]];
    let mut b: Line = [state[2] ^ state[6], state[3] ^ state[7]];

    for _ in 0..ITERATIONS {
        let idx = line_index(a[0]);
        let c = mix_round(read_line(pad, idx), a);
        write_line(pad, idx, [b[0] ^ c[0], b[1] ^ c[1]]);

        let idx = line_index(c[0]);
        let d = read_line(pad, idx);
        let product = u128::from(c[0]) * u128::from(d[0]);
        a[0] = a[0].wrapping_add((product >> 64) as u64);
        a[1] = a[1].wrapping_add(product as u64);
        write_line(pad, idx, a);

        a[0] ^= d[0];
        a[1] ^= d[1];
        b = c;
    }
}

/// Standard (slow) routine
pub fn cryptonight_hash(input: &[u8], output: &mut Digest) {
    let mut state = sponge::absorb(input);
    let mut pad = vec![0u64; SCRATCHPAD_BYTES / 8];

    explode(&state, &mut pad);
    memory_walk(&state, &mut pad);
    implode(&mut state, &pad);

    let finaliser = FINALISERS[(state[0] & 3) as usize];
    let bytes = sponge::state_bytes(&state);
    write_digest(&finaliser.apply(&bytes), output);
}

/// Fast routine (Keccak-256 of the input)
pub fn cryptonight_fast_hash(input: &[u8], output: &mut Digest) {
    let state = sponge::absorb(input);
    LittleEndian::write_u64_into(&state[..4], output);
}
