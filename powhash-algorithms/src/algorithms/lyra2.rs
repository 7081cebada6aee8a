/// Lyra2 matrix sponge and the Lyra2RE chains built on it
///
/// The matrix is filled from a Keccak-f[1600] sponge, then revisited
/// `time_cost` times with each row mixed against its predecessor and a
/// state-selected row before the final squeeze.

use byteorder::{ByteOrder, LittleEndian};

use super::chained::{run_chain, LYRA2RE, LYRA2REV2};
use crate::common::sponge::{self, KeccakState};
use crate::error::Result;
use crate::{Digest, DIGEST_LEN};

/// Words per matrix cell
const BLOCK_WORDS: usize = 12;

type Block = [u64; BLOCK_WORDS];

fn mix_into_state(state: &mut KeccakState, block: &Block) {
    for (lane, word) in state.iter_mut().zip(block) {
        *lane ^= word;
    }
    keccak::f1600(state);
}

/// Run the matrix sponge over `input`
pub fn lyra2(input: &[u8], time_cost: u32, rows: u32, cols: u32) -> Digest {
    let rows = rows.max(2) as usize;
    let cols = cols.max(1) as usize;

    let mut state = sponge::absorb(input);
    let mut matrix: Vec<Block> = vec![[0u64; BLOCK_WORDS]; rows * cols];

    // Setup
    for cell in matrix.iter_mut() {
        keccak::f1600(&mut state);
        cell.copy_from_slice(&state[..BLOCK_WORDS]);
    }

    // Wandering
    for _ in 0..time_cost {
        for row in 0..rows {
            let prev = (row + rows - 1) % rows;
            let random = (state[0] % rows as u64) as usize;
            for col in 0..cols {
                let lhs = &matrix[prev * cols + col];
                let rhs = &matrix[random * cols + col];
                let mut block = [0u64; BLOCK_WORDS];
                for (w, slot) in block.iter_mut().enumerate() {
                    *slot = lhs[w].wrapping_add(rhs[w]);
                }

                mix_into_state(&mut state, &block);

                let target = &mut matrix[row * cols + col];
                for (word, lane) in target.iter_mut().zip(state.iter()) {
                    *word ^= lane;
                }
            }
        }
    }

    // Wrap-up
    let last_row = (state[0] % rows as u64) as usize;
    let last = matrix[last_row * cols];
    mix_into_state(&mut state, &last);

    let mut out = [0u8; DIGEST_LEN];
    LittleEndian::write_u64_into(&state[..DIGEST_LEN / 8], &mut out);
    out
}

/// Lyra2RE (blake, keccak, lyra2, skein, groestl)
pub fn lyra2re_hash(input: &[u8], output: &mut Digest) -> Result<()> {
    run_chain(LYRA2RE, input, output);
    Ok(())
}

/// Lyra2REv2 (blake, keccak, cubehash, lyra2, skein, cubehash, bmw)
pub fn lyra2re2_hash(input: &[u8], output: &mut Digest) -> Result<()> {
    run_chain(LYRA2REV2, input, output);
    Ok(())
}
