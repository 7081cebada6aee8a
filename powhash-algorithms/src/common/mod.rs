/// Shared building blocks for the hash routines

pub mod sponge;
pub mod stage;

use crate::{Digest, DIGEST_LEN};

/// Write the leading bytes of `state` into `out`, zero-filling when the
/// state is shorter than a digest.
pub fn write_digest(state: &[u8], out: &mut Digest) {
    let len = state.len().min(DIGEST_LEN);
    out[..len].copy_from_slice(&state[..len]);
    out[len..].fill(0);
}
