/// Scrypt-family routines
///
/// PBKDF2-HMAC-SHA256 around a single ROMix lane (p = 1) with a 32-byte
/// output. The block header doubles as password and salt, which is how
/// scrypt coins hash their headers. Any power-of-two N is accepted for any
/// R; the caller bounds the working memory.

use byteorder::{ByteOrder, LittleEndian};
use pbkdf2::pbkdf2_hmac;
use salsa20::cipher::typenum::U4;
use salsa20::cipher::StreamCipherCore;
use salsa20::SalsaCore;
use sha2::{Digest as _, Sha256};
use tracing::trace;

use crate::error::{AlgorithmError, Result};
use crate::Digest;

type Salsa20_8 = SalsaCore<U4>;

/// Salsa20/8 block
const SALSA_BLOCK: usize = 64;

/// Yescrypt work factor
const YESCRYPT_LOG_N: u8 = 11;
/// Yescrypt block size
const YESCRYPT_R: u32 = 8;

/// Validated scrypt cost (N = 2^log_n, block size R, parallelism 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptCost {
    log_n: u8,
    r: u32,
}

impl ScryptCost {
    /// Validate a raw (N, R) pair
    ///
    /// N must be a power of two and R at least 1.
    pub fn new(n: u64, r: u32) -> Result<Self> {
        let invalid = |reason| AlgorithmError::InvalidScryptParams { n, r, reason };

        if r == 0 {
            return Err(invalid("R must be at least 1"));
        }
        if r >= 0x4000_0000 {
            return Err(invalid("R is too large"));
        }
        if n == 0 || !n.is_power_of_two() {
            return Err(invalid("N must be a power of two"));
        }

        Ok(Self {
            log_n: n.trailing_zeros() as u8,
            r,
        })
    }

    /// Cost from a base-2 exponent
    pub fn from_log_n(log_n: u8, r: u32) -> Result<Self> {
        let n = 1u64
            .checked_shl(u32::from(log_n))
            .ok_or(AlgorithmError::InvalidScryptParams {
                n: u64::MAX,
                r,
                reason: "N overflows",
            })?;
        Self::new(n, r)
    }

    pub fn log_n(&self) -> u8 {
        self.log_n
    }

    pub fn n(&self) -> u64 {
        1u64 << self.log_n
    }

    pub fn r(&self) -> u32 {
        self.r
    }

    /// Bytes of scratch memory the derivation allocates (128 * R * N)
    pub fn memory_bytes(&self) -> u64 {
        128u64
            .saturating_mul(u64::from(self.r))
            .saturating_mul(self.n())
    }

    /// (block length, N) as host sizes
    fn layout(&self) -> Result<(usize, usize)> {
        let too_large = AlgorithmError::InvalidScryptParams {
            n: self.n(),
            r: self.r,
            reason: "working memory does not fit the address space",
        };
        let block_len = usize::try_from(128 * u64::from(self.r)).map_err(|_| too_large.clone())?;
        let n = usize::try_from(self.n()).map_err(|_| too_large.clone())?;
        block_len.checked_mul(n).ok_or(too_large)?;
        Ok((block_len, n))
    }
}

/// BlockMix over Salsa20/8: even outputs to the first half, odd to the second
fn block_mix(input: &[u8], output: &mut [u8]) {
    let half = input.len() / 2;
    let mut x = [0u8; SALSA_BLOCK];
    x.copy_from_slice(&input[input.len() - SALSA_BLOCK..]);

    let mut words = [0u32; 16];
    for (i, chunk) in input.chunks_exact(SALSA_BLOCK).enumerate() {
        for (xb, cb) in x.iter_mut().zip(chunk) {
            *xb ^= cb;
        }
        LittleEndian::read_u32_into(&x, &mut words);
        Salsa20_8::from_raw_state(words).write_keystream_block((&mut x).into());

        let pos = (i / 2) * SALSA_BLOCK + if i % 2 == 0 { 0 } else { half };
        output[pos..pos + SALSA_BLOCK].copy_from_slice(&x);
    }
}

/// ROMix in place on `b`, with `v` holding N blocks and `t` one block
fn ro_mix(b: &mut [u8], v: &mut [u8], t: &mut [u8], n: usize) {
    let len = b.len();
    for chunk in v.chunks_exact_mut(len) {
        chunk.copy_from_slice(b);
        block_mix(chunk, b);
    }

    let mask = n - 1;
    for _ in 0..n {
        let j = LittleEndian::read_u32(&b[len - SALSA_BLOCK..]) as usize & mask;
        for ((tb, bb), vb) in t.iter_mut().zip(b.iter()).zip(&v[j * len..(j + 1) * len]) {
            *tb = bb ^ vb;
        }
        block_mix(t, b);
    }
}

/// Run the key derivation into a digest
pub(crate) fn derive(password: &[u8], salt: &[u8], cost: &ScryptCost, out: &mut Digest) -> Result<()> {
    let (block_len, n) = cost.layout()?;
    trace!(n = cost.n(), r = cost.r(), "scrypt derive");

    let mut b = vec![0u8; block_len];
    pbkdf2_hmac::<Sha256>(password, salt, 1, &mut b);

    let mut v = vec![0u8; block_len * n];
    let mut t = vec![0u8; block_len];
    ro_mix(&mut b, &mut v, &mut t, n);

    pbkdf2_hmac::<Sha256>(password, &b, 1, out);
    Ok(())
}

/// Scrypt with explicit N and R
pub fn scrypt_hash(input: &[u8], n: u64, r: u32, output: &mut Digest) -> Result<()> {
    let cost = ScryptCost::new(n, r)?;
    derive(input, input, &cost, output)
}

/// Yescrypt at its fixed cost (N = 2048, R = 8)
///
/// The salt is SHA-256 over a personalisation prefix and the input.
pub fn yescrypt_hash(input: &[u8], output: &mut Digest) -> Result<()> {
    let cost = ScryptCost::from_log_n(YESCRYPT_LOG_N, YESCRYPT_R)?;
    let salt = Sha256::new()
        .chain_update(b"yescrypt")
        .chain_update(input)
        .finalize();
    derive(input, &salt, &cost, output)
}
