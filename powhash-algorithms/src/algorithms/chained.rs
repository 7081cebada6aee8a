/// Chained hash constructions
///
/// Quark, the X-series, ZR5 and the other multi-round algorithms run a fixed
/// sequence of steps over an intermediate buffer. The digest is the leading
/// 32 bytes of the final buffer.

use byteorder::{ByteOrder, LittleEndian};

use crate::common::stage::Stage;
use crate::common::write_digest;
use crate::Digest;

/// One step of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Apply a stage unconditionally
    Hash(Stage),
    /// Quark-style branch on bit 3 of the first state byte
    Branch { set: Stage, clear: Stage },
    /// ZR5-style reorder: run all four stages in the permutation picked by
    /// the leading state word
    Permuted([Stage; 4]),
    /// XOR the upper half of the state onto the lower half
    Fold,
}

impl Step {
    fn apply(&self, data: &[u8]) -> Vec<u8> {
        match self {
            Step::Hash(stage) => stage.apply(data),
            Step::Branch { set, clear } => {
                if data.first().is_some_and(|b| b & 0x08 != 0) {
                    set.apply(data)
                } else {
                    clear.apply(data)
                }
            }
            Step::Permuted(stages) => {
                let selector = if data.len() >= 4 {
                    LittleEndian::read_u32(data) as usize
                } else {
                    0
                };
                let order = nth_permutation(selector % 24);
                let mut state = stages[order[0]].apply(data);
                for &idx in &order[1..] {
                    state = stages[idx].apply(&state);
                }
                state
            }
            Step::Fold => {
                let half = data.len() / 2;
                data[..half]
                    .iter()
                    .zip(&data[half..])
                    .map(|(lo, hi)| lo ^ hi)
                    .collect()
            }
        }
    }

    /// Whether every stage this step can run is exact
    pub fn is_exact(&self) -> bool {
        match self {
            Step::Hash(stage) => stage.is_exact(),
            Step::Branch { set, clear } => set.is_exact() && clear.is_exact(),
            Step::Permuted(stages) => stages.iter().all(Stage::is_exact),
            Step::Fold => true,
        }
    }
}

/// k-th permutation of four indices in lexicographic order (k < 24)
fn nth_permutation(mut k: usize) -> [usize; 4] {
    let mut pool = vec![0usize, 1, 2, 3];
    let mut order = [0usize; 4];
    for (slot, radix) in order.iter_mut().zip([6usize, 2, 1, 1]) {
        let pick = (k / radix).min(pool.len() - 1);
        k %= radix;
        *slot = pool.remove(pick);
    }
    order
}

/// Run `steps` over `input` and write the digest
pub fn run_chain(steps: &[Step], input: &[u8], output: &mut Digest) {
    let mut state: Option<Vec<u8>> = None;
    for step in steps {
        let data = state.as_deref().unwrap_or(input);
        state = Some(step.apply(data));
    }
    write_digest(state.as_deref().unwrap_or(input), output);
}

/// Whether a chain computes the real algorithm end to end
pub fn chain_is_exact(steps: &[Step]) -> bool {
    steps.iter().all(Step::is_exact)
}

use Stage::*;
use Step::{Branch, Fold, Hash, Permuted};

pub const QUARK: &[Step] = &[
    Hash(Blake512),
    Hash(Bmw512),
    Branch { set: Groestl512, clear: Skein512 },
    Hash(Groestl512),
    Hash(Jh512),
    Branch { set: Blake512, clear: Bmw512 },
    Hash(Keccak512),
    Hash(Skein512),
    Branch { set: Keccak512, clear: Jh512 },
];

pub const X11: &[Step] = &[
    Hash(Blake512),
    Hash(Bmw512),
    Hash(Groestl512),
    Hash(Skein512),
    Hash(Jh512),
    Hash(Keccak512),
    Hash(Luffa512),
    Hash(Cubehash512),
    Hash(Shavite512),
    Hash(Simd512),
    Hash(Echo512),
];

pub const X13: &[Step] = &[
    Hash(Blake512),
    Hash(Bmw512),
    Hash(Groestl512),
    Hash(Skein512),
    Hash(Jh512),
    Hash(Keccak512),
    Hash(Luffa512),
    Hash(Cubehash512),
    Hash(Shavite512),
    Hash(Simd512),
    Hash(Echo512),
    Hash(Hamsi512),
    Hash(Fugue512),
];

pub const X14: &[Step] = &[
    Hash(Blake512),
    Hash(Bmw512),
    Hash(Groestl512),
    Hash(Skein512),
    Hash(Jh512),
    Hash(Keccak512),
    Hash(Luffa512),
    Hash(Cubehash512),
    Hash(Shavite512),
    Hash(Simd512),
    Hash(Echo512),
    Hash(Hamsi512),
    Hash(Fugue512),
    Hash(Shabal512),
];

pub const X15: &[Step] = &[
    Hash(Blake512),
    Hash(Bmw512),
    Hash(Groestl512),
    Hash(Skein512),
    Hash(Jh512),
    Hash(Keccak512),
    Hash(Luffa512),
    Hash(Cubehash512),
    Hash(Shavite512),
    Hash(Simd512),
    Hash(Echo512),
    Hash(Hamsi512),
    Hash(Fugue512),
    Hash(Shabal512),
    Hash(Whirlpool512),
];

pub const X17: &[Step] = &[
    Hash(Blake512),
    Hash(Bmw512),
    Hash(Groestl512),
    Hash(Skein512),
    Hash(Jh512),
    Hash(Keccak512),
    Hash(Luffa512),
    Hash(Cubehash512),
    Hash(Shavite512),
    Hash(Simd512),
    Hash(Echo512),
    Hash(Hamsi512),
    Hash(Fugue512),
    Hash(Shabal512),
    Hash(Whirlpool512),
    Hash(Sha512),
    Hash(Haval256),
];

pub const C11: &[Step] = &[
    Hash(Blake512),
    Hash(Bmw512),
    Hash(Groestl512),
    Hash(Jh512),
    Hash(Keccak512),
    Hash(Skein512),
    Hash(Luffa512),
    Hash(Cubehash512),
    Hash(Shavite512),
    Hash(Simd512),
    Hash(Echo512),
];

pub const NIST5: &[Step] = &[
    Hash(Blake512),
    Hash(Groestl512),
    Hash(Jh512),
    Hash(Keccak512),
    Hash(Skein512),
];

pub const QUBIT: &[Step] = &[
    Hash(Luffa512),
    Hash(Cubehash512),
    Hash(Shavite512),
    Hash(Simd512),
    Hash(Echo512),
];

pub const FRESH: &[Step] = &[
    Hash(Shavite512),
    Hash(Simd512),
    Hash(Shavite512),
    Hash(Simd512),
    Hash(Echo512),
];

pub const S3: &[Step] = &[Hash(Shavite512), Hash(Simd512), Hash(Skein512)];

pub const ZR5: &[Step] = &[
    Hash(Keccak512),
    Permuted([Blake512, Groestl512, Jh512, Skein512]),
];

pub const KECCAK: &[Step] = &[Hash(Keccak256)];
pub const BLAKE: &[Step] = &[Hash(Blake256)];
pub const BLAKE2S: &[Step] = &[Hash(Blake2s256)];
pub const SKEIN: &[Step] = &[Hash(Skein512), Hash(Sha256)];
pub const GROESTL: &[Step] = &[Hash(Groestl512), Hash(Groestl512)];
pub const GROESTL_MYRIAD: &[Step] = &[Hash(Groestl512), Hash(Sha256)];
pub const JH: &[Step] = &[Hash(Jh256)];
pub const FUGUE: &[Step] = &[Hash(Fugue256)];
pub const SHAVITE3: &[Step] = &[Hash(Shavite512), Hash(Shavite512)];
pub const WHIRLPOOLX: &[Step] = &[Hash(Whirlpool512), Fold];
pub const SHA1: &[Step] = &[Hash(Sha1)];
pub const BCRYPT: &[Step] = &[Hash(Bcrypt)];
pub const DCRYPT: &[Step] = &[Hash(Dcrypt)];
pub const HEFTY1: &[Step] = &[Hash(Hefty1), Hash(Sha256)];

pub const LYRA2RE: &[Step] = &[
    Hash(Blake256),
    Hash(Keccak256),
    Hash(Lyra2 { time_cost: 1, rows: 8, cols: 8 }),
    Hash(Skein256),
    Hash(Groestl256),
];

pub const LYRA2REV2: &[Step] = &[
    Hash(Blake256),
    Hash(Keccak256),
    Hash(Cubehash256),
    Hash(Lyra2 { time_cost: 1, rows: 4, cols: 4 }),
    Hash(Skein256),
    Hash(Cubehash256),
    Hash(Bmw256),
];

macro_rules! chained_routines {
    ($($name:ident => $chain:ident;)*) => {
        $(
            pub fn $name(input: &[u8], output: &mut Digest) {
                run_chain($chain, input, output)
            }
        )*
    };
}

chained_routines! {
    quark_hash => QUARK;
    x11_hash => X11;
    x13_hash => X13;
    x14_hash => X14;
    x15_hash => X15;
    x17_hash => X17;
    c11_hash => C11;
    nist5_hash => NIST5;
    qubit_hash => QUBIT;
    fresh_hash => FRESH;
    s3_hash => S3;
    zr5_hash => ZR5;
    keccak_hash => KECCAK;
    blake_hash => BLAKE;
    blake2s_hash => BLAKE2S;
    skein_hash => SKEIN;
    groestl_hash => GROESTL;
    groestlmyriad_hash => GROESTL_MYRIAD;
    jh_hash => JH;
    fugue_hash => FUGUE;
    shavite3_hash => SHAVITE3;
    whirlpoolx_hash => WHIRLPOOLX;
    sha1_hash => SHA1;
    bcrypt_hash => BCRYPT;
    dcrypt_hash => DCRYPT;
    hefty1_hash => HEFTY1;
}

/// X5 is served by the X11 chain
pub fn x5_hash(input: &[u8], output: &mut Digest) {
    x11_hash(input, output)
}
