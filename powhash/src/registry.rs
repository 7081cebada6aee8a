/// Algorithm registry
///
/// An immutable table from algorithm identifier to its calling-convention
/// descriptor and library routine. The table is a fixed static enumeration;
/// `Registry::new` only indexes it.

use std::collections::BTreeMap;
use std::fmt;

use powhash_algorithms::algorithms::{self, NEOSCRYPT_INPUT_LEN};
use powhash_algorithms::{Digest, DIGEST_LEN};
use serde::Serialize;

use crate::error::{ArgumentRange, HashError, Result};

/// Native call shape of an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallingConvention {
    /// One variable-length buffer
    Digest,
    /// One buffer, cost constants fixed inside the routine
    FixedCostDigest,
    /// Buffer plus explicit N and R
    ScryptNR,
    /// Buffer plus an N exponent, N = 2^(nFactor + 1), R = 1
    ScryptNFactor,
    /// Exactly 80 bytes plus a profile word
    Neoscrypt,
    /// Buffer plus optional fast flag
    Cryptonight,
    /// Buffer, scratchpad and optional height
    Boolberry,
}

/// Input-arity kind of a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArityKind {
    SingleBuffer,
    FixedLengthBuffer,
    BufferWithParams,
    BufferWithFlag,
    TwoBuffersWithParam,
}

/// Length requirement on a buffer argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthRule {
    Any,
    NonEmpty,
    Exactly(usize),
    AtMost(usize),
}

impl LengthRule {
    pub fn accepts(&self, len: usize) -> bool {
        match *self {
            LengthRule::Any => true,
            LengthRule::NonEmpty => len > 0,
            LengthRule::Exactly(required) => len == required,
            LengthRule::AtMost(limit) => len <= limit,
        }
    }
}

impl fmt::Display for LengthRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthRule::Any => f.write_str("any length"),
            LengthRule::NonEmpty => f.write_str("non-empty"),
            LengthRule::Exactly(n) => write!(f, "exactly {} bytes", n),
            LengthRule::AtMost(n) => write!(f, "at most {} bytes", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BufferSpec {
    pub name: &'static str,
    pub length: LengthRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Non-negative integer within inclusive bounds
    Integer { min: u64, max: u64 },
    /// Boolean flag
    Flag,
}

/// A resolved parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(u64),
    Flag(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    /// `None` for a required parameter
    pub default: Option<ParamValue>,
}

impl ParamSpec {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Library routine behind an identifier, one variant per native shape
#[derive(Clone, Copy)]
pub(crate) enum Routine {
    Digest(fn(&[u8], &mut Digest)),
    FixedCost(fn(&[u8], &mut Digest) -> powhash_algorithms::Result<()>),
    Scrypt(fn(&[u8], u64, u32, &mut Digest) -> powhash_algorithms::Result<()>),
    Neoscrypt(fn(&[u8; NEOSCRYPT_INPUT_LEN], u32, &mut Digest) -> powhash_algorithms::Result<()>),
    Cryptonight {
        standard: fn(&[u8], &mut Digest),
        fast: fn(&[u8], &mut Digest),
    },
    Boolberry(fn(&[u8], &[u8], u64, &mut Digest) -> powhash_algorithms::Result<()>),
}

impl fmt::Debug for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match self {
            Routine::Digest(_) => "Digest",
            Routine::FixedCost(_) => "FixedCost",
            Routine::Scrypt(_) => "Scrypt",
            Routine::Neoscrypt(_) => "Neoscrypt",
            Routine::Cryptonight { .. } => "Cryptonight",
            Routine::Boolberry(_) => "Boolberry",
        };
        f.write_str(shape)
    }
}

/// Calling-convention descriptor of one algorithm
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmSpec {
    pub id: &'static str,
    pub convention: CallingConvention,
    pub buffers: &'static [BufferSpec],
    pub params: &'static [ParamSpec],
    pub output_len: usize,
    #[serde(skip)]
    pub(crate) routine: Routine,
}

impl AlgorithmSpec {
    pub fn arity(&self) -> ArityKind {
        match self.convention {
            CallingConvention::Digest | CallingConvention::FixedCostDigest => ArityKind::SingleBuffer,
            CallingConvention::ScryptNR | CallingConvention::ScryptNFactor => {
                ArityKind::BufferWithParams
            }
            CallingConvention::Neoscrypt => ArityKind::FixedLengthBuffer,
            CallingConvention::Cryptonight => ArityKind::BufferWithFlag,
            CallingConvention::Boolberry => ArityKind::TwoBuffersWithParam,
        }
    }

    /// Accepted argument counts (buffers, then parameters)
    pub fn argument_range(&self) -> ArgumentRange {
        let required = self.params.iter().filter(|p| p.is_required()).count();
        ArgumentRange {
            min: self.buffers.len() + required,
            max: self.buffers.len() + self.params.len(),
        }
    }

    /// Required primary input length, if fixed
    pub fn input_length(&self) -> Option<usize> {
        match self.buffers.first().map(|b| b.length) {
            Some(LengthRule::Exactly(len)) => Some(len),
            _ => None,
        }
    }

    /// Position of the first parameter in the argument list
    pub fn param_offset(&self) -> usize {
        self.buffers.len()
    }
}

const INPUT: BufferSpec = BufferSpec {
    name: "input",
    length: LengthRule::Any,
};

const SINGLE_BUFFER: &[BufferSpec] = &[INPUT];

const HEADER: &[BufferSpec] = &[BufferSpec {
    name: "input",
    length: LengthRule::Exactly(NEOSCRYPT_INPUT_LEN),
}];

const INPUT_AND_SCRATCHPAD: &[BufferSpec] = &[
    INPUT,
    BufferSpec {
        name: "scratchpad",
        length: LengthRule::NonEmpty,
    },
];

const U32_BOUNDS: ParamKind = ParamKind::Integer {
    min: 0,
    max: u32::MAX as u64,
};

const SCRYPT_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "N",
        kind: U32_BOUNDS,
        default: None,
    },
    ParamSpec {
        name: "R",
        kind: U32_BOUNDS,
        default: None,
    },
];

/// Largest nFactor whose derived N still fits 32 bits
pub const MAX_N_FACTOR: u64 = 30;

const SCRYPTN_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "nFactor",
    kind: ParamKind::Integer {
        min: 0,
        max: MAX_N_FACTOR,
    },
    default: None,
}];

const NEOSCRYPT_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "profile",
    kind: U32_BOUNDS,
    default: None,
}];

const CRYPTONIGHT_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "fast",
    kind: ParamKind::Flag,
    default: Some(ParamValue::Flag(false)),
}];

/// Height used when the caller leaves it out
pub const DEFAULT_BOOLBERRY_HEIGHT: u64 = 1;

const BOOLBERRY_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "height",
    kind: U32_BOUNDS,
    default: Some(ParamValue::Integer(DEFAULT_BOOLBERRY_HEIGHT)),
}];

const fn spec(
    id: &'static str,
    convention: CallingConvention,
    buffers: &'static [BufferSpec],
    params: &'static [ParamSpec],
    routine: Routine,
) -> AlgorithmSpec {
    AlgorithmSpec {
        id,
        convention,
        buffers,
        params,
        output_len: DIGEST_LEN,
        routine,
    }
}

const fn digest(id: &'static str, routine: fn(&[u8], &mut Digest)) -> AlgorithmSpec {
    spec(id, CallingConvention::Digest, SINGLE_BUFFER, &[], Routine::Digest(routine))
}

const fn fixed_cost(
    id: &'static str,
    routine: fn(&[u8], &mut Digest) -> powhash_algorithms::Result<()>,
) -> AlgorithmSpec {
    spec(
        id,
        CallingConvention::FixedCostDigest,
        SINGLE_BUFFER,
        &[],
        Routine::FixedCost(routine),
    )
}

static BUILTIN: &[AlgorithmSpec] = &[
    digest("quark", algorithms::quark_hash),
    digest("x11", algorithms::x11_hash),
    digest("x5", algorithms::x5_hash),
    spec(
        "scrypt",
        CallingConvention::ScryptNR,
        SINGLE_BUFFER,
        SCRYPT_PARAMS,
        Routine::Scrypt(algorithms::scrypt_hash),
    ),
    spec(
        "scryptn",
        CallingConvention::ScryptNFactor,
        SINGLE_BUFFER,
        SCRYPTN_PARAMS,
        Routine::Scrypt(algorithms::scrypt_hash),
    ),
    spec(
        "neoscrypt",
        CallingConvention::Neoscrypt,
        HEADER,
        NEOSCRYPT_PARAMS,
        Routine::Neoscrypt(algorithms::neoscrypt_hash),
    ),
    fixed_cost("yescrypt", algorithms::yescrypt_hash),
    digest("keccak", algorithms::keccak_hash),
    digest("bcrypt", algorithms::bcrypt_hash),
    digest("skein", algorithms::skein_hash),
    digest("groestl", algorithms::groestl_hash),
    digest("groestlmyriad", algorithms::groestlmyriad_hash),
    digest("blake", algorithms::blake_hash),
    digest("blake2s", algorithms::blake2s_hash),
    digest("dcrypt", algorithms::dcrypt_hash),
    digest("fugue", algorithms::fugue_hash),
    digest("qubit", algorithms::qubit_hash),
    digest("s3", algorithms::s3_hash),
    digest("hefty1", algorithms::hefty1_hash),
    digest("shavite3", algorithms::shavite3_hash),
    spec(
        "cryptonight",
        CallingConvention::Cryptonight,
        SINGLE_BUFFER,
        CRYPTONIGHT_PARAMS,
        Routine::Cryptonight {
            standard: algorithms::cryptonight_hash,
            fast: algorithms::cryptonight_fast_hash,
        },
    ),
    digest("x13", algorithms::x13_hash),
    digest("x14", algorithms::x14_hash),
    spec(
        "boolberry",
        CallingConvention::Boolberry,
        INPUT_AND_SCRATCHPAD,
        BOOLBERRY_PARAMS,
        Routine::Boolberry(algorithms::boolberry_hash),
    ),
    digest("nist5", algorithms::nist5_hash),
    digest("sha1", algorithms::sha1_hash),
    digest("x15", algorithms::x15_hash),
    digest("x17", algorithms::x17_hash),
    digest("fresh", algorithms::fresh_hash),
    digest("whirlpoolx", algorithms::whirlpoolx_hash),
    digest("zr5", algorithms::zr5_hash),
    digest("jh", algorithms::jh_hash),
    digest("c11", algorithms::c11_hash),
    fixed_cost("lyra2re", algorithms::lyra2re_hash),
    fixed_cost("lyra2re2", algorithms::lyra2re2_hash),
];

/// Read-only index over the built-in descriptors
#[derive(Debug, Clone)]
pub struct Registry {
    specs: BTreeMap<&'static str, &'static AlgorithmSpec>,
}

impl Registry {
    pub fn new() -> Self {
        let specs = BUILTIN.iter().map(|spec| (spec.id, spec)).collect();
        Self { specs }
    }

    /// Look up a descriptor by identifier
    pub fn get(&self, id: &str) -> Result<&'static AlgorithmSpec> {
        self.specs
            .get(id)
            .copied()
            .ok_or_else(|| HashError::UnknownAlgorithm(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.specs.contains_key(id)
    }

    /// Identifiers in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// All descriptors, sorted by identifier
    pub fn describe(&self) -> Vec<&'static AlgorithmSpec> {
        self.specs.values().copied().collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
