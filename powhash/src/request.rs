/// Typed invocation requests
///
/// One variant per calling-convention family. A request only exists once
/// its arguments have passed validation, with optional parameters already
/// resolved to their defaults.

use powhash_algorithms::algorithms::NEOSCRYPT_INPUT_LEN;

use crate::marshal::InputView;
use crate::registry::AlgorithmSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    /// Single buffer, with or without fixed internal cost
    Digest { input: InputView<'a> },
    /// Buffer plus explicit N and R
    Scrypt { input: InputView<'a>, n: u64, r: u32 },
    /// Buffer plus N exponent
    ScryptN { input: InputView<'a>, n_factor: u32 },
    /// Block header plus profile word
    Neoscrypt {
        header: &'a [u8; NEOSCRYPT_INPUT_LEN],
        profile: u32,
    },
    /// Buffer plus routine selector
    Cryptonight { input: InputView<'a>, fast: bool },
    /// Buffer, scratchpad and height
    Boolberry {
        input: InputView<'a>,
        scratchpad: InputView<'a>,
        height: u64,
    },
}

impl<'a> Request<'a> {
    /// Primary input bytes
    pub fn input(&self) -> &'a [u8] {
        match *self {
            Request::Digest { input }
            | Request::Scrypt { input, .. }
            | Request::ScryptN { input, .. }
            | Request::Cryptonight { input, .. }
            | Request::Boolberry { input, .. } => input.as_slice(),
            Request::Neoscrypt { header, .. } => &header[..],
        }
    }
}

/// A validated request bound to its algorithm descriptor
#[derive(Debug, Clone, Copy)]
pub struct InvocationRequest<'a> {
    pub(crate) spec: &'static AlgorithmSpec,
    pub(crate) request: Request<'a>,
}

impl<'a> InvocationRequest<'a> {
    pub fn algorithm(&self) -> &'static str {
        self.spec.id
    }

    pub fn spec(&self) -> &'static AlgorithmSpec {
        self.spec
    }

    pub fn request(&self) -> &Request<'a> {
        &self.request
    }
}
