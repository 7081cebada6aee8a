/// Dispatch facade
///
/// `Dispatcher::invoke` is the generic host boundary: look up the
/// descriptor, validate the arguments into a typed request, allocate the
/// output and call the library routine. Named methods cover every
/// identifier and go through the same path.

use tracing::{debug, trace};

use crate::config::DispatchConfig;
use crate::error::{HashError, Result};
use crate::marshal::{HashResult, OutputBuffer};
use crate::registry::{Registry, Routine};
use crate::request::{InvocationRequest, Request};
use crate::validate::{self, scryptn_cost};
use crate::value::Value;

/// Block size used by scryptn
const SCRYPTN_R: u32 = 1;

/// Stateless front end over a registry
#[derive(Debug, Clone)]
pub struct Dispatcher<'r> {
    registry: &'r Registry,
    config: DispatchConfig,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_config(registry, DispatchConfig::default())
    }

    pub fn with_config(registry: &'r Registry, config: DispatchConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Hash with the named algorithm
    pub fn invoke(&self, id: &str, args: &[Value<'_>]) -> Result<HashResult> {
        let invocation = self.validate(id, args)?;
        self.dispatch(&invocation)
    }

    /// Check arguments without computing anything
    pub fn validate<'a>(&self, id: &str, args: &[Value<'a>]) -> Result<InvocationRequest<'a>> {
        let spec = self.registry.get(id).map_err(|err| {
            debug!(algorithm = id, error = %err, "rejected");
            err
        })?;

        validate::validate(spec, args, &self.config).map_err(|err| {
            debug!(algorithm = spec.id, error = %err, "rejected");
            err
        })
    }

    /// Run a validated request
    pub fn dispatch(&self, invocation: &InvocationRequest<'_>) -> Result<HashResult> {
        let spec = invocation.spec;
        let request = invocation.request;
        debug!(
            algorithm = spec.id,
            input_len = request.input().len(),
            "dispatch"
        );

        let library = |source| HashError::Library {
            algorithm: spec.id,
            source,
        };

        let mut output = OutputBuffer::new();
        let out = output.digest_mut();

        match (spec.routine, request) {
            (Routine::Digest(routine), Request::Digest { input }) => routine(input.as_slice(), out),
            (Routine::FixedCost(routine), Request::Digest { input }) => {
                routine(input.as_slice(), out).map_err(library)?
            }
            (Routine::Scrypt(routine), Request::Scrypt { input, n, r }) => {
                routine(input.as_slice(), n, r, out).map_err(library)?
            }
            (Routine::Scrypt(routine), Request::ScryptN { input, n_factor }) => {
                let cost = scryptn_cost(n_factor).map_err(library)?;
                trace!(n_factor, n = cost.n(), "scryptn derived cost");
                routine(input.as_slice(), cost.n(), SCRYPTN_R, out).map_err(library)?
            }
            (Routine::Neoscrypt(routine), Request::Neoscrypt { header, profile }) => {
                routine(header, profile, out).map_err(library)?
            }
            (Routine::Cryptonight { standard, fast }, Request::Cryptonight { input, fast: use_fast }) => {
                if use_fast {
                    fast(input.as_slice(), out)
                } else {
                    standard(input.as_slice(), out)
                }
            }
            (
                Routine::Boolberry(routine),
                Request::Boolberry {
                    input,
                    scratchpad,
                    height,
                },
            ) => routine(input.as_slice(), scratchpad.as_slice(), height, out).map_err(library)?,
            _ => {
                return Err(HashError::RequestMismatch {
                    algorithm: spec.id,
                    convention: spec.convention,
                })
            }
        }

        let result = output.into_result();
        trace!(algorithm = spec.id, digest = %result, "computed");
        Ok(result)
    }

    pub fn scrypt(&self, input: &[u8], n: u32, r: u32) -> Result<HashResult> {
        self.invoke("scrypt", &[Value::Bytes(input), n.into(), r.into()])
    }

    /// scrypt with N = 2^(n_factor + 1) and R = 1
    pub fn scryptn(&self, input: &[u8], n_factor: u32) -> Result<HashResult> {
        self.invoke("scryptn", &[Value::Bytes(input), n_factor.into()])
    }

    pub fn neoscrypt(&self, input: &[u8], profile: u32) -> Result<HashResult> {
        self.invoke("neoscrypt", &[Value::Bytes(input), profile.into()])
    }

    /// `fast` defaults to the standard routine
    pub fn cryptonight(&self, input: &[u8], fast: Option<bool>) -> Result<HashResult> {
        self.invoke("cryptonight", &[Value::Bytes(input), fast.into()])
    }

    /// `height` defaults to 1
    pub fn boolberry(&self, input: &[u8], scratchpad: &[u8], height: Option<u32>) -> Result<HashResult> {
        self.invoke(
            "boolberry",
            &[Value::Bytes(input), Value::Bytes(scratchpad), height.into()],
        )
    }
}

macro_rules! single_buffer_entry_points {
    ($($name:ident => $id:literal),* $(,)?) => {
        impl<'r> Dispatcher<'r> {
            $(
                #[doc = concat!("`", $id, "(input)`")]
                pub fn $name(&self, input: &[u8]) -> Result<HashResult> {
                    self.invoke($id, &[Value::Bytes(input)])
                }
            )*
        }
    };
}

single_buffer_entry_points! {
    quark => "quark",
    x11 => "x11",
    x5 => "x5",
    yescrypt => "yescrypt",
    keccak => "keccak",
    bcrypt => "bcrypt",
    skein => "skein",
    groestl => "groestl",
    groestlmyriad => "groestlmyriad",
    blake => "blake",
    blake2s => "blake2s",
    dcrypt => "dcrypt",
    fugue => "fugue",
    qubit => "qubit",
    s3 => "s3",
    hefty1 => "hefty1",
    shavite3 => "shavite3",
    x13 => "x13",
    x14 => "x14",
    nist5 => "nist5",
    sha1 => "sha1",
    x15 => "x15",
    x17 => "x17",
    fresh => "fresh",
    whirlpoolx => "whirlpoolx",
    zr5 => "zr5",
    jh => "jh",
    c11 => "c11",
    lyra2re => "lyra2re",
    lyra2re2 => "lyra2re2",
}
