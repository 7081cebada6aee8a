/// Argument validation
///
/// Checks run in a fixed order and stop at the first failure:
///
/// 1. at least the descriptor's minimum argument count (extras are ignored)
/// 2. argument 0 is a byte buffer
/// 3. argument 0 satisfies its length rule
/// 4. every parameter is present (or defaulted) and of the declared kind
/// 5. any further buffer is a byte buffer, separate from argument 0
///
/// Family rules (scrypt cost, neoscrypt profile) and the memory ceiling are
/// checked last. Nothing is copied and nothing is allocated on the way.

use powhash_algorithms::algorithms::cryptonight::SCRATCHPAD_BYTES;
use powhash_algorithms::algorithms::{NeoscryptProfile, ScryptCost, NEOSCRYPT_INPUT_LEN};

use crate::config::DispatchConfig;
use crate::error::{HashError, Result};
use crate::marshal::InputView;
use crate::registry::{AlgorithmSpec, BufferSpec, CallingConvention, LengthRule, ParamKind, ParamSpec, ParamValue};
use crate::request::{InvocationRequest, Request};
use crate::value::{Value, ValueKind};

/// Most parameters any descriptor declares
const MAX_PARAMS: usize = 2;

/// Parameters after defaults are applied, in declaration order
struct Resolved([Option<ParamValue>; MAX_PARAMS]);

impl Resolved {
    fn integer(&self, position: usize) -> Option<u64> {
        match self.0.get(position) {
            Some(Some(ParamValue::Integer(value))) => Some(*value),
            _ => None,
        }
    }

    fn flag(&self, position: usize) -> Option<bool> {
        match self.0.get(position) {
            Some(Some(ParamValue::Flag(flag))) => Some(*flag),
            _ => None,
        }
    }

    /// A slot the descriptor declares but resolution did not fill means the
    /// descriptor and the convention disagree
    fn require_integer(&self, spec: &'static AlgorithmSpec, position: usize) -> Result<u64> {
        self.integer(position).ok_or_else(|| mismatch(spec))
    }

    fn require_flag(&self, spec: &'static AlgorithmSpec, position: usize) -> Result<bool> {
        self.flag(position).ok_or_else(|| mismatch(spec))
    }
}

pub(crate) fn validate<'a>(
    spec: &'static AlgorithmSpec,
    args: &[Value<'a>],
    config: &DispatchConfig,
) -> Result<InvocationRequest<'a>> {
    let algorithm = spec.id;

    let expected = spec.argument_range();
    if args.len() < expected.min {
        return Err(HashError::ArgumentCount {
            algorithm,
            expected,
            actual: args.len(),
        });
    }

    let (primary, extra_buffers) = match spec.buffers {
        [primary, extra @ ..] => (primary, extra),
        [] => {
            return Err(HashError::ArgumentCount {
                algorithm,
                expected,
                actual: args.len(),
            })
        }
    };

    let input = buffer_arg(spec, args, 0, primary)?;
    check_length(spec, 0, primary, input)?;
    if let Some(limit) = config.max_input_bytes {
        let requirement = LengthRule::AtMost(limit);
        if !requirement.accepts(input.len()) {
            return Err(HashError::LengthConstraint {
                algorithm,
                index: 0,
                name: primary.name,
                requirement,
                actual: input.len(),
            });
        }
    }

    let params = resolve_params(spec, args)?;

    let mut scratchpad = None;
    for (offset, buffer) in extra_buffers.iter().enumerate() {
        let index = offset + 1;
        let view = buffer_arg(spec, args, index, buffer)?;
        if view.overlaps(&input) {
            return Err(HashError::AliasedBuffer {
                algorithm,
                index,
                name: buffer.name,
            });
        }
        check_length(spec, index, buffer, view)?;
        scratchpad = Some(view);
    }

    let first_param = spec.param_offset();
    let (request, memory_bytes) = match spec.convention {
        CallingConvention::Digest | CallingConvention::FixedCostDigest => {
            (Request::Digest { input }, 0)
        }
        CallingConvention::ScryptNR => {
            let n = params.require_integer(spec, 0)?;
            let r = narrow(spec, first_param + 1, params.require_integer(spec, 1)?)?;
            let cost = ScryptCost::new(n, r).map_err(|err| {
                out_of_range(spec, first_param, n.to_string(), err.to_string())
            })?;
            (Request::Scrypt { input, n, r }, cost.memory_bytes())
        }
        CallingConvention::ScryptNFactor => {
            let n_factor = narrow(spec, first_param, params.require_integer(spec, 0)?)?;
            let cost = scryptn_cost(n_factor).map_err(|err| {
                out_of_range(spec, first_param, n_factor.to_string(), err.to_string())
            })?;
            (Request::ScryptN { input, n_factor }, cost.memory_bytes())
        }
        CallingConvention::Neoscrypt => {
            let header = <&[u8; NEOSCRYPT_INPUT_LEN]>::try_from(input.as_slice()).map_err(|_| {
                HashError::LengthConstraint {
                    algorithm,
                    index: 0,
                    name: primary.name,
                    requirement: LengthRule::Exactly(NEOSCRYPT_INPUT_LEN),
                    actual: input.len(),
                }
            })?;
            let profile = narrow(spec, first_param, params.require_integer(spec, 0)?)?;
            let decoded = NeoscryptProfile::decode(profile).map_err(|err| {
                out_of_range(spec, first_param, profile.to_string(), err.to_string())
            })?;
            (Request::Neoscrypt { header, profile }, decoded.memory_bytes())
        }
        CallingConvention::Cryptonight => {
            let fast = params.require_flag(spec, 0)?;
            let memory = if fast { 0 } else { SCRATCHPAD_BYTES as u64 };
            (Request::Cryptonight { input, fast }, memory)
        }
        CallingConvention::Boolberry => {
            let scratchpad = scratchpad.ok_or(HashError::ArgumentCount {
                algorithm,
                expected,
                actual: args.len(),
            })?;
            let height = params.require_integer(spec, 0)?;
            (
                Request::Boolberry {
                    input,
                    scratchpad,
                    height,
                },
                0,
            )
        }
    };

    if memory_bytes > config.max_memory_bytes {
        return Err(HashError::CostLimitExceeded {
            algorithm,
            required: memory_bytes,
            limit: config.max_memory_bytes,
        });
    }

    Ok(InvocationRequest { spec, request })
}

/// Cost of scryptn: N = 2^(nFactor + 1), R = 1
pub(crate) fn scryptn_cost(n_factor: u32) -> powhash_algorithms::Result<ScryptCost> {
    let log_n = u8::try_from(n_factor.saturating_add(1)).unwrap_or(u8::MAX);
    ScryptCost::from_log_n(log_n, 1)
}

fn buffer_arg<'a>(
    spec: &'static AlgorithmSpec,
    args: &[Value<'a>],
    index: usize,
    buffer: &BufferSpec,
) -> Result<InputView<'a>> {
    let value = args.get(index).ok_or(HashError::ArgumentCount {
        algorithm: spec.id,
        expected: spec.argument_range(),
        actual: args.len(),
    })?;
    value.as_bytes().map(InputView::new).ok_or(HashError::TypeMismatch {
        algorithm: spec.id,
        index,
        name: buffer.name,
        expected: ValueKind::Bytes,
        actual: value.kind(),
    })
}

fn check_length(
    spec: &'static AlgorithmSpec,
    index: usize,
    buffer: &BufferSpec,
    view: InputView<'_>,
) -> Result<()> {
    if buffer.length.accepts(view.len()) {
        Ok(())
    } else {
        Err(HashError::LengthConstraint {
            algorithm: spec.id,
            index,
            name: buffer.name,
            requirement: buffer.length,
            actual: view.len(),
        })
    }
}

fn resolve_params(spec: &'static AlgorithmSpec, args: &[Value<'_>]) -> Result<Resolved> {
    let mut resolved = Resolved([None; MAX_PARAMS]);
    let offset = spec.param_offset();
    for (position, (param, slot)) in spec.params.iter().zip(resolved.0.iter_mut()).enumerate() {
        let index = offset + position;
        let value = args.get(index).copied().unwrap_or(Value::Null);
        *slot = Some(resolve_param(spec, index, param, value)?);
    }
    Ok(resolved)
}

fn resolve_param(
    spec: &'static AlgorithmSpec,
    index: usize,
    param: &ParamSpec,
    value: Value<'_>,
) -> Result<ParamValue> {
    if value.is_null() {
        if let Some(default) = param.default {
            return Ok(default);
        }
    }

    match (param.kind, value) {
        (ParamKind::Flag, Value::Bool(flag)) => Ok(ParamValue::Flag(flag)),
        (ParamKind::Flag, other) => Err(type_mismatch(spec, index, param, ValueKind::Bool, other)),
        (ParamKind::Integer { min, max }, Value::Integer(n)) => {
            let n = u64::try_from(n).map_err(|_| {
                out_of_range(spec, index, value.to_string(), "must be non-negative".to_string())
            })?;
            check_bounds(spec, index, value, n, min, max)
        }
        (ParamKind::Integer { min, max }, Value::Number(x)) => {
            let reason = if !x.is_finite() {
                Some("must be finite".to_string())
            } else if x < 0.0 {
                Some("must be non-negative".to_string())
            } else if x.fract() != 0.0 {
                Some("must be an integer".to_string())
            } else if x > max as f64 {
                Some(format!("must be at most {}", max))
            } else {
                None
            };
            match reason {
                Some(reason) => Err(out_of_range(spec, index, value.to_string(), reason)),
                None => check_bounds(spec, index, value, x as u64, min, max),
            }
        }
        (ParamKind::Integer { .. }, other) => {
            Err(type_mismatch(spec, index, param, ValueKind::Number, other))
        }
    }
}

fn check_bounds(
    spec: &'static AlgorithmSpec,
    index: usize,
    value: Value<'_>,
    n: u64,
    min: u64,
    max: u64,
) -> Result<ParamValue> {
    if n < min || n > max {
        return Err(out_of_range(
            spec,
            index,
            value.to_string(),
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(ParamValue::Integer(n))
}

/// Parameters bounded to 32 bits by their descriptor
fn narrow(spec: &'static AlgorithmSpec, index: usize, value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        out_of_range(spec, index, value.to_string(), "must fit in 32 bits".to_string())
    })
}

fn param_name(spec: &AlgorithmSpec, index: usize) -> &'static str {
    index
        .checked_sub(spec.param_offset())
        .and_then(|position| spec.params.get(position))
        .map_or("input", |param| param.name)
}

fn out_of_range(spec: &'static AlgorithmSpec, index: usize, value: String, reason: String) -> HashError {
    HashError::ParameterOutOfRange {
        algorithm: spec.id,
        index,
        name: param_name(spec, index),
        value,
        reason,
    }
}

fn mismatch(spec: &'static AlgorithmSpec) -> HashError {
    HashError::RequestMismatch {
        algorithm: spec.id,
        convention: spec.convention,
    }
}

fn type_mismatch(
    spec: &'static AlgorithmSpec,
    index: usize,
    param: &ParamSpec,
    expected: ValueKind,
    actual: Value<'_>,
) -> HashError {
    HashError::TypeMismatch {
        algorithm: spec.id,
        index,
        name: param.name,
        expected,
        actual: actual.kind(),
    }
}
