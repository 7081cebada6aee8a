use std::sync::Once;

use anyhow::Result;
use hex_literal::hex;
use pretty_assertions::assert_eq;

use powhash::{
    DispatchConfig, Dispatcher, ErrorKind, HashError, HashResult, LengthRule, Registry, Value,
    ValueKind,
};

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

/// Minimal valid arguments for every identifier
fn sample_args<'a>(id: &str, input: &'a [u8], header: &'a [u8; 80], pad: &'a [u8]) -> Vec<Value<'a>> {
    match id {
        "scrypt" => vec![Value::Bytes(input), 1024u32.into(), 1u32.into()],
        "scryptn" => vec![Value::Bytes(input), 9u32.into()],
        "neoscrypt" => vec![Value::Bytes(header), 0u32.into()],
        "boolberry" => vec![Value::Bytes(input), Value::Bytes(pad)],
        _ => vec![Value::Bytes(input)],
    }
}

#[test]
fn test_every_identifier_is_deterministic_and_32_bytes() -> Result<()> {
    init_logging();
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);

    let input = b"The quick brown fox jumps over the lazy dog";
    let header = [0x42u8; 80];
    let pad = [0x24u8; 128];

    for id in registry.ids() {
        let args = sample_args(id, input, &header, &pad);
        let first = dispatcher.invoke(id, &args)?;
        let second = dispatcher.invoke(id, &args)?;
        assert_eq!(first.as_bytes().len(), 32, "{}", id);
        assert_eq!(first, second, "{}", id);
    }
    Ok(())
}

#[test]
fn test_zero_arguments_fail_for_every_identifier() {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);

    for id in registry.ids() {
        let err = dispatcher.invoke(id, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentCount, "{}", id);
    }
}

#[test]
fn test_quark_regression() -> Result<()> {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);

    let empty = dispatcher.quark(b"")?;
    assert_eq!(
        *empty.as_bytes(),
        hex!("efa2e51b0b60baa0f962ed7349a68a0028ac448290c31abf027e3fb8aef50b70")
    );
    assert_eq!(
        dispatcher.quark(&[0u8; 80])?.to_hex(),
        "2f6d024df8ad109b5bf926ae609daeaccbb759d2e8c27f95969d8b1ae9397c82"
    );

    let corpus: [&[u8]; 4] = [b"", b"a", b"b", b"block header"];
    let digests: Vec<HashResult> = corpus
        .iter()
        .map(|sample| dispatcher.quark(sample))
        .collect::<powhash::Result<_>>()?;
    for (i, a) in digests.iter().enumerate() {
        for b in &digests[i + 1..] {
            assert_ne!(a, b);
        }
    }
    Ok(())
}

#[test]
fn test_scrypt_known_vector() -> Result<()> {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);

    let digest = dispatcher.scrypt(b"abc", 1024, 1)?;
    assert_eq!(
        *digest.as_bytes(),
        hex!("e652c1c3b7a8cd99d2edc49d4509f545c80e4395765e7225c4dde5d80dd76519")
    );
    Ok(())
}

#[test]
fn test_scryptn_derivation_law() -> Result<()> {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);
    let input = [0x5au8; 80];

    assert_eq!(dispatcher.scryptn(&input, 9)?, dispatcher.scrypt(&input, 1024, 1)?);
    for k in 0..6u32 {
        let n = 1u32 << (k + 1);
        assert_eq!(dispatcher.scryptn(&input, k)?, dispatcher.scrypt(&input, n, 1)?, "k = {}", k);
    }

    // N = 2^16 and 2^17 with R = 1
    for k in [15u32, 16] {
        let n = 1u32 << (k + 1);
        let derived = dispatcher.scryptn(&input, k)?;
        assert_eq!(derived, dispatcher.scrypt(&input, n, 1)?, "k = {}", k);
    }

    // Past the memory ceiling both fail the same way
    let scryptn = dispatcher.scryptn(&input, 21).unwrap_err();
    let scrypt = dispatcher.scrypt(&input, 1 << 22, 1).unwrap_err();
    assert_eq!(scryptn.kind(), ErrorKind::CostLimitExceeded);
    assert_eq!(scryptn.kind(), scrypt.kind());
    Ok(())
}

#[test]
fn test_trailing_arguments_do_not_change_the_result() -> Result<()> {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);
    let input = b"block header";

    let plain = dispatcher.invoke("quark", &[Value::Bytes(input)])?;
    let padded = dispatcher.invoke("quark", &[Value::Bytes(input), Value::Bytes(b"x")])?;
    assert_eq!(plain, padded);

    let scryptn = dispatcher.invoke("scryptn", &[Value::Bytes(input), 9u32.into(), "ignored".into()])?;
    assert_eq!(scryptn, dispatcher.scryptn(input, 9)?);
    Ok(())
}

#[test]
fn test_neoscrypt_length_constraint() -> Result<()> {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);

    for len in [0usize, 1, 76, 79, 81, 128] {
        let input = vec![0u8; len];
        let err = dispatcher.neoscrypt(&input, 0).unwrap_err();
        assert_eq!(
            err,
            HashError::LengthConstraint {
                algorithm: "neoscrypt",
                index: 0,
                name: "input",
                requirement: LengthRule::Exactly(80),
                actual: len,
            }
        );
    }

    let header = [0u8; 80];
    assert_eq!(dispatcher.neoscrypt(&header, 0)?.as_bytes().len(), 32);
    assert_eq!(
        dispatcher.neoscrypt(&header, 1)?.to_hex(),
        "161d0876f3b93b1048cda1bdeaa7332ee210f7131b42013cb43913a6553a4b69"
    );
    Ok(())
}

#[test]
fn test_cryptonight_flag_default() -> Result<()> {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);
    let input = b"This is a test";

    let implicit = dispatcher.invoke("cryptonight", &[Value::Bytes(input)])?;
    let explicit = dispatcher.cryptonight(input, Some(false))?;
    assert_eq!(implicit, explicit);
    assert_eq!(implicit, dispatcher.cryptonight(input, None)?);

    let fast = dispatcher.cryptonight(input, Some(true))?;
    assert_eq!(fast, dispatcher.cryptonight(input, Some(true))?);
    assert_eq!(fast.as_bytes().len(), 32);
    Ok(())
}

#[test]
fn test_boolberry_height_and_buffers() -> Result<()> {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);
    let input = [0x11u8; 76];
    let pad: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

    let default_height = dispatcher.boolberry(&input, &pad, None)?;
    assert_eq!(default_height, dispatcher.boolberry(&input, &pad, Some(1))?);
    assert_eq!(
        dispatcher.boolberry(&input, &pad, Some(20_000))?,
        dispatcher.boolberry(&input, &pad, Some(20_000))?
    );

    let err = dispatcher
        .invoke("boolberry", &[Value::Bytes(&input), "scratchpad".into()])
        .unwrap_err();
    assert_eq!(
        err,
        HashError::TypeMismatch {
            algorithm: "boolberry",
            index: 1,
            name: "scratchpad",
            expected: ValueKind::Bytes,
            actual: ValueKind::Text,
        }
    );

    let err = dispatcher
        .invoke("boolberry", &[true.into(), Value::Bytes(&pad)])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.argument_index(), Some(0));
    Ok(())
}

#[test]
fn test_text_is_never_a_buffer() {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);

    for id in registry.ids() {
        let err = dispatcher.invoke(id, &["abc".into()]).unwrap_err();
        // Multi-argument conventions fail the count first
        let expected = if registry.get(id).map(|spec| spec.argument_range().min).unwrap_or(1) > 1 {
            ErrorKind::ArgumentCount
        } else {
            ErrorKind::TypeMismatch
        };
        assert_eq!(err.kind(), expected, "{}", id);
    }
}

#[test]
fn test_unknown_algorithm_leaves_dispatcher_usable() -> Result<()> {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);

    let err = dispatcher.invoke("kawpow", &[Value::Bytes(b"abc")]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownAlgorithm);
    assert_eq!(err.algorithm(), "kawpow");

    assert_eq!(dispatcher.keccak(b"")?.to_hex(), dispatcher.keccak(b"")?.to_hex());
    Ok(())
}

#[test]
fn test_config_limits() -> Result<()> {
    let registry = Registry::new();
    let config = DispatchConfig::from_json(r#"{"max_memory_bytes": 1048576, "max_input_bytes": 80}"#)?;
    let dispatcher = Dispatcher::with_config(&registry, config);

    // 128 * 1 * 16384 = 2 MiB
    let err = dispatcher.scrypt(b"abc", 16384, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CostLimitExceeded);
    // Standard cryptonight needs its 2 MiB scratchpad
    let err = dispatcher.cryptonight(b"abc", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CostLimitExceeded);
    assert!(dispatcher.cryptonight(b"abc", Some(true)).is_ok());

    let err = dispatcher.x11(&[0u8; 81]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthConstraint);
    assert!(dispatcher.x11(&[0u8; 80]).is_ok());
    Ok(())
}

#[test]
fn test_catalogue_serialization() -> Result<()> {
    let registry = Registry::new();
    let catalogue = serde_json::to_value(registry.describe())?;

    let entries = catalogue.as_array().map(Vec::len).unwrap_or(0);
    assert_eq!(entries, 35);

    let neoscrypt = catalogue
        .as_array()
        .and_then(|specs| specs.iter().find(|spec| spec["id"] == "neoscrypt"))
        .cloned()
        .unwrap_or_default();
    assert_eq!(neoscrypt["convention"], "neoscrypt");
    assert_eq!(neoscrypt["buffers"][0]["length"]["exactly"], 80);
    assert_eq!(neoscrypt["params"][0]["name"], "profile");
    assert_eq!(neoscrypt["output_len"], 32);
    assert!(neoscrypt.get("routine").is_none());
    Ok(())
}

#[test]
fn test_result_serde() -> Result<()> {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);

    let digest = dispatcher.blake2s(b"abc")?;
    let json = serde_json::to_string(&digest)?;
    let back: HashResult = serde_json::from_str(&json)?;
    assert_eq!(back, digest);
    assert_eq!(
        digest.to_string(),
        "508c5e8c327c14e2e1a72ba34eeb452f37458b209ed63a294d999b4c86675982"
    );
    Ok(())
}
