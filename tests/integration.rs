use std::sync::Arc;
use std::thread;

use sigid::{
    ConfigError, DecodedId, Registry, SigId, SigIdError, UNTYPED_TYPE_ID,
};
use uuid::Uuid;

fn scenario_registry() -> Registry {
    // Reference scenario: two secrets, one type, 2-byte signature.
    Registry::builder()
        .secret(0, "alpha")
        .secret(1, "beta")
        .type_desc(10, "USER")
        .signature_bytes(2)
        .build()
        .expect("scenario registry is valid")
}

#[test]
fn generate_decode_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let sigid = SigId::new(scenario_registry());

    let before = chrono::Utc::now().timestamp_millis() as u64;
    let id = sigid.generate_typed(10)?;
    let after = chrono::Utc::now().timestamp_millis() as u64;

    let info = sigid.decode(id);
    assert!(info.valid);
    assert_eq!(info.type_id, 10);
    assert_eq!(info.type_desc, "USER");
    assert_eq!(info.signature.len(), 2);
    assert!([0, 1].contains(&info.secret_id));
    assert!(info.timestamp >= before && info.timestamp <= after);
    Ok(())
}

#[test]
fn round_trip_across_signature_widths() -> Result<(), Box<dyn std::error::Error>> {
    for width in 1..=4 {
        let registry = Registry::builder()
            .secret(0, "alpha")
            .type_desc(20, "ORDER")
            .signature_bytes(width)
            .build()?;
        let sigid = SigId::new(registry);

        let info = sigid.decode(sigid.generate_typed(20)?);
        assert!(info.valid, "width {width} should round-trip");
        assert_eq!(info.signature.len(), width);
        assert_eq!(sigid.registry().random_bytes(), 8 - width);
    }
    Ok(())
}

#[test]
fn untyped_generate_uses_sentinel() {
    let sigid = SigId::new(scenario_registry());
    let info = sigid.decode(sigid.generate());
    assert!(info.valid);
    assert_eq!(info.type_id, UNTYPED_TYPE_ID);
    assert_eq!(info.type_desc, "Untyped");
}

#[test]
fn unknown_type_rejected_with_unified_error() {
    let sigid = SigId::new(scenario_registry());
    let err: SigIdError = sigid.generate_typed(99).unwrap_err().into();
    assert!(err.is_generate_error());
}

#[test]
fn flipping_any_bit_invalidates() -> Result<(), Box<dyn std::error::Error>> {
    // 4-byte signature keeps the accidental-collision probability of a
    // flipped prefix far below test noise.
    let registry = Registry::builder()
        .secret(0, "alpha")
        .secret(1, "beta")
        .type_desc(10, "USER")
        .signature_bytes(4)
        .build()?;
    let sigid = SigId::new(registry);
    let id = sigid.generate_typed(10)?;
    assert!(sigid.decode(id).valid);

    let bytes = *id.as_bytes();
    for byte in 0..16 {
        for bit in 0..8 {
            let mut tampered = bytes;
            tampered[byte] ^= 1 << bit;
            let info = sigid.decode(Uuid::from_bytes(tampered));
            assert!(!info.valid, "flip at byte {byte} bit {bit} still validated");
        }
    }
    Ok(())
}

#[test]
fn unregistered_secret_id_always_invalid() -> Result<(), Box<dyn std::error::Error>> {
    let sigid = SigId::new(scenario_registry());
    let mut bytes = *sigid.generate_typed(10)?.as_bytes();
    assert!(sigid.registry().has_secret(0));
    assert!(!sigid.registry().has_secret(200));

    // secretId lives at byte 13 for a 2-byte signature.
    bytes[13] = 200;
    let info = sigid.decode(Uuid::from_bytes(bytes));
    assert!(!info.valid);
    assert_eq!(info.secret_id, 200);
    Ok(())
}

#[test]
fn all_zero_identifier_decodes_deterministically() {
    let sigid = SigId::new(scenario_registry());
    let info = sigid.decode(Uuid::nil());
    assert_eq!(
        info,
        DecodedId {
            valid: false,
            timestamp: 0,
            signature: vec![0, 0],
            type_id: 0,
            type_desc: "Unknown".to_string(),
            secret_id: 0,
        }
    );
}

#[test]
fn random_uuids_are_rejected() {
    const SAMPLES: usize = 100_000;
    // Same false-positive budget as a 0.01% bound over a million trials.
    const MAX_VALID: usize = SAMPLES / 10_000;

    let sigid = SigId::new(scenario_registry());
    let valid = (0..SAMPLES)
        .filter(|_| sigid.decode(Uuid::new_v4()).valid)
        .count();
    assert!(
        valid <= MAX_VALID,
        "{valid} of {SAMPLES} random UUIDs validated"
    );
}

#[test]
fn identical_registries_decode_each_other() -> Result<(), Box<dyn std::error::Error>> {
    let minter = SigId::new(scenario_registry());
    let verifier = SigId::new(scenario_registry());
    assert!(verifier.decode(minter.generate_typed(10)?).valid);
    Ok(())
}

#[test]
fn rotated_secret_material_invalidates_old_identifiers() -> Result<(), Box<dyn std::error::Error>>
{
    let minter = SigId::new(scenario_registry());
    let rotated = SigId::new(
        Registry::builder()
            .secret(0, "alpha-v2")
            .secret(1, "beta-v2")
            .type_desc(10, "USER")
            .signature_bytes(2)
            .build()?,
    );
    assert!(!rotated.decode(minter.generate_typed(10)?).valid);
    Ok(())
}

#[test]
fn construction_errors_convert_to_unified_error() {
    let result = Registry::builder().signature_bytes(2).build();
    let err: SigIdError = result.unwrap_err().into();
    assert!(err.is_config_error());
    assert_eq!(err, SigIdError::Config(ConfigError::NoSecrets));
}

#[test]
fn decoded_info_serializes() -> Result<(), Box<dyn std::error::Error>> {
    let sigid = SigId::new(scenario_registry());
    let info = sigid.decode(sigid.generate_typed(10)?);

    let json = serde_json::to_string(&info)?;
    let back: DecodedId = serde_json::from_str(&json)?;
    assert_eq!(info, back);
    Ok(())
}

#[test]
fn concurrent_generate_and_decode() -> Result<(), Box<dyn std::error::Error>> {
    let sigid = Arc::new(SigId::new(scenario_registry()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let sigid = Arc::clone(&sigid);
            thread::spawn(move || {
                for _ in 0..250 {
                    let info = sigid.decode(sigid.generate_typed(10).unwrap());
                    assert!(info.valid);
                    assert_eq!(info.type_id, 10);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
    Ok(())
}
