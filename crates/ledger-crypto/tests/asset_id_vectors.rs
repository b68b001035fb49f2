//! Known-answer vectors for asset identity derivation.
//!
//! These pin the frozen genesis ‖ version ‖ vm ‖ varstr(program) layout.
//! A failure here means previously issued asset ids would no longer match.

use ledger_core::{AssetId, Hash, IssuanceProgram, VmVersion};
use ledger_crypto::{compute_asset_id, multisig_issuance_program};

fn program(hex: &str) -> IssuanceProgram {
    IssuanceProgram::from_hex(hex).unwrap()
}

fn counting_genesis() -> Hash {
    let mut g = [0u8; 32];
    for (i, b) in g.iter_mut().enumerate() {
        *b = i as u8;
    }
    Hash(g)
}

fn expect(hex: &str) -> AssetId {
    hex.parse().unwrap()
}

#[test]
fn empty_program_zero_genesis() {
    let id = compute_asset_id(&program(""), &Hash::ZERO, VmVersion::V1);
    assert_eq!(
        id,
        expect("7fafb2bec994dba0794810693530555a03868d5a81a989d0fe100f947480f622")
    );
}

#[test]
fn short_program_counting_genesis() {
    let id = compute_asset_id(&program("ae51"), &counting_genesis(), VmVersion::V1);
    assert_eq!(
        id,
        expect("66c39c14505478094e7e7c65b2c2db01dcd9bf8d8ddce51274d4c1a136407d5f")
    );
}

#[test]
fn vm_version_is_hashed() {
    let id = compute_asset_id(&program("ae51"), &counting_genesis(), VmVersion(2));
    assert_eq!(
        id,
        expect("90f3d7e502332928f9d6831ae95e704a82103cfed20160f01f10ecbca20d6897")
    );
}

#[test]
fn two_byte_length_prefix() {
    let prog = IssuanceProgram::new(vec![0u8; 200]).unwrap();
    let id = compute_asset_id(&prog, &Hash([0xff; 32]), VmVersion::V1);
    assert_eq!(
        id,
        expect("714f76e85917eed86a0f9eb8369d21d47594840d7e3e42e942778ee491b95f3f")
    );
}

#[test]
fn single_key_multisig_program() {
    let prog = multisig_issuance_program(&[[0x11; 32]], 1).unwrap();
    let id = compute_asset_id(&prog, &counting_genesis(), VmVersion::V1);
    assert_eq!(
        id,
        expect("e69c359a8785b8b8cd651ec38e9a20d79508363b01772b7ba257f454526b2ef1")
    );
}

#[test]
fn derivation_is_stable_across_threads() {
    let prog = program("ae51");
    let genesis = counting_genesis();
    let ids: Vec<AssetId> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| compute_asset_id(&prog, &genesis, VmVersion::V1)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(ids.windows(2).all(|w| w[0] == w[1]));
}
