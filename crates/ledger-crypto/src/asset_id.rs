//! # Asset Identity Derivation
//!
//! ```text
//! asset_id = SHA3-256( genesis_hash            32 bytes
//!                    ‖ varint63(ASSET_VERSION)
//!                    ‖ varint63(vm_version)
//!                    ‖ varstr31(issuance_program) )
//! ```
//!
//! Field order and the length prefix on the program are a frozen contract:
//! changing either changes every asset id ever derived. The known-answer
//! tests in `tests/asset_id_vectors.rs` pin the layout.

use ledger_core::{AssetId, Hash, IssuanceProgram, Varint63, VmVersion, ASSET_VERSION};

use crate::sha3pool::Sha3Pool;

/// Derive the content-addressed identity of an asset.
///
/// Pure and infallible: the typed inputs are always encodable.
pub fn compute_asset_id(program: &IssuanceProgram, genesis: &Hash, vm_version: VmVersion) -> AssetId {
    let mut h = Sha3Pool::global().acquire();
    h.update(genesis.as_bytes());
    ASSET_VERSION_VARINT.write_to(&mut h);
    vm_version.as_varint().write_to(&mut h);
    program.as_varstr().write_to(&mut h);
    AssetId::from(h.finalize())
}

const ASSET_VERSION_VARINT: Varint63 = Varint63::from_u32(ASSET_VERSION as u32);
