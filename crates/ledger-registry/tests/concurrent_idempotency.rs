//! Concurrent submissions against the in-memory registry.

use std::collections::HashSet;

use ledger_core::{ClientToken, Definition, Hash, Tags};
use ledger_crypto::XPub;
use ledger_registry::{
    AccountRegistry, AssetRegistry, MemoryRegistry, NewAccount, NewAsset, RegistryConfig,
    RegistryError,
};
use ledger_signers::SignerSpec;

fn xpubs(n: u8) -> Vec<XPub> {
    let base = XPub::from_hex(&format!(
        "5866666666666666666666666666666666666666666666666666666666666666{}",
        "05".repeat(32)
    ))
    .unwrap();
    (0..n).map(|i| base.child(&[i])).collect()
}

fn registry() -> MemoryRegistry {
    MemoryRegistry::new(RegistryConfig {
        genesis_hash: Hash([1u8; 32]),
    })
}

fn account_req(token: &str, alias: Option<String>) -> NewAccount {
    NewAccount {
        signer: SignerSpec::new(xpubs(2), 2).unwrap(),
        alias,
        tags: Tags::new(),
        client_token: ClientToken::new(token),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn same_token_creates_at_most_once() {
    let reg = registry();
    let handles: Vec<_> = (0..32)
        .map(|_| {
            let reg = reg.clone();
            tokio::spawn(async move { reg.create_account(account_req("shared", None)).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for h in handles {
        ids.insert(h.await.unwrap().unwrap().id);
    }
    assert_eq!(ids.len(), 1);
    assert_eq!(reg.account_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn distinct_tokens_get_distinct_key_indexes() {
    let reg = registry();
    let handles: Vec<_> = (0..32)
        .map(|i| {
            let reg = reg.clone();
            tokio::spawn(async move { reg.create_account(account_req(&format!("t{i}"), None)).await })
        })
        .collect();

    let mut indexes = HashSet::new();
    for h in handles {
        indexes.insert(h.await.unwrap().unwrap().signer.key_index);
    }
    assert_eq!(indexes.len(), 32);
    assert_eq!(indexes.iter().min(), Some(&1));
    assert_eq!(indexes.iter().max(), Some(&32));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_aliases_have_one_winner() {
    let reg = registry();
    let handles: Vec<_> = (0..16)
        .map(|i| {
            let reg = reg.clone();
            tokio::spawn(async move {
                reg.create_account(account_req(&format!("t{i}"), Some("ops".into())))
                    .await
            })
        })
        .collect();

    let mut ok = 0;
    for h in handles {
        match h.await.unwrap() {
            Ok(_) => ok += 1,
            Err(RegistryError::DuplicateAlias { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(ok, 1);
    assert!(reg.account_by_alias("ops").is_some());
}

#[tokio::test]
async fn asset_and_account_aliases_are_separate() {
    let reg = registry();
    reg.create_account(account_req("a", Some("gold".into())))
        .await
        .unwrap();
    let asset = reg
        .define_asset(NewAsset {
            signer: SignerSpec::new(xpubs(1), 1).unwrap(),
            definition: Definition::new(),
            alias: Some("gold".into()),
            tags: Tags::new(),
            client_token: ClientToken::new("b"),
        })
        .await
        .unwrap();
    assert_eq!(reg.asset_by_alias("gold").unwrap().id, asset.id);
    assert!(AccountRegistry::health_check(&reg).await.is_ok());
}
