//! # Composable Block Benchmarks
//!
//! | Component | Operation |
//! |-----------|-----------|
//! | Capability Store | commit, resolve |
//! | Settlement | block envelope sealing |
//! | Crypto | transaction signing and sender recovery |

use cb_01_capability_store::{CapabilityStore, CapabilityStoreApi, ManualSlotClock};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_bus::InMemoryEventBus;
use shared_crypto::{recover_sender, sign_request, Secp256k1KeyPair};
use shared_types::{
    Actor, BlockEnvelope, BuildArgs, CapabilityGrant, PayloadKind, RevealCondition,
    SignedTransaction, TransactionRequest, TRANSFER_GAS, U256,
};
use std::sync::Arc;

fn transfer(key: &Secp256k1KeyPair, nonce: u64) -> SignedTransaction {
    sign_request(
        key,
        Actor::new(key.address(), nonce),
        TransactionRequest::transfer([0x77; 20], U256::from(nonce)),
        U256::one(),
        TRANSFER_GAS,
    )
    .map(|(tx, _)| tx)
    .unwrap()
}

// ============================================================================
// CB-01: Capability Store
// ============================================================================

fn bench_capability_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("cb-01-capability-store");
    let store = CapabilityStore::new(
        Arc::new(ManualSlotClock::new(10)),
        Arc::new(InMemoryEventBus::new()),
    );
    let grant = CapabilityGrant::new([[1; 20]], RevealCondition(5));
    let payload = vec![0xab; 512];

    group.bench_function("commit_512b", |b| {
        b.iter(|| black_box(store.commit(payload.clone(), grant.clone(), PayloadKind::Bundle)))
    });

    let (data_ref, _) = store.commit(payload.clone(), grant.clone(), PayloadKind::Bundle);
    group.bench_function("resolve_granted", |b| {
        b.iter(|| black_box(store.resolve(data_ref, [1; 20]).is_ok()))
    });
    group.bench_function("resolve_denied", |b| {
        b.iter(|| black_box(store.resolve(data_ref, [2; 20]).is_err()))
    });
    group.finish();
}

// ============================================================================
// CB-02: Block envelope sealing
// ============================================================================

fn bench_envelope_seal(c: &mut Criterion) {
    let mut group = c.benchmark_group("cb-02-settlement");
    let key = Secp256k1KeyPair::generate();
    let args = BuildArgs {
        slot: 1,
        parent_hash: [1; 32],
        timestamp: 1_700_000_012,
        gas_limit: 30_000_000,
        extra_data: vec![],
        fee_recipient: [0xfe; 20],
    };

    for size in [10u64, 100, 500] {
        let transactions: Vec<_> = (0..size).map(|n| transfer(&key, n)).collect();
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("seal", size), &transactions, |b, txs| {
            b.iter(|| black_box(BlockEnvelope::seal(&args, txs.clone()).unwrap()))
        });
    }
    group.finish();
}

// ============================================================================
// Shared crypto
// ============================================================================

fn bench_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-crypto");
    let key = Secp256k1KeyPair::generate();
    let tx = transfer(&key, 0);

    group.bench_function("sign_transfer", |b| b.iter(|| black_box(transfer(&key, 1))));
    group.bench_function("recover_sender", |b| {
        b.iter(|| black_box(recover_sender(&tx).unwrap()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_capability_store,
    bench_envelope_seal,
    bench_signing
);
criterion_main!(benches);
