// Codec benchmarks for the TFChain protocol types.
//
// Covers both binary encoders, JSON decoding through the transaction factory,
// signature hashing and merkle roots at various sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};

use tfchain_protocol::crypto::MerkleTree;
use tfchain_protocol::encoding::{rivine_encode, sia_encode};
use tfchain_protocol::transaction::{
    SignatureExtra, TransactionBuilder, TransactionFactory, TransactionVariant,
};
use tfchain_protocol::types::{
    ConditionFactory, Currency, FulfillmentFactory, Hash, PublicKey, Signature,
};

fn sample_transfer(inputs: usize) -> tfchain_protocol::transaction::TransactionV1 {
    let key = PublicKey::ed25519([7; 32]);
    let mut builder = TransactionBuilder::new();
    for i in 0..inputs {
        let mut parent = [0u8; 32];
        parent[..8].copy_from_slice(&(i as u64).to_le_bytes());
        builder = builder.coin_input(
            Hash::from(parent),
            FulfillmentFactory::single_signature_new(key, Signature::new(vec![0xab; 64])),
        );
    }
    builder
        .pay_to(key.unlockhash(), Currency::from_tft(42))
        .miner_fee(Currency::from_tft(1))
        .arbitrary_data(b"benchmark".to_vec())
        .build()
        .expect("valid transaction")
}

fn bot_registration_json() -> Value {
    json!({"version": 144, "data": {
        "addresses": ["91.198.174.192", "example.org"],
        "names": ["chatbot.example"],
        "nrofmonths": 1,
        "txfee": "1000000000",
        "coininputs": [{
            "parentid": "a3c8f44d64c0636018a929d2caeec09fb9698bfdcbfa3a8225585a51e09ee563",
            "fulfillment": {"type": 1, "data": {
                "publickey": "ed25519:d285f92d6d449d9abb27f4c6cf82713cec0696d62b8c123f1627e054dc6d7780",
                "signature": "909a7df820ec3cee1c99bd2c297b938f830da891439ef7d78452e29efb0c7e593683274c356f72d3b627c2954a24b2bc2276fed47b24cd62816c540c88f13d05"
            }}
        }],
        "refundcoinoutput": {"value": "99999899000000000", "condition": {"type": 1, "data": {
            "unlockhash": "01b49da2ff193f46ee0fc684d7a6121a8b8e324144dffc7327471a4da79f1730960edcb2ce737f"
        }}},
        "identification": {
            "publickey": "ed25519:00bde9571b30e1742c41fcca8c730183402d967df5b17b5f4ced22c677806614",
            "signature": "98e71668dfe7726a357039d7c0e871b6c0ca8fa49dc1fcdccb5f23f5f0a5cab95cfcfd72a9fd2c5045ba899ecb0207ff01125a0151f3e35e3c6e13a7538b340a"
        }
    }})
}

fn bench_condition_encoding(c: &mut Criterion) {
    let condition = ConditionFactory::from_json(&json!({"type": 4, "data": {
        "unlockhashes": [
            "01e89843e4b8231a01ba18b254d530110364432aafab8206bea72e5a20eaa55f70b1ccc65e2105",
            "01a6a6c5584b2bfbd08738996cd7930831f958b9a5ed1595525236e861c1a0dc353bdcf54be7d8"
        ],
        "minimumsignaturecount": 2
    }}))
    .expect("valid condition");

    c.bench_function("condition/sia_encode", |b| {
        b.iter(|| sia_encode(&condition).unwrap());
    });
    c.bench_function("condition/rivine_encode", |b| {
        b.iter(|| rivine_encode(&condition).unwrap());
    });
    c.bench_function("condition/unlockhash", |b| {
        b.iter(|| condition.unlockhash().unwrap());
    });
}

fn bench_transaction_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("transaction/v1_binary_encode");

    for inputs in [1, 10, 100] {
        let txn = sample_transfer(inputs);
        group.throughput(Throughput::Elements(inputs as u64));
        group.bench_with_input(BenchmarkId::from_parameter(inputs), &txn, |b, txn| {
            b.iter(|| txn.binary_encode().unwrap());
        });
    }

    group.finish();
}

fn bench_signature_hash(c: &mut Criterion) {
    let transfer = sample_transfer(10);
    c.bench_function("transaction/v1_signature_hash", |b| {
        b.iter(|| transfer.signature_hash_get(SignatureExtra::InputIndex(3)).unwrap());
    });

    let registration = TransactionFactory::from_json(&bot_registration_json()).unwrap();
    c.bench_function("transaction/v144_signature_hash", |b| {
        b.iter(|| registration.signature_hash_get(SignatureExtra::Sender).unwrap());
    });
}

fn bench_json_decoding(c: &mut Criterion) {
    let value = bot_registration_json();
    c.bench_function("transaction/v144_from_json", |b| {
        b.iter(|| TransactionFactory::from_json(&value).unwrap());
    });

    let rendered = sample_transfer(10).json();
    c.bench_function("transaction/v1_from_json", |b| {
        b.iter(|| TransactionFactory::from_json(&rendered).unwrap());
    });
}

fn bench_merkle_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle/root");

    for leaves in [8, 64, 512] {
        let data: Vec<[u8; 32]> = (0..leaves).map(|i| [i as u8; 32]).collect();
        group.throughput(Throughput::Elements(leaves as u64));
        group.bench_with_input(BenchmarkId::from_parameter(leaves), &data, |b, data| {
            b.iter(|| {
                let mut tree = MerkleTree::new();
                for leaf in data {
                    tree.push(leaf);
                }
                tree.root()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_condition_encoding,
    bench_transaction_encoding,
    bench_signature_hash,
    bench_json_decoding,
    bench_merkle_root,
);
criterion_main!(benches);
