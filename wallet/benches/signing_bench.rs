// Signing-path benchmarks for the Keel wallet.
//
// Covers phrase-to-key derivation, the transaction digest, Ed25519 signing
// and verification, and password sealing at a few Argon2 cost levels.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use keel_wallet::crypto::encryption::{open_with_password, seal_with_password};
use keel_wallet::crypto::keys::WalletKeypair;
use keel_wallet::crypto::signatures::{sign, sign_with, verify};
use keel_wallet::crypto::KdfParams;
use keel_wallet::identity::mnemonic;
use keel_wallet::transaction::{
    encode, sign_transaction, TransactionBuilder, TransactionData, TransactionFields,
};

const PHRASE: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn bench_mnemonic_derive(c: &mut Criterion) {
    c.bench_function("mnemonic/derive_keypair", |b| {
        b.iter(|| mnemonic::derive(PHRASE).unwrap());
    });
}

fn bench_digest(c: &mut Criterion) {
    let sender = [1u8; 32];
    let receiver = [2u8; 32];
    let fields = TransactionFields {
        sender: &sender,
        receiver: &receiver,
        nonce: 42,
        data: TransactionData::NativeTransfer { amount: 1_000_000 },
    };

    c.bench_function("codec/encode_digest", |b| {
        b.iter(|| encode(&fields).unwrap());
    });
}

fn bench_sign_digest(c: &mut Criterion) {
    let keypair = WalletKeypair::generate();
    let secret = keypair.secret_key_hex();
    let digest = [7u8; 32];

    c.bench_function("ed25519/sign_digest_keypair", |b| {
        b.iter(|| sign_with(&keypair, &digest));
    });
    c.bench_function("ed25519/sign_digest_hex_key", |b| {
        b.iter(|| sign(&digest, &secret).unwrap());
    });
}

fn bench_verify_signature(c: &mut Criterion) {
    let keypair = WalletKeypair::generate();
    let digest = [7u8; 32];
    let signature = sign_with(&keypair, &digest);
    let public_key = keypair.public_key();

    c.bench_function("ed25519/verify_signature", |b| {
        b.iter(|| verify(&digest, &signature, &public_key));
    });
}

fn bench_sign_transaction(c: &mut Criterion) {
    let keypair = WalletKeypair::generate();

    c.bench_function("transaction/build_and_sign", |b| {
        b.iter(|| {
            let mut tx = TransactionBuilder::native_transfer(1_000_000)
                .sender(keypair.public_key().as_bytes())
                .receiver(&[2u8; 32])
                .nonce(42)
                .build()
                .unwrap();
            sign_transaction(&mut tx, &keypair).unwrap();
        });
    });
}

fn bench_seal_secret(c: &mut Criterion) {
    let mut group = c.benchmark_group("vault/seal_open");
    group.sample_size(10);

    let levels = [
        ("light", KdfParams::light()),
        ("default", KdfParams::default()),
    ];
    for (name, params) in levels {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(name), &params, |b, params| {
            b.iter(|| {
                let sealed = seal_with_password("Xk9$mQ2vWp!7", &[9u8; 32], params).unwrap();
                open_with_password("Xk9$mQ2vWp!7", &sealed).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_mnemonic_derive,
    bench_digest,
    bench_sign_digest,
    bench_verify_signature,
    bench_sign_transaction,
    bench_seal_secret,
);
criterion_main!(benches);
