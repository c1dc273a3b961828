#![feature(test)]

extern crate test;

use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use rsa_primitives::{
    primitives::{emsa_pkcs1v15_encode, mgf1},
    HashAlgorithm, KeyGenerator, RsaConfig, RsaPrivateKey,
};
use test::Bencher;

#[bench]
fn bench_rsa_1024_gen_key(b: &mut Bencher) {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    b.iter(|| {
        let key = RsaPrivateKey::new(&mut rng, 1024).unwrap();
        test::black_box(key);
    });
}

#[bench]
fn bench_rsa_2048_gen_key(b: &mut Bencher) {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    b.iter(|| {
        let key = RsaPrivateKey::new(&mut rng, 2048).unwrap();
        test::black_box(key);
    });
}

#[bench]
fn bench_rsa_2048_gen_key_4_primes(b: &mut Bencher) {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let config = RsaConfig {
        smallest_prime_bits: 512,
        ..RsaConfig::default()
    };
    let generator = KeyGenerator::new(&config);

    b.iter(|| {
        let key = generator.generate(&mut rng, 2048).unwrap();
        test::black_box(key);
    });
}

#[bench]
fn bench_mgf1_sha256_256(b: &mut Bencher) {
    let seed = [0x5au8; 32];

    b.iter(|| {
        let mask = mgf1(&seed, 256, HashAlgorithm::Sha256).unwrap();
        test::black_box(mask);
    });
}

#[bench]
fn bench_emsa_pkcs1v15_sha256_2048(b: &mut Bencher) {
    b.iter(|| {
        let em = emsa_pkcs1v15_encode(b"testing", 256, HashAlgorithm::Sha256).unwrap();
        test::black_box(em);
    });
}
