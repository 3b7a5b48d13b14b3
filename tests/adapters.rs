use std::io;

use hashbench::adapter::{self, Digest, Input};
use hashbench::hasher::{Blake2bMac256, Hash64, StreamHash, Unkeyed};
use hashbench::{
    Accumulator, BenchError, Case, HASH_BUFFER_SIZE, HIGHWAY_KEY_SIZE, KEY_SIZE, SEED,
};
use highway::HighwayHasher;
use proptest::prelude::*;
use twox_hash::XxHash64;

const ZERO_INPUT: [u8; HASH_BUFFER_SIZE] = [0u8; HASH_BUFFER_SIZE];
const ZERO_KEY: [u8; KEY_SIZE] = [0u8; KEY_SIZE];

fn input<'a>(data: &'a [u8], key: &'a [u8], seed: u64) -> Input<'a> {
    Input { data, key, seed }
}

fn as_u64(digest: Digest) -> u64 {
    match digest {
        Digest::U64(v) => v,
        other => panic!("expected a 64-bit digest, got {:?}", other),
    }
}

// --- Pinned digests ---

#[test]
fn test_seeded64_pinned_xxh64() {
    let mut guard = Accumulator::new();
    let digest =
        adapter::seeded64::<XxHash64>(&input(&ZERO_INPUT, &[], SEED), &mut guard).unwrap();
    assert_eq!(digest, Digest::U64(0x68ac_cc8a_311d_620c));
    // both xxh64 bindings must agree
    let other = adapter::seeded64::<xxhash_rust::xxh64::Xxh64>(
        &input(&ZERO_INPUT, &[], SEED),
        &mut guard,
    )
    .unwrap();
    assert_eq!(digest, other);
    assert_eq!(guard.sum(), 0x68ac_cc8a_311d_620c_u64.wrapping_mul(2));
}

#[test]
fn test_keyed_pinned_blake2b_mac() {
    let mut guard = Accumulator::new();
    let digest =
        adapter::keyed::<Blake2bMac256>(&input(&ZERO_INPUT, &ZERO_KEY, 0), &mut guard).unwrap();
    assert_eq!(
        digest.to_hex(),
        "fcaa65597ddab196c82e39ccdb7e447a9ff4d94d153f90adb543d17309324858"
    );
    assert_eq!(guard.sum(), 0xfc);
}

#[test]
fn test_keyed64_pinned_siphash24() {
    let mut guard = Accumulator::new();
    let digest = adapter::keyed64::<siphasher::sip::SipHasher24>(
        &input(&ZERO_INPUT, &ZERO_KEY, 0),
        &mut guard,
    )
    .unwrap();
    assert_eq!(digest, Digest::U64(0xe849_e8bb_6ffe_2567));
}

#[test]
fn test_keyed64_pinned_highwayhash() {
    let key = [0u8; HIGHWAY_KEY_SIZE];
    let mut guard = Accumulator::new();
    let digest =
        adapter::keyed64::<HighwayHasher>(&input(&ZERO_INPUT, &key, 0), &mut guard).unwrap();
    assert_eq!(digest, Digest::U64(0x1706_00dd_a777_514c));
    assert!(guard.check().is_ok());
}

#[test]
fn test_unkeyed_sha256_matches_independent_implementation() {
    let mut guard = Accumulator::new();
    let digest =
        adapter::unkeyed::<sha2::Sha256>(&input(&ZERO_INPUT, &[], 0), &mut guard).unwrap();
    assert_eq!(digest.to_hex(), sha256::digest(ZERO_INPUT.as_slice()));
}

// --- Fallible construction: errors propagate, no fallback instance ---

#[test]
fn test_keyed_rejects_oversized_key() {
    let key = [0u8; 65];
    let mut guard = Accumulator::new();
    let err = adapter::keyed::<Blake2bMac256>(&input(&ZERO_INPUT, &key, 0), &mut guard)
        .unwrap_err();
    assert!(matches!(err, BenchError::InvalidKey { len: 65, .. }));
    assert!(err.is_fatal());
    // nothing was hashed, so nothing reached the guard
    assert_eq!(guard.feeds(), 0);
}

#[test]
fn test_keyed64_rejects_short_key() {
    let key = [0u8; 15];
    let mut guard = Accumulator::new();
    let err = adapter::keyed64::<siphasher::sip::SipHasher13>(
        &input(&ZERO_INPUT, &key, 0),
        &mut guard,
    )
    .unwrap_err();
    assert!(matches!(err, BenchError::InvalidKey { len: 15, .. }));
    assert_eq!(guard.feeds(), 0);
}

#[test]
fn test_highwayhash_rejects_wrong_key_lengths() {
    for len in [KEY_SIZE, HIGHWAY_KEY_SIZE - 1, HIGHWAY_KEY_SIZE + 1] {
        let key = vec![0u8; len];
        let mut guard = Accumulator::new();
        let err = adapter::keyed64::<HighwayHasher>(&input(&ZERO_INPUT, &key, 0), &mut guard)
            .unwrap_err();
        assert!(matches!(err, BenchError::InvalidKey { len: l, .. } if l == len));
        assert!(err.is_fatal());
        assert_eq!(guard.feeds(), 0);
    }
}

#[test]
fn test_seeded32_rejects_a_seed_wider_than_32_bits() {
    let mut guard = Accumulator::new();
    let err = adapter::seeded32::<twox_hash::XxHash32>(
        &input(&ZERO_INPUT, &[], u64::MAX),
        &mut guard,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        BenchError::InvalidSeed {
            seed: u64::MAX,
            bits: 32
        }
    ));
    assert!(err.is_fatal());
    assert_eq!(guard.feeds(), 0);

    // the widest seed that fits still hashes
    adapter::seeded32::<twox_hash::XxHash32>(
        &input(&ZERO_INPUT, &[], u64::from(u32::MAX)),
        &mut guard,
    )
    .unwrap();
    assert_eq!(guard.feeds(), 1);
}

#[test]
fn test_malformed_key_case_fails_every_step() {
    let case = Case::keyed::<Blake2bMac256>("blake2b-256-mac/65", 65);
    let mut session = case.session();
    for _ in 0..3 {
        assert!(matches!(
            session.step(),
            Err(BenchError::InvalidKey { len: 65, .. })
        ));
    }
    assert_eq!(session.iterations(), 0);
}

// --- Write failures are returned, not retried ---

struct BrokenWriter;

impl Unkeyed for BrokenWriter {
    fn new() -> Self {
        BrokenWriter
    }
}

impl StreamHash for BrokenWriter {
    fn write(&mut self, _data: &[u8]) -> Result<(), BenchError> {
        Err(BenchError::Write(io::Error::new(
            io::ErrorKind::Other,
            "sink closed",
        )))
    }

    fn sum(self) -> Vec<u8> {
        vec![0xff]
    }
}

#[test]
fn test_write_failure_is_fatal() {
    let mut guard = Accumulator::new();
    let err = adapter::unkeyed::<BrokenWriter>(&input(&ZERO_INPUT, &[], 0), &mut guard)
        .unwrap_err();
    assert!(matches!(err, BenchError::Write(_)));
    assert!(err.is_fatal());
    assert_eq!(guard.feeds(), 0);
}

// --- Truncation ---

fn full_and_truncated(data: &[u8]) -> (u64, Digest, Digest, Digest) {
    let mut guard = Accumulator::new();
    let i = input(data, &[], 0);
    let full = as_u64(adapter::unkeyed64::<XxHash64>(&i, &mut guard).unwrap());
    let t32 = adapter::truncated::<XxHash64, 4>(&i, &mut guard).unwrap();
    let t16 = adapter::truncated::<XxHash64, 2>(&i, &mut guard).unwrap();
    let t8 = adapter::truncated::<XxHash64, 1>(&i, &mut guard).unwrap();
    (full, t32, t16, t8)
}

#[test]
fn test_truncation_matches_leading_bits() {
    let (full, t32, t16, t8) = full_and_truncated(&ZERO_INPUT);
    assert_eq!(full, 0x34c9_6acd_cadb_1bbb);
    assert_eq!(t32.to_bytes(), vec![0x34, 0xc9, 0x6a, 0xcd]);
    assert_eq!(t16.to_bytes(), vec![0x34, 0xc9]);
    assert_eq!(t8.to_bytes(), vec![0x34]);
}

#[test]
fn test_truncation_feeds_narrowed_value() {
    let mut guard = Accumulator::new();
    adapter::truncated::<XxHash64, 2>(&input(&ZERO_INPUT, &[], 0), &mut guard).unwrap();
    assert_eq!(guard.sum(), 0x34c9);
}

proptest! {
    #[test]
    fn truncation_is_a_prefix_of_the_full_digest(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let (full, t32, t16, t8) = full_and_truncated(&data);
        prop_assert_eq!(t32.to_bytes(), ((full >> 32) as u32).to_be_bytes().to_vec());
        prop_assert_eq!(t16.to_bytes(), ((full >> 48) as u16).to_be_bytes().to_vec());
        prop_assert_eq!(t8.to_bytes(), vec![(full >> 56) as u8]);
    }
}

// --- Guard with a degenerate hash ---

struct Zero64;

impl Unkeyed for Zero64 {
    fn new() -> Self {
        Zero64
    }
}

impl Hash64 for Zero64 {
    fn write(&mut self, _data: &[u8]) -> Result<(), BenchError> {
        Ok(())
    }

    fn sum64(&self) -> u64 {
        0
    }
}

#[test]
fn test_all_zero_digests_trip_the_guard() {
    let case = Case::unkeyed64::<Zero64>("zero");
    let mut session = case.session();
    for _ in 0..1_000 {
        assert_eq!(session.step().unwrap(), Digest::U64(0));
    }
    let err = session.finish().unwrap_err();
    assert!(matches!(err, BenchError::GuardFailure { iterations: 1_000 }));
    assert!(!err.is_fatal());
}
