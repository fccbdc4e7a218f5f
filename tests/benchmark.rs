//! Benchmark runner and library re-export tests

use yespower::algorithm::{self, Error};
use yespower::benchmark::{self, header, HEADER_SIZE};
use yespower::{hash, Params};

#[test]
fn test_header_layout() {
    let h = header(0x0403_0201);
    assert_eq!(h.len(), HEADER_SIZE);
    assert_eq!(h[0], 0);
    assert_eq!(h[1], 3);
    assert_eq!(h[75], (75 * 3) as u8);
    assert_eq!(&h[76..], &[1, 2, 3, 4]);
}

#[test]
fn test_digest_xor_independent_of_threads() {
    let params = Params::new(16, 1);

    let single = benchmark::run(&params, 12, 1).unwrap();
    let multi = benchmark::run(&params, 12, 3).unwrap();

    assert_eq!(single.hashes, 12);
    assert_eq!(multi.hashes, 12);
    assert_eq!(multi.threads, 3);
    assert_eq!(single.digest_xor, multi.digest_xor);
}

#[test]
fn test_digest_xor_matches_direct_hashing() {
    let params = Params::new(32, 2).with_personalization("bench");
    let report = benchmark::run(&params, 5, 2).unwrap();

    let mut xor = [0u8; 32];
    for nonce in 0..5 {
        let digest = hash(&header(nonce), &params).unwrap();
        for (acc, byte) in xor.iter_mut().zip(digest.iter()) {
            *acc ^= byte;
        }
    }
    assert_eq!(report.digest_xor, hex::encode(xor));
    assert!(report.personalized);
}

#[test]
fn test_threads_clamped_to_count() {
    let params = Params::new(16, 1);

    let report = benchmark::run(&params, 2, 8).unwrap();
    assert_eq!(report.threads, 2);

    let report = benchmark::run(&params, 3, 0).unwrap();
    assert_eq!(report.threads, 1);
    assert_eq!(report.hashes, 3);
}

#[test]
fn test_benchmark_rejects_invalid_params() {
    let result = benchmark::run(&Params::new(1000, 8), 4, 2);
    assert!(matches!(result, Err(Error::InvalidParameter(_))));
}

#[test]
fn test_report_serializes() {
    let report = benchmark::run(&Params::new(16, 1), 1, 1).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["n"], 16);
    assert_eq!(json["r"], 1);
    assert_eq!(json["hashes"], 1);
    assert_eq!(json["digest_xor"].as_str().unwrap().len(), 64);
}

#[test]
fn test_reexport_matches_core() {
    let params = Params::new(64, 2);
    let input = b"re-export";
    assert_eq!(
        hash(input, &params).unwrap(),
        algorithm::hash(input, &params).unwrap()
    );
    assert_eq!(
        yespower::evaluate_cached(input, &params).unwrap(),
        algorithm::hash(input, &params).unwrap()
    );
}
