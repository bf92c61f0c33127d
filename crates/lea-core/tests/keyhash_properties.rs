//! Digest-level behaviour of the KeyHash engine.
//!
//! Expected hex values are frozen snapshots: any change in output is a
//! compatibility break for keys derived by earlier builds.

use lea_core::{gen_keyhash, hash_message, Bits256, KeyHash};

fn hash_str(text: &str) -> KeyHash {
    gen_keyhash(&Bits256::bitify(text), text.len())
}

fn longest_run(key: &KeyHash) -> usize {
    let bits = key.bits();
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;
    for i in 0..256 {
        let bit = bits.bit(i);
        current = if previous == Some(bit) { current + 1 } else { 1 };
        previous = Some(bit);
        longest = longest.max(current);
    }
    longest
}

#[test]
fn frozen_digest_abc() {
    assert_eq!(
        hash_str("abc").hex_str(),
        "2BBC105C20268FC204F85A568126F0110B29C511055CC37CD89174C044122C78"
    );
}

#[test]
fn frozen_digest_hello_world() {
    assert_eq!(
        hash_str("hello world").hex_str(),
        "B52610C82E182A3F172AEC4323FA841A0108C249D8D8C5178ECC1E54FC4C8F0D"
    );
}

#[test]
fn frozen_digest_single_byte() {
    assert_eq!(
        hash_str("a").hex_str(),
        "74ED998975C2EF26C6A39522199679EDF70C4E0D43F02B131C442BFA774546F4"
    );
    assert_eq!(
        gen_keyhash(&Bits256::zero(), 1).hex_str(),
        "B58136FB71DB001D7074D91E2E752A715B4E8E2FFC0011956A08005CAE092BFB"
    );
}

#[test]
fn avalanche_on_last_character() {
    let flips = hash_str("abc").distance(&hash_str("abd"));
    assert!(flips >= 100, "avalanche weak: {flips} flips for 'abc' vs 'abd'");
}

#[test]
fn avalanche_on_appended_character() {
    let flips = hash_str("hello world").distance(&hash_str("hello world!"));
    assert!(
        flips >= 100,
        "avalanche weak: {flips} flips for 'hello world' vs 'hello world!'"
    );
}

#[test]
fn avalanche_on_low_bit_of_integer() {
    let a = gen_keyhash(&Bits256::from_words([254, 0, 0, 0]), 32);
    let b = gen_keyhash(&Bits256::from_words([255, 0, 0, 0]), 32);
    let flips = a.distance(&b);
    assert!(flips >= 100, "avalanche weak: {flips} flips for 254 vs 255");
}

#[test]
fn every_single_bit_change_avalanches() {
    let base = Bits256::bitify("abc");
    let reference = gen_keyhash(&base, 3);
    for i in 0..24 {
        let mut changed = base;
        changed.flip_bit(i);
        let flips = reference.distance(&gen_keyhash(&changed, 3));
        assert!(flips >= 100, "bit {i}: only {flips} flips");
    }
}

#[test]
fn no_long_runs_in_digest() {
    for text in ["hello world", "abc", "foobar", "a"] {
        let run = longest_run(&hash_str(text));
        assert!(run <= 20, "run of {run} identical bits for {text:?}");
    }
}

#[test]
fn zero_input_is_not_degenerate() {
    let key = gen_keyhash(&Bits256::zero(), 1);
    assert_ne!(key.bits().count_ones(), 0);
    assert_ne!(key.bits().count_ones(), 256);
}

#[test]
fn permuted_input_does_not_collide() {
    let a = hash_str("foobar");
    let b = hash_str("barfoo");
    assert_ne!(a, b);
    let flips = a.distance(&b);
    assert!(flips >= 50, "weak difference: {flips} flips for 'foobar' vs 'barfoo'");
}

#[test]
fn repeated_calls_are_identical() {
    let input = Bits256::bitify("determinism");
    let first = gen_keyhash(&input, 11);
    for _ in 0..8 {
        assert_eq!(gen_keyhash(&input, 11), first);
    }
}

#[test]
fn bytes_past_declared_length_are_ignored() {
    let short = gen_keyhash(&Bits256::bitify("ab"), 2);
    assert_eq!(gen_keyhash(&Bits256::bitify("abXYZ"), 2), short);
    assert_eq!(gen_keyhash(&Bits256::bitify(&"ab".repeat(16)), 32), short);
}

#[test]
fn declared_length_changes_digest() {
    let input = Bits256::bitify("abc");
    assert_ne!(gen_keyhash(&input, 3), gen_keyhash(&input, 4));
}

#[test]
fn hash_message_matches_bitify() {
    assert_eq!(hash_message(b"hello world").unwrap(), hash_str("hello world"));
}
