//! End-to-end behaviour of the cipher over KeyHash-derived keys.

use lea_cipher::{
    cipher_block, decipher_block, decrypt, encrypt, get_operations, try_decrypt, Operation,
    Schedule, BLOCK_BYTES,
};
use lea_core::{gen_keyhash, Bits256, KeyHash};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn key_from_str(text: &str) -> KeyHash {
    gen_keyhash(&Bits256::bitify(text), text.len())
}

fn random_key(rng: &mut ChaCha20Rng) -> KeyHash {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    KeyHash::from_bytes(bytes)
}

fn random_schedule(rng: &mut ChaCha20Rng) -> Schedule {
    Schedule::new(core::array::from_fn(|_| Operation::from_chunk(rng.gen())))
}

#[test]
fn frozen_key_schedule_prefix() {
    let key = key_from_str("secret");
    assert_eq!(
        key.hex_str(),
        "4444894E0B11102EA275369FE9CCC3B3D58777EA625495C6C358CF7D18C08382"
    );
    let schedule = get_operations(key.bits());
    assert_eq!(schedule.operations()[0], Operation::from_chunk(0x4444));
    assert_eq!(schedule.operations()[1], Operation::from_chunk(0x894e));
}

#[test]
fn frozen_ciphertext_padded_message() {
    let key = key_from_str("secret");
    let ciphertext = encrypt(b"attack at dawn", &key);
    assert_eq!(
        hex::encode(&ciphertext),
        "83c03252c130980e4444422a14a808c090398337680212525147614324341642"
    );
    assert_eq!(decrypt(&ciphertext, &key), b"attack at dawn");
}

#[test]
fn frozen_ciphertext_aligned_block() {
    let key = key_from_str("secret");
    let plaintext: Vec<u8> = (0u8..32).collect();
    let ciphertext = encrypt(&plaintext, &key);
    assert_eq!(
        hex::encode(&ciphertext),
        "0e9b1014221d018006c30c00895d0a043058c320e80f1014404600621e35181d"
    );
}

#[test]
fn random_buffers_round_trip() {
    let mut rng = ChaCha20Rng::from_seed([30u8; 32]);
    for _ in 0..200 {
        let key = random_key(&mut rng);
        let len = rng.gen_range(0..200);
        let mut data = vec![0u8; len];
        rng.fill_bytes(&mut data);
        // Aligned buffers are not padded, so keep their last byte out of the padding range.
        if len % BLOCK_BYTES == 0 {
            if let Some(last) = data.last_mut() {
                *last = 0;
            }
        }
        let encrypted = encrypt(&data, &key);
        assert_eq!(encrypted.len() % BLOCK_BYTES, 0);
        assert!(encrypted.len() >= data.len());
        assert_eq!(decrypt(&encrypted, &key), data, "len {len}");
    }
}

#[test]
fn random_blocks_invert_under_random_schedules() {
    let mut rng = ChaCha20Rng::from_seed([31u8; 32]);
    for _ in 0..500 {
        let schedule = random_schedule(&mut rng);
        let mut block = [0u8; BLOCK_BYTES];
        rng.fill_bytes(&mut block);
        let encrypted = cipher_block(&block, &schedule);
        assert_eq!(decipher_block(&encrypted, &schedule.reversed()), block);
    }
}

#[test]
fn cipher_preserves_bit_count() {
    // Rotations only permute bits.
    let mut rng = ChaCha20Rng::from_seed([32u8; 32]);
    let schedule = random_schedule(&mut rng);
    let mut block = [0u8; BLOCK_BYTES];
    rng.fill_bytes(&mut block);
    let ones = |b: &[u8]| b.iter().map(|x| x.count_ones()).sum::<u32>();
    assert_eq!(ones(&cipher_block(&block, &schedule)), ones(&block));
}

#[test]
fn ciphertext_length_guard() {
    let key = key_from_str("guard");
    for len in [1usize, 15, 31, 33, 63, 65] {
        let data = vec![0x5a; len];
        assert!(decrypt(&data, &key).is_empty(), "len {len}");
        assert!(try_decrypt(&data, &key).is_err(), "len {len}");
    }
}

#[test]
fn blocks_are_processed_independently() {
    let key = key_from_str("blocks");
    let first = [0x11u8; BLOCK_BYTES];
    let second = [0x22u8; BLOCK_BYTES];
    let mut both = first.to_vec();
    both.extend_from_slice(&second);
    let encrypted = encrypt(&both, &key);
    assert_eq!(&encrypted[..BLOCK_BYTES], encrypt(&first, &key).as_slice());
    assert_eq!(&encrypted[BLOCK_BYTES..], encrypt(&second, &key).as_slice());
}

#[test]
fn encryption_is_deterministic() {
    let key = key_from_str("repeat");
    let data = b"the same bytes every time";
    assert_eq!(encrypt(data, &key), encrypt(data, &key));
}

#[test]
fn similar_key_strings_give_different_ciphertext() {
    let data: Vec<u8> = (0u8..64).collect();
    assert_ne!(
        encrypt(&data, &key_from_str("password1")),
        encrypt(&data, &key_from_str("password2"))
    );
}

#[test]
fn wrong_key_does_not_recover_plaintext() {
    let data = b"no integrity signal here";
    let encrypted = encrypt(data, &key_from_str("right"));
    let decrypted = decrypt(&encrypted, &key_from_str("wrong"));
    assert_ne!(decrypted.as_slice(), data.as_slice());
}
