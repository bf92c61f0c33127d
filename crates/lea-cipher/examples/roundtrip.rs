//! Derives a key from a passphrase, encrypts a message and decrypts it back.

use lea_cipher::{decrypt, encrypt, Schedule};
use lea_core::hash_message;

fn main() {
    let key = hash_message(b"correct horse battery staple").expect("passphrase fits the window");
    println!("key digest: {key}");
    println!("schedule:\n{}", Schedule::from_key(&key));

    let message = b"grid permutation demo";
    let ciphertext = encrypt(message, &key);
    println!("ciphertext: {}", hex::encode(&ciphertext));

    let plaintext = decrypt(&ciphertext, &key);
    assert_eq!(plaintext, message);
    println!("example succeeded; plaintext recovered");
}
