//! Command-line interface for the lea cipher.

#![forbid(unsafe_code)]

mod telemetry;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use lea_cipher::{
    cipher_block, decipher_block, encrypt, try_decrypt, KeyFile, Operation, Schedule,
};
use lea_core::{hash_message, KeyHash, WINDOW_BYTES};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

/// Grid permutation cipher and KeyHash digest.
#[derive(Parser)]
#[command(name = "lea", version, author, about = "Grid permutation cipher and KeyHash digest")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

/// Where the cipher key comes from.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct KeySource {
    /// Key string (at most 32 bytes), hashed into the cipher key.
    #[arg(short, long, value_name = "STRING")]
    key: Option<String>,
    /// Key file written by `lea keygen`.
    #[arg(long, value_name = "FILE")]
    key_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the KeyHash digest of a string or a file of at most 32 bytes.
    Hash {
        /// Text to hash.
        #[arg(long, conflicts_with = "input", required_unless_present = "input")]
        text: Option<String>,
        /// File to hash.
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Derive a key from a string and store it in a key file.
    Keygen {
        /// Key string (at most 32 bytes).
        #[arg(short, long, value_name = "STRING")]
        key: String,
        /// Output path for the key file.
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Encrypt a file.
    Enc {
        #[command(flatten)]
        key: KeySource,
        /// Plaintext input file.
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        /// Ciphertext output path.
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Decrypt a file (must be a multiple of 32 bytes).
    Dec {
        #[command(flatten)]
        key: KeySource,
        /// Ciphertext input file.
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        /// Plaintext output path.
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Print the operation schedule derived from a key.
    Schedule {
        #[command(flatten)]
        key: KeySource,
    },
    /// Compare the digests of two strings and count differing bits.
    Avalanche {
        /// First string.
        #[arg(long)]
        left: String,
        /// Second string.
        #[arg(long)]
        right: String,
    },
    /// Verify block inversion for random keys and blocks.
    Check {
        /// Number of random samples to test.
        #[arg(long, default_value_t = 64)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a local demo: random key string and message, encrypt, decrypt back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose)?;
    match cli.command {
        Commands::Hash { text, input } => cmd_hash(text.as_deref(), input.as_deref()),
        Commands::Keygen { key, out } => cmd_keygen(&key, &out),
        Commands::Enc { key, input, output } => cmd_enc(&key, &input, &output),
        Commands::Dec { key, input, output } => cmd_dec(&key, &input, &output),
        Commands::Schedule { key } => cmd_schedule(&key),
        Commands::Avalanche { left, right } => cmd_avalanche(&left, &right),
        Commands::Check { samples, seed } => cmd_check(samples, seed),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn cmd_hash(text: Option<&str>, input: Option<&Path>) -> Result<()> {
    let message = match (text, input) {
        (Some(text), _) => text.as_bytes().to_vec(),
        (None, Some(path)) => fs::read(path).with_context(|| format!("read {}", path.display()))?,
        (None, None) => bail!("either --text or --input is required"),
    };
    let digest = hash_message(&message).context("hash message")?;
    println!("{digest}");
    Ok(())
}

fn cmd_keygen(key: &str, out: &Path) -> Result<()> {
    let digest = key_from_str(key)?;
    let bytes = KeyFile::new(digest).to_bytes().context("serialize key file")?;
    fs::write(out, bytes).with_context(|| format!("write {}", out.display()))?;
    info!(path = %out.display(), "wrote key file");
    Ok(())
}

fn cmd_enc(source: &KeySource, input_path: &Path, output_path: &Path) -> Result<()> {
    let key = resolve_key(source)?;
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let ciphertext = encrypt(&data, &key);
    fs::write(output_path, &ciphertext)
        .with_context(|| format!("write {}", output_path.display()))?;
    info!(input = data.len(), output = ciphertext.len(), "encrypted");
    Ok(())
}

fn cmd_dec(source: &KeySource, input_path: &Path, output_path: &Path) -> Result<()> {
    let key = resolve_key(source)?;
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let plaintext = try_decrypt(&data, &key).context("decrypt")?;
    fs::write(output_path, &plaintext)
        .with_context(|| format!("write {}", output_path.display()))?;
    info!(input = data.len(), output = plaintext.len(), "decrypted");
    Ok(())
}

fn cmd_schedule(source: &KeySource) -> Result<()> {
    let key = resolve_key(source)?;
    println!("key: {key}");
    print!("{}", Schedule::from_key(&key));
    Ok(())
}

fn cmd_avalanche(left: &str, right: &str) -> Result<()> {
    let a = key_from_str(left)?;
    let b = key_from_str(right)?;
    println!("{left:?}: {a}");
    println!("{right:?}: {b}");
    println!("flips: {} of 256", a.distance(&b));
    Ok(())
}

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    for sample in 0..samples {
        let mut key_bytes = [0u8; 32];
        rng.fill_bytes(&mut key_bytes);
        let schedule = Schedule::from_key(&KeyHash::from_bytes(key_bytes));

        let mut block = [0u8; 32];
        rng.fill_bytes(&mut block);
        let encrypted = cipher_block(&block, &schedule);
        if decipher_block(&encrypted, &schedule.reversed()) != block {
            bail!("block inversion failed on sample {sample}");
        }
    }

    // Hand-built schedules with every offset exercise the full rotation range.
    let exhaustive = Schedule::new(core::array::from_fn(|i| Operation {
        row: i as u8,
        row_offset: i as u8,
        col: 15 - i as u8,
        col_offset: (i as u8 + 1) % 16,
    }));
    let mut block = [0u8; 32];
    rng.fill_bytes(&mut block);
    if decipher_block(&cipher_block(&block, &exhaustive), &exhaustive.reversed()) != block {
        bail!("block inversion failed on the exhaustive schedule");
    }

    println!("checked {samples} random samples");
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let key_string: String = (0..16)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect();
    let key = key_from_str(&key_string)?;

    // Aligned messages get no padding block; keep the demo unambiguous.
    let mut len = rng.gen_range(1..96);
    if len % 32 == 0 {
        len += 1;
    }
    let mut message = vec![0u8; len];
    rng.fill_bytes(&mut message);
    let ciphertext = encrypt(&message, &key);
    let decrypted = try_decrypt(&ciphertext, &key).context("decrypt demo ciphertext")?;

    println!("demo key: {key_string}");
    println!("digest: {key}");
    println!("plaintext: {}", hex::encode(&message));
    println!("ciphertext: {}", hex::encode(&ciphertext));
    println!("decrypted: {}", hex::encode(&decrypted));
    if decrypted != message {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn key_from_str(key: &str) -> Result<KeyHash> {
    if key.is_empty() {
        bail!("key string must not be empty");
    }
    if key.len() > WINDOW_BYTES {
        bail!("key string must be at most {WINDOW_BYTES} bytes, got {}", key.len());
    }
    hash_message(key.as_bytes()).context("derive key")
}

fn resolve_key(source: &KeySource) -> Result<KeyHash> {
    match (&source.key, &source.key_file) {
        (Some(key), _) => key_from_str(key),
        (None, Some(path)) => {
            let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
            let file = KeyFile::from_bytes(&bytes).context("deserialize key file")?;
            debug!(path = %path.display(), version = file.version, "loaded key file");
            Ok(file.digest)
        }
        (None, None) => bail!("either --key or --key-file is required"),
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => ChaCha20Rng::seed_from_u64(value),
        None => ChaCha20Rng::from_entropy(),
    }
}
