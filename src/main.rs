use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use clap::{Parser, Subcommand};
use log::{debug, info};
use pbkdf::{EncodedHash, HashError, HashFamily, Params};
use serde::Serialize;
use std::process::ExitCode;
mod auth;

#[derive(Debug, clap::Args)]
struct Pbkdf2Args {
    /// PBKDF2 iteration count (default: 120000)
    #[arg(long, env = "PBKDF_ITERATIONS")]
    iterations: Option<u32>,

    /// Derived key length in bytes (default: 32)
    #[arg(long = "key-len", env = "PBKDF_KEY_LEN")]
    key_len: Option<usize>,

    /// Salt length in bytes (default: 16)
    #[arg(long = "salt-len", env = "PBKDF_SALT_LEN")]
    salt_len: Option<usize>,
}

impl Pbkdf2Args {
    /// Unset flags stay zero and resolve to the library defaults.
    fn to_params(&self) -> Params {
        Params {
            iterations: self.iterations.unwrap_or_default(),
            key_len: self.key_len.unwrap_or_default(),
            salt_len: self.salt_len.unwrap_or_default(),
            hash: Some(HashFamily::Sha256),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pbkdf")]
#[command(version, about = "PBKDF2-HMAC-SHA256 password hashing.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password and prints the encoded hash
    Hash {
        #[command(flatten)]
        pbkdf2: Pbkdf2Args,
    },

    /// Checks a password against an encoded hash
    #[command(arg_required_else_help = true)]
    Verify { encoded: String },

    /// Prints a random base64 salt
    Salt {
        /// Salt length in bytes
        #[arg(short, long, default_value_t = 16, allow_negative_numbers = true)]
        length: i64,
    },

    /// Shows the parameters stored in an encoded hash
    #[command(arg_required_else_help = true)]
    Info {
        encoded: String,

        #[arg(required = false, long, default_value_t = false)]
        /// Print as JSON
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct HashInfo {
    algorithm: &'static str,
    iterations: u32,
    key_len: usize,
    salt_len: usize,
}

impl From<&EncodedHash> for HashInfo {
    fn from(parsed: &EncodedHash) -> Self {
        Self {
            algorithm: parsed.algorithm(),
            iterations: parsed.iterations(),
            key_len: parsed.key_len(),
            salt_len: parsed.salt().len(),
        }
    }
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let args = Cli::parse();

    match args.command {
        Commands::Hash { pbkdf2 } => {
            let params = pbkdf2.to_params().resolve();
            debug!(
                "hashing with pbkdf2-{} i={} l={} salt={}",
                params.hash.unwrap_or_default().name(),
                params.iterations,
                params.key_len,
                params.salt_len
            );

            let password = auth::read_new_password()?;
            let encoded = params.hash(password.as_bytes())?;
            drop(password);

            println!("{encoded}");
        }
        Commands::Verify { encoded } => {
            let password = auth::read_password()?;
            let matched = pbkdf::verify(password.as_bytes(), encoded.trim())?;
            drop(password);

            info!("verification finished, match={matched}");
            if matched {
                println!("match");
            } else {
                println!("mismatch");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Salt { length } => {
            let length = usize::try_from(length).map_err(|_| HashError::InvalidArgument)?;
            let salt = pbkdf::generate_salt(length)?;
            println!("{}", STANDARD_NO_PAD.encode(&salt));
        }
        Commands::Info { encoded, json } => {
            let parsed: EncodedHash = encoded.trim().parse()?;
            let info = HashInfo::from(&parsed);

            if json {
                let out = serde_json::to_string_pretty(&info)
                    .context("failed to serialize hash info")?;
                println!("{out}");
            } else {
                println!("Algorithm:  {}", info.algorithm);
                println!("Iterations: {}", info.iterations);
                println!("Key length: {} bytes", info.key_len);
                println!("Salt length: {} bytes", info.salt_len);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
