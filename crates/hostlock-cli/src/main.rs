//! Hostlock CLI - encrypt, decrypt and migrate stored host credentials
//!
//! A thin front-end over `hostlock-core`, useful for inspecting a
//! configuration file by hand and for re-encrypting credentials
//! written by older releases without going through the GUI.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::Password;

use hostlock_core::{decrypt, encrypt, Scheme, VERSION};

/// Hostlock - credential protection for stored host passwords
#[derive(Parser)]
#[command(name = "hostlock")]
#[command(version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Master password (prompted interactively when omitted)
    #[arg(short, long, global = true, env = "HOSTLOCK_PASSWORD")]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a credential in the current envelope format
    Encrypt {
        /// The plaintext credential
        #[arg(value_name = "TEXT")]
        plaintext: String,
    },

    /// Decrypt a credential envelope
    Decrypt {
        /// The base64 envelope from the configuration file
        #[arg(value_name = "ENVELOPE")]
        envelope: String,

        /// Stored format version for this credential
        #[arg(short = 'f', long = "format-version", default_value_t = 1)]
        format_version: i64,
    },

    /// Decrypt with the stored version and re-encrypt in the current format
    Reencrypt {
        /// The base64 envelope from the configuration file
        #[arg(value_name = "ENVELOPE")]
        envelope: String,

        /// Stored format version for this credential
        #[arg(short = 'f', long = "format-version", default_value_t = 0)]
        format_version: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let password = match cli.password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Master password")
            .interact()
            .context("failed to read password")?,
    };

    match cli.command {
        Commands::Encrypt { plaintext } => {
            let envelope = encrypt(&password, &plaintext)?;
            println!("{envelope}");
        }
        Commands::Decrypt {
            envelope,
            format_version,
        } => {
            let scheme = Scheme::from_version(format_version)?;
            let plaintext = decrypt(&password, &envelope, scheme)?;
            println!("{plaintext}");
        }
        Commands::Reencrypt {
            envelope,
            format_version,
        } => {
            let scheme = Scheme::from_version(format_version)?;
            let plaintext = decrypt(&password, &envelope, scheme)
                .context("could not decrypt with the given format version")?;
            let reencrypted = encrypt(&password, &plaintext)?;
            println!("{reencrypted}");
        }
    }

    Ok(())
}
