//! Generate an Argon2id password hash for the admin account.
//!
//! Prints a ready-to-paste `.env` line:
//!
//! ```text
//! $ hash-password 'my-strong-password'
//! ADMIN_PASSWORD_HASH=$argon2id$v=19$...
//! ```

use clap::Parser;

use wpadmin_api::auth::password::{hash_password, validate_password_strength};

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Parser)]
#[command(
    name = "hash-password",
    about = "Generate the ADMIN_PASSWORD_HASH value for the .env file"
)]
struct Args {
    /// The admin password to hash.
    password: String,
}

fn main() {
    let args = Args::parse();

    if let Err(msg) = validate_password_strength(&args.password, MIN_PASSWORD_LENGTH) {
        eprintln!("error: {msg}");
        std::process::exit(1);
    }

    match hash_password(&args.password) {
        Ok(hash) => println!("ADMIN_PASSWORD_HASH={hash}"),
        Err(e) => {
            eprintln!("error: failed to hash password: {e}");
            std::process::exit(1);
        }
    }
}
