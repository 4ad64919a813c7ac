//! Seed resolution for stable board shuffles
//!
//! - `"random"`: fresh random seed per call, different tiles every
//!   request.
//! - `"today"`: token becomes the current UTC calendar date, so the
//!   board is stable per day and changes at UTC midnight.
//! - anything else: SHA-256 of the token, first four digest bytes as a
//!   big-endian u32. Stable across processes and restarts.

use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Resolve a seed token into a shuffle seed.
pub fn resolve_seed(token: &str) -> u64 {
    if token == "random" {
        return rand::thread_rng().gen::<u32>() as u64;
    }

    let token = if token == "today" {
        Utc::now().format("%Y-%m-%d").to_string()
    } else {
        token.to_string()
    };

    hash_token(&token)
}

fn hash_token(token: &str) -> u64 {
    let digest = Sha256::digest(token.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]) as u64
}
