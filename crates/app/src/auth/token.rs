//! API token generation and hashing.

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "sr";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

/// Generate a new raw bearer token.
#[must_use]
pub fn generate_api_token() -> String {
    let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut bytes);

    let secret: String = bytes.iter().map(|byte| format!("{byte:02x}")).collect();

    format!("{API_TOKEN_PREFIX}_{secret}")
}

/// Hash a raw bearer token for storage and lookup.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_prefixed_and_unique() {
        let first = generate_api_token();
        let second = generate_api_token();

        assert!(first.starts_with("sr_"));
        assert_eq!(first.len(), API_TOKEN_PREFIX.len() + 1 + API_TOKEN_SECRET_BYTES * 2);
        assert_ne!(first, second);
    }

    #[test]
    fn hash_is_stable_hex_sha256() {
        assert_eq!(
            hash_api_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
