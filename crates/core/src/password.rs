//! Salted password hashing for the credential store.
//!
//! Hashes are `hex(HMAC-SHA512(key = salt, message = password))`. This is the
//! scheme the existing `users` rows were written with, so it is kept as-is
//! for verification compatibility. The salt is stored beside the hash.

use hmac::{Hmac, Mac};
use sha2::Sha512;

/// Number of random bytes in a freshly generated salt.
pub const SALT_BYTES: usize = 16;

type HmacSha512 = Hmac<Sha512>;

/// Generate a new random salt, hex-encoded.
pub fn generate_salt() -> String {
    let bytes: [u8; SALT_BYTES] = rand::random();
    hex::encode(bytes)
}

/// Hash `password` with `salt`, returning the lowercase hex digest.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut mac = keyed(salt);
    mac.update(password.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Check `password` against a stored hash and salt.
///
/// The comparison runs in constant time. A stored hash that is not valid hex
/// never verifies.
pub fn verify_password(password: &str, salt: &str, stored_hash: &str) -> bool {
    let Some(expected) = hex::decode(stored_hash) else {
        return false;
    };
    let mut mac = keyed(salt);
    mac.update(password.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

fn keyed(salt: &str) -> HmacSha512 {
    HmacSha512::new_from_slice(salt.as_bytes()).expect("HMAC accepts any key length")
}

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decode a hex string; `None` on odd length or non-hex characters.
    pub fn decode(s: &str) -> Option<Vec<u8>> {
        if s.len() % 2 != 0 {
            return None;
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
            .collect()
    }
}
