use md5::{Digest, Md5};

/// Lowercase hex MD5 of `input`, as the scoring service expects for hashed identifiers.
pub fn md5_hex(input: &str) -> String {
    hex::encode(Md5::digest(input.as_bytes()))
}
