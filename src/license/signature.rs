//! Tamper-evident signatures
//!
//! A fast 32-bit rolling hash over `secret|payload`. It is not collision or
//! forgery resistant: the secret ships with every client. It catches
//! corruption and hand edits, nothing more.

/// Secret shared by all clients unless the host configures another one
pub const DEFAULT_SIGNING_SECRET: &str = "ef-article-builder::premium-v1";

/// `h = h * 31 + unit` over UTF-16 code units, wrapping at 32 bits.
pub fn rolling_hash(input: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash as u32
}

/// Signs and verifies serialized records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    secret: String,
}

impl Signer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Eight lowercase hex digits
    pub fn sign(&self, payload: &str) -> String {
        format!("{:08x}", rolling_hash(&format!("{}|{}", self.secret, payload)))
    }

    pub fn verify(&self, signature: &str, payload: &str) -> bool {
        self.sign(payload) == signature
    }
}

impl Default for Signer {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNING_SECRET)
    }
}
