//! Cryptographic operations for webhook secrets and payload signing.
//!
//! - Secret and delivery-id generation from the OS CSPRNG
//! - HMAC-SHA256 computation for webhook payload signatures

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Byte length of generated secrets and delivery ids (hex output doubles this).
const TOKEN_BYTES: usize = 32;

// ---------------------------------------------------------------------------
// Random token generation
// ---------------------------------------------------------------------------

/// Generate a new subscriber signing secret: 32 random bytes as 64 lowercase
/// hex characters.
///
/// SECURITY: Uses `OsRng` directly from the operating system's CSPRNG.
/// The value is returned to the registering caller exactly once and is never
/// readable again through the API.
pub fn generate_secret() -> String {
    random_hex()
}

/// Generate a unique identifier for one delivery attempt, carried in the
/// `webhook-id` header. Fresh per attempt, never reused.
pub fn generate_delivery_id() -> String {
    random_hex()
}

fn random_hex() -> String {
    use rand::rngs::OsRng;
    use rand::RngCore;
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

// ---------------------------------------------------------------------------
// HMAC-SHA256 payload signing
// ---------------------------------------------------------------------------

/// Compute the HMAC-SHA256 signature of a webhook request body.
///
/// The signature must cover the exact byte sequence that is transmitted;
/// signing a re-serialized copy of the payload breaks receiver verification.
/// Returns a lowercase hex-encoded signature string.
pub fn sign_payload(secret: &str, body: &[u8]) -> String {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");

    mac.update(body);

    hex::encode(mac.finalize().into_bytes())
}

/// Verify an HMAC-SHA256 signature using constant-time comparison.
///
/// Returns true if the expected signature matches the computed one.
pub fn verify_payload(expected_hex: &str, secret: &str, body: &[u8]) -> bool {
    let computed = sign_payload(secret, body);
    constant_time_eq(expected_hex.as_bytes(), computed.as_bytes())
}

/// Constant-time byte comparison to prevent timing attacks.
///
/// SECURITY: Uses the `subtle` crate for proper constant-time comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
