use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};

/// Entropy of a generated invitation token.
const TOKEN_BYTES: usize = 32;

///
/// Generate a cryptographically random, URL-safe invitation token.
///
/// 32 bytes of OS entropy make a collision with an existing token
/// negligible; the unique index on the token column still catches the
/// astronomically rare case, and the caller retries generation then.
///
pub fn generate_invitation_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);

    URL_SAFE_NO_PAD.encode(bytes)
}

///
/// Compose the externally shareable invitation link for a token.
///
pub fn invitation_url(base_url: &str, token: &str) -> String {
    format!("{}/auth?invite={}", base_url.trim_end_matches('/'), token)
}
