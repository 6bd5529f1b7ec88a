//! Drawer session identifier generation and validation.

use rand::RngCore;

/// Length of random bytes before hex encoding.
const SESSION_ID_BYTES: usize = 16;

/// Generates a random session identifier (32 lowercase hex characters).
///
/// # Examples
///
/// ```ignore
/// let id = generate_session_id();
/// assert_eq!(id.len(), 32);
/// assert!(is_valid_session_id(&id));
/// ```
pub fn generate_session_id() -> String {
    let mut buffer = [0u8; SESSION_ID_BYTES];
    rand::rng().fill_bytes(&mut buffer);
    hex::encode(buffer)
}

/// Returns whether a cookie value looks like an id from [`generate_session_id`].
///
/// Anything else is discarded and replaced with a fresh session.
pub fn is_valid_session_id(id: &str) -> bool {
    id.len() == SESSION_ID_BYTES * 2
        && id
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
