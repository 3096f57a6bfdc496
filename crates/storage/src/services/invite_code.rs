use rand::Rng;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated codes. 36^12 keeps codes unguessable by enumeration.
pub const INVITE_CODE_LEN: usize = 12;

/// Draws a fresh invite code from the thread-local CSPRNG.
pub fn generate() -> String {
    let mut rng = rand::rng();
    (0..INVITE_CODE_LEN)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

/// Cheap shape check so malformed codes never reach the database.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == INVITE_CODE_LEN && code.bytes().all(|b| ALPHABET.contains(&b))
}
