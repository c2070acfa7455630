//! Key encoding for the entry and index trees.

use crate::entry::{EntryId, ENTRY_ID_SIZE};

/// Size of an encoded catalog number key.
pub const NO_KEY_SIZE: usize = 4;

/// Separator between the name and the entry ID in name index keys.
const NAME_SEPARATOR: u8 = 0;

/// Encode a catalog number.
///
/// Big-endian encoding makes lexicographic key order match numeric order,
/// so iterating the number index yields entries sorted by `no`.
pub fn encode_no(no: u32) -> [u8; NO_KEY_SIZE] {
    no.to_be_bytes()
}

/// Decode an entry ID stored as a key or index value.
pub fn decode_id(bytes: &[u8]) -> Option<EntryId> {
    let bytes: [u8; ENTRY_ID_SIZE] = bytes.try_into().ok()?;
    Some(EntryId::from_bytes(bytes))
}

/// Prefix shared by all name index keys for `name`.
///
/// Format: `name\0`
pub fn name_prefix(name: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(name.len() + 1);
    key.extend_from_slice(name.as_bytes());
    key.push(NAME_SEPARATOR);
    key
}

/// Name index key for one entry.
///
/// Format: `name\0entry_id`
pub fn name_key(name: &str, id: &EntryId) -> Vec<u8> {
    let mut key = name_prefix(name);
    key.extend_from_slice(id.as_bytes());
    key
}

/// Extract the entry ID from a name index key, given the prefix it was found under.
///
/// Returns `None` for keys belonging to a longer name that shares the prefix.
pub fn id_from_name_key(prefix: &[u8], key: &[u8]) -> Option<EntryId> {
    if key.len() != prefix.len() + ENTRY_ID_SIZE {
        return None;
    }
    decode_id(&key[prefix.len()..])
}

/// Get current timestamp in microseconds since Unix epoch.
pub fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}
