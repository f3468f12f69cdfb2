//! Audit trail constants and integrity hashing.
//!
//! Every workflow mutation appends an entry to the data point's audit
//! trail. Entries are append-only and each carries a SHA-256 hash chained
//! over the previous entry's hash, so after-the-fact edits are detectable.

use sha2::{Digest, Sha256};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Action type constants
// ---------------------------------------------------------------------------

/// Known action types for audit trail entries.
pub mod action_types {
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const SUBMIT: &str = "submit";
    pub const MARK_IN_REVIEW: &str = "mark_in_review";
    pub const APPROVE: &str = "approve";
    pub const REJECT: &str = "reject";
    pub const REQUEST_CHANGES: &str = "request_changes";
}

// ---------------------------------------------------------------------------
// Integrity hash computation
// ---------------------------------------------------------------------------

/// Known seed value for the first entry in a hash chain.
const CHAIN_SEED: &str = "MEL_AUDIT_CHAIN_SEED_V1";

/// Hex-encoded SHA-256 digest of `bytes`.
fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Canonical string representation of an audit entry's content.
///
/// The integrity hash covers this string, so its format is part of the
/// chain contract and must not change for existing data.
pub fn canonical_entry_data(
    action: &str,
    user_id: DbId,
    timestamp: &Timestamp,
    comment: Option<&str>,
) -> String {
    format!(
        "{action}|{user_id}|{}|{}",
        timestamp.to_rfc3339(),
        comment.unwrap_or("")
    )
}

/// Compute the SHA-256 integrity hash for an audit entry.
///
/// `prev_hash` is the hash of the previous entry in the trail, or `None`
/// for the first entry (which chains from a known seed).
pub fn compute_integrity_hash(prev_hash: Option<&str>, entry_data: &str) -> String {
    let prev = prev_hash.unwrap_or(CHAIN_SEED);
    sha256_hex(format!("{prev}|{entry_data}").as_bytes())
}

// ---------------------------------------------------------------------------
// Chain verification
// ---------------------------------------------------------------------------

/// Result of verifying an audit trail's hash chain.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChainVerification {
    /// Number of entries checked.
    pub verified_entries: usize,
    /// Whether every entry's hash matched the recomputed chain.
    pub chain_valid: bool,
    /// Zero-based index of the first entry where the chain breaks, if any.
    pub first_break: Option<usize>,
}

/// Recompute the hash chain over `(stored_hash, entry_data)` pairs and
/// report the first mismatch.
pub fn verify_chain<'a, I>(entries: I) -> ChainVerification
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut prev: Option<String> = None;
    let mut count = 0usize;

    for (index, (stored_hash, entry_data)) in entries.into_iter().enumerate() {
        let expected = compute_integrity_hash(prev.as_deref(), &entry_data);
        if expected != stored_hash {
            return ChainVerification {
                verified_entries: index,
                chain_valid: false,
                first_break: Some(index),
            };
        }
        prev = Some(expected);
        count = index + 1;
    }

    ChainVerification {
        verified_entries: count,
        chain_valid: true,
        first_break: None,
    }
}
