// src/utils.rs
use crate::config::AnalysisContext;
use sha2::{Digest, Sha256};

/// Memo key for one analysis: the normalized source plus every context field.
/// CRLF and CR become LF before hashing so checkouts on any platform agree.
#[must_use]
pub fn fingerprint(source: &str, ctx: &AnalysisContext) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize_newlines(source).as_bytes());
    hasher.update([0u8]);
    hasher.update(format!("{ctx:?}").as_bytes());
    format!("{:x}", hasher.finalize())
}

fn normalize_newlines(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}
