//! MD5 checksum utility for migration scripts.
//!
//! MD5 hex is the checksum format drivers record in their history stores.

use md5::{Digest, Md5};

/// Compute the MD5 checksum of a script as lowercase hex
pub fn compute_checksum(s: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(s.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}
