// astrars/src/ids.rs

//! Run-id minting.
//!
//! Every generator and simulation run gets an id of the form
//! `YYYY-MM-DD-xxxxxxxx`; the date keeps run directories browsable, the
//! suffix keeps concurrent runs from colliding. The suffix hashes the
//! creation instant and the process id, so two processes minting in the
//! same nanosecond still diverge.

use chrono::Utc;
use std::hash::Hasher;
use twox_hash::XxHash64;

/// Mint a fresh run id.
pub fn mint_run_id() -> String {
    let now = Utc::now();
    let mut hasher = XxHash64::with_seed(0);
    hasher.write_i64(now.timestamp_nanos_opt().unwrap_or_default());
    hasher.write_u32(std::process::id());
    let suffix = (hasher.finish() & 0xffff_ffff) as u32;

    format!("{}-{:08x}", now.format("%Y-%m-%d"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_a_date_prefix_and_hex_suffix() {
        let id = mint_run_id();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].len(), 4);
        assert_eq!(parts[3].len(), 8);
        assert!(parts[3].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn consecutive_ids_differ() {
        assert_ne!(mint_run_id(), mint_run_id());
    }
}
