//! Labeled HMAC-SHA256 used by the KEM transform.
//!
//! Every call keys HMAC with the data and authenticates a 2-byte label:
//! - G: derive the ephemeral scalar from `m || pk`
//! - H: derive the shared secret from `m || ct` (or `S || ct` on rejection)
//! - F: derive the message mask from the SIDH j-invariant

use crate::params::{CIPHERTEXT_SIZE, MSG_LEN};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Ephemeral scalar label.
pub(crate) const G: [u8; 2] = [0, 0];

/// Shared secret label.
pub(crate) const H: [u8; 2] = [1, 0];

/// Mask label.
pub(crate) const F: [u8; 2] = [2, 0];

/// Longest key any caller builds: a message or `S` followed by a ciphertext.
const MAX_KEY: usize = MSG_LEN + CIPHERTEXT_SIZE;

/// `HMAC-SHA256(key = parts[0] || parts[1] || ..., label)`, truncated to `out.len()`.
///
/// # Panics
/// Panics if the parts exceed [`MAX_KEY`] bytes or `out` is longer than 32.
pub(crate) fn labeled(parts: &[&[u8]], label: &[u8; 2], out: &mut [u8]) {
    let mut key = Zeroizing::new([0u8; MAX_KEY]);
    let mut len = 0;
    for part in parts {
        key[len..len + part.len()].copy_from_slice(part);
        len += part.len();
    }

    let mut mac = HmacSha256::new_from_slice(&key[..len]).expect("HMAC accepts any key length");
    mac.update(label);
    let digest = mac.finalize().into_bytes();
    out.copy_from_slice(&digest[..out.len()]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_separate_domains() {
        let data = [0x5au8; 40];
        let mut g = [0u8; 16];
        let mut h = [0u8; 16];
        let mut f = [0u8; 16];
        labeled(&[&data], &G, &mut g);
        labeled(&[&data], &H, &mut h);
        labeled(&[&data], &F, &mut f);
        assert_ne!(g, h);
        assert_ne!(h, f);
        assert_ne!(g, f);
    }

    #[test]
    fn test_parts_concatenate() {
        let mut whole = [0u8; 24];
        let mut split = [0u8; 24];
        labeled(&[b"abcdef"], &H, &mut whole);
        labeled(&[b"ab", b"", b"cdef"], &H, &mut split);
        assert_eq!(whole, split);
    }

    #[test]
    fn test_matches_plain_hmac() {
        let mut ours = [0u8; 32];
        labeled(&[b"Jefe"], b"wh", &mut ours);

        let mut mac = HmacSha256::new_from_slice(b"Jefe").unwrap();
        mac.update(b"wh");
        assert_eq!(ours[..], mac.finalize().into_bytes()[..]);
    }
}
