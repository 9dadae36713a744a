//! = RFC 8017
//!
//! == PKCS #1: RSA Cryptography Specification Version 2.2
//!
//! === PSS(Probabilistic Signature Scheme)
//!
//! The message digest is computed by the caller, it takes the place of `mHash`.
//! MGF1 uses the same hash, the salt is always [`RSA_SALT_LEN`] bytes.

use crate::rsa::{HashAlgorithm, RSA_SALT_LEN};
use crate::AsymError;
use std::ops::Range;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

/// length in bytes of an encoded message of `em_bits` bits
pub fn em_len(em_bits: usize) -> usize {
    (em_bits + 7) >> 3
}

/// `em_len` needed to hold `Hash || salt` plus the `0x01` and `0xbc` markers
pub fn min_em_len(hash: HashAlgorithm) -> usize {
    hash.output_len() + RSA_SALT_LEN + 2
}

// (db_idx, hash_idx) of em = maskedDB || H || 0xbc
fn idx_bound(em_len: usize, hlen: usize) -> (Range<usize>, Range<usize>) {
    (
        Range {
            start: 0,
            end: em_len - hlen - 1,
        },
        Range {
            start: em_len - hlen - 1,
            end: em_len - 1,
        },
    )
}

// bits of em[0] that lie above em_bits
fn top_mask(em_len: usize, em_bits: usize) -> u8 {
    !(0xffu8 >> ((em_len << 3) - em_bits))
}

// H = Hash(M'), M' = 0x00 * 8 || mHash || salt
fn m_prime_hash(hash: HashAlgorithm, digest: &[u8], salt: &[u8]) -> Vec<u8> {
    hash.digest_parts(&[[0u8; 8].as_slice(), digest, salt])
}

/// EMSA-PSS-ENCODE
///
/// em = maskedDB || H || 0xbc
/// db = ps || 0x01 || salt
/// maskedDB = MGF(H, em.len - H.len - 1) ^ db
pub fn emsa_pss_encode(
    hash: HashAlgorithm,
    digest: &[u8],
    salt: &[u8; RSA_SALT_LEN],
    em_bits: usize,
) -> Result<Vec<u8>, AsymError> {
    let (hlen, em_len) = (hash.output_len(), em_len(em_bits));
    if digest.len() != hlen {
        return Err(AsymError::InvalidDigestLength {
            expected: hlen,
            actual: digest.len(),
        });
    }

    if em_len < min_em_len(hash) {
        return Err(AsymError::MessageTooLong {
            len: min_em_len(hash),
            max: em_len,
        });
    }

    let h = m_prime_hash(hash, digest, salt);
    let (db_idx, h_idx) = idx_bound(em_len, hlen);
    let ps_len = db_idx.end - RSA_SALT_LEN - 1;

    let mut em = vec![0u8; em_len];
    em[ps_len] = 0x01;
    em[(ps_len + 1)..db_idx.end].copy_from_slice(salt);
    hash.mgf1_xor(h.as_slice(), &mut em[db_idx]);
    em[0] &= !top_mask(em_len, em_bits);
    em[h_idx.clone()].copy_from_slice(h.as_slice());
    em[h_idx.end] = 0xbc;

    Ok(em)
}

/// EMSA-PSS-VERIFY
///
/// All structural checks (trailer, top bits, zero padding, `0x01` marker at the
/// position implied by a [`RSA_SALT_LEN`] salt) and the final hash comparison are
/// folded into one `Choice`.
pub fn emsa_pss_verify(hash: HashAlgorithm, digest: &[u8], em: &[u8], em_bits: usize) -> Choice {
    let (hlen, em_len) = (hash.output_len(), em_len(em_bits));
    if digest.len() != hlen || em.len() != em_len || em_len < min_em_len(hash) {
        return Choice::from(0);
    }

    let (db_idx, h_idx) = idx_bound(em_len, hlen);
    let ps_len = db_idx.end - RSA_SALT_LEN - 1;
    let mask = top_mask(em_len, em_bits);

    let trailer_ok = em[h_idx.end].ct_eq(&0xbc);
    let top_ok = (em[0] & mask).ct_eq(&0);

    let h = &em[h_idx];
    let mut db = Zeroizing::new(em[db_idx].to_vec());
    hash.mgf1_xor(h, db.as_mut_slice());
    db[0] &= !mask;

    let ps_ok = db[..ps_len].iter().fold(0u8, |acc, &x| acc | x).ct_eq(&0);
    let marker_ok = db[ps_len].ct_eq(&0x01);

    let h2 = m_prime_hash(hash, digest, &db[(ps_len + 1)..]);
    let h_ok = h2.as_slice().ct_eq(h);

    trailer_ok & top_ok & ps_ok & marker_ok & h_ok
}
