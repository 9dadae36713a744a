//! = RFC 8017
//!
//! == PKCS #1: RSA Cryptography Specification Version 2.2
//!
//! === PKCS1(Public Key Cryptography Standards v1.5)
//!
//! - EMSA-PKCS1-v1_5 (signature): `0x00 || 0x01 || PS(0xff..) || 0x00 || DigestInfo`
//! - EME-PKCS1-v1_5 (encryption): `0x00 || 0x02 || PS(random, nonzero) || 0x00 || M`
//!
//! Both need at least 8 bytes of `PS`, hence 11 bytes of overhead.

use crate::rsa::HashAlgorithm;
use crate::AsymError;
use entropy::EntropySource;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeGreater};
use zeroize::Zeroizing;

/// `0x00 || 0x0? || PS(>= 8 bytes) || 0x00`
pub const PKCS1_OVERHEAD: usize = 11;

pub fn max_msg_len(k: usize) -> usize {
    k.saturating_sub(PKCS1_OVERHEAD)
}

/// EMSA-PKCS1-v1_5 encoding of `digest` into a `k` byte block.
pub fn emsa_encode(hash: HashAlgorithm, digest: &[u8], k: usize) -> Result<Vec<u8>, AsymError> {
    if digest.len() != hash.output_len() {
        return Err(AsymError::InvalidDigestLength {
            expected: hash.output_len(),
            actual: digest.len(),
        });
    }

    let prefix = hash.digest_info_prefix();
    let tlen = prefix.len() + digest.len();
    let mut em = emsa_frame(tlen, k)?;
    em[(k - tlen)..(k - digest.len())].copy_from_slice(prefix);
    em[(k - digest.len())..].copy_from_slice(digest);
    Ok(em)
}

/// `0x00 || 0x01 || 0xff.. || 0x00 || [0u8; tlen]`
pub(crate) fn emsa_frame(tlen: usize, k: usize) -> Result<Vec<u8>, AsymError> {
    if tlen > max_msg_len(k) {
        return Err(AsymError::MessageTooLong {
            len: tlen,
            max: max_msg_len(k),
        });
    }

    let mut em = vec![0xffu8; k];
    em[0] = 0x00;
    em[1] = 0x01;
    em[k - tlen - 1] = 0x00;
    em[(k - tlen)..].fill(0);
    Ok(em)
}

/// Rebuilds the expected block and compares it with `em` over its full length.
/// Any encoding failure yields a false `Choice`.
pub fn emsa_verify(hash: HashAlgorithm, digest: &[u8], em: &[u8]) -> Choice {
    match emsa_encode(hash, digest, em.len()) {
        Ok(expected) => expected.as_slice().ct_eq(em),
        Err(_) => Choice::from(0),
    }
}

/// EME-PKCS1-v1_5 encoding, `PS` is drawn from `rng` and contains no zero byte.
pub fn eme_encode<E: EntropySource + ?Sized>(
    msg: &[u8],
    k: usize,
    rng: &E,
) -> Result<Zeroizing<Vec<u8>>, AsymError> {
    if msg.len() > max_msg_len(k) {
        return Err(AsymError::MessageTooLong {
            len: msg.len(),
            max: max_msg_len(k),
        });
    }

    // em = 0x00 || 0x02 || ps || 0x00 || msg
    let (mut em, ps_len) = (Zeroizing::new(vec![0u8; k]), k - msg.len() - 3);
    em[1] = 0x02;
    let ps = &mut em[2..(2 + ps_len)];
    rng.fill(ps)?;
    fill_nonzero(ps, rng)?;
    em[(k - msg.len())..].copy_from_slice(msg);

    Ok(em)
}

// redraws only the zero bytes of `ps`
fn fill_nonzero<E: EntropySource + ?Sized>(ps: &mut [u8], rng: &E) -> Result<(), AsymError> {
    let mut b = [0u8; 1];
    for x in ps.iter_mut() {
        while *x == 0 {
            rng.fill(&mut b)?;
            *x = b[0];
        }
    }
    Ok(())
}

/// EME-PKCS1-v1_5 decoding.
///
/// Every byte of `em` is visited and all checks are accumulated before the single
/// decision, so a wrong block type, a missing separator and a short `PS` cannot be
/// told apart by timing or by the returned error.
pub fn eme_decode(em: &[u8]) -> Result<Vec<u8>, AsymError> {
    if em.len() < PKCS1_OVERHEAD {
        return Err(AsymError::DecryptionPaddingError);
    }

    let first_is_zero = em[0].ct_eq(&0u8);
    let second_is_two = em[1].ct_eq(&2u8);

    // index of the first zero after the block type
    let (mut looking, mut index) = (Choice::from(1), 0u32);
    for (i, &x) in em.iter().enumerate().skip(2) {
        let is_zero = x.ct_eq(&0u8);
        index.conditional_assign(&(i as u32), looking & is_zero);
        looking &= !is_zero;
    }

    // PS is em[2..index], at least 8 bytes
    let valid = first_is_zero & second_is_two & !looking & index.ct_gt(&9u32);
    if !bool::from(valid) {
        return Err(AsymError::DecryptionPaddingError);
    }

    Ok(em[(index as usize + 1)..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::{eme_decode, eme_encode, emsa_encode, emsa_frame, emsa_verify, max_msg_len};
    use crate::rsa::HashAlgorithm;
    use crate::AsymError;
    use entropy::SeededEntropy;

    #[test]
    fn emsa_layout() {
        let digest = HashAlgorithm::Sha256.digest(b"abc");
        let em = emsa_encode(HashAlgorithm::Sha256, &digest, 64).unwrap();
        assert_eq!(em.len(), 64);
        assert_eq!(&em[..2], &[0x00, 0x01]);
        // 64 - 51 - 3 bytes of 0xff
        assert!(em[2..12].iter().all(|&x| x == 0xff));
        assert_eq!(em[12], 0x00);
        assert_eq!(&em[13..32], HashAlgorithm::Sha256.digest_info_prefix());
        assert_eq!(&em[32..], digest.as_slice());

        // deterministic
        assert_eq!(em, emsa_encode(HashAlgorithm::Sha256, &digest, 64).unwrap());
        assert!(bool::from(emsa_verify(HashAlgorithm::Sha256, &digest, &em)));
    }

    #[test]
    fn emsa_boundary() {
        let k = 64;
        assert!(emsa_frame(k - 11, k).is_ok());
        assert_eq!(
            emsa_frame(k - 10, k),
            Err(AsymError::MessageTooLong { len: 54, max: 53 })
        );

        // DigestInfo(sha512) is 83 bytes
        let digest = HashAlgorithm::Sha512.digest(b"abc");
        assert!(emsa_encode(HashAlgorithm::Sha512, &digest, 94).is_ok());
        assert!(matches!(
            emsa_encode(HashAlgorithm::Sha512, &digest, 93),
            Err(AsymError::MessageTooLong { .. })
        ));

        assert_eq!(
            emsa_encode(HashAlgorithm::Sha256, &digest, 256),
            Err(AsymError::InvalidDigestLength {
                expected: 32,
                actual: 64
            })
        );
    }

    #[test]
    fn emsa_verify_rejects() {
        let digest = HashAlgorithm::Sha256.digest(b"abc");
        let em = emsa_encode(HashAlgorithm::Sha256, &digest, 128).unwrap();

        for i in 0..em.len() {
            let mut x = em.clone();
            x[i] ^= 0x01;
            assert!(!bool::from(emsa_verify(HashAlgorithm::Sha256, &digest, &x)), "byte {i}");
        }

        let other = HashAlgorithm::Sha256.digest(b"abd");
        assert!(!bool::from(emsa_verify(HashAlgorithm::Sha256, &other, &em)));
        assert!(!bool::from(emsa_verify(HashAlgorithm::Sha384, &digest, &em)));
    }

    #[test]
    fn eme_roundtrip() {
        let rng = SeededEntropy::new(11);
        let k = 64;
        for len in [0usize, 1, 16, max_msg_len(k)] {
            let msg = (0..len).map(|i| (i as u8) ^ 0xa5).collect::<Vec<_>>();
            let em = eme_encode(&msg, k, &rng).unwrap();
            assert_eq!(em.len(), k);
            assert_eq!(&em[..2], &[0x00, 0x02]);
            assert!(em[2..(k - len - 1)].iter().all(|&x| x != 0));
            assert_eq!(em[k - len - 1], 0);
            assert_eq!(eme_decode(&em).unwrap(), msg);
        }

        assert_eq!(
            eme_encode(&[0u8; 54], k, &rng).unwrap_err(),
            AsymError::MessageTooLong { len: 54, max: 53 }
        );
    }

    #[test]
    fn eme_decode_rejects() {
        let rng = SeededEntropy::new(12);
        let em = eme_encode(b"payload", 64, &rng).unwrap();

        let mut bad = em.to_vec();
        bad[0] = 0x01;
        assert_eq!(eme_decode(&bad), Err(AsymError::DecryptionPaddingError));

        let mut bad = em.to_vec();
        bad[1] = 0x01;
        assert_eq!(eme_decode(&bad), Err(AsymError::DecryptionPaddingError));

        // separator too early, PS shorter than 8 bytes
        let mut bad = em.to_vec();
        bad[9] = 0x00;
        assert_eq!(eme_decode(&bad), Err(AsymError::DecryptionPaddingError));

        // no separator at all
        let mut bad = em.to_vec();
        let sep = 64 - 7 - 1;
        bad[sep] = 0x01;
        assert_eq!(eme_decode(&bad), Err(AsymError::DecryptionPaddingError));

        // separator right after the minimum PS is fine
        let mut ok = em.to_vec();
        ok[10] = 0x00;
        assert_eq!(eme_decode(&ok).unwrap().len(), 64 - 11);

        assert_eq!(eme_decode(&[0u8; 10]), Err(AsymError::DecryptionPaddingError));
    }
}
