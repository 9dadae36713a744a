//! RSAEP / RSADP, RFC 8017 section 5.1
//!
//! Blocks are big-endian octet strings of at most `k` bytes whose integer value must
//! be less than the modulus. Outputs are always exactly `k` bytes.

use crate::rsa::{PrivateKey, PublicKey};
use crate::utils::{scrub, BigUintExt};
use crate::{ensure_invariant, AsymError};
use entropy::EntropySource;
use num_bigint::BigUint;
use num_traits::One;
use zeroize::Zeroizing;

// a sane entropy source yields an invertible r on the first draw almost surely
const BLINDING_ATTEMPTS: usize = 16;

/// octet string -> integer, rejects blocks that are longer than `k` or not below `n`
pub(crate) fn os2ip(block: &[u8], n: &BigUint) -> Result<BigUint, AsymError> {
    let k = ((n.bits() + 7) >> 3) as usize;
    if block.len() > k {
        return Err(AsymError::InvalidBlock);
    }

    let x = BigUint::from_bytes_be(block);
    if &x >= n {
        return Err(AsymError::InvalidBlock);
    }

    Ok(x)
}

/// integer -> `k` octets, left padded with zeros
pub(crate) fn i2osp(x: &BigUint, k: usize) -> Zeroizing<Vec<u8>> {
    let bytes = Zeroizing::new(x.to_bytes_be());
    let len = if x.bits() == 0 { 0 } else { bytes.len() };
    ensure_invariant!(len <= k);

    let mut out = Zeroizing::new(vec![0u8; k]);
    out[(k - len)..].copy_from_slice(&bytes[(bytes.len() - len)..]);
    out
}

impl PublicKey {
    /// $m^e \mod n, m \lt n$
    pub(crate) fn rsaep_uncheck(&self, m: &BigUint) -> BigUint {
        m.modpow(&self.e, &self.n)
    }

    /// RSAEP: RSA public exponentiation of one block, used to encrypt and to
    /// recover the encoded message of a signature.
    pub fn rsaep(&self, block: &[u8]) -> Result<Vec<u8>, AsymError> {
        let m = os2ip(block, &self.n)?;
        let c = self.rsaep_uncheck(&m);
        Ok(i2osp(&c, self.size()).to_vec())
    }
}

impl PrivateKey {
    /// RSADP: RSA private exponentiation of one block, used to decrypt and to
    /// sign. Runs the CRT path when the key carries CRT parameters.
    pub fn rsadp(&self, block: &[u8]) -> Result<Zeroizing<Vec<u8>>, AsymError> {
        let mut c = os2ip(block, &self.pk.n)?;
        let mut m = self.rsadp_checked(&c);
        let out = i2osp(&m, self.size());
        scrub(&mut m);
        scrub(&mut c);
        Ok(out)
    }

    /// [`Self::rsadp`] with base blinding: the exponentiation runs on
    /// `c * r^e` for a fresh random `r` and the result is multiplied by `r^{-1}`.
    /// The output is identical to the unblinded one.
    pub fn rsadp_blinded<E: EntropySource + ?Sized>(
        &self,
        block: &[u8],
        rng: &E,
    ) -> Result<Zeroizing<Vec<u8>>, AsymError> {
        let c = os2ip(block, &self.pk.n)?;
        let (mut re, mut rinv) = self.blinding_pair(rng)?;

        let mut blinded = (&c * &re) % &self.pk.n;
        let mut m = self.rsadp_checked(&blinded);
        m *= &rinv;
        m %= &self.pk.n;

        let out = i2osp(&m, self.size());
        for x in [&mut re, &mut rinv, &mut blinded, &mut m] {
            scrub(x);
        }
        Ok(out)
    }

    // (r^e mod n, r^{-1} mod n)
    fn blinding_pair<E: EntropySource + ?Sized>(
        &self,
        rng: &E,
    ) -> Result<(BigUint, BigUint), AsymError> {
        let mut buf = Zeroizing::new(vec![0u8; self.size()]);
        for _ in 0..BLINDING_ATTEMPTS {
            rng.fill(buf.as_mut_slice())?;
            let mut r = BigUint::from_bytes_be(buf.as_slice()) % &self.pk.n;
            if r <= BigUint::one() {
                continue;
            }

            if let Some(rinv) = BigUintExt(&r).modinv(&self.pk.n) {
                let re = self.pk.rsaep_uncheck(&r);
                scrub(&mut r);
                return Ok((re, rinv));
            }
            scrub(&mut r);
        }

        Err(AsymError::EntropyUnavailable(entropy::EntropyError(
            "rsa: entropy source failed to produce a blinding factor".to_string(),
        )))
    }

    // the result is re-encrypted with the public exponent, a mismatch means
    // broken key material or a faulty computation and must not leave the library
    fn rsadp_checked(&self, c: &BigUint) -> BigUint {
        let m = self.rsadp_uncheck(c);
        ensure_invariant!(&self.pk.rsaep_uncheck(&m) == c);
        m
    }

    // m1 = c^{dp} % p, m2 = c^{dq} % q
    // h = (m1 - m2) * qinv % p
    // m = m2 + q * h
    fn rsadp_uncheck(&self, c: &BigUint) -> BigUint {
        match self.crt.as_ref() {
            Some(crt) => {
                let (mut cp, mut cq) = (c % &crt.p, c % &crt.q);
                let (mut m1, mut m2) = (
                    BigUintExt(&cp).ladder_modpow(&crt.dp, &crt.p),
                    BigUintExt(&cq).ladder_modpow(&crt.dq, &crt.q),
                );

                // m1 < p, so m1 + p - (m2 % p) never underflows
                let mut h = (&m1 + &crt.p - (&m2 % &crt.p)) % &crt.p;
                h *= &crt.qinv;
                h %= &crt.p;
                let mut hq = &h * &crt.q;
                let m = &m2 + &hq;

                for x in [&mut cp, &mut cq, &mut m1, &mut m2, &mut h, &mut hq] {
                    scrub(x);
                }
                m
            }
            None => BigUintExt(c).ladder_modpow(&self.d, &self.pk.n),
        }
    }
}
