use crate::ensure_invariant;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{Euclid, One};
use std::borrow::Borrow;
use std::ops::Deref;

pub(crate) struct BigUintExt<T: Borrow<BigUint>>(pub T);

impl<T: Borrow<BigUint>> Deref for BigUintExt<T> {
    type Target = BigUint;
    fn deref(&self) -> &Self::Target {
        self.0.borrow()
    }
}

impl<T: Borrow<BigUint>> BigUintExt<T> {
    /// self * inv = 1 \mod modulus
    pub fn modinv(&self, modulus: &BigUint) -> Option<BigUint> {
        let n = BigInt::from(modulus.clone());
        let a = BigInt::from(self.deref().clone()).rem_euclid(&n);
        let g = a.extended_gcd(&n);
        g.gcd
            .is_one()
            .then(|| g.x.rem_euclid(&n).to_biguint())
            .flatten()
    }

    /// $self^{exp} \mod modulus$ by a Montgomery ladder.
    ///
    /// The ladder always runs `modulus.bits()` rounds of one multiplication and one
    /// squaring, the exponent bit only selects which register is written, there
    /// is no branch on it. `exp` must not be longer than the modulus.
    pub fn ladder_modpow(&self, exp: &BigUint, modulus: &BigUint) -> BigUint {
        let bits = modulus.bits();
        ensure_invariant!(exp.bits() <= bits);

        let mut r = [BigUint::one() % modulus, self.deref() % modulus];
        for i in (0..bits).rev() {
            let b = exp.bit(i) as usize;
            let prod = (&r[0] * &r[1]) % modulus;
            let sq = (&r[b] * &r[b]) % modulus;
            r[1 - b] = prod;
            r[b] = sq;
        }

        let [x, mut y] = r;
        scrub(&mut y);
        x
    }
}

/// Overwrites the digits of `x` in place and leaves it zero.
///
/// `assign_from_slice` clears and refills the existing digit buffer, so the old
/// limbs are overwritten before the allocation is released.
pub(crate) fn scrub(x: &mut BigUint) {
    let len = ((x.bits() + 31) >> 5) as usize;
    x.assign_from_slice(vec![0u32; len].as_slice());
}

/// Secret integer scrubbed on drop, unless it is moved out with
/// [`SecretUint::into_inner`].
pub(crate) struct SecretUint(BigUint);

impl SecretUint {
    pub fn new(x: BigUint) -> Self {
        Self(x)
    }

    pub fn into_inner(mut self) -> BigUint {
        std::mem::take(&mut self.0)
    }
}

impl Deref for SecretUint {
    type Target = BigUint;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for SecretUint {
    fn drop(&mut self) {
        scrub(&mut self.0);
    }
}

/// big-endian hex, optional `0x` prefix
pub(crate) fn biguint_from_hex(s: &str) -> Option<BigUint> {
    let s = s.trim();
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if s.is_empty() {
        return None;
    }
    BigUint::parse_bytes(s.as_bytes(), 16)
}
