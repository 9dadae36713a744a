//! RSA keys, RFC 8017 section 3
use crate::utils::{biguint_from_hex, scrub};
use crate::AsymError;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// public exponent of modulus-only public keys
pub const RSA_DEFAULT_EXPONENT: u32 = 65537;

/// smallest modulus accepted for raw key material; the loader is stricter
pub const RSA_MIN_MODULUS_BITS: usize = 512;

// x of the `(x^e)^d = x mod n` check of keys without CRT parameters
const KEY_CHECK_WITNESS: u8 = 2;

#[derive(Clone, PartialOrd, PartialEq, Ord, Eq, Serialize, Deserialize)]
#[serde(try_from = "PublicKeyRecord", into = "PublicKeyRecord")]
pub struct PublicKey {
    // n = p * q
    pub(crate) n: BigUint,
    // public exponent, gcd(e, (p-1)(q-1)) = 1
    pub(crate) e: BigUint,
}

#[derive(Serialize, Deserialize)]
struct PublicKeyRecord {
    n: String,
    e: String,
}

pub struct PrivateKey {
    pub(crate) pk: PublicKey,
    // d * e = 1 % lambda(n)
    pub(crate) d: BigUint,
    pub(crate) crt: Option<CrtParams>,
}

/// CRT parameters of a two prime key.
pub struct CrtParams {
    pub(crate) p: BigUint,
    pub(crate) q: BigUint,
    // $e \cdot d_p \equiv 1 \mod (p-1)$
    pub(crate) dp: BigUint,
    // $e \cdot d_q \equiv 1 \mod (q-1)$
    pub(crate) dq: BigUint,
    // $q \cdot q_inv \equiv 1 \mod p$
    pub(crate) qinv: BigUint,
}

impl PublicKey {
    /// n: RSA modulus
    /// e: public key exponent
    pub fn new(n: BigUint, e: BigUint) -> Result<Self, AsymError> {
        let key = Self { n, e };
        key.is_valid()?;
        Ok(key)
    }

    pub fn from_be_bytes(n: &[u8], e: &[u8]) -> Result<Self, AsymError> {
        Self::new(BigUint::from_bytes_be(n), BigUint::from_bytes_be(e))
    }

    /// Public key from a bare big-endian modulus, the exponent is [`RSA_DEFAULT_EXPONENT`].
    pub fn from_modulus(n: &[u8]) -> Result<Self, AsymError> {
        Self::new(
            BigUint::from_bytes_be(n),
            BigUint::from(RSA_DEFAULT_EXPONENT),
        )
    }

    /// n
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// e
    pub fn exponent(&self) -> &BigUint {
        &self.e
    }

    pub fn bits(&self) -> usize {
        self.n.bits() as usize
    }

    /// modulus byte length `k`, every signature and cipher block has this length
    pub fn size(&self) -> usize {
        (self.bits() + 7) >> 3
    }

    /// big-endian modulus, exactly [`Self::size`] bytes
    pub fn modulus_be_bytes(&self) -> Vec<u8> {
        self.n.to_bytes_be()
    }

    pub fn h_parameter(&self) -> Vec<u8> {
        crate::hparam::derive_h(self.modulus_be_bytes().as_slice())
    }

    pub fn is_valid(&self) -> Result<(), AsymError> {
        if self.bits() < RSA_MIN_MODULUS_BITS {
            Err(AsymError::InvalidPublicKey(format!(
                "modulus of {} bits is too short",
                self.bits()
            )))
        } else if self.n.is_even() {
            Err(AsymError::InvalidPublicKey(
                "modulus must be odd".to_string(),
            ))
        } else if self.e < BigUint::from(3u8) {
            Err(AsymError::InvalidPublicKey(format!(
                "public exponent {:#x} is too small",
                self.e
            )))
        } else if self.e > BigUint::from(u32::MAX) {
            Err(AsymError::InvalidPublicKey(format!(
                "public exponent {:#x} is too large",
                self.e
            )))
        } else if self.e.is_even() {
            Err(AsymError::InvalidPublicKey(
                "public exponent must be odd".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl TryFrom<PublicKeyRecord> for PublicKey {
    type Error = AsymError;

    fn try_from(value: PublicKeyRecord) -> Result<Self, Self::Error> {
        let (n, e) = (
            biguint_from_hex(&value.n)
                .ok_or_else(|| AsymError::InvalidPublicKey("modulus is not hex".to_string()))?,
            biguint_from_hex(&value.e)
                .ok_or_else(|| AsymError::InvalidPublicKey("exponent is not hex".to_string()))?,
        );
        Self::new(n, e)
    }
}

impl From<PublicKey> for PublicKeyRecord {
    fn from(value: PublicKey) -> Self {
        Self {
            n: format!("{:x}", value.n),
            e: format!("{:x}", value.e),
        }
    }
}

impl CrtParams {
    pub fn new(p: BigUint, q: BigUint, dp: BigUint, dq: BigUint, qinv: BigUint) -> Self {
        Self {
            p,
            q,
            dp,
            dq,
            qinv,
        }
    }

    /// derives `dp`, `dq`, `qinv` from the primes and the private exponent
    pub fn from_primes(p: BigUint, q: BigUint, d: &BigUint) -> Result<Self, AsymError> {
        // filled in place, the error paths drop (and scrub) the partial params
        let mut crt = Self::new(p, q, BigUint::zero(), BigUint::zero(), BigUint::zero());
        if crt.p <= BigUint::one() || crt.q <= BigUint::one() {
            return Err(AsymError::KeyParseError(
                "invalid prime value".to_string(),
            ));
        }

        crt.qinv = crate::utils::BigUintExt(&crt.q)
            .modinv(&crt.p)
            .ok_or_else(|| AsymError::KeyParseError("primes are not coprime".to_string()))?;
        crt.dp = d % (&crt.p - 1u8);
        crt.dq = d % (&crt.q - 1u8);

        Ok(crt)
    }
}

impl PrivateKey {
    /// Key without CRT parameters, every private operation runs the full
    /// exponentiation modulo `n`.
    pub fn from_components(n: BigUint, e: BigUint, d: BigUint) -> Result<Self, AsymError> {
        let key = Self {
            pk: PublicKey { n, e },
            d,
            crt: None,
        };
        key.is_valid()?;
        Ok(key)
    }

    pub fn from_crt(n: BigUint, e: BigUint, d: BigUint, crt: CrtParams) -> Result<Self, AsymError> {
        let key = Self {
            pk: PublicKey { n, e },
            d,
            crt: Some(crt),
        };
        key.is_valid()?;
        Ok(key)
    }

    pub fn from_primes(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<Self, AsymError> {
        let mut key = Self {
            pk: PublicKey { n, e },
            d,
            crt: None,
        };
        key.crt = Some(CrtParams::from_primes(p, q, &key.d)?);
        key.is_valid()?;
        Ok(key)
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    pub fn size(&self) -> usize {
        self.pk.size()
    }

    pub fn has_crt(&self) -> bool {
        self.crt.is_some()
    }

    /// Drops the CRT parameters (they are scrubbed), later private operations
    /// use the plain exponent.
    pub fn without_crt(mut self) -> Self {
        self.crt = None;
        self
    }

    /// Consistency of the key material. With CRT parameters this checks
    /// `n = p*q`, `e*d = 1 mod lambda(n)` and the precomputed values, without
    /// them `(x^e)^d = x mod n` for a fixed `x`.
    pub fn is_valid(&self) -> Result<(), AsymError> {
        self.pk
            .is_valid()
            .map_err(|e| AsymError::KeyParseError(e.to_string()))?;

        if self.d <= BigUint::one() || self.d >= self.pk.n {
            return Err(AsymError::KeyParseError(
                "private exponent out of range".to_string(),
            ));
        }

        let Some(crt) = self.crt.as_ref() else {
            return self.check_exponents();
        };

        let one = BigUint::one();
        if crt.p <= one || crt.q <= one || crt.p == crt.q {
            return Err(AsymError::KeyParseError(
                "invalid prime value".to_string(),
            ));
        }

        if &crt.p * &crt.q != self.pk.n {
            return Err(AsymError::KeyParseError("invalid modulus".to_string()));
        }

        let (pm1, qm1) = (&crt.p - 1u8, &crt.q - 1u8);
        let lambda = pm1.lcm(&qm1);
        if !((&self.pk.e * &self.d) % &lambda).is_one() {
            return Err(AsymError::KeyParseError("invalid exponent".to_string()));
        }

        if crt.dp != &self.d % &pm1 || crt.dq != &self.d % &qm1 {
            return Err(AsymError::KeyParseError(
                "invalid crt exponent".to_string(),
            ));
        }

        if !((&crt.q * &crt.qinv) % &crt.p).is_one() {
            return Err(AsymError::KeyParseError(
                "invalid crt coefficient".to_string(),
            ));
        }

        Ok(())
    }
}

impl PrivateKey {
    fn check_exponents(&self) -> Result<(), AsymError> {
        let x = BigUint::from(KEY_CHECK_WITNESS);
        let y = self.pk.rsaep_uncheck(&x);
        let mut z = crate::utils::BigUintExt(&y).ladder_modpow(&self.d, &self.pk.n);
        let valid = z == x;
        scrub(&mut z);

        if valid {
            Ok(())
        } else {
            Err(AsymError::KeyParseError(
                "private exponent does not match the public exponent".to_string(),
            ))
        }
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        scrub(&mut self.d);
    }
}

impl Drop for CrtParams {
    fn drop(&mut self) {
        for x in [
            &mut self.p,
            &mut self.q,
            &mut self.dp,
            &mut self.dq,
            &mut self.qinv,
        ] {
            scrub(x);
        }
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{n={:#x}, e={:#x}}}", self.n, self.e)
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKey")
            .field("bits", &self.bits())
            .field("e", &self.e)
            .finish()
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("pk", &self.pk)
            .field("crt", &self.crt.is_some())
            .finish_non_exhaustive()
    }
}

impl Debug for CrtParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("CrtParams { .. }")
    }
}
