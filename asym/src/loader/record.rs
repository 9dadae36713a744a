use crate::loader::SUPPORTED_KEY_BITS;
use crate::rsa::{CrtParams, PrivateKey};
use crate::utils::{biguint_from_hex, SecretUint};
use crate::AsymError;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Decrypted key record, big-endian hex strings:
///
/// ```json
/// {"n": "..", "e": "..", "d": "..", "p": "..", "q": "..", "dp": "..", "dq": "..", "qinv": ".."}
/// ```
///
/// `p`, `q` alone let the loader derive the other CRT values; without any of
/// them the key runs without CRT.
#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyRecord {
    n: String,
    e: String,
    d: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    p: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    qinv: Option<String>,
}

fn field(name: &str, value: &str) -> Result<BigUint, AsymError> {
    biguint_from_hex(value)
        .ok_or_else(|| AsymError::KeyParseError(format!("field `{name}` is not a hex integer")))
}

// already parsed secrets are scrubbed when a later field fails
fn secret(name: &str, value: &str) -> Result<SecretUint, AsymError> {
    field(name, value).map(SecretUint::new)
}

impl KeyRecord {
    /// The error never quotes the input, only where parsing stopped.
    pub fn from_json(plaintext: &[u8]) -> Result<Self, AsymError> {
        serde_json::from_slice(plaintext).map_err(|e| {
            AsymError::KeyParseError(format!(
                "invalid key record ({:?}) at line {} column {}",
                e.classify(),
                e.line(),
                e.column()
            ))
        })
    }

    /// Modulus size in bits, checked before any secret field is parsed.
    pub fn modulus_bits(&self) -> Result<usize, AsymError> {
        Ok(field("n", &self.n)?.bits() as usize)
    }

    pub fn to_private_key(&self) -> Result<PrivateKey, AsymError> {
        let bits = self.modulus_bits()?;
        if !SUPPORTED_KEY_BITS.contains(&bits) {
            return Err(AsymError::UnsupportedKeySize(bits));
        }

        let (n, e) = (field("n", &self.n)?, field("e", &self.e)?);
        let d = secret("d", &self.d)?;

        match (
            self.p.as_deref(),
            self.q.as_deref(),
            self.dp.as_deref(),
            self.dq.as_deref(),
            self.qinv.as_deref(),
        ) {
            (None, None, None, None, None) => PrivateKey::from_components(n, e, d.into_inner()),
            (Some(p), Some(q), None, None, None) => {
                let (p, q) = (secret("p", p)?, secret("q", q)?);
                PrivateKey::from_primes(n, e, d.into_inner(), p.into_inner(), q.into_inner())
            }
            (Some(p), Some(q), Some(dp), Some(dq), Some(qinv)) => {
                let (p, q, dp, dq, qinv) = (
                    secret("p", p)?,
                    secret("q", q)?,
                    secret("dp", dp)?,
                    secret("dq", dq)?,
                    secret("qinv", qinv)?,
                );
                let crt = CrtParams::new(
                    p.into_inner(),
                    q.into_inner(),
                    dp.into_inner(),
                    dq.into_inner(),
                    qinv.into_inner(),
                );
                PrivateKey::from_crt(n, e, d.into_inner(), crt)
            }
            _ => Err(AsymError::KeyParseError(
                "incomplete crt parameters".to_string(),
            )),
        }
    }
}
