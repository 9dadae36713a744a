use crate::loader::{self, KeyContainer, Passphrase};
use crate::rsa::{pkcs1, pss, HashAlgorithm, PkcsScheme, PrivateKey, PublicKey, RSA_SALT_LEN};
use crate::{ensure_invariant, AsymError};
use entropy::{EntropySource, OsEntropy};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

/// Sign / verify / encrypt / decrypt over caller supplied digests and blocks.
///
/// Private keys are taken by value: the key lives for exactly one call and its
/// secret limbs are scrubbed when it is dropped at the end of that call, whichever
/// way the call returns.
///
/// The engine itself holds no per-operation state, one instance can be shared by
/// any number of threads.
#[derive(Clone, Debug)]
pub struct RsaEngine<E: EntropySource = OsEntropy> {
    rng: E,
}

impl Default for RsaEngine<OsEntropy> {
    fn default() -> Self {
        Self::new(OsEntropy::default())
    }
}

impl<E: EntropySource> RsaEngine<E> {
    pub fn new(rng: E) -> Self {
        Self { rng }
    }

    pub fn entropy(&self) -> &E {
        &self.rng
    }

    /// Signature of `digest`, exactly `key.size()` bytes.
    ///
    /// `Pkcs1Pss` draws a fresh [`RSA_SALT_LEN`] byte salt for every call.
    pub fn sign(
        &self,
        scheme: PkcsScheme,
        hash: HashAlgorithm,
        digest: &[u8],
        key: PrivateKey,
    ) -> Result<Vec<u8>, AsymError> {
        let (k, bits) = (key.size(), key.public_key().bits());
        log::debug!("rsa: sign with {scheme}/{hash}, modulus {bits} bits");

        let em = match scheme {
            PkcsScheme::Pkcs1v15 => Zeroizing::new(pkcs1::emsa_encode(hash, digest, k)?),
            PkcsScheme::Pkcs1Pss => {
                let mut salt = Zeroizing::new([0u8; RSA_SALT_LEN]);
                self.rng.fill(salt.as_mut_slice())?;
                // em_bits = modBits - 1, `em` is one byte shorter than `k` when modBits = 8x + 1
                Zeroizing::new(pss::emsa_pss_encode(hash, digest, &salt, bits - 1)?)
            }
        };

        let sig = key.rsadp_blinded(em.as_slice(), &self.rng)?;
        ensure_invariant!(sig.len() == k);
        Ok(sig.to_vec())
    }

    /// `Ok(false)` for every signature that does not match, errors only for
    /// malformed input (signature or digest length).
    pub fn verify(
        &self,
        scheme: PkcsScheme,
        hash: HashAlgorithm,
        digest: &[u8],
        key: &PublicKey,
        signature: &[u8],
    ) -> Result<bool, AsymError> {
        let k = key.size();
        if signature.len() != k {
            return Err(AsymError::InvalidSignatureLength {
                expected: k,
                actual: signature.len(),
            });
        }

        if digest.len() != hash.output_len() {
            return Err(AsymError::InvalidDigestLength {
                expected: hash.output_len(),
                actual: digest.len(),
            });
        }

        let em = match key.rsaep(signature) {
            Ok(em) => em,
            Err(AsymError::InvalidBlock) => {
                log::debug!("rsa: signature value not below the modulus");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        let valid = match scheme {
            PkcsScheme::Pkcs1v15 => pkcs1::emsa_verify(hash, digest, em.as_slice()),
            PkcsScheme::Pkcs1Pss => {
                let em_bits = key.bits() - 1;
                let skip = k - pss::em_len(em_bits);
                let lead_ok: Choice = em[..skip].iter().fold(0u8, |acc, &x| acc | x).ct_eq(&0);
                lead_ok & pss::emsa_pss_verify(hash, digest, &em[skip..], em_bits)
            }
        };

        let valid = bool::from(valid);
        log::debug!("rsa: verify with {scheme}/{hash}, valid: {valid}");
        Ok(valid)
    }

    /// EME-PKCS1-v1_5 encryption of `msg`, at most `key.size() - 11` bytes.
    pub fn encrypt(&self, key: &PublicKey, msg: &[u8]) -> Result<Vec<u8>, AsymError> {
        log::debug!(
            "rsa: encrypt {} bytes, modulus {} bits",
            msg.len(),
            key.bits()
        );
        let em = pkcs1::eme_encode(msg, key.size(), &self.rng)?;
        let c = key.rsaep(em.as_slice())?;
        ensure_invariant!(c.len() == key.size());
        Ok(c)
    }

    /// Reverses [`Self::encrypt`]. Every malformed recovered block is reported as
    /// the same [`AsymError::DecryptionPaddingError`].
    pub fn decrypt(&self, key: PrivateKey, block: &[u8]) -> Result<Vec<u8>, AsymError> {
        let k = key.size();
        log::debug!(
            "rsa: decrypt {} bytes, modulus {} bits",
            block.len(),
            key.public_key().bits()
        );
        if block.len() != k {
            return Err(AsymError::InvalidBlock);
        }

        let em = key.rsadp_blinded(block, &self.rng)?;
        pkcs1::eme_decode(em.as_slice())
    }

    /// Loads the private key from `container` and signs with it, the key does not
    /// outlive the call.
    pub fn sign_with_container<C: KeyContainer + ?Sized>(
        &self,
        scheme: PkcsScheme,
        hash: HashAlgorithm,
        digest: &[u8],
        container: &C,
        passphrase: &Passphrase,
    ) -> Result<Vec<u8>, AsymError> {
        let key = loader::load(container, passphrase)?;
        self.sign(scheme, hash, digest, key)
    }

    pub fn decrypt_with_container<C: KeyContainer + ?Sized>(
        &self,
        container: &C,
        passphrase: &Passphrase,
        block: &[u8],
    ) -> Result<Vec<u8>, AsymError> {
        let key = loader::load(container, passphrase)?;
        self.decrypt(key, block)
    }
}
