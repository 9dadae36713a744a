use crate::loader::Passphrase;
use crate::AsymError;
use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use entropy::EntropySource;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Source of a decrypted key record.
pub trait KeyContainer {
    /// Plaintext key record. Every failure, wrong passphrase and damaged
    /// container alike, is [`AsymError::KeyDecryptionFailed`].
    fn decrypt(&self, passphrase: &Passphrase) -> Result<Zeroizing<Vec<u8>>, AsymError>;
}

/// Argon2id cost parameters of a sealed key
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// memory size in kibibytes
    pub m_cost: u32,
    /// iteration times
    pub t_cost: u32,
    /// parallelism
    pub p_cost: u32,
}

impl KdfParams {
    /// upper bound of `m_cost` accepted from a container header, 2GiB
    pub const MAX_M_COST: u32 = 2097152;

    pub const fn new(m_cost: u32, t_cost: u32, p_cost: u32) -> Self {
        Self {
            m_cost,
            t_cost,
            p_cost,
        }
    }

    fn argon2(&self) -> Result<Argon2<'static>, AsymError> {
        if self.m_cost > Self::MAX_M_COST {
            return Err(AsymError::InvalidKdfParams(format!(
                "memory size `{}` exceeds `{}` KiB",
                self.m_cost,
                Self::MAX_M_COST
            )));
        }

        let params = Params::new(
            self.m_cost,
            self.t_cost,
            self.p_cost,
            Some(SealedKey::KEY_LEN),
        )
        .map_err(|e| AsymError::InvalidKdfParams(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::new(65536, 3, 4)
    }
}

/// Passphrase protected key record.
///
/// ```txt
/// start_flag(6) || m_cost(4) || t_cost(4) || p_cost(4) || salt(16) || nonce(12) || AES-256-GCM(record) || tag(16)
/// ```
///
/// The header, everything before the ciphertext, is the associated data of the
/// AEAD, so any change to it fails the tag check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedKey {
    kdf: KdfParams,
    salt: [u8; Self::SALT_LEN],
    nonce: [u8; Self::NONCE_LEN],
    ciphertext: Vec<u8>,
}

impl SealedKey {
    pub const START_FLAG: [u8; 6] = [0x01, 0x02, 0x42, 0x53, 0x4b, 0x03];
    pub const SALT_LEN: usize = 16;
    pub const NONCE_LEN: usize = 12;
    pub const TAG_LEN: usize = 16;
    const KEY_LEN: usize = 32;

    pub const fn header_len() -> usize {
        Self::START_FLAG.len() + 12 + Self::SALT_LEN + Self::NONCE_LEN
    }

    /// Parses the container layout, nothing is decrypted yet.
    pub fn from_bytes(data: &[u8]) -> Result<Self, AsymError> {
        if data.len() < Self::header_len() + Self::TAG_LEN
            || data[..Self::START_FLAG.len()] != Self::START_FLAG
        {
            log::debug!("rsa: sealed key of {} bytes is malformed", data.len());
            return Err(AsymError::KeyDecryptionFailed);
        }

        let u32_at = |i: usize| u32::from_be_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
        let flag_len = Self::START_FLAG.len();
        let kdf = KdfParams::new(u32_at(flag_len), u32_at(flag_len + 4), u32_at(flag_len + 8));

        let (mut salt, mut nonce) = ([0u8; Self::SALT_LEN], [0u8; Self::NONCE_LEN]);
        let salt_start = flag_len + 12;
        let nonce_start = salt_start + Self::SALT_LEN;
        salt.copy_from_slice(&data[salt_start..nonce_start]);
        nonce.copy_from_slice(&data[nonce_start..Self::header_len()]);

        Ok(Self {
            kdf,
            salt,
            nonce,
            ciphertext: data[Self::header_len()..].to_vec(),
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = self.header();
        data.extend_from_slice(self.ciphertext.as_slice());
        data
    }

    /// Encrypts the plaintext key record under a key derived from `passphrase`,
    /// with a fresh salt and nonce from `rng`.
    pub fn seal<E: EntropySource + ?Sized>(
        plaintext: &[u8],
        passphrase: &Passphrase,
        kdf: KdfParams,
        rng: &E,
    ) -> Result<Self, AsymError> {
        let mut sealed = Self {
            kdf,
            salt: [0u8; Self::SALT_LEN],
            nonce: [0u8; Self::NONCE_LEN],
            ciphertext: Vec::new(),
        };
        rng.fill(&mut sealed.salt)?;
        rng.fill(&mut sealed.nonce)?;

        let key = sealed.derive_key(passphrase)?;
        let aead = Aes256Gcm::new_from_slice(key.as_slice())
            .map_err(|e| AsymError::InvalidKdfParams(e.to_string()))?;
        let aad = sealed.header();
        sealed.ciphertext = aead
            .encrypt(
                Nonce::from_slice(&sealed.nonce),
                Payload {
                    msg: plaintext,
                    aad: aad.as_slice(),
                },
            )
            .map_err(|_| AsymError::KeyParseError("key record cannot be sealed".to_string()))?;

        log::debug!(
            "rsa: sealed {} bytes key record, kdf: {:?}",
            plaintext.len(),
            sealed.kdf
        );
        Ok(sealed)
    }

    pub fn kdf_params(&self) -> KdfParams {
        self.kdf
    }

    fn header(&self) -> Vec<u8> {
        let mut h = Vec::with_capacity(Self::header_len() + self.ciphertext.len());
        h.extend_from_slice(&Self::START_FLAG);
        h.extend_from_slice(&self.kdf.m_cost.to_be_bytes());
        h.extend_from_slice(&self.kdf.t_cost.to_be_bytes());
        h.extend_from_slice(&self.kdf.p_cost.to_be_bytes());
        h.extend_from_slice(&self.salt);
        h.extend_from_slice(&self.nonce);
        h
    }

    fn derive_key(&self, passphrase: &Passphrase) -> Result<Zeroizing<[u8; 32]>, AsymError> {
        let mut key = Zeroizing::new([0u8; Self::KEY_LEN]);
        self.kdf
            .argon2()?
            .hash_password_into(passphrase.as_bytes(), &self.salt, key.as_mut_slice())
            .map_err(|e| AsymError::InvalidKdfParams(e.to_string()))?;
        Ok(key)
    }
}

impl KeyContainer for SealedKey {
    fn decrypt(&self, passphrase: &Passphrase) -> Result<Zeroizing<Vec<u8>>, AsymError> {
        let key = self.derive_key(passphrase).map_err(|e| {
            log::debug!("rsa: sealed key kdf failed: {e}");
            AsymError::KeyDecryptionFailed
        })?;

        let aead =
            Aes256Gcm::new_from_slice(key.as_slice()).map_err(|_| AsymError::KeyDecryptionFailed)?;
        let aad = self.header();
        aead.decrypt(
            Nonce::from_slice(&self.nonce),
            Payload {
                msg: self.ciphertext.as_slice(),
                aad: aad.as_slice(),
            },
        )
        .map(Zeroizing::new)
        .map_err(|_| AsymError::KeyDecryptionFailed)
    }
}

/// Raw container bytes
impl KeyContainer for [u8] {
    fn decrypt(&self, passphrase: &Passphrase) -> Result<Zeroizing<Vec<u8>>, AsymError> {
        SealedKey::from_bytes(self)?.decrypt(passphrase)
    }
}
