//! Key Loader
//!
//! container --(passphrase)--> plaintext key record --> [`PrivateKey`]
//!
//! The plaintext record only lives inside [`load`], it is wiped before the call
//! returns on every path.

mod container;
pub use container::{KdfParams, KeyContainer, SealedKey};

mod record;
pub use record::KeyRecord;

use crate::rsa::PrivateKey;
use crate::AsymError;
use std::fmt::{Debug, Formatter};
use zeroize::Zeroizing;

/// modulus sizes accepted by the loader
pub const SUPPORTED_KEY_BITS: [usize; 3] = [2048, 3072, 4096];

/// Caller supplied passphrase, wiped on drop and never printed.
#[derive(Clone)]
pub struct Passphrase(Zeroizing<Vec<u8>>);

impl Passphrase {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Passphrase {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes().to_vec())
    }
}

impl From<String> for Passphrase {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<Vec<u8>> for Passphrase {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

impl Debug for Passphrase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Passphrase(..)")
    }
}

/// Decrypts `container` and parses the key record inside it.
///
/// - [`AsymError::KeyDecryptionFailed`]: wrong passphrase or damaged container;
/// - [`AsymError::KeyParseError`]: the plaintext is not a consistent key record;
/// - [`AsymError::UnsupportedKeySize`]: the modulus is not one of [`SUPPORTED_KEY_BITS`];
pub fn load<C: KeyContainer + ?Sized>(
    container: &C,
    passphrase: &Passphrase,
) -> Result<PrivateKey, AsymError> {
    let plaintext = container.decrypt(passphrase)?;
    load_record(plaintext.as_slice())
}

/// Key from an already decrypted record.
pub fn load_record(plaintext: &[u8]) -> Result<PrivateKey, AsymError> {
    let record = KeyRecord::from_json(plaintext)?;
    let key = record.to_private_key()?;
    log::debug!(
        "rsa: loaded private key, modulus {} bits, crt: {}",
        key.public_key().bits(),
        key.has_crt()
    );
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::{load, load_record, KdfParams, Passphrase, SealedKey};
    use crate::rsa::fixtures::{K1024, K2047, K2048};
    use crate::AsymError;
    use entropy::SeededEntropy;
    use std::time::{Duration, Instant};

    fn sealed(record: &str, pwd: &str, kdf: KdfParams, seed: u64) -> Vec<u8> {
        SealedKey::seal(
            record.as_bytes(),
            &Passphrase::from(pwd),
            kdf,
            &SeededEntropy::new(seed),
        )
        .unwrap()
        .to_bytes()
    }

    #[test]
    fn load_sealed_key() {
        let data = sealed(&K2048.record_json(), "passwd", KdfParams::new(64, 1, 1), 21);
        let key = load(data.as_slice(), &Passphrase::from("passwd")).unwrap();
        assert_eq!(key.public_key().bits(), 2048);
        assert_eq!(format!("{:x}", key.public_key().modulus()), K2048.n);
        key.is_valid().unwrap();

        let parsed = SealedKey::from_bytes(&data).unwrap();
        assert!(load(&parsed, &Passphrase::from("passwd")).is_ok());
    }

    #[test]
    fn load_failures() {
        let kdf = KdfParams::new(64, 1, 1);
        let pwd = Passphrase::from("passwd");
        let data = sealed(&K2048.record_json(), "passwd", kdf, 22);

        assert_eq!(
            load(data.as_slice(), &Passphrase::from("passwe")).unwrap_err(),
            AsymError::KeyDecryptionFailed
        );

        let mut corrupted = data.clone();
        corrupted[SealedKey::header_len() + 100] ^= 0x20;
        assert_eq!(
            load(corrupted.as_slice(), &pwd).unwrap_err(),
            AsymError::KeyDecryptionFailed
        );

        let data = sealed("{\"n\": 1}", "passwd", kdf, 23);
        assert!(matches!(
            load(data.as_slice(), &pwd),
            Err(AsymError::KeyParseError(_))
        ));

        for (f, bits) in [(&K2047, 2047usize), (&K1024, 1024)] {
            let data = sealed(&f.record_json(), "passwd", kdf, 24);
            assert_eq!(
                load(data.as_slice(), &pwd).unwrap_err(),
                AsymError::UnsupportedKeySize(bits)
            );
        }

        assert!(matches!(
            load_record(b"not json"),
            Err(AsymError::KeyParseError(_))
        ));
    }

    fn median(mut x: Vec<Duration>) -> Duration {
        x.sort();
        x[x.len() / 2]
    }

    #[test]
    fn failure_timing_is_indistinguishable() {
        // both failures pay for the full kdf and the tag check
        let kdf = KdfParams::new(1024, 2, 1);
        let pwd = Passphrase::from("passwd");
        let data = sealed(&K2048.record_json(), "passwd", kdf, 25);
        let mut corrupted = data.clone();
        let last = corrupted.len() - 1;
        corrupted[last] ^= 0x01;
        let wrong = Passphrase::from("passwD");

        let measure = |data: &[u8], pwd: &Passphrase| {
            let now = Instant::now();
            assert_eq!(
                load(data, pwd).unwrap_err(),
                AsymError::KeyDecryptionFailed
            );
            now.elapsed()
        };

        // warm up
        measure(&corrupted, &pwd);
        let (mut a, mut b) = (Vec::new(), Vec::new());
        for _ in 0..9 {
            a.push(measure(&data, &wrong));
            b.push(measure(&corrupted, &pwd));
        }

        let (a, b) = (median(a).as_secs_f64(), median(b).as_secs_f64());
        let ratio = a.max(b) / a.min(b).max(1e-9);
        assert!(ratio < 3.0, "wrong passphrase {a}s, corrupted {b}s");
    }

    #[test]
    fn passphrase_is_redacted() {
        let pwd = Passphrase::from("hunter2");
        assert_eq!(format!("{pwd:?}"), "Passphrase(..)");
        assert_eq!(pwd.as_bytes(), b"hunter2");
        assert!(Passphrase::from(Vec::new()).is_empty());
    }
}
