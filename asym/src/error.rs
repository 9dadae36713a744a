use entropy::EntropyError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsymError {
    /// wrong passphrase and corrupted container are reported identically
    #[error("rsa: key container decryption failed")]
    KeyDecryptionFailed,

    #[error("rsa: malformed key record: {0}")]
    KeyParseError(String),

    #[error("rsa: invalid key derivation parameters: {0}")]
    InvalidKdfParams(String),

    #[error("rsa: unsupported key size `{0}` bits")]
    UnsupportedKeySize(usize),

    #[error("rsa: unsupported pkcs scheme `{0:#x}`")]
    UnsupportedScheme(u32),

    #[error("rsa: message length `{len}` exceeds the maximum `{max}` bytes")]
    MessageTooLong { len: usize, max: usize },

    #[error("rsa: invalid block, the block value need to be less than the modulus")]
    InvalidBlock,

    #[error("rsa: decryption error")]
    DecryptionPaddingError,

    #[error("{0}")]
    EntropyUnavailable(EntropyError),

    #[error("Buffer size `{real}` is too small, need at least `{need}` bytes")]
    BufferTooSmall { need: usize, real: usize },

    #[error("rsa: invalid signature length `{actual}`, expected `{expected}` bytes")]
    InvalidSignatureLength { expected: usize, actual: usize },

    #[error("rsa: invalid digest length `{actual}`, expected `{expected}` bytes")]
    InvalidDigestLength { expected: usize, actual: usize },

    #[error("rsa: invalid public key: {0}")]
    InvalidPublicKey(String),
}

impl From<EntropyError> for AsymError {
    fn from(value: EntropyError) -> Self {
        Self::EntropyUnavailable(value)
    }
}
