use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum BootSignError {
    #[error("Validation failed: the signature does not match the digest")]
    ValidateFailed,

    #[error("Invalid digest length `{real}` bytes for `{hash}`, need `{need}` bytes")]
    InvalidDigestFile {
        hash: String,
        need: usize,
        real: usize,
    },

    #[error("Invalid public key file `{path}`: {msg}")]
    InvalidPublicKeyFile { path: String, msg: String },

    #[error("password not same between two inputs")]
    PasswordMismatch,

    #[error("password can not empty")]
    EmptyPassword,
}
