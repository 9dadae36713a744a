//! RSA signing and encryption for boot image tooling.
//!
//! - [`rsa`]: padding engines, RSA primitives and the [`rsa::RsaEngine`] facade;
//! - [`loader`]: passphrase protected key containers;
//! - [`hparam`]: the H parameter of a public modulus;
//!
//! Randomness is injected through [`entropy::EntropySource`].

mod error;
pub use error::AsymError;

pub mod abort;

pub(crate) mod utils;

pub mod hparam;
pub mod loader;
pub mod rsa;

pub use entropy::{EntropySource, OsEntropy};
pub use hparam::{derive_h, derive_h_into};
pub use loader::{load, load_record, KdfParams, KeyContainer, Passphrase, SealedKey};
pub use rsa::{HashAlgorithm, PkcsScheme, PrivateKey, PublicKey, RsaEngine};
