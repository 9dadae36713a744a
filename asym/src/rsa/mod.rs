//! RSA
//!
//! - modulus $n = p \cdot q$, its byte length $k$ satisfies $2^{(k-1) \cdot 8} \le n \lt 2^{k \cdot 8}$;
//! - $e \cdot d \equiv 1 \mod \lambda(n)$, $\lambda(n) = lcm(p-1, q-1)$;
//!
//! encrypt / verify: $y = x^e \mod n$;
//!
//! decrypt / sign: $y = x^d \mod n$, via CRT when $p, q$ are known;
//!
//! Every signature and cipher block is exactly $k$ bytes.

mod key;
pub use key::{CrtParams, PrivateKey, PublicKey, RSA_DEFAULT_EXPONENT, RSA_MIN_MODULUS_BITS};

mod core;

mod hash;
pub use hash::HashAlgorithm;

mod scheme;
pub use scheme::{PkcsScheme, RSA_SALT_LEN, RSA_USE_PKCS_15_VERSION, RSA_USE_PKCS_21_VERSION};

pub mod pkcs1;
pub mod pss;

mod engine;
pub use engine::RsaEngine;

#[cfg(test)]
pub(crate) mod fixtures;
