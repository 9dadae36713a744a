pub(crate) mod bigint_ext;
pub(crate) use bigint_ext::{biguint_from_hex, scrub, BigUintExt, SecretUint};
