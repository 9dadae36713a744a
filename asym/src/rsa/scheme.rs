use crate::AsymError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// PKCS#1 v2.1 (PSS) selector value used by the image tooling
pub const RSA_USE_PKCS_21_VERSION: u32 = 0x01;
/// PKCS#1 v1.5 selector value used by the image tooling
pub const RSA_USE_PKCS_15_VERSION: u32 = 0x02;

/// Salt length of every PSS signature, in bytes.
pub const RSA_SALT_LEN: usize = 32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PkcsScheme {
    /// deterministic `0x00 || 0x01 || PS || 0x00 || DigestInfo`
    Pkcs1v15,
    /// salted EMSA-PSS with MGF1 over the same hash
    Pkcs1Pss,
}

impl PkcsScheme {
    pub const fn version(self) -> u32 {
        match self {
            Self::Pkcs1v15 => RSA_USE_PKCS_15_VERSION,
            Self::Pkcs1Pss => RSA_USE_PKCS_21_VERSION,
        }
    }
}

impl TryFrom<u32> for PkcsScheme {
    type Error = AsymError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            RSA_USE_PKCS_21_VERSION => Ok(Self::Pkcs1Pss),
            RSA_USE_PKCS_15_VERSION => Ok(Self::Pkcs1v15),
            x => Err(AsymError::UnsupportedScheme(x)),
        }
    }
}

impl FromStr for PkcsScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pss" | "pkcs1pss" | "pkcs21" => Ok(Self::Pkcs1Pss),
            "v15" | "pkcs1v15" | "pkcs15" => Ok(Self::Pkcs1v15),
            _ => Err(format!("do not support the pkcs scheme: `{s}`")),
        }
    }
}

impl Display for PkcsScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pkcs1v15 => f.write_str("pkcs1v15"),
            Self::Pkcs1Pss => f.write_str("pss"),
        }
    }
}
