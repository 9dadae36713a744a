use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Digest algorithm of the caller supplied message digest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

// DER of DigestInfo without the digest octets, RFC 8017 section 9.2 notes
const SHA256_PREFIX: [u8; 19] = [
    0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01, 0x05,
    0x00, 0x04, 0x20,
];
const SHA384_PREFIX: [u8; 19] = [
    0x30, 0x41, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x02, 0x05,
    0x00, 0x04, 0x30,
];
const SHA512_PREFIX: [u8; 19] = [
    0x30, 0x51, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x03, 0x05,
    0x00, 0x04, 0x40,
];

impl HashAlgorithm {
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    pub const fn digest_info_prefix(self) -> &'static [u8] {
        match self {
            Self::Sha256 => &SHA256_PREFIX,
            Self::Sha384 => &SHA384_PREFIX,
            Self::Sha512 => &SHA512_PREFIX,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    pub fn digest(self, msg: &[u8]) -> Vec<u8> {
        self.digest_parts(&[msg])
    }

    pub(crate) fn digest_parts(self, parts: &[&[u8]]) -> Vec<u8> {
        match self {
            Self::Sha256 => hash_parts::<Sha256>(parts),
            Self::Sha384 => hash_parts::<Sha384>(parts),
            Self::Sha512 => hash_parts::<Sha512>(parts),
        }
    }

    /// MGF1: `out ^= Hash(seed || C(0)) || Hash(seed || C(1)) || ...`
    pub(crate) fn mgf1_xor(self, seed: &[u8], out: &mut [u8]) {
        match self {
            Self::Sha256 => mgf1_xor_with::<Sha256>(seed, out),
            Self::Sha384 => mgf1_xor_with::<Sha384>(seed, out),
            Self::Sha512 => mgf1_xor_with::<Sha512>(seed, out),
        }
    }
}

fn hash_parts<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

fn mgf1_xor_with<D: Digest>(seed: &[u8], out: &mut [u8]) {
    let mut count = 0u32;
    for block in out.chunks_mut(<D as Digest>::output_size()) {
        let mut hasher = D::new();
        hasher.update(seed);
        hasher.update(count.to_be_bytes());
        let mask = hasher.finalize();

        block.iter_mut().zip(mask.iter()).for_each(|(a, &b)| *a ^= b);
        count = count.wrapping_add(1);
    }
}

impl FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sha256" | "sha2-256" | "sha-256" => Ok(Self::Sha256),
            "sha384" | "sha2-384" | "sha-384" => Ok(Self::Sha384),
            "sha512" | "sha2-512" | "sha-512" => Ok(Self::Sha512),
            _ => Err(format!("do not support the hash function: `{s}`")),
        }
    }
}

impl Display for HashAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
