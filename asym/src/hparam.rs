//! H parameter of the image certificate: the public modulus as a C string of
//! uppercase hex digits, `2 * n.len() + 1` bytes.

use crate::AsymError;

/// C string terminator closing the hex digits
pub const H_TERMINATOR: u8 = 0x00;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// length of the H parameter of an `n_len` byte modulus
pub const fn h_len(n_len: usize) -> usize {
    (n_len << 1) + 1
}

/// `n` big-endian bytes, the byte order is kept and no leading zero is dropped
pub fn derive_h(n: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(h_len(n.len()));
    n.iter().for_each(|&x| {
        out.push(HEX_DIGITS[(x >> 4) as usize]);
        out.push(HEX_DIGITS[(x & 0xf) as usize]);
    });
    out.push(H_TERMINATOR);
    out
}

/// Writes the H parameter to the front of `out` and returns its length. `out` is
/// left untouched when it is too small.
pub fn derive_h_into(n: &[u8], out: &mut [u8]) -> Result<usize, AsymError> {
    let len = h_len(n.len());
    if out.len() < len {
        return Err(AsymError::BufferTooSmall {
            need: len,
            real: out.len(),
        });
    }

    for (&x, digits) in n.iter().zip(out.chunks_exact_mut(2)) {
        digits[0] = HEX_DIGITS[(x >> 4) as usize];
        digits[1] = HEX_DIGITS[(x & 0xf) as usize];
    }
    out[len - 1] = H_TERMINATOR;

    Ok(len)
}
