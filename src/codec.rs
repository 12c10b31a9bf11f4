//! Byte-buffer codecs: the hexadecimal digit-pair table and base62 strings.

#[cfg(feature = "std")]
use std::fmt;

/// Lookup table mapping each byte value to its two lowercase hexadecimal
/// digits.
pub(crate) const HEX_PAIRS: [[u8; 2]; 256] = {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut table = [[0u8; 2]; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = [DIGITS[i >> 4], DIGITS[i & 15]];
        i += 1;
    }
    table
};

/// The base62 digits in ascending order of value.
#[cfg(feature = "std")]
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

#[cfg(feature = "std")]
const fn digit_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'Z' => Some(c - b'A' + 10),
        b'a'..=b'z' => Some(c - b'a' + 36),
        _ => None,
    }
}

/// Encodes a big-endian byte buffer as a base62 string.
///
/// The buffer is interpreted as one unsigned integer, so leading zero bytes do
/// not contribute to the output and the zero value encodes as `"0"`. Buffers
/// of any length are accepted.
///
/// # Examples
///
/// ```rust
/// assert_eq!(uuid8::codec::encode_base62(&0u64.to_be_bytes()), "0");
/// assert_eq!(uuid8::codec::encode_base62(&u64::MAX.to_be_bytes()), "LygHa16AHYF");
/// ```
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub fn encode_base62(bytes: &[u8]) -> String {
    let mut scratch: Vec<u8> = bytes.iter().copied().skip_while(|&b| b == 0).collect();
    if scratch.is_empty() {
        return "0".to_owned();
    }

    let mut out = Vec::with_capacity(bytes.len() * 8 / 5 + 1);
    while !scratch.is_empty() {
        // long division of the buffer by 62; the remainder is the next digit
        let mut rem = 0u32;
        let mut quot = Vec::with_capacity(scratch.len());
        for &b in &scratch {
            let acc = (rem << 8) | b as u32;
            let q = (acc / 62) as u8;
            rem = acc % 62;
            if !(quot.is_empty() && q == 0) {
                quot.push(q);
            }
        }
        out.push(ALPHABET[rem as usize]);
        scratch = quot;
    }
    out.reverse();

    debug_assert!(out.is_ascii());
    unsafe { String::from_utf8_unchecked(out) }
}

/// Decodes a base62 string back into a big-endian byte buffer.
///
/// The result is the minimal representation of the encoded value; leading zero
/// bytes dropped by [`encode_base62`] are not recovered. Empty input or a
/// character outside the base62 alphabet yields a [`Base62Error`].
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub fn decode_base62(src: &str) -> Result<Vec<u8>, Base62Error> {
    if src.is_empty() {
        return Err(Base62Error {});
    }

    let mut out: Vec<u8> = Vec::new();
    for c in src.bytes() {
        let digit = digit_value(c).ok_or(Base62Error {})?;
        // out = out * 62 + digit
        let mut carry = digit as u32;
        for b in out.iter_mut().rev() {
            let acc = *b as u32 * 62 + carry;
            *b = acc as u8;
            carry = acc >> 8;
        }
        while carry > 0 {
            out.insert(0, carry as u8);
            carry >>= 8;
        }
    }
    if out.is_empty() {
        out.push(0);
    }
    Ok(out)
}

/// Error decoding an invalid base62 string.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Base62Error {}

#[cfg(feature = "std")]
impl fmt::Display for Base62Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid base62 representation")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Base62Error {}

#[cfg(test)]
mod tests {
    use super::HEX_PAIRS;

    /// Maps byte values to lowercase hexadecimal digit pairs
    #[test]
    fn maps_byte_values_to_lowercase_hexadecimal_digit_pairs() {
        assert_eq!(&HEX_PAIRS[0x00], b"00");
        assert_eq!(&HEX_PAIRS[0x0f], b"0f");
        assert_eq!(&HEX_PAIRS[0xab], b"ab");
        assert_eq!(&HEX_PAIRS[0xff], b"ff");

        for (i, pair) in HEX_PAIRS.iter().enumerate() {
            let text = core::str::from_utf8(pair).unwrap();
            assert_eq!(u8::from_str_radix(text, 16), Ok(i as u8));
        }
    }
}
