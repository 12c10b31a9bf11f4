#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, ops, str};

use crate::codec;

/// Represents a 128-bit identifier in the UUID wire format.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID byte array from two 64-bit halves.
    ///
    /// The most significant half comes first in the byte array, so the
    /// canonical string representation is the zero-padded hexadecimal form of
    /// `msb` followed by that of `lsb`, sliced into the 8-4-4-4-12 grouping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid8::Uuid;
    ///
    /// let e = Uuid::from_u64_pair(0x0123456789abcdef, 0xfedcba9876543210);
    /// assert_eq!(&e.encode() as &str, "01234567-89ab-cdef-fedc-ba9876543210");
    /// ```
    pub const fn from_u64_pair(msb: u64, lsb: u64) -> Self {
        Self((((msb as u128) << 64) | lsb as u128).to_be_bytes())
    }

    /// Creates a UUID byte array from UUIDv8 field values.
    ///
    /// The layout packs the version nibble (`8`) and the low 60 bits of
    /// `rand_word` (including the tag nibble at bits 8-11) into the most
    /// significant half, and the variant bits (`10`), the 48-bit
    /// epoch-relative `timestamp`, and the 14-bit `sequence` into the least
    /// significant half.
    pub const fn from_fields_v8(timestamp: u64, rand_word: u64, sequence: u16) -> Self {
        if timestamp >= 1 << 48 || sequence >= 1 << 14 {
            panic!("invalid field value");
        }

        let msb = 0x0000_0000_0000_8000u64 | (rand_word & 0xffff_ffff_ffff_0fff);
        let lsb = 0x8000_0000_0000_0000u64 | (timestamp << 14) | sequence as u64;
        Self::from_u64_pair(msb, lsb)
    }

    /// Returns the variant field value of the UUID.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 => Variant::Var0,
            0x8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version field value of the UUID, or `None` if the UUID
    /// does not have the variant field value of `10`.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns the 48-bit epoch-relative timestamp field of a UUIDv8.
    ///
    /// The result is meaningless for other UUID families.
    pub fn timestamp(&self) -> u64 {
        let b = &self.0;
        let lsb = u64::from_be_bytes([b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]]);
        (lsb >> 14) & 0x0000_ffff_ffff_ffff
    }

    /// Returns the 14-bit sequence field of a UUIDv8.
    ///
    /// The result is meaningless for other UUID families.
    pub const fn sequence(&self) -> u16 {
        ((self.0[14] as u16 & 0x3f) << 8) | self.0[15] as u16
    }

    /// Returns the 4-bit tag field of a UUIDv8.
    ///
    /// The result is meaningless for other UUID families.
    pub const fn tag(&self) -> u8 {
        self.0[6] & 0x0f
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// This method is primarily for `no_std` environments where heap-allocated string types are
    /// not readily available. Use the [`fmt::Display`] trait usually to get the 8-4-4-4-12
    /// canonical hexadecimal string representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid8::Uuid;
    ///
    /// let x = "18c4dc0c-0c07-898f-805f-c8b89e6c0cc3".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "18c4dc0c-0c07-898f-805f-c8b89e6c0cc3");
    /// assert_eq!(format!("{}", y), "18c4dc0c-0c07-898f-805f-c8b89e6c0cc3");
    /// # Ok::<(), uuid8::ParseError>(())
    /// ```
    pub fn encode(&self) -> impl ops::Deref<Target = str> + fmt::Display {
        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for i in 0..16 {
            let [hi, lo] = codec::HEX_PAIRS[self.0[i] as usize];
            *buf_iter.next().unwrap() = hi;
            *buf_iter.next().unwrap() = lo;
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buf_iter.next().unwrap() = b'-';
            }
        }
        debug_assert!(buffer.is_ascii());
        UuidStr(buffer)
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

/// Reads an identifier string into four 32-bit words, most significant first.
///
/// This function accumulates eight hexadecimal digits (either case) per word,
/// left to right, skipping hyphens wherever they appear; it does not insist on
/// the canonical hyphen placement. Any other character, or a digit count other
/// than 32, is reported as a [`ParseError`].
///
/// # Examples
///
/// ```rust
/// use uuid8::parse_words;
///
/// let words = parse_words("01234567-89ab-cdef-fedc-ba9876543210")?;
/// assert_eq!(words, [0x01234567, 0x89abcdef, 0xfedcba98, 0x76543210]);
/// # Ok::<(), uuid8::ParseError>(())
/// ```
pub fn parse_words(src: &str) -> Result<[u32; 4], ParseError> {
    const ERR: ParseError = ParseError {};
    let mut words = [0u32; 4];
    let mut n = 0usize;
    for c in src.chars() {
        if c == '-' {
            continue;
        }
        let digit = c.to_digit(16).ok_or(ERR)?;
        if n == 32 {
            return Err(ERR);
        }
        words[n / 8] = (words[n / 8] << 4) | digit;
        n += 1;
    }
    if n == 32 {
        Ok(words)
    } else {
        Err(ERR)
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

/// Represents the variant field values of UUIDs.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// The variant field value of `0xxx`.
    Var0,

    /// The variant field value of `10xx`: the variant carried by the v4 and
    /// v8 families produced by this crate.
    Var10,

    /// The variant field value of `110x`.
    Var110,

    /// The variant field value of `111x`.
    VarReserved,
}

/// Concrete return type of [`Uuid::encode()`] containing the stack-allocated 8-4-4-4-12 string
/// representation.
struct UuidStr([u8; 36]);

impl ops::Deref for UuidStr {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        debug_assert!(self.0.is_ascii());
        unsafe { str::from_utf8_unchecked(&self.0) }
    }
}

impl fmt::Display for UuidStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid string representation")
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Uuid};

    impl From<Uuid> for String {
        fn from(src: Uuid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Uuid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }

    impl std::error::Error for ParseError {}
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{parse_words, Uuid};

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [((u64, u64, u16), &'static str)] {
        const MAX_UINT48: u64 = (1 << 48) - 1;
        const MAX_UINT14: u16 = (1 << 14) - 1;

        &[
            ((0, 0, 0), "00000000-0000-8000-8000-000000000000"),
            ((MAX_UINT48, 0, 0), "00000000-0000-8000-bfff-ffffffffc000"),
            ((0, u64::MAX, 0), "ffffffff-ffff-8fff-8000-000000000000"),
            ((0, 0, MAX_UINT14), "00000000-0000-8000-8000-000000003fff"),
            (
                (MAX_UINT48, u64::MAX, MAX_UINT14),
                "ffffffff-ffff-8fff-bfff-ffffffffffff",
            ),
            (
                (0x17f22e279b0, 0x18c4dc0c0c07398f, 0x0cc3),
                "18c4dc0c-0c07-898f-805f-c8b89e6c0cc3",
            ),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for (fs, text) in prepare_cases() {
            let from_fields = Uuid::from_fields_v8(fs.0, fs.1, fs.2);
            assert_eq!(Ok(from_fields), text.parse());
            assert_eq!(Ok(from_fields), text.to_uppercase().parse());
            assert_eq!(&from_fields.encode() as &str, *text);
            #[cfg(feature = "std")]
            assert_eq!(&from_fields.to_string(), text);
            #[cfg(feature = "std")]
            assert_eq!(&from_fields.encode().to_string(), text);
            #[cfg(all(feature = "std", feature = "uuid"))]
            assert_eq!(&uuid::Uuid::from(from_fields).to_string(), text);
        }
    }

    /// Recovers v8 field values from encoded identifiers
    #[test]
    fn recovers_v8_field_values_from_encoded_identifiers() {
        for (fs, _) in prepare_cases() {
            let e = Uuid::from_fields_v8(fs.0, fs.1, fs.2);
            assert_eq!(e.timestamp(), fs.0);
            assert_eq!(e.sequence(), fs.2);
            assert_eq!(e.tag(), ((fs.1 >> 8) & 0x0f) as u8);
            assert_eq!(e.version(), Some(8));
        }
    }

    /// Renders two 64-bit halves as a canonical identifier string
    #[test]
    fn renders_two_64_bit_halves_as_a_canonical_identifier_string() {
        let e = Uuid::from_u64_pair(0x0123456789abcdef, 0xfedcba9876543210);
        assert_eq!(&e.encode() as &str, "01234567-89ab-cdef-fedc-ba9876543210");

        let zero = Uuid::from_u64_pair(0, 0);
        assert_eq!(
            &zero.encode() as &str,
            "00000000-0000-0000-0000-000000000000"
        );

        let padded = Uuid::from_u64_pair(0x1, 0x2);
        assert_eq!(
            &padded.encode() as &str,
            "00000000-0000-0001-0000-000000000002"
        );
    }

    /// Reads identifier strings into four 32-bit words
    #[test]
    fn reads_identifier_strings_into_four_32_bit_words() {
        assert_eq!(
            parse_words("01234567-89ab-cdef-fedc-ba9876543210"),
            Ok([0x01234567, 0x89abcdef, 0xfedcba98, 0x76543210])
        );
        // case-insensitive, hyphen placement not enforced
        assert_eq!(
            parse_words("0123456789ABCDEFFEDCBA9876543210"),
            Ok([0x01234567, 0x89abcdef, 0xfedcba98, 0x76543210])
        );
        assert_eq!(
            parse_words("0123-456789abcdeffedcba98765432-10"),
            Ok([0x01234567, 0x89abcdef, 0xfedcba98, 0x76543210])
        );
    }

    /// Round-trips the word parser with the pair formatter
    #[test]
    fn round_trips_the_word_parser_with_the_pair_formatter() {
        for (fs, _) in prepare_cases() {
            let e = Uuid::from_fields_v8(fs.0, fs.1, fs.2);
            let words = parse_words(&e.encode()).unwrap();
            let msb = ((words[0] as u64) << 32) | words[1] as u64;
            let lsb = ((words[2] as u64) << 32) | words[3] as u64;
            assert_eq!(Uuid::from_u64_pair(msb, lsb), e);
        }
    }

    /// Rejects malformed word parser input
    #[test]
    fn rejects_malformed_word_parser_input() {
        let cases = [
            "",
            "-",
            "0123456789abcdef",
            "01234567-89ab-cdef-fedc-ba98765432100",
            "01234567-89ab-cdef-fedc-ba987654321",
            "01234567-89ab-cdef-fedc-ba98765432g0",
            "01234567 89ab cdef fedc ba9876543210",
            "{01234567-89ab-cdef-fedc-ba9876543210}",
        ];

        for e in cases {
            assert!(parse_words(e).is_err());
        }
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            " 18c4dc0c-0c07-898f-805f-c8b89e6c0cc3",
            "18c4dc0c-0c07-898f-805f-c8b89e6c0cc3 ",
            " 18c4dc0c-0c07-898f-805f-c8b89e6c0cc3 ",
            "+18c4dc0c-0c07-898f-805f-c8b89e6c0cc3",
            "-18c4dc0c-0c07-898f-805f-c8b89e6c0cc3",
            "+8c4dc0c-0c07-898f-805f-c8b89e6c0cc3",
            "-8c4dc0c-0c07-898f-805f-c8b89e6c0cc3",
            "18c4dc0c0c07898f805fc8b89e6c0cc3",
            "18c4dc0c-0c07898f-805f-c8b89e6c0cc3",
            "{18c4dc0c-0c07-898f-805f-c8b89e6c0cc3}",
            "18c4dc0c-0c07-89 f-805f-c8b89e6c0cc3",
            "18c4dg0c-0c07-898f-805f-c8b89e6c0cc3",
            "18c4dc0c-0c07-898f-805f_c8b89e6c0cc3",
        ];

        for e in cases {
            assert!(e.parse::<Uuid>().is_err());
        }
    }

    /// Returns Nil and Max UUIDs
    #[test]
    fn returns_nil_and_max_uuids() {
        assert_eq!(
            &Uuid::NIL.encode() as &str,
            "00000000-0000-0000-0000-000000000000"
        );

        assert_eq!(
            &Uuid::MAX.encode() as &str,
            "ffffffff-ffff-ffff-ffff-ffffffffffff"
        );
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (fs, _) in prepare_cases() {
            let e = Uuid::from_fields_v8(fs.0, fs.1, fs.2);
            assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
            assert_eq!(Uuid::from(u128::from(e)), e);
            assert_eq!(e.encode().parse(), Ok(e));
            assert_eq!(e.encode().to_uppercase().parse(), Ok(e));
            #[cfg(feature = "std")]
            assert_eq!(Uuid::try_from(e.to_string()), Ok(e));
            #[cfg(feature = "std")]
            assert_eq!(Uuid::try_from(e.to_string().to_uppercase()), Ok(e));
            #[cfg(feature = "uuid")]
            assert_eq!(Uuid::from(<uuid::Uuid>::from(e)), e);

            #[cfg(feature = "uuid")]
            assert_eq!(uuid::Uuid::from(e).as_bytes(), &<[u8; 16]>::from(e));
            #[cfg(feature = "uuid")]
            assert_eq!(uuid::Uuid::from(e).as_u128(), u128::from(e));
        }
    }
}
