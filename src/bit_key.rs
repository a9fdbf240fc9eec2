//! Bit-level key encoding.
//!
//! Every byte of a key becomes exactly eight bits, most significant bit
//! first. Inputs that already look like a bit-string (only ASCII `'0'` and
//! `'1'`) are taken as-is, so a [`BitKey`] fed back into a trie lands on the
//! same path instead of being encoded twice. The flip side is that a literal
//! key such as `"101"` is indistinguishable from the three-bit path `1 0 1`.

use std::fmt;

use crate::as_bytes::AsBytes;

/// A single edge label of the binary trie.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Child slot selected by this bit: `0` is the left slot, `1` the right.
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    #[inline]
    fn from_ascii(byte: u8) -> Self {
        if byte == b'1' { Bit::One } else { Bit::Zero }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Returns `true` if `bytes` is non-empty and made only of ASCII `'0'`/`'1'`.
pub fn is_bit_string(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(|&b| b == b'0' || b == b'1')
}

/// The canonical bit path of a byte string.
///
/// Equality and hashing are defined over the bit path alone, so two keys
/// built from different inputs compare equal when they encode to the same
/// bits.
///
/// # Examples
///
/// ```
/// use qgraph::BitKey;
///
/// let key = BitKey::encode(b"a");
/// assert_eq!(key.as_str(), "01100001");
/// assert_eq!(key.len(), 8);
///
/// // Already bit-shaped input is not encoded again.
/// assert_eq!(BitKey::encode(b"01100001"), key);
/// ```
#[derive(Clone)]
pub struct BitKey {
    bits: String,
    raw_len: usize,
}

impl BitKey {
    /// Encodes `bytes` into its bit path.
    pub fn encode(bytes: &[u8]) -> Self {
        let bits = if is_bit_string(bytes) {
            bytes.iter().map(|&b| char::from(b)).collect()
        } else {
            let mut bits = String::with_capacity(bytes.len() * 8);
            for byte in bytes {
                for shift in (0..8).rev() {
                    bits.push(Bit::from((byte >> shift) & 1 == 1).as_char());
                }
            }
            bits
        };

        BitKey {
            bits,
            raw_len: bytes.len(),
        }
    }

    /// Encodes any [`AsBytes`] key.
    pub fn from_key<K: AsBytes>(key: K) -> Self {
        Self::encode(&key.as_bytes_vec())
    }

    /// Number of bits in the path.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Length in bytes of the input this key was built from.
    pub fn raw_len(&self) -> usize {
        self.raw_len
    }

    /// The path as ASCII `'0'`/`'1'` characters.
    pub fn as_str(&self) -> &str {
        &self.bits
    }

    pub fn bits(&self) -> impl Iterator<Item = Bit> + '_ {
        self.bits.bytes().map(Bit::from_ascii)
    }

    /// The final bit of the path, `None` for the empty key.
    pub fn last_bit(&self) -> Option<Bit> {
        self.bits.bytes().next_back().map(Bit::from_ascii)
    }
}

impl PartialEq for BitKey {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for BitKey {}

impl std::hash::Hash for BitKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl PartialEq<str> for BitKey {
    fn eq(&self, other: &str) -> bool {
        self.bits == other
    }
}

impl PartialEq<&str> for BitKey {
    fn eq(&self, other: &&str) -> bool {
        self.bits == *other
    }
}

impl fmt::Display for BitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bits)
    }
}

impl fmt::Debug for BitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitKey({})", self.bits)
    }
}

// A key re-inserted through its own bit-string hits the bypass and keeps its path.
impl AsBytes for BitKey {
    fn as_bytes(&self) -> impl Iterator<Item = u8> {
        self.bits.bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_encode_is_fixed_width_msb_first() {
        assert_eq!(BitKey::encode(b"abc").as_str(), "011000010110001001100011");
        assert_eq!(BitKey::encode(&[0x00]).as_str(), "00000000");
        assert_eq!(BitKey::encode(&[0xff, 0x01]).as_str(), "1111111100000001");
    }

    #[test]
    fn test_every_byte_encodes_to_its_binary_form() {
        for byte in (0..=255u8).filter(|&b| !matches!(b, b'0' | b'1')) {
            assert_eq!(BitKey::encode(&[byte]).as_str(), format!("{byte:08b}"));
        }
    }

    #[test]
    fn test_len_is_eight_bits_per_byte() {
        let key = BitKey::encode(b"iphone 2017");
        assert_eq!(key.len(), 8 * 11);
        assert_eq!(key.raw_len(), 11);
        assert_eq!(key.bits().count(), key.len());
    }

    #[test]
    fn test_empty_input_gives_empty_path() {
        let key = BitKey::encode(b"");
        assert!(key.is_empty());
        assert_eq!(key.len(), 0);
        assert_eq!(key.last_bit(), None);
        assert!(!is_bit_string(b""));
    }

    #[test]
    fn test_bit_shaped_input_bypasses_encoding() {
        let key = BitKey::encode(b"0110");
        assert_eq!(key.as_str(), "0110");
        assert_eq!(key.raw_len(), 4);

        let all_zero = BitKey::encode(b"000");
        assert_eq!(all_zero.as_str(), "000");
    }

    #[test]
    fn test_reencoding_a_key_is_idempotent() {
        let key = BitKey::from_key("foo");
        let again = BitKey::from_key(&key);
        assert_eq!(key, again);
    }

    #[test]
    fn test_equality_and_hash_follow_the_bit_path() {
        let from_text = BitKey::encode(b"a");
        let from_bits = BitKey::encode(b"01100001");
        assert_eq!(from_text, from_bits);
        assert_ne!(from_text.raw_len(), from_bits.raw_len());

        let mut set = HashSet::new();
        set.insert(from_text);
        assert!(set.contains(&from_bits));
    }

    #[test]
    fn test_last_bit_and_bit_iteration() {
        let key = BitKey::encode(b"a");
        assert_eq!(key.last_bit(), Some(Bit::One));
        assert_eq!(BitKey::encode(b"b").last_bit(), Some(Bit::Zero));
        assert_eq!(BitKey::encode(b"10").last_bit(), Some(Bit::Zero));
        assert_eq!(BitKey::encode(b"").last_bit(), None);
        let bits: Vec<Bit> = key.bits().take(3).collect();
        assert_eq!(bits, vec![Bit::Zero, Bit::One, Bit::One]);
        assert_eq!(Bit::Zero.slot(), 0);
        assert_eq!(Bit::One.slot(), 1);
        assert_eq!(Bit::from(true), Bit::One);
    }

    #[test]
    fn test_display_matches_bit_string() {
        let key = BitKey::encode(b"z");
        assert_eq!(key.to_string(), "01111010");
        assert!(key == "01111010");
        assert_eq!(format!("{key:?}"), "BitKey(01111010)");
    }
}
