//! Scalar primitives shared across the ledger: 256-bit integers and the
//! opaque 32-byte identifiers used for addresses, tags, and code hashes.

use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, Write};
use commonware_utils::{from_hex, hex};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Token identifiers live in their own 256-bit space.
pub type TokenId = U256;

/// Artifact identifiers are assigned at mint time (identity-mapped from the
/// token id) and are never reused.
pub type ArtifactId = U256;

fn write_bytes32(bytes: &[u8; 32], writer: &mut impl BufMut) {
    writer.put_slice(bytes);
}

fn read_bytes32(reader: &mut impl Buf) -> Result<[u8; 32], Error> {
    if reader.remaining() < 32 {
        return Err(Error::EndOfBuffer);
    }
    let mut bytes = [0u8; 32];
    reader.copy_to_slice(&mut bytes);
    Ok(bytes)
}

fn parse_hex32(s: &str) -> Result<[u8; 32], String> {
    let raw = from_hex(s).ok_or_else(|| "invalid hex string".to_string())?;
    if raw.len() != 32 {
        return Err(format!("expected 32 bytes, got {}", raw.len()));
    }
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&raw);
    Ok(bytes)
}

fn short_hex(bytes: &[u8; 32]) -> String {
    // Skip the zero prefix so small scalars stay readable.
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(31);
    hex(&bytes[start..])
}

/// An unsigned 256-bit integer, stored as two 128-bit halves.
///
/// The wire form is the 32-byte big-endian representation; the JSON form is
/// the decimal string (matching how deploy tooling supplies prices and
/// supply ceilings).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct U256 {
    pub high: u128,
    pub low: u128,
}

impl U256 {
    pub const ZERO: Self = Self { high: 0, low: 0 };
    pub const ONE: Self = Self { high: 0, low: 1 };
    pub const MAX: Self = Self {
        high: u128::MAX,
        low: u128::MAX,
    };

    pub const fn new(high: u128, low: u128) -> Self {
        Self { high, low }
    }

    pub const fn from_u64(value: u64) -> Self {
        Self {
            high: 0,
            low: value as u128,
        }
    }

    pub const fn from_u128(value: u128) -> Self {
        Self {
            high: 0,
            low: value,
        }
    }

    pub const fn is_zero(&self) -> bool {
        self.high == 0 && self.low == 0
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(&self.high.to_be_bytes());
        bytes[16..].copy_from_slice(&self.low.to_be_bytes());
        bytes
    }

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let mut high = [0u8; 16];
        let mut low = [0u8; 16];
        high.copy_from_slice(&bytes[..16]);
        low.copy_from_slice(&bytes[16..]);
        Self {
            high: u128::from_be_bytes(high),
            low: u128::from_be_bytes(low),
        }
    }

    /// Little-endian 64-bit limbs.
    fn to_limbs(self) -> [u64; 4] {
        [
            self.low as u64,
            (self.low >> 64) as u64,
            self.high as u64,
            (self.high >> 64) as u64,
        ]
    }

    fn from_limbs(limbs: [u64; 4]) -> Self {
        Self {
            low: (limbs[0] as u128) | ((limbs[1] as u128) << 64),
            high: (limbs[2] as u128) | ((limbs[3] as u128) << 64),
        }
    }

    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        let (low, carry) = self.low.overflowing_add(other.low);
        let (high, overflow_a) = self.high.overflowing_add(other.high);
        let (high, overflow_b) = high.overflowing_add(carry as u128);
        if overflow_a || overflow_b {
            return None;
        }
        Some(Self { high, low })
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let (low, borrow) = self.low.overflowing_sub(other.low);
        let (high, underflow_a) = self.high.overflowing_sub(other.high);
        let (high, underflow_b) = high.overflowing_sub(borrow as u128);
        if underflow_a || underflow_b {
            return None;
        }
        Some(Self { high, low })
    }

    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        let a = self.to_limbs();
        let b = other.to_limbs();
        // Schoolbook multiplication over 64-bit limbs into a 512-bit result.
        let mut product = [0u64; 8];
        for (i, &ai) in a.iter().enumerate() {
            let mut carry: u64 = 0;
            for (j, &bj) in b.iter().enumerate() {
                let t = (ai as u128) * (bj as u128) + (product[i + j] as u128) + (carry as u128);
                product[i + j] = t as u64;
                carry = (t >> 64) as u64;
            }
            product[i + 4] = carry;
        }
        if product[4..].iter().any(|&limb| limb != 0) {
            return None;
        }
        Some(Self::from_limbs([
            product[0], product[1], product[2], product[3],
        ]))
    }

    fn div_rem_u64(&self, divisor: u64) -> (Self, u64) {
        debug_assert!(divisor != 0);
        let limbs = self.to_limbs();
        let mut out = [0u64; 4];
        let mut rem: u128 = 0;
        for i in (0..4).rev() {
            let cur = (rem << 64) | limbs[i] as u128;
            out[i] = (cur / divisor as u128) as u64;
            rem = cur % divisor as u128;
        }
        (Self::from_limbs(out), rem as u64)
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut digits = Vec::new();
        let mut cur = *self;
        while !cur.is_zero() {
            let (next, digit) = cur.div_rem_u64(10);
            digits.push((b'0' + digit as u8) as char);
            cur = next;
        }
        digits.reverse();
        f.write_str(&digits.into_iter().collect::<String>())
    }
}

impl FromStr for U256 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("empty integer string".to_string());
        }
        let mut value = Self::ZERO;
        let ten = Self::from_u64(10);
        for c in s.chars() {
            let digit = c
                .to_digit(10)
                .ok_or_else(|| format!("invalid decimal digit: {c}"))?;
            value = value
                .checked_mul(&ten)
                .and_then(|v| v.checked_add(&Self::from_u64(digit as u64)))
                .ok_or_else(|| "integer exceeds 256 bits".to_string())?;
        }
        Ok(value)
    }
}

impl Write for U256 {
    fn write(&self, writer: &mut impl BufMut) {
        write_bytes32(&self.to_be_bytes(), writer);
    }
}

impl Read for U256 {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self::from_be_bytes(read_bytes32(reader)?))
    }
}

impl FixedSize for U256 {
    const SIZE: usize = 32;
}

impl Serialize for U256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An opaque 32-byte account/contract address.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// The mint/burn sentinel. Rejected wherever a live address is required.
    pub const ZERO: Self = Self([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn is_zero(&self) -> bool {
        let mut i = 0;
        while i < 32 {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", short_hex(&self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex(&self.0))
    }
}

impl Write for Address {
    fn write(&self, writer: &mut impl BufMut) {
        write_bytes32(&self.0, writer);
    }
}

impl Read for Address {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self(read_bytes32(reader)?))
    }
}

impl FixedSize for Address {
    const SIZE: usize = 32;
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex(&self.0))
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_hex32(&s).map(Self).map_err(serde::de::Error::custom)
    }
}

/// A registered metadata category identifier.
///
/// Tags are opaque 32-byte scalars. [`Tag::from_label`] packs a short ASCII
/// label right-aligned into the scalar for ergonomic construction; the
/// ledger itself never interprets tag contents.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(pub [u8; 32]);

impl Tag {
    pub const MAX_LABEL_LENGTH: usize = 31;

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Packs an ASCII label of at most 31 bytes, right-aligned.
    ///
    /// # Panics
    /// Panics if the label exceeds [`Tag::MAX_LABEL_LENGTH`] bytes.
    pub fn from_label(label: &str) -> Self {
        let raw = label.as_bytes();
        assert!(
            raw.len() <= Self::MAX_LABEL_LENGTH,
            "tag label exceeds {} bytes",
            Self::MAX_LABEL_LENGTH
        );
        let mut bytes = [0u8; 32];
        bytes[32 - raw.len()..].copy_from_slice(raw);
        Self(bytes)
    }

    /// Recovers the packed label, if the tag holds printable ASCII.
    pub fn label(&self) -> Option<String> {
        let start = self.0.iter().position(|b| *b != 0)?;
        let raw = &self.0[start..];
        if raw.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            String::from_utf8(raw.to_vec()).ok()
        } else {
            None
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "Tag({label})"),
            None => write!(f, "Tag({})", short_hex(&self.0)),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex(&self.0))
    }
}

impl Write for Tag {
    fn write(&self, writer: &mut impl BufMut) {
        write_bytes32(&self.0, writer);
    }
}

impl Read for Tag {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self(read_bytes32(reader)?))
    }
}

impl FixedSize for Tag {
    const SIZE: usize = 32;
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex(&self.0))
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_hex32(&s).map(Self).map_err(serde::de::Error::custom)
    }
}

/// Identifies a code image for contract upgrades.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodeHash(pub [u8; 32]);

impl CodeHash {
    pub const ZERO: Self = Self([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn is_zero(&self) -> bool {
        let mut i = 0;
        while i < 32 {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }
}

impl fmt::Debug for CodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodeHash({})", short_hex(&self.0))
    }
}

impl fmt::Display for CodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex(&self.0))
    }
}

impl Write for CodeHash {
    fn write(&self, writer: &mut impl BufMut) {
        write_bytes32(&self.0, writer);
    }
}

impl Read for CodeHash {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self(read_bytes32(reader)?))
    }
}

impl FixedSize for CodeHash {
    const SIZE: usize = 32;
}

impl Serialize for CodeHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex(&self.0))
    }
}

impl<'de> Deserialize<'de> for CodeHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_hex32(&s).map(Self).map_err(serde::de::Error::custom)
    }
}
