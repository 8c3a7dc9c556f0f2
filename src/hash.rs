use std::borrow::Cow;
use std::fmt;

pub const FNV_OFFSET_BASIS: u64 = 14695981039346656037;
pub const FNV_PRIME: u64 = 1099511628211;

/// FNV-1a over a byte sequence.
#[inline]
pub const fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut index = 0;
    while index < bytes.len() {
        hash ^= bytes[index] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        index += 1;
    }
    hash
}

#[inline]
pub fn bucket_index(hash: u64, modulus: usize) -> usize {
    (hash % modulus as u64) as usize
}

/// Bucket index of `key` in a table of `modulus` buckets.
#[inline]
pub fn hash_value<K: Hashable + ?Sized>(key: &K, modulus: usize) -> usize {
    bucket_index(fnv1a(&key.key_bytes()), modulus)
}

/// Anything that can expose a stable byte sequence (its prehash).
///
/// Two keys that compare equal must produce identical bytes.
pub trait Hashable {
    fn key_bytes(&self) -> Cow<'_, [u8]>;
}

impl Hashable for str {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl Hashable for String {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl Hashable for [u8] {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl Hashable for Vec<u8> {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<T: Hashable + ?Sized> Hashable for &T {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        (**self).key_bytes()
    }
}

// Full little-endian width, so integers differing only in high bytes stay distinct.
macro_rules! impl_hashable_int {
    ($($t:ty),*) => {
        $(
            impl Hashable for $t {
                fn key_bytes(&self) -> Cow<'_, [u8]> {
                    Cow::Owned(self.to_le_bytes().to_vec())
                }
            }
        )*
    };
}

impl_hashable_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Tagged key for tables that mix integer and string keys.
///
/// Hashes like the plain payload, but equality also compares the variant, so
/// `Key::Int` and `Key::Str` never match each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Hashable for Key {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            Key::Int(value) => value.key_bytes(),
            Key::Str(value) => value.key_bytes(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(value) => write!(f, "{}", value),
            Key::Str(value) => f.write_str(value),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}
