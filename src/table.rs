use std::borrow::Borrow;
use std::fmt::Display;
use std::io::{self, Write};
use std::iter;
use std::mem;

use log::debug;

use crate::config::{TableConfig, MAX_INITIAL_M};
use crate::error::TableError;
use crate::hash::{bucket_index, fnv1a, Hashable};

#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    hash: u64,
    pub key: K,
    pub value: V,
}

/// Bucket-chained hash table keyed by the FNV-1a hash of each key's prehash.
///
/// Keys are unique: [`set`](HashTable::set) on a present key overwrites its
/// value. Capacity doubles whenever an insertion pushes the load factor above
/// the configured threshold and never shrinks.
#[derive(Debug, Clone)]
pub struct HashTable<K, V> {
    length: usize,
    direct_access: Vec<Vec<Entry<K, V>>>,
    m: usize,
    threshold: f64,
}

fn empty_buckets<K, V>(m: usize) -> Vec<Vec<Entry<K, V>>> {
    iter::repeat_with(Vec::new).take(m).collect()
}

impl<K, V> HashTable<K, V> {
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Table with `initial` buckets and the default threshold, clamped to
    /// `1..=MAX_INITIAL_M`.
    pub fn with_capacity(initial: usize) -> Self {
        let m = initial.clamp(1, MAX_INITIAL_M);
        Self {
            length: 0,
            direct_access: empty_buckets(m),
            m,
            threshold: TableConfig::default().threshold(),
        }
    }

    pub fn with_config(config: TableConfig) -> Self {
        Self {
            length: 0,
            direct_access: empty_buckets(config.initial_capacity()),
            m: config.initial_capacity(),
            threshold: config.threshold(),
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.m
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn load_factor(&self) -> f64 {
        self.length as f64 / self.m as f64
    }

    /// Borrowed entries in bucket order. No ordering is promised across
    /// insertions or growth.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.direct_access
            .iter()
            .flatten()
            .map(|entry| (&entry.key, &entry.value))
    }
}

impl<K: Hashable + Eq, V> HashTable<K, V> {
    /// Returns the full hash, the bucket index and the position of `key`
    /// inside that bucket if present.
    fn locate<Q>(&self, key: &Q) -> (u64, usize, Option<usize>)
    where
        K: Borrow<Q>,
        Q: Hashable + Eq + ?Sized,
    {
        let hash = fnv1a(&key.key_bytes());
        let bucket = bucket_index(hash, self.m);
        let position = self.direct_access[bucket]
            .iter()
            .position(|entry| {
                entry.hash == hash && Borrow::<Q>::borrow(&entry.key) == key
            });
        (hash, bucket, position)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hashable + Eq + ?Sized,
    {
        let (_, bucket, position) = self.locate(key);
        position.map(|position| &self.direct_access[bucket][position].value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hashable + Eq + ?Sized,
    {
        let (_, bucket, position) = self.locate(key);
        match position {
            Some(position) => Some(&mut self.direct_access[bucket][position].value),
            None => None,
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hashable + Eq + ?Sized,
    {
        self.locate(key).2.is_some()
    }

    /// Inserts or overwrites. Returns the previous value when `key` was
    /// already present; only a new key can trigger growth.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let (hash, bucket, position) = self.locate(&key);
        if let Some(position) = position {
            let entry = &mut self.direct_access[bucket][position];
            return Some(mem::replace(&mut entry.value, value));
        }

        self.direct_access[bucket].push(Entry { hash, key, value });
        self.length += 1;

        while self.load_factor() > self.threshold {
            self.double_table();
        }
        None
    }

    fn double_table(&mut self) {
        let m = self.m * 2;
        let mut new_table = empty_buckets(m);
        for entry in mem::take(&mut self.direct_access).into_iter().flatten() {
            new_table[bucket_index(entry.hash, m)].push(entry);
        }
        debug!(
            "hash table grew from {} to {} buckets with {} entries",
            self.m, m, self.length
        );
        self.m = m;
        self.direct_access = new_table;
    }

    /// Removes `key` and returns its value. The last entry of the bucket is
    /// moved into the freed slot.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V, TableError>
    where
        K: Borrow<Q>,
        Q: Hashable + Eq + ?Sized,
    {
        let (_, bucket, position) = self.locate(key);
        let position = position.ok_or(TableError::KeyNotFound)?;
        let entry = self.direct_access[bucket].swap_remove(position);
        self.length -= 1;
        Ok(entry.value)
    }
}

impl<K: Display, V: Display> HashTable<K, V> {
    /// Writes `length = n` followed by one `bucket idx: k:v, ...` line per
    /// bucket.
    pub fn dump<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "length = {}", self.length)?;
        for (index, entries) in self.direct_access.iter().enumerate() {
            write!(w, "bucket {:3}: ", index)?;
            for (position, entry) in entries.iter().enumerate() {
                if position > 0 {
                    write!(w, ", ")?;
                }
                write!(w, "{}:{}", entry.key, entry.value)?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hashable + Eq, V> Extend<(K, V)> for HashTable<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        for (key, value) in entries {
            self.set(key, value);
        }
    }
}

impl<K: Hashable + Eq, V> FromIterator<(K, V)> for HashTable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        let mut table = Self::new();
        table.extend(entries);
        table
    }
}

pub struct IntoIter<K, V> {
    inner: iter::Flatten<std::vec::IntoIter<Vec<Entry<K, V>>>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        self.remaining -= 1;
        Some((entry.key, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for HashTable<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.direct_access.into_iter().flatten(),
            remaining: self.length,
        }
    }
}
