//! # fnvtable
//!
//! A bucket-chained hash table hashed with FNV-1a that doubles its bucket
//! array whenever the load factor passes a threshold, and the word-frequency
//! counter that exercises it.

pub mod config;
pub mod counter;
pub mod error;
pub mod hash;
pub mod logger;
pub mod reader;
pub mod table;

pub use config::TableConfig;
pub use error::{CountError, TableError};
pub use hash::{Hashable, Key};
pub use table::HashTable;
