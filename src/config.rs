use crate::error::TableError;

pub const INITIAL_M: usize = 16;
pub const LOAD_FACTOR_THRESHOLD: f64 = 0.5;
pub const MAX_INITIAL_M: usize = 1 << 30;
// Keeps the growth loop to a handful of doublings per insert.
pub const MIN_LOAD_FACTOR_THRESHOLD: f64 = 0.01;

/// Construction parameters for a [`HashTable`](crate::HashTable).
///
/// Only obtainable through [`TableConfig::new`] or `Default`, so every value
/// in circulation is valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    initial_capacity: usize,
    threshold: f64,
}

impl TableConfig {
    pub fn new(initial_capacity: usize, threshold: f64) -> Result<Self, TableError> {
        if initial_capacity == 0 || initial_capacity > MAX_INITIAL_M {
            return Err(TableError::InvalidCapacity(initial_capacity));
        }
        if !threshold.is_finite() || threshold < MIN_LOAD_FACTOR_THRESHOLD {
            return Err(TableError::InvalidThreshold(threshold));
        }
        Ok(Self {
            initial_capacity,
            threshold,
        })
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: INITIAL_M,
            threshold: LOAD_FACTOR_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TableConfig::default();
        assert_eq!(config.initial_capacity(), 16);
        assert_eq!(config.threshold(), 0.5);
        assert_eq!(TableConfig::new(16, 0.5), Ok(config));
    }

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(
            TableConfig::new(0, 0.5),
            Err(TableError::InvalidCapacity(0))
        );
    }

    #[test]
    fn rejects_bad_thresholds() {
        assert!(matches!(
            TableConfig::new(16, 0.0),
            Err(TableError::InvalidThreshold(_))
        ));
        assert!(matches!(
            TableConfig::new(16, -1.0),
            Err(TableError::InvalidThreshold(_))
        ));
        assert!(matches!(
            TableConfig::new(16, f64::NAN),
            Err(TableError::InvalidThreshold(_))
        ));
        assert!(TableConfig::new(1, 4.0).is_ok());
    }

    #[test]
    fn rejects_runaway_growth() {
        assert!(matches!(
            TableConfig::new(16, 1e-30),
            Err(TableError::InvalidThreshold(_))
        ));
        assert!(TableConfig::new(16, MIN_LOAD_FACTOR_THRESHOLD).is_ok());
        assert_eq!(
            TableConfig::new(usize::MAX, 0.5),
            Err(TableError::InvalidCapacity(usize::MAX))
        );
        assert!(TableConfig::new(MAX_INITIAL_M, 0.5).is_ok());
    }
}
