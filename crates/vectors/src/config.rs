//! Shape of a vector run.

use poseidon_bn254::vectors::{DEFAULT_COUNT, DEFAULT_MAX_ARITY};
use poseidon_bn254::MAX_ARITY;

use crate::error::VectorsError;

/// How many arities and inputs a vector file covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VectorConfig {
    pub max_arity: usize,
    pub count: usize,
}

impl VectorConfig {
    pub fn new(max_arity: usize, count: usize) -> Result<Self, VectorsError> {
        if max_arity == 0 || max_arity > MAX_ARITY {
            return Err(VectorsError::InvalidConfig(format!(
                "max arity must be in 1..={MAX_ARITY}, got {max_arity}"
            )));
        }
        if count == 0 {
            return Err(VectorsError::InvalidConfig(
                "vector count must be at least 1".to_string(),
            ));
        }
        Ok(Self { max_arity, count })
    }

    /// Total number of digests in the file.
    pub fn total(&self) -> usize {
        self.max_arity * self.count
    }
}

impl Default for VectorConfig {
    /// The reference layout: 16 arities x 100 inputs.
    fn default() -> Self {
        Self {
            max_arity: DEFAULT_MAX_ARITY,
            count: DEFAULT_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_layout() {
        let config = VectorConfig::default();
        assert_eq!(config, VectorConfig::new(16, 100).unwrap());
        assert_eq!(config.total(), 1600);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            VectorConfig::new(0, 10),
            Err(VectorsError::InvalidConfig(_))
        ));
        assert!(matches!(
            VectorConfig::new(17, 10),
            Err(VectorsError::InvalidConfig(_))
        ));
        assert!(matches!(
            VectorConfig::new(4, 0),
            Err(VectorsError::InvalidConfig(_))
        ));
    }
}
