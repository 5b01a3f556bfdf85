/// Fixed-point sine/cosine lookup table
///
/// Angles are measured in units of 1/2048 of a full turn. Table values are
/// scaled by 65536, so `(v * table) >> 16` recovers the ordinary magnitude.
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::{ModelError, Result};

/// Number of angle units in a full turn.
pub const ANGLE_UNITS: usize = 2048;

/// Mask that folds any angle into `[0, ANGLE_UNITS)`.
pub const ANGLE_MASK: i32 = ANGLE_UNITS as i32 - 1;

/// Fixed-point scale of every table entry (16.16).
pub const FIXED_ONE: i32 = 1 << 16;

static SHARED: Lazy<Arc<TrigTable>> = Lazy::new(|| Arc::new(TrigTable::new()));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrigTable {
    sin: Vec<i32>,
    cos: Vec<i32>,
}

impl TrigTable {
    /// Build the standard table: `trunc(65536 * sin(i * 2π / 2048))`.
    pub fn new() -> Self {
        let step = std::f64::consts::TAU / ANGLE_UNITS as f64;
        let scale = FIXED_ONE as f64;
        let sin = (0..ANGLE_UNITS)
            .map(|i| (scale * (i as f64 * step).sin()) as i32)
            .collect();
        let cos = (0..ANGLE_UNITS)
            .map(|i| (scale * (i as f64 * step).cos()) as i32)
            .collect();
        Self { sin, cos }
    }

    /// Inject custom columns, e.g. fixed values for deterministic tests.
    pub fn from_columns(sin: Vec<i32>, cos: Vec<i32>) -> Result<Self> {
        if sin.len() != ANGLE_UNITS || cos.len() != ANGLE_UNITS {
            return Err(ModelError::InvalidTrigTable {
                sin: sin.len(),
                cos: cos.len(),
            });
        }
        Ok(Self { sin, cos })
    }

    /// The process-wide read-only table.
    pub fn shared() -> Arc<TrigTable> {
        Arc::clone(&*SHARED)
    }

    pub fn sin(&self, angle: i32) -> i32 {
        self.sin[(angle & ANGLE_MASK) as usize]
    }

    pub fn cos(&self, angle: i32) -> i32 {
        self.cos[(angle & ANGLE_MASK) as usize]
    }
}

impl Default for TrigTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_turns_are_exact() {
        let table = TrigTable::new();
        assert_eq!((table.sin(0), table.cos(0)), (0, 65536));
        assert_eq!((table.sin(512), table.cos(512)), (65536, 0));
        assert_eq!((table.sin(1024), table.cos(1024)), (0, -65536));
        assert_eq!((table.sin(1536), table.cos(1536)), (-65536, 0));
    }

    #[test]
    fn test_angle_is_masked() {
        let table = TrigTable::new();
        assert_eq!(table.sin(2048 + 300), table.sin(300));
        assert_eq!(table.cos(-1), table.cos(2047));
    }

    #[test]
    fn test_from_columns_validates_length() {
        let err = TrigTable::from_columns(vec![0; 10], vec![0; ANGLE_UNITS]).unwrap_err();
        assert_eq!(err, ModelError::InvalidTrigTable { sin: 10, cos: 2048 });
        assert!(TrigTable::from_columns(vec![1; ANGLE_UNITS], vec![2; ANGLE_UNITS]).is_ok());
    }

    #[test]
    fn test_shared_table_is_reused() {
        let a = TrigTable::shared();
        let b = TrigTable::shared();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, TrigTable::new());
    }
}
