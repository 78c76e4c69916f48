//! VIP classification
//!
//! A serial is VIP iff it is divisible by `max(10, population_size)`. With the
//! default population of ten this makes serial 0 the only VIP.

use crate::types::SerialNumber;

/// Smallest divisor used for VIP classification
pub const MIN_VIP_DIVISOR: usize = 10;

/// Pure divisor-based VIP classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VipClassifier {
    divisor: usize,
}

impl VipClassifier {
    /// Create a classifier for a population of the given size
    pub fn new(population_size: usize) -> Self {
        Self { divisor: MIN_VIP_DIVISOR.max(population_size) }
    }

    /// The divisor in use
    pub fn divisor(&self) -> usize {
        self.divisor
    }

    /// Check whether a serial belongs to a VIP
    pub fn is_vip(&self, serial: SerialNumber) -> bool {
        serial.index() % self.divisor == 0
    }
}
