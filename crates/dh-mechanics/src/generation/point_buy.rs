//! Point-buy allocation.
//!
//! Every characteristic starts at its floor (25, or 30 with advantage) and
//! the player spends a pool of 60 points one at a time. A characteristic
//! cannot go below its floor or above 40, and the allocation can only be
//! committed once the pool is spent exactly.

use std::collections::BTreeMap;

use dh_core::Characteristic;

use super::{Bonuses, CEILING, POINT_POOL, clamp_generated};
use crate::error::{MechError, MechResult};

/// An in-progress point-buy allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointBuy {
    start: BTreeMap<Characteristic, i32>,
    values: BTreeMap<Characteristic, i32>,
    pool: i32,
}

impl PointBuy {
    /// Start an allocation with floors taken from the origin's bonuses.
    pub fn new(bonuses: &Bonuses) -> Self {
        let start: BTreeMap<_, _> = Characteristic::ALL
            .into_iter()
            .map(|c| (c, bonuses.floor(c)))
            .collect();
        Self {
            values: start.clone(),
            start,
            pool: POINT_POOL,
        }
    }

    /// Starting value (floor) of a characteristic.
    pub fn start(&self, characteristic: Characteristic) -> i32 {
        self.start.get(&characteristic).copied().unwrap_or_default()
    }

    /// Current value of a characteristic.
    pub fn value(&self, characteristic: Characteristic) -> i32 {
        self.values.get(&characteristic).copied().unwrap_or_default()
    }

    /// Points spent above the floors.
    pub fn spent(&self) -> i32 {
        Characteristic::ALL
            .into_iter()
            .map(|c| self.value(c) - self.start(c))
            .sum()
    }

    /// Points left in the pool.
    pub fn remaining(&self) -> i32 {
        self.pool - self.spent()
    }

    /// Whether the allocation may be committed.
    pub fn can_commit(&self) -> bool {
        self.remaining() == 0
    }

    /// Spend one point on a characteristic. Returns its new value.
    pub fn increment(&mut self, characteristic: Characteristic) -> MechResult<i32> {
        if self.remaining() <= 0 {
            return Err(MechError::PoolExhausted);
        }
        let value = self.value(characteristic);
        if value >= CEILING {
            return Err(MechError::AtCeiling(characteristic));
        }
        self.values.insert(characteristic, value + 1);
        Ok(value + 1)
    }

    /// Take one point back from a characteristic. Returns its new value.
    pub fn decrement(&mut self, characteristic: Characteristic) -> MechResult<i32> {
        let value = self.value(characteristic);
        if value <= self.start(characteristic) {
            return Err(MechError::AtFloor(characteristic));
        }
        self.values.insert(characteristic, value - 1);
        Ok(value - 1)
    }

    /// Apply a signed number of single-point steps, stopping at the first refusal.
    pub fn adjust(&mut self, characteristic: Characteristic, delta: i32) -> MechResult<i32> {
        let mut value = self.value(characteristic);
        for _ in 0..delta.unsigned_abs() {
            value = if delta > 0 {
                self.increment(characteristic)?
            } else {
                self.decrement(characteristic)?
            };
        }
        Ok(value)
    }

    /// Final values, each clamped to the ceiling. Refused unless the pool is spent exactly.
    pub fn commit(&self) -> MechResult<BTreeMap<Characteristic, i32>> {
        let remaining = self.remaining();
        if remaining != 0 {
            return Err(MechError::PoolNotSpent { remaining });
        }
        Ok(self
            .values
            .iter()
            .map(|(&c, &v)| (c, clamp_generated(v)))
            .collect())
    }
}
