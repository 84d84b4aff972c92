use serde::{Deserialize, Serialize};

/// 資源の外部向け状態。保存はせず、常にカウンタから導出する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Available,
    Full,
    Closed,
}

/// 資源ごとの `(capacity, used, closed)` の組。
/// `used` の更新経路は `try_increment` / `decrement` のみで、
/// コミット後は常に `0 <= used <= capacity` が成り立つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityLedger {
    pub capacity: i32,
    pub used: i32,
    pub closed: bool,
}

impl CapacityLedger {
    pub fn new(capacity: i32) -> Self {
        Self {
            capacity,
            used: 0,
            closed: false,
        }
    }

    /// 空きがあれば 1 加算して true、満杯なら何もせず false を返す。
    /// closed の資源は受け付けない。
    pub fn try_increment(&mut self) -> bool {
        if self.closed || self.used >= self.capacity {
            return false;
        }
        self.used += 1;
        true
    }

    /// 1 減算する。重複・遅延キャンセルに耐えるため 0 を下限とする。
    pub fn decrement(&mut self) {
        self.used = (self.used - 1).max(0);
    }

    /// closed が最優先。次に満杯かどうかで判定する。
    pub fn status(&self) -> ResourceStatus {
        if self.closed {
            ResourceStatus::Closed
        } else if self.used >= self.capacity {
            ResourceStatus::Full
        } else {
            ResourceStatus::Available
        }
    }

    pub fn remaining(&self) -> i32 {
        (self.capacity - self.used).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(capacity: i32, used: i32) -> CapacityLedger {
        CapacityLedger {
            capacity,
            used,
            closed: false,
        }
    }

    #[test]
    fn increment_with_room_succeeds() {
        let mut l = ledger(10, 7);
        assert!(l.try_increment());
        assert_eq!(l.used, 8);
        assert_eq!(l.status(), ResourceStatus::Available);
    }

    #[test]
    fn increment_fills_last_unit() {
        let mut l = ledger(10, 9);
        assert!(l.try_increment());
        assert_eq!(l.used, 10);
        assert_eq!(l.status(), ResourceStatus::Full);
    }

    #[test]
    fn increment_at_capacity_is_rejected_without_mutation() {
        let mut l = ledger(10, 10);
        assert!(!l.try_increment());
        assert_eq!(l.used, 10);
    }

    #[test]
    fn increment_on_closed_is_rejected() {
        let mut l = CapacityLedger {
            capacity: 10,
            used: 0,
            closed: true,
        };
        assert!(!l.try_increment());
        assert_eq!(l.used, 0);
    }

    #[test]
    fn decrement_floors_at_zero() {
        let mut l = ledger(10, 0);
        l.decrement();
        assert_eq!(l.used, 0);
    }

    #[test]
    fn release_after_full_reopens_availability() {
        let mut l = ledger(5, 5);
        assert_eq!(l.status(), ResourceStatus::Full);
        l.decrement();
        assert_eq!(l.used, 4);
        assert_eq!(l.status(), ResourceStatus::Available);
    }

    #[test]
    fn closed_overrides_occupancy() {
        let empty = CapacityLedger {
            capacity: 10,
            used: 0,
            closed: true,
        };
        let full = CapacityLedger {
            capacity: 10,
            used: 10,
            closed: true,
        };
        assert_eq!(empty.status(), ResourceStatus::Closed);
        assert_eq!(full.status(), ResourceStatus::Closed);
    }

    #[test]
    fn invariant_holds_over_mixed_sequences() {
        let mut l = ledger(3, 0);
        // true = reserve, false = release
        let ops = [
            true, true, false, true, true, false, false, false, true, true, true, false,
        ];
        for reserve in ops {
            if reserve {
                l.try_increment();
            } else {
                l.decrement();
            }
            assert!(l.used >= 0 && l.used <= l.capacity);
        }
    }

    #[test]
    fn zero_capacity_never_admits() {
        let mut l = ledger(0, 0);
        assert!(!l.try_increment());
        assert_eq!(l.status(), ResourceStatus::Full);
    }
}
