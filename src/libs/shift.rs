//! Shift reconstruction from raw punches.
//!
//! A worker's punches are sorted and scanned with a rolling window. Every
//! punch opens a window `[t, t + window]`; the punches inside it form a
//! rolling group. Groups of two or more become candidate shifts (first punch
//! in, last punch out) and single-punch groups become candidate orphans.
//! Candidates are then cleaned up:
//!
//! 1. an orphan whose timestamp is the entry or exit of any candidate shift is
//!    dropped, since that shift already accounts for it;
//! 2. a shift whose exit equals the entry of the previously kept shift is
//!    dropped, which collapses windows chained over the same instant.
//!
//! ```rust
//! use chrono::{Duration, FixedOffset, TimeZone};
//! use cxshift::libs::punch::PunchEvent;
//! use cxshift::libs::shift::reconstruct;
//!
//! let tz = FixedOffset::east_opt(0).unwrap();
//! let start = tz.with_ymd_and_hms(2023, 6, 1, 8, 0, 0).unwrap();
//! let punches = vec![
//!     PunchEvent::new(start, "7", "Ana"),
//!     PunchEvent::new(start + Duration::hours(1), "7", "Ana"),
//! ];
//!
//! let result = reconstruct(punches);
//! assert_eq!(result.pairs.len(), 1);
//! assert_eq!(result.pairs[0].duration(), Duration::hours(1));
//! assert!(result.orphans.is_empty());
//! ```
//!
//! Nothing in here performs I/O or fails; timestamps were validated when the
//! punches were built.

use super::punch::PunchEvent;
use chrono::{DateTime, Duration, FixedOffset};
use std::collections::HashSet;

/// Default width of the grouping window.
pub const DEFAULT_WINDOW_HOURS: i64 = 12;

pub fn default_window() -> Duration {
    Duration::hours(DEFAULT_WINDOW_HOURS)
}

/// A window of `hours`, or `None` unless it is positive and representable.
pub fn window_from_hours(hours: i64) -> Option<Duration> {
    if hours <= 0 {
        return None;
    }
    Duration::try_hours(hours)
}

/// One reconstructed work shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftPair {
    pub entry: PunchEvent,
    pub exit: PunchEvent,
    /// Size of the rolling group the shift was built from.
    pub punch_count: usize,
}

impl ShiftPair {
    pub fn duration(&self) -> Duration {
        self.exit.timestamp.signed_duration_since(self.entry.timestamp)
    }
}

/// A punch with no counterpart inside the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanPunch {
    pub punch: PunchEvent,
}

impl OrphanPunch {
    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.punch.timestamp
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconstruction {
    pub pairs: Vec<ShiftPair>,
    pub orphans: Vec<OrphanPunch>,
}

impl Reconstruction {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.orphans.is_empty()
    }

    pub fn into_parts(self) -> (Vec<ShiftPair>, Vec<OrphanPunch>) {
        (self.pairs, self.orphans)
    }
}

/// Reconstructs shifts with the default 12 hour window.
pub fn reconstruct(punches: Vec<PunchEvent>) -> Reconstruction {
    reconstruct_with_window(punches, default_window())
}

/// Reconstructs shifts for one worker's punches.
///
/// Punches exactly `window` apart still share a group. A negative window is
/// treated as zero, so only punches at the same instant are grouped.
pub fn reconstruct_with_window(mut punches: Vec<PunchEvent>, window: Duration) -> Reconstruction {
    if punches.is_empty() {
        return Reconstruction::default();
    }
    punches.sort_by_key(|punch| punch.timestamp);
    let window = window.max(Duration::zero());

    let (pairs, orphans) = rolling_groups(&punches, window);
    let orphans = drop_absorbed_orphans(orphans, &pairs);
    let pairs = drop_chained_pairs(pairs);

    Reconstruction { pairs, orphans }
}

/// Classifies the rolling group opened by every punch of a sorted slice.
///
/// `lo` is the first punch at or after the window start, `hi` the first punch
/// past the window end. Both only move forward. A window end past the last
/// representable instant covers the rest of the slice.
fn rolling_groups(sorted: &[PunchEvent], window: Duration) -> (Vec<ShiftPair>, Vec<OrphanPunch>) {
    let mut pairs = Vec::new();
    let mut orphans = Vec::new();
    let (mut lo, mut hi) = (0, 0);

    for punch in sorted {
        let start = punch.timestamp;

        while sorted[lo].timestamp < start {
            lo += 1;
        }
        match start.checked_add_signed(window) {
            Some(end) => {
                while hi < sorted.len() && sorted[hi].timestamp <= end {
                    hi += 1;
                }
            }
            None => hi = sorted.len(),
        }

        let group = &sorted[lo..hi];
        match group {
            [single] => orphans.push(OrphanPunch { punch: single.clone() }),
            [first, .., last] => pairs.push(ShiftPair {
                entry: first.clone(),
                exit: last.clone(),
                punch_count: group.len(),
            }),
            [] => {}
        }
    }

    (pairs, orphans)
}

fn drop_absorbed_orphans(orphans: Vec<OrphanPunch>, pairs: &[ShiftPair]) -> Vec<OrphanPunch> {
    let bounds: HashSet<DateTime<FixedOffset>> = pairs.iter().flat_map(|pair| [pair.entry.timestamp, pair.exit.timestamp]).collect();

    orphans.into_iter().filter(|orphan| !bounds.contains(&orphan.timestamp())).collect()
}

fn drop_chained_pairs(pairs: Vec<ShiftPair>) -> Vec<ShiftPair> {
    let mut kept: Vec<ShiftPair> = Vec::with_capacity(pairs.len());
    for pair in pairs {
        match kept.last() {
            Some(previous) if pair.exit.timestamp == previous.entry.timestamp => continue,
            _ => kept.push(pair),
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: i64) -> PunchEvent {
        let base = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        PunchEvent::new(base + Duration::hours(hour), "1", "Worker")
    }

    #[test]
    fn test_rolling_groups_are_time_based() {
        let sorted = vec![at(8), at(8), at(30)];
        let (pairs, orphans) = rolling_groups(&sorted, default_window());

        // Both punches at 08:00 open the same two-member window
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|pair| pair.punch_count == 2));
        assert_eq!(orphans.len(), 1);
    }

    #[test]
    fn test_window_from_hours_rejects_unusable_values() {
        assert_eq!(window_from_hours(12), Some(Duration::hours(12)));
        assert_eq!(window_from_hours(0), None);
        assert_eq!(window_from_hours(-5), None);
        assert_eq!(window_from_hours(i64::MAX), None);
    }

    #[test]
    fn test_rolling_groups_with_unbounded_window() {
        let sorted = vec![at(8), at(9), at(5000)];
        let (pairs, orphans) = rolling_groups(&sorted, Duration::MAX);

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].punch_count, 3);
        assert_eq!(orphans, vec![OrphanPunch { punch: at(5000) }]);
    }

    #[test]
    fn test_chained_pairs_keep_first() {
        let first = ShiftPair { entry: at(8), exit: at(8), punch_count: 2 };
        let second = first.clone();
        let third = ShiftPair { entry: at(20), exit: at(22), punch_count: 2 };

        let kept = drop_chained_pairs(vec![first.clone(), second, third.clone()]);
        assert_eq!(kept, vec![first, third]);
    }

    #[test]
    fn test_absorbed_orphans_match_entry_or_exit() {
        let pairs = vec![ShiftPair { entry: at(8), exit: at(16), punch_count: 2 }];
        let orphans = vec![OrphanPunch { punch: at(8) }, OrphanPunch { punch: at(16) }, OrphanPunch { punch: at(40) }];

        let left = drop_absorbed_orphans(orphans, &pairs);
        assert_eq!(left, vec![OrphanPunch { punch: at(40) }]);
    }
}
