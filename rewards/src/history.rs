//! Base reward history: the append-only record of when the applicable rate changed.
//!
//! Checkpoints are stored ONCE globally, not per deposit. A deposit remembers
//! only the index of the checkpoint that was current when it was created;
//! computing its reward walks the history from that index forward and clips
//! every segment to the deposit's holding window, O(k) in the number of
//! checkpoints recorded since the deposit.

use crate::error::RewardError;
use serde::{Deserialize, Serialize};
use staking_types::{Timestamp, SECS_PER_DAY};

/// A recorded point in time from which `annual_rate` applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Position in the history; stable once assigned.
    pub index: u64,
    pub timestamp: Timestamp,
    /// Annual rate in whole percent (0 while rewards are disabled).
    pub annual_rate: u32,
    /// Total stake in the pool when the checkpoint was recorded.
    pub total_staked: u128,
}

/// One clipped segment of a holding window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateInterval {
    pub annual_rate: u32,
    /// Overlap with the query window, in whole days (truncated).
    pub days: u64,
}

/// Append-only, index-stable sequence of rate checkpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseRewardHistory {
    checkpoints: Vec<Checkpoint>,
}

impl BaseRewardHistory {
    /// Create a history seeded with its first checkpoint.
    pub fn new(annual_rate: u32, total_staked: u128, at: Timestamp) -> Self {
        Self {
            checkpoints: vec![Checkpoint {
                index: 0,
                timestamp: at,
                annual_rate,
                total_staked,
            }],
        }
    }

    /// Record that `annual_rate` applies from `at` onward.
    ///
    /// A second checkpoint in the same second replaces the rate and total of
    /// the latest one in place: the earlier value would cover zero time, and
    /// timestamps stay strictly increasing. Returns the index of the
    /// checkpoint now in effect.
    pub fn append_checkpoint(
        &mut self,
        annual_rate: u32,
        total_staked: u128,
        at: Timestamp,
    ) -> Result<u64, RewardError> {
        if let Some(latest) = self.checkpoints.last_mut() {
            if at < latest.timestamp {
                return Err(RewardError::CheckpointTimeRegression);
            }
            if at == latest.timestamp {
                latest.annual_rate = annual_rate;
                latest.total_staked = total_staked;
                return Ok(latest.index);
            }
        }
        let index = self.checkpoints.len() as u64;
        self.checkpoints.push(Checkpoint {
            index,
            timestamp: at,
            annual_rate,
            total_staked,
        });
        Ok(index)
    }

    /// Whether a checkpoint at `at` would be accepted by
    /// [`append_checkpoint`](Self::append_checkpoint).
    pub fn ensure_appendable(&self, at: Timestamp) -> Result<(), RewardError> {
        match self.checkpoints.last() {
            Some(latest) if at < latest.timestamp => Err(RewardError::CheckpointTimeRegression),
            _ => Ok(()),
        }
    }

    pub fn latest(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }

    pub fn get(&self, index: u64) -> Option<&Checkpoint> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.checkpoints.get(i))
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.checkpoints.iter()
    }

    /// The `(rate, days)` segments covering `[window_start, to_time]`.
    ///
    /// Walks from checkpoint `from_index` up to the last checkpoint at or
    /// before `to_time`. Each checkpoint's span `[timestamp, next.timestamp)`
    /// (or `to_time` for the last one) is intersected with the window and
    /// truncated to whole days. Segments that do not overlap the window are
    /// reported with zero days.
    pub fn intervals_between(
        &self,
        from_index: u64,
        window_start: Timestamp,
        to_time: Timestamp,
    ) -> Result<Vec<RateInterval>, RewardError> {
        let start = usize::try_from(from_index)
            .ok()
            .filter(|&i| i < self.checkpoints.len())
            .ok_or(RewardError::CheckpointNotFound(from_index))?;

        let mut intervals = Vec::new();
        for (offset, checkpoint) in self.checkpoints[start..].iter().enumerate() {
            if checkpoint.timestamp > to_time {
                break;
            }
            let span_end = self
                .checkpoints
                .get(start + offset + 1)
                .map(|next| next.timestamp.min(to_time))
                .unwrap_or(to_time);
            let span_start = checkpoint.timestamp.max(window_start);
            let days = span_start.elapsed_since(span_end) / SECS_PER_DAY;
            intervals.push(RateInterval {
                annual_rate: checkpoint.annual_rate,
                days,
            });
        }
        Ok(intervals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u64) -> Timestamp {
        Timestamp::new(n * SECS_PER_DAY)
    }

    #[test]
    fn new_history_has_first_checkpoint() {
        let h = BaseRewardHistory::new(17, 0, day(0));
        assert_eq!(h.len(), 1);
        let first = h.latest().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.annual_rate, 17);
        assert_eq!(first.total_staked, 0);
    }

    #[test]
    fn append_assigns_sequential_indices() {
        let mut h = BaseRewardHistory::new(17, 0, day(0));
        assert_eq!(h.append_checkpoint(19, 1_300, day(1)).unwrap(), 1);
        assert_eq!(h.append_checkpoint(0, 1_300, day(2)).unwrap(), 2);
        assert_eq!(h.len(), 3);
        assert_eq!(h.get(1).unwrap().annual_rate, 19);
        assert_eq!(h.get(2).unwrap().timestamp, day(2));
        assert!(h.get(3).is_none());
    }

    #[test]
    fn same_second_append_replaces_latest() {
        let mut h = BaseRewardHistory::new(17, 0, day(0));
        h.append_checkpoint(19, 1_300, day(1)).unwrap();
        assert_eq!(h.append_checkpoint(0, 1_300, day(1)).unwrap(), 1);
        assert_eq!(h.len(), 2);
        assert_eq!(h.latest().unwrap().annual_rate, 0);
    }

    #[test]
    fn rejects_backwards_checkpoint() {
        let mut h = BaseRewardHistory::new(17, 0, day(5));
        assert_eq!(
            h.append_checkpoint(19, 1, day(4)),
            Err(RewardError::CheckpointTimeRegression)
        );
        assert_eq!(h.len(), 1);
        assert!(h.ensure_appendable(day(4)).is_err());
        assert!(h.ensure_appendable(day(5)).is_ok());
        assert!(BaseRewardHistory::default().ensure_appendable(day(0)).is_ok());
    }

    #[test]
    fn single_checkpoint_clipped_to_window() {
        let h = BaseRewardHistory::new(17, 0, day(0));
        let intervals = h.intervals_between(0, day(10), day(40)).unwrap();
        assert_eq!(
            intervals,
            vec![RateInterval {
                annual_rate: 17,
                days: 30
            }]
        );
    }

    #[test]
    fn window_spans_partial_segments() {
        let mut h = BaseRewardHistory::new(10, 0, day(0));
        h.append_checkpoint(20, 0, day(10)).unwrap();
        h.append_checkpoint(30, 0, day(20)).unwrap();

        // Window 5..25: 5 days at 10, 10 days at 20, 5 days at 30.
        let intervals = h.intervals_between(0, day(5), day(25)).unwrap();
        let pairs: Vec<(u32, u64)> = intervals.iter().map(|i| (i.annual_rate, i.days)).collect();
        assert_eq!(pairs, vec![(10, 5), (20, 10), (30, 5)]);
    }

    #[test]
    fn checkpoints_after_query_time_are_ignored() {
        let mut h = BaseRewardHistory::new(10, 0, day(0));
        h.append_checkpoint(20, 0, day(10)).unwrap();
        h.append_checkpoint(30, 0, day(20)).unwrap();

        let intervals = h.intervals_between(0, day(0), day(15)).unwrap();
        let pairs: Vec<(u32, u64)> = intervals.iter().map(|i| (i.annual_rate, i.days)).collect();
        assert_eq!(pairs, vec![(10, 10), (20, 5)]);
    }

    #[test]
    fn partial_days_are_truncated_per_segment() {
        let mut h = BaseRewardHistory::new(10, 0, day(0));
        h.append_checkpoint(20, 0, Timestamp::new(2 * SECS_PER_DAY + SECS_PER_DAY / 2)).unwrap();

        let intervals = h.intervals_between(0, day(0), day(5)).unwrap();
        let pairs: Vec<(u32, u64)> = intervals.iter().map(|i| (i.annual_rate, i.days)).collect();
        assert_eq!(pairs, vec![(10, 2), (20, 2)]);
    }

    #[test]
    fn starting_index_skips_earlier_checkpoints() {
        let mut h = BaseRewardHistory::new(10, 0, day(0));
        h.append_checkpoint(20, 0, day(10)).unwrap();
        let intervals = h.intervals_between(1, day(12), day(22)).unwrap();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].annual_rate, 20);
        assert_eq!(intervals[0].days, 10);
    }

    #[test]
    fn unknown_start_index_is_an_error() {
        let h = BaseRewardHistory::new(10, 0, day(0));
        assert_eq!(
            h.intervals_between(3, day(0), day(1)),
            Err(RewardError::CheckpointNotFound(3))
        );
    }
}
