//! Pure functions from a pet-count to the derived display values.
//!
//! The first [`RAMP_STEPS`] pets are a one-time ramp-up with no cycling; once
//! the count exceeds the ramp, behavior is periodic with period
//! [`CYCLE_LENGTH`].

use serde::{Deserialize, Serialize};

/// Number of pets in the initial ramp-up phase.
pub const RAMP_STEPS: u64 = 10;

/// Length of the repeating cycle entered once the ramp completes.
pub const CYCLE_LENGTH: u64 = 12;

/// Number of cycle steps spent at 100% before progress falls back.
pub const PEAK_PLATEAU: u8 = 2;

/// Which of the pet's two images is shown.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    #[default]
    Default,
    Alternate,
}

/// Informal phase of the interaction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// `count <= 10`: progress rises linearly from 0 to 100.
    Ramp,
    /// Cycle positions 0 and 1: progress holds at 100.
    Peak,
    /// Cycle positions 2 through 11: progress rises back toward 100.
    Descend,
}

/// Position within the repeating cycle, defined only once the ramp is done.
///
/// `None` while `count <= 10`; otherwise `(count - 10) % 12`, in `[0, 11]`.
pub fn cycle_position(count: u64) -> Option<u8> {
    if count <= RAMP_STEPS {
        None
    } else {
        Some(((count - RAMP_STEPS) % CYCLE_LENGTH) as u8)
    }
}

/// Progress percentage in `[0, 100]` as a pure function of the count.
///
/// On the ramp this is `count / 10 * 100`; at cycle positions 0 and 1 it
/// plateaus at 100; afterwards it is `(position - 2) / 10 * 100`. Every
/// reachable value is an exact multiple of 10, so the integer arithmetic
/// below is exact and no rounding mode is observable. For the general
/// formula the documented convention is round-half-away-from-zero.
pub fn progress_percentage(count: u64) -> u8 {
    match cycle_position(count) {
        None => (count * 10) as u8,
        Some(pos) if pos < PEAK_PLATEAU => 100,
        Some(pos) => (pos - PEAK_PLATEAU) * 10,
    }
}

/// True exactly when progress sits at 100%.
pub fn peak_reached(count: u64) -> bool {
    progress_percentage(count) == 100
}

/// Image display transition.
///
/// This mirrors the reference behavior exactly: the image flips to the
/// alternate at the end of the ramp (`count == 10`) and at cycle position 0,
/// flips back to the default at cycle position 2, and otherwise carries the
/// previous state forward. Unlike the other derived values this is a
/// transition function of `(current, count)`, not a pure function of the
/// count alone.
pub fn next_display_state(current: DisplayState, count: u64) -> DisplayState {
    if count == RAMP_STEPS {
        return DisplayState::Alternate;
    }
    match cycle_position(count) {
        Some(0) => DisplayState::Alternate,
        Some(2) => DisplayState::Default,
        _ => current,
    }
}

/// Phase of the informal state machine for the given count.
pub fn phase(count: u64) -> Phase {
    match cycle_position(count) {
        None => Phase::Ramp,
        Some(pos) if pos < PEAK_PLATEAU => Phase::Peak,
        Some(_) => Phase::Descend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_position_is_undefined_during_ramp() {
        for count in 0..=10 {
            assert_eq!(cycle_position(count), None, "count={count}");
        }
    }

    #[test]
    fn cycle_position_wraps_with_period_twelve() {
        assert_eq!(cycle_position(11), Some(1));
        assert_eq!(cycle_position(12), Some(2));
        assert_eq!(cycle_position(21), Some(11));
        assert_eq!(cycle_position(22), Some(0));
        assert_eq!(cycle_position(34), Some(0));
    }

    #[test]
    fn progress_rises_linearly_on_the_ramp() {
        assert_eq!(progress_percentage(0), 0);
        assert_eq!(progress_percentage(5), 50);
        assert_eq!(progress_percentage(10), 100);
        for count in 0..=10 {
            assert_eq!(progress_percentage(count), (count * 10) as u8);
        }
    }

    #[test]
    fn progress_plateaus_then_descends() {
        // Plateau: positions 0 and 1.
        assert_eq!(progress_percentage(11), 100);
        assert_eq!(progress_percentage(22), 100);
        assert_eq!(progress_percentage(23), 100);
        // Falls back to 0 at position 2, then climbs by 10 per step.
        assert_eq!(progress_percentage(12), 0);
        assert_eq!(progress_percentage(13), 10);
        assert_eq!(progress_percentage(20), 80);
        assert_eq!(progress_percentage(21), 90);
    }

    #[test]
    fn behavior_is_periodic_after_the_ramp() {
        // count = 10 + 12k + j behaves like count = 10 + j for j in [1, 11].
        for k in 0..50u64 {
            for j in 1..=11u64 {
                let base = 10 + j;
                let shifted = 10 + 12 * k + j;
                assert_eq!(
                    progress_percentage(base),
                    progress_percentage(shifted),
                    "k={k} j={j}"
                );
                assert_eq!(phase(base), phase(shifted));
            }
        }
    }

    #[test]
    fn total_on_extreme_counts() {
        // No panics and the range invariant holds even at the limits.
        for count in [u64::MAX, u64::MAX - 1, u64::MAX / 2] {
            assert!(progress_percentage(count) <= 100);
            assert!(cycle_position(count).unwrap() <= 11);
        }
    }

    #[test]
    fn display_flips_at_the_documented_counts() {
        assert_eq!(
            next_display_state(DisplayState::Default, 10),
            DisplayState::Alternate
        );
        // Position 0 (count 22): alternate.
        assert_eq!(
            next_display_state(DisplayState::Default, 22),
            DisplayState::Alternate
        );
        // Position 2 (count 12): back to default.
        assert_eq!(
            next_display_state(DisplayState::Alternate, 12),
            DisplayState::Default
        );
    }

    #[test]
    fn display_carries_forward_between_transitions() {
        // Position 1 (count 11) and mid-descent counts leave the state alone.
        for count in [0, 5, 11, 13, 17, 21] {
            assert_eq!(
                next_display_state(DisplayState::Alternate, count),
                DisplayState::Alternate,
                "count={count}"
            );
        }
        assert_eq!(
            next_display_state(DisplayState::Default, 15),
            DisplayState::Default
        );
    }

    #[test]
    fn phases_partition_the_count_space() {
        assert_eq!(phase(0), Phase::Ramp);
        assert_eq!(phase(10), Phase::Ramp);
        assert_eq!(phase(11), Phase::Peak);
        assert_eq!(phase(22), Phase::Peak);
        assert_eq!(phase(12), Phase::Descend);
        assert_eq!(phase(21), Phase::Descend);
    }

    #[test]
    fn peak_tracks_full_progress() {
        for count in 0..200u64 {
            assert_eq!(
                peak_reached(count),
                progress_percentage(count) == 100,
                "count={count}"
            );
        }
    }
}
