//! Mutable session state for one pet-interaction surface.
//!
//! The session is the single mutable cell the spec allows: the hosting shell
//! (UI or CLI) owns one [`InteractionSession`] and drives it from discrete
//! user actions. All derived values are recomputed through the pure
//! functions in [`crate::cycle`] on every change.

use serde::{Deserialize, Serialize};

use crate::cycle::{
    DisplayState, Phase, cycle_position, next_display_state, peak_reached,
    phase, progress_percentage,
};

/// Derived values for the current count, handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub count: u64,
    pub cycle_position: Option<u8>,
    pub progress: u8,
    pub display: DisplayState,
    pub peak_reached: bool,
    pub phase: Phase,
    /// Cumulative number of times progress entered 100%. Never resets for
    /// the lifetime of the session.
    pub peaks: u64,
}

/// State holder for the interaction of one user session with its selected
/// pet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionSession {
    count: u64,
    display: DisplayState,
    peaks: u64,
}

impl InteractionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn peaks(&self) -> u64 {
        self.peaks
    }

    /// Handle one pet action: increment the count and recompute everything.
    ///
    /// The cumulative peak counter increments exactly once per entry into
    /// 100%; consecutive counts that both sit at 100 (e.g. 10 and 11) count
    /// as a single peak.
    pub fn pet(&mut self) -> Snapshot {
        let was_at_peak = peak_reached(self.count);
        self.count = self.count.saturating_add(1);
        self.display = next_display_state(self.display, self.count);
        if peak_reached(self.count) && !was_at_peak {
            self.peaks += 1;
        }
        self.snapshot()
    }

    /// Called when the selected pet changes: the count and display reset,
    /// the cumulative peak counter does not.
    pub fn select_pet(&mut self) -> Snapshot {
        self.count = 0;
        self.display = DisplayState::Default;
        self.snapshot()
    }

    /// Derived values for the current count.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            count: self.count,
            cycle_position: cycle_position(self.count),
            progress: progress_percentage(self.count),
            display: self.display,
            peak_reached: peak_reached(self.count),
            phase: phase(self.count),
            peaks: self.peaks,
        }
    }
}
