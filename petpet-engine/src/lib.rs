//! Interaction cycle engine for the Pet Your Pet UI.
//!
//! Maps a monotonically increasing pet-count to the derived display values
//! the UI renders: a cycle position, a progress percentage, an image display
//! state and a "peak reached" signal. All computation is pure and total; the
//! hosting shell owns the one mutable cell (the [`InteractionSession`]) and
//! drives it from discrete user actions.

pub mod cycle;
pub mod session;

pub use cycle::{
    CYCLE_LENGTH, DisplayState, PEAK_PLATEAU, Phase, RAMP_STEPS,
    cycle_position, next_display_state, peak_reached, phase,
    progress_percentage,
};
pub use session::{InteractionSession, Snapshot};
