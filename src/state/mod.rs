//! Interaction state machines (pure).
//!
//! All state transitions are pure functions testable without a UI.

pub mod browser;
pub mod clock;
pub mod range_selector;

// Re-export for convenience
pub use browser::BrowserState;
pub use clock::{Clock, FixedClock, SystemClock};
pub use range_selector::{
    derive_state, infer_mode, transition, Mode, MonthStep, RangeSelector, SelectorEvent,
    SelectorState,
};
