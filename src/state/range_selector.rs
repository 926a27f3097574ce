//! Date-range selector state machine.
//!
//! Reconciles four kinds of user gesture into one committed [`DateRange`]:
//! two-click calendar selection, free-text entry of either bound, named
//! presets, and month navigation of the visible calendar window.
//!
//! The machine is split in two layers:
//! - [`derive_state`] and [`transition`]: pure functions over [`SelectorState`]
//! - [`RangeSelector`]: owns the state, the raw text buffers, the dropdown
//!   visibility flag and a [`Clock`], and exposes one method per gesture
//!
//! # Invariants
//!
//! - A committed range never has `start > end`
//! - `pending_click_anchor` is set exactly when the range is open (start, no end)
//! - Month navigation never changes `mode` or `range`

use crate::date::{self, format_date, months_between, start_of_day, Preset};
use crate::model::{DateRange, RangeShape};
use crate::state::clock::{Clock, SystemClock};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::trace;

// ===== Mode =====

/// Which preset (if any) the committed range corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// No bounds.
    AllTime,
    /// [`Preset::Today`]
    Today,
    /// [`Preset::Yesterday`]
    Yesterday,
    /// [`Preset::Last7Days`]
    Last7Days,
    /// [`Preset::Last30Days`]
    Last30Days,
    /// Any range that is not exactly a preset, or one built by clicks or typing.
    Custom,
}

impl From<Preset> for Mode {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::AllTime => Mode::AllTime,
            Preset::Today => Mode::Today,
            Preset::Yesterday => Mode::Yesterday,
            Preset::Last7Days => Mode::Last7Days,
            Preset::Last30Days => Mode::Last30Days,
        }
    }
}

// ===== SelectorState =====

/// Complete selector state. Transitions produce a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorState {
    /// Preset matching `range`, or `Custom`.
    pub mode: Mode,
    /// Committed range.
    pub range: DateRange,
    /// First click of an in-progress two-click selection.
    pub pending_click_anchor: Option<NaiveDate>,
    /// Months between the current month and the first visible month.
    pub visible_month_offset: i32,
}

/// Calendar window step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStep {
    /// Twelve months back.
    PreviousYear,
    /// One month back.
    PreviousMonth,
    /// One month forward.
    NextMonth,
    /// Twelve months forward.
    NextYear,
}

impl MonthStep {
    /// Signed month delta for this step.
    pub fn delta(&self) -> i32 {
        match self {
            MonthStep::PreviousYear => -12,
            MonthStep::PreviousMonth => -1,
            MonthStep::NextMonth => 1,
            MonthStep::NextYear => 12,
        }
    }
}

/// A user gesture or caller action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEvent {
    /// A preset was chosen from the list.
    PresetSelected(Preset),
    /// A calendar day was clicked.
    DateClicked(NaiveDate),
    /// New raw text in the start field.
    StartTextChanged(String),
    /// New raw text in the end field.
    EndTextChanged(String),
    /// The visible window moved by this many months.
    MonthNavigated(i32),
    /// The caller replaced the range directly (e.g. a programmatic reset).
    RangePushed(DateRange),
}

/// Infer the mode for `range`, anchored at `now`.
///
/// Empty ranges are `AllTime`. Otherwise presets are tried in
/// [`Preset::INFERENCE_ORDER`] comparing calendar dates only; the first
/// match wins and anything else is `Custom`.
pub fn infer_mode(range: &DateRange, now: NaiveDateTime) -> Mode {
    if range.is_all_time() {
        return Mode::AllTime;
    }
    Preset::INFERENCE_ORDER
        .into_iter()
        .find(|preset| range.same_days_as(&preset.resolve(now)))
        .map_or(Mode::Custom, Mode::from)
}

/// Build the state for an externally supplied range.
///
/// When the range has a start, the visible window is moved to the start's month.
/// A range without a start, including an end-only one, resets the window to the current month.
pub fn derive_state(range: DateRange, now: NaiveDateTime) -> SelectorState {
    SelectorState {
        mode: infer_mode(&range, now),
        range,
        pending_click_anchor: open_anchor(&range),
        visible_month_offset: range
            .start_date()
            .map_or(0, |start| months_between(now.date(), start)),
    }
}

/// Apply one event to `state`.
pub fn transition(
    state: &SelectorState,
    event: &SelectorEvent,
    now: NaiveDateTime,
) -> SelectorState {
    match event {
        SelectorEvent::PresetSelected(preset) => {
            let range = preset.resolve(now);
            SelectorState {
                mode: Mode::from(*preset),
                range,
                pending_click_anchor: open_anchor(&range),
                visible_month_offset: 0,
            }
        }
        SelectorEvent::DateClicked(day) => {
            let clicked = start_of_day(*day);
            let range = match (state.range.shape(), state.range.start) {
                (RangeShape::Open, Some(anchor)) => DateRange::between(anchor, clicked),
                _ => DateRange::starting_at(clicked),
            };
            custom(range, *day, now)
        }
        SelectorEvent::StartTextChanged(text) => edit_bound(state, text, Bound::Start, now),
        SelectorEvent::EndTextChanged(text) => edit_bound(state, text, Bound::End, now),
        SelectorEvent::MonthNavigated(delta) => SelectorState {
            visible_month_offset: state.visible_month_offset.saturating_add(*delta),
            ..*state
        },
        SelectorEvent::RangePushed(range) => derive_state(*range, now),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Start,
    End,
}

/// Classification of the text in a bound field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundEdit {
    /// Empty field: unset the bound.
    Clear,
    /// Valid date: commit it.
    Commit(NaiveDate),
    /// Not (yet) a valid date: keep the committed bound.
    Pending,
}

impl BoundEdit {
    fn classify(text: &str) -> Self {
        if text.is_empty() {
            return BoundEdit::Clear;
        }
        match date::parse_date(text) {
            Ok(day) => BoundEdit::Commit(day),
            Err(_) => BoundEdit::Pending,
        }
    }
}

fn edit_bound(
    state: &SelectorState,
    text: &str,
    bound: Bound,
    now: NaiveDateTime,
) -> SelectorState {
    let DateRange { mut start, mut end } = state.range;

    let committed = match BoundEdit::classify(text) {
        BoundEdit::Pending => {
            return SelectorState {
                mode: Mode::Custom,
                ..*state
            };
        }
        BoundEdit::Clear => None,
        BoundEdit::Commit(day) => Some(start_of_day(day)),
    };

    match bound {
        Bound::Start => start = committed,
        Bound::End => end = committed,
    }
    if let (Some(s), Some(e)) = (start, end) {
        if e < s {
            std::mem::swap(&mut start, &mut end);
        }
    }

    let range = DateRange { start, end };
    let focus = match bound {
        Bound::Start => range.start_date(),
        Bound::End => range.end_date(),
    };
    SelectorState {
        mode: Mode::Custom,
        range,
        pending_click_anchor: open_anchor(&range),
        visible_month_offset: match (committed, focus) {
            (Some(_), Some(day)) => months_between(now.date(), day),
            _ => state.visible_month_offset,
        },
    }
}

fn custom(range: DateRange, focus: NaiveDate, now: NaiveDateTime) -> SelectorState {
    SelectorState {
        mode: Mode::Custom,
        range,
        pending_click_anchor: open_anchor(&range),
        visible_month_offset: months_between(now.date(), focus),
    }
}

fn open_anchor(range: &DateRange) -> Option<NaiveDate> {
    match range.shape() {
        RangeShape::Open => range.start_date(),
        _ => None,
    }
}

// ===== RangeSelector =====

/// Interactive date-range selector.
///
/// Each gesture method returns the committed range after the gesture. The
/// raw text of the start/end fields is kept separately so a half-typed date
/// survives without touching the committed range.
#[derive(Debug, Clone)]
pub struct RangeSelector<C = SystemClock> {
    state: SelectorState,
    start_text: String,
    end_text: String,
    open: bool,
    clock: C,
}

impl RangeSelector<SystemClock> {
    /// Selector over `initial`, reading the system clock.
    pub fn new(initial: DateRange) -> Self {
        Self::with_clock(initial, SystemClock)
    }
}

impl<C: Clock> RangeSelector<C> {
    /// Selector over `initial` with an explicit clock.
    pub fn with_clock(initial: DateRange, clock: C) -> Self {
        let state = derive_state(initial, clock.now());
        Self {
            start_text: format_date(state.range.start_date()),
            end_text: format_date(state.range.end_date()),
            state,
            open: false,
            clock,
        }
    }

    /// Apply a preset.
    pub fn on_preset_selected(&mut self, preset: Preset) -> DateRange {
        self.apply(SelectorEvent::PresetSelected(preset))
    }

    /// First click anchors a new range; the second closes it.
    pub fn on_calendar_date_clicked(&mut self, day: NaiveDate) -> DateRange {
        self.apply(SelectorEvent::DateClicked(day))
    }

    /// New raw text in the start field.
    pub fn on_start_text_changed(&mut self, text: &str) -> DateRange {
        self.apply(SelectorEvent::StartTextChanged(text.to_string()))
    }

    /// New raw text in the end field.
    pub fn on_end_text_changed(&mut self, text: &str) -> DateRange {
        self.apply(SelectorEvent::EndTextChanged(text.to_string()))
    }

    /// Shift the visible window by `delta` months (±1 month, ±12 year).
    pub fn on_month_navigate(&mut self, delta: i32) -> DateRange {
        self.apply(SelectorEvent::MonthNavigated(delta))
    }

    /// Shift the visible window by one navigation step.
    pub fn on_month_step(&mut self, step: MonthStep) -> DateRange {
        self.on_month_navigate(step.delta())
    }

    /// Replace the range from outside and re-derive mode and window.
    pub fn push_range(&mut self, range: DateRange) -> DateRange {
        self.apply(SelectorEvent::RangePushed(range))
    }

    fn apply(&mut self, event: SelectorEvent) -> DateRange {
        let next = transition(&self.state, &event, self.clock.now());
        trace!(?event, mode = ?next.mode, range = ?next.range, "selector transition");

        let committed = next.range != self.state.range;
        self.state = next;

        match &event {
            SelectorEvent::StartTextChanged(text) if !committed => self.start_text = text.clone(),
            SelectorEvent::EndTextChanged(text) if !committed => self.end_text = text.clone(),
            _ => self.sync_text(),
        }
        self.state.range
    }

    fn sync_text(&mut self) {
        self.start_text = format_date(self.state.range.start_date());
        self.end_text = format_date(self.state.range.end_date());
    }

    // ===== Accessors =====

    /// Full machine state.
    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    /// Committed range.
    pub fn range(&self) -> DateRange {
        self.state.range
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Months between the current month and the first visible month.
    pub fn visible_month_offset(&self) -> i32 {
        self.state.visible_month_offset
    }

    /// Raw contents of the start field.
    pub fn start_text(&self) -> &str {
        &self.start_text
    }

    /// Raw contents of the end field.
    pub fn end_text(&self) -> &str {
        &self.end_text
    }

    /// First day of each of the two displayed months.
    pub fn visible_months(&self) -> [NaiveDate; 2] {
        let today = self.clock.today();
        let offset = self.state.visible_month_offset;
        [
            date::month_start(today, offset),
            date::month_start(today, offset.saturating_add(1)),
        ]
    }

    // ===== Dropdown visibility (display only) =====

    /// True while the dropdown is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show or hide the dropdown.
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    /// Close the dropdown, e.g. on focus loss. The range is kept.
    pub fn dismiss(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
#[path = "range_selector_tests.rs"]
mod tests;
