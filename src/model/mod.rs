//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod date_range;
pub mod error;
pub mod identifiers;
pub mod log_entry;
pub mod malformed_entry;

// Re-export for convenience
pub use date_range::{DateRange, RangeShape};
pub use error::{AppError, InputError, ParseError};
pub use identifiers::{AuthorId, EntryId, InvalidAuthorId, InvalidEntryId};
pub use log_entry::{Author, EntryStatus, LogEntry, UnknownStatus};
pub use malformed_entry::MalformedEntry;
