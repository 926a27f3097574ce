//! Question log browser (qlog)
//!
//! Filters, sorts and paginates a repository of AI-assistant question log
//! entries, and drives the interactive date-range selection that feeds the
//! date filter.
//!
//! Pure core: [`model`], [`date`], [`query`], [`state`].
//! Impure shell: [`parser`], [`source`], [`config`], [`logging`], [`view`].

pub mod config;
pub mod date;
pub mod logging;
pub mod model;
pub mod parser;
pub mod query;
pub mod source;
pub mod state;
pub mod view;
