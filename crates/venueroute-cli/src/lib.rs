//! Venue route CLI library.
//!
//! Subcommand handlers, output formatting and terminal styling for the
//! `venueroute-cli` binary.

pub mod commands;
pub mod output;
pub mod terminal;
