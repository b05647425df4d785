//! Day timeline layout for scheduled tasks.
//!
//! [`layout::TimelinePacker`] turns one day's tasks into horizontally placed
//! blocks stacked in the fewest rows that keep overlapping blocks apart.

pub mod config;
pub mod export;
pub mod layout;
pub mod schedule;
