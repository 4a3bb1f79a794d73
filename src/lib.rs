//! Offline daily health journal.
//!
//! [`storage::LogStore`] owns every saved day; [`model`] defines what a day
//! holds; [`cli`] is the command-line front-end.

pub mod cli;
pub mod config;
pub mod model;
pub mod storage;
