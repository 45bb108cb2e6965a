//! Storage contracts available to the shell.

pub mod prefs;
