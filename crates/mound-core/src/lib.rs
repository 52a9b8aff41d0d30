// Library root: the UI-free half of the pitcher browser. Everything the
// terminal front end displays is derived here so it can be tested without a
// terminal.

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod divisions;
pub mod format;
pub mod loader;
pub mod teams;
