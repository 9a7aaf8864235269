//! Terminal output for release runs

pub mod console;

pub use console::Console;
