//! Interactive chat module
//!
//! Provides a readline-based console front end for the command router.

mod repl;

pub use repl::{BoardroomRepl, ReplInput};
