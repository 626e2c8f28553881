//! jsonlens bridge library target.
//!
//! Exposes the front end's logic for integration tests. The binary entry
//! point is in `main.rs`.

pub mod cli;
pub mod commands;
pub mod session;
pub mod util;
pub mod view;
