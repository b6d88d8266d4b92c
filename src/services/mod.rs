//! Services backing the CLI.
//!
//! - `themes` - Theme discovery and activation via capy-themes

pub mod themes;
