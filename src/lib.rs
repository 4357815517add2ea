//! Panel League (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, tests and benches
//! can write `panel_league::{core,term,types}`. The implementation lives in the
//! dedicated crates under `crates/`.

pub use panel_league_core as core;
pub use panel_league_term as term;
pub use panel_league_types as types;
