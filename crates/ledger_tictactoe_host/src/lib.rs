//! Reference host for `ledger_tictactoe`.
//!
//! Supplies the collaborators the game engine assumes: an account store with
//! compare-and-persist, an instruction processor that never persists a
//! rejected move, configuration, and a script runner used by the CLI.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
pub mod logging;
mod processor;
mod script;
mod store;

pub use config::{ConfigError, HostConfig};
pub use processor::{Instruction, Processor, ProcessorError};
pub use script::{MatchScript, Rejection, RunReport, ScriptedMove, Seat, run_script};
pub use store::{Account, AccountStore, InMemoryStore, StoreError};
