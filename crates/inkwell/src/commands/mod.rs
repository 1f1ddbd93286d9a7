//! Command dispatch: bridges CLI args -> Store actions -> output formatting.

pub mod categories;
pub mod config_cmd;
pub mod posts;
pub mod session;
pub mod util;

use inkwell_core::Store;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Categories(args) => categories::handle(store, args, global).await,
        Command::Posts(args) => posts::handle(store, args, global).await,
        Command::Whoami => session::whoami(store, global).await,
        Command::Status => session::status(store, global).await,
        Command::LoginUrl { next } => session::login_url(store, next.as_deref(), global),
        Command::LogoutUrl { next } => session::logout_url(store, next.as_deref(), global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
