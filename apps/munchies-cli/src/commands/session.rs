//! # Session Commands
//!
//! A session is what scopes the cart: it survives between commands and is
//! gone once ended.

use anyhow::Context;
use clap::Subcommand;
use munchies_store::FileSessionStorage;

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Print the current session id and where it is stored
    Show,

    /// Start a new session and print its id
    New,

    /// End the current session, discarding its cart
    End,
}

pub fn run(cmd: SessionCommand, storage: FileSessionStorage) -> anyhow::Result<()> {
    match cmd {
        SessionCommand::Show => {
            println!("{}  ({})", storage.session_id(), storage.dir().display());
        }
        SessionCommand::New => {
            let root = storage
                .dir()
                .parent()
                .context("session directory has no parent")?;
            let fresh = FileSessionStorage::new_session(root)?;
            println!("{}", fresh.session_id());
            println!("Pass --session {} or set MUNCHIES_SESSION_ID to use it.", fresh.session_id());
        }
        SessionCommand::End => {
            let id = storage.session_id().to_string();
            storage.end_session()?;
            println!("Session {} ended.", id);
        }
    }
    Ok(())
}
