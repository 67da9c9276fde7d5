use anyhow::Result;
use log::{info, warn};

use crate::account_store::AccountStore;
use crate::command_parser::Command;
use crate::error::LedgerError;

/// Outcome counts of a batch of commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Can replay a series of commands against an account store
pub struct CommandHandler<S> {
    store: S,
}

impl<S: AccountStore> CommandHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Run a single command, a lookup that finds nothing is not a failure
    pub fn handle_command(&mut self, command: Command) -> Result<(), LedgerError> {
        match command {
            Command::Lookup { id } => {
                if self.store.lookup(id).is_none() {
                    info!("No account found with an id of {}", id);
                }
                Ok(())
            }
            Command::Create { id, owner } => self.store.create(id, &owner),
            Command::Deposit { id, amount } => self.store.deposit(id, amount),
            Command::Withdraw { id, amount } => self.store.withdraw(id, amount),
            Command::Transfer { from, to, amount } => self.store.transfer(from, to, amount),
        }
    }

    /// Handle all given commands
    /// This method is infallible, all bogus commands are skipped, errors will be logged.
    pub fn handle_commands(&mut self, commands: impl Iterator<Item = Result<Command>>) -> Summary {
        let mut summary = Summary::default();
        for command in commands {
            let result =
                command.and_then(|command| self.handle_command(command).map_err(Into::into));
            match result {
                Ok(()) => summary.succeeded += 1,
                Err(err) => {
                    warn!("Command failed: {:#}", err);
                    summary.failed += 1;
                }
            }
        }
        summary
    }
}
