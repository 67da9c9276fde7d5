use thiserror::Error;

use crate::types::{AccountId, Amount, TransferSide};

/// Coarse classification of ledger failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    InsufficientFunds,
}

/// Everything that can go wrong when operating on the ledger
///
/// All errors are raised before any balance is touched, so a failed operation never leaves a
/// partial mutation behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("account not found (id = {0})")]
    NotFound(AccountId),

    #[error("{side} account not found (id = {id})")]
    TransferAccountNotFound { side: TransferSide, id: AccountId },

    #[error("an account with this id already exists (id = {0})")]
    AlreadyExists(AccountId),

    #[error("insufficient funds (id = {id}, balance = {balance}, requested = {requested})")]
    InsufficientFunds {
        id: AccountId,
        balance: Amount,
        requested: Amount,
    },
}

impl LedgerError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        LedgerError::InvalidArgument(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            LedgerError::NotFound(_) | LedgerError::TransferAccountNotFound { .. } => {
                ErrorKind::NotFound
            }
            LedgerError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            LedgerError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
        }
    }
}
