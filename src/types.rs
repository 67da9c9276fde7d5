use rust_decimal::Decimal;
use std::fmt;

pub type AccountId = u32;

pub type Amount = Decimal;

/// Snapshot of a single account as held by the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub owner: String,
    pub balance: Amount,
}

impl Account {
    /// Check whether the account could pay out the given amount without going negative
    pub fn covers(&self, amount: Amount) -> bool {
        self.balance >= amount
    }
}

/// The two ends of a transfer, used to qualify missing accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferSide {
    Source,
    Destination,
}

impl fmt::Display for TransferSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferSide::Source => write!(f, "source"),
            TransferSide::Destination => write!(f, "destination"),
        }
    }
}
