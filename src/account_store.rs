use log::{debug, info};

use crate::error::LedgerError;
use crate::types::{Account, AccountId, Amount, TransferSide};
use crate::validation::{validate_amount, validate_new_id, validate_owner};

/// Keep track of accounts and move money between them
///
/// Every operation validates all of its inputs before touching a balance, a failed call leaves
/// the store exactly as it was.
pub trait AccountStore {
    /// Find an account, a missing account is not an error
    fn lookup(&self, id: AccountId) -> Option<Account>;

    /// Open a new account with a zero balance
    fn create(&mut self, id: AccountId, owner: &str) -> Result<(), LedgerError>;

    /// Add the given (positive) amount to the balance
    fn deposit(&mut self, id: AccountId, amount: Amount) -> Result<(), LedgerError>;

    /// Take the given (positive) amount from the balance, the balance may not go negative
    fn withdraw(&mut self, id: AccountId, amount: Amount) -> Result<(), LedgerError>;

    /// Move the given (positive) amount between two distinct accounts
    fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Copy of all accounts in creation order
    fn snapshot(&self) -> Vec<Account>;
}

/// A simple RAM-backed account store scanning a standard Rust `Vec`
#[derive(Debug, Default)]
pub struct VecAccountStore {
    data_store: Vec<Account>,
}

impl VecAccountStore {
    pub fn new() -> Self {
        Self {
            data_store: Vec::new(),
        }
    }

    /// Build a store with pre-existing accounts
    ///
    /// Entries are checked like `create` would check them, opening balances may not be negative.
    pub fn with_accounts<I, S>(entries: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = (AccountId, S, Amount)>,
        S: AsRef<str>,
    {
        let mut store = Self::new();
        for (id, owner, balance) in entries {
            if balance.is_sign_negative() && !balance.is_zero() {
                return Err(LedgerError::invalid(format!(
                    "opening balance may not be negative (id = {}, balance = {})",
                    id, balance
                )));
            }
            store.create(id, owner.as_ref())?;
            if let Some(index) = store.position(id) {
                store.data_store[index].balance = balance;
            }
        }
        Ok(store)
    }

    /// The two demo accounts every fresh bank starts with
    pub fn demo() -> Self {
        let mut store = Self::new();
        store.data_store.push(Account {
            id: 1,
            owner: "Alice".to_string(),
            balance: Amount::from(500),
        });
        store.data_store.push(Account {
            id: 2,
            owner: "Bob".to_string(),
            balance: Amount::from(300),
        });
        store
    }

    /// Exact-match scan, logs whether the account was found
    fn find(&self, id: AccountId) -> Option<usize> {
        match self.position(id) {
            Some(index) => {
                let account = &self.data_store[index];
                info!(
                    "Retrieved account {} (owner = {}, balance = {})",
                    account.id, account.owner, account.balance
                );
                Some(index)
            }
            None => {
                debug!("No account found (id = {})", id);
                None
            }
        }
    }

    fn position(&self, id: AccountId) -> Option<usize> {
        self.data_store.iter().position(|account| account.id == id)
    }

    fn credited_balance(&self, index: usize, amount: Amount) -> Result<Amount, LedgerError> {
        let account = &self.data_store[index];
        account.balance.checked_add(amount).ok_or_else(|| {
            LedgerError::invalid(format!(
                "deposit would overflow the balance (id = {})",
                account.id
            ))
        })
    }

    fn check_funds(&self, index: usize, amount: Amount) -> Result<(), LedgerError> {
        let account = &self.data_store[index];
        if !account.covers(amount) {
            return Err(LedgerError::InsufficientFunds {
                id: account.id,
                balance: account.balance,
                requested: amount,
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a VecAccountStore {
    type Item = Account;

    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.data_store.iter().cloned())
    }
}

impl AccountStore for VecAccountStore {
    fn lookup(&self, id: AccountId) -> Option<Account> {
        self.find(id).map(|index| self.data_store[index].clone())
    }

    fn create(&mut self, id: AccountId, owner: &str) -> Result<(), LedgerError> {
        if self.find(id).is_some() {
            return Err(LedgerError::AlreadyExists(id));
        }
        validate_new_id(id)?;
        let owner = validate_owner(owner)?;

        info!(
            "Created account {} (owner = {}, balance = {})",
            id,
            owner,
            Amount::ZERO
        );
        self.data_store.push(Account {
            id,
            owner,
            balance: Amount::ZERO,
        });
        Ok(())
    }

    fn deposit(&mut self, id: AccountId, amount: Amount) -> Result<(), LedgerError> {
        let index = self.find(id).ok_or(LedgerError::NotFound(id))?;
        validate_amount(amount)?;
        let new_balance = self.credited_balance(index, amount)?;

        let account = &mut self.data_store[index];
        account.balance = new_balance;
        info!(
            "Deposited {} into account {} (owner = {}), new balance = {}",
            amount, id, account.owner, account.balance
        );
        Ok(())
    }

    fn withdraw(&mut self, id: AccountId, amount: Amount) -> Result<(), LedgerError> {
        let index = self.find(id).ok_or(LedgerError::NotFound(id))?;
        validate_amount(amount)?;
        self.check_funds(index, amount)?;

        let account = &mut self.data_store[index];
        account.balance -= amount;
        info!(
            "Withdrew {} from account {} (owner = {}), new balance = {}",
            amount, id, account.owner, account.balance
        );
        Ok(())
    }

    fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let from_index = self
            .find(from)
            .ok_or(LedgerError::TransferAccountNotFound {
                side: TransferSide::Source,
                id: from,
            })?;
        let to_index = self
            .find(to)
            .ok_or(LedgerError::TransferAccountNotFound {
                side: TransferSide::Destination,
                id: to,
            })?;
        if from_index == to_index {
            return Err(LedgerError::invalid(format!(
                "source and destination must differ (id = {})",
                from
            )));
        }
        validate_amount(amount)?;
        self.check_funds(from_index, amount)?;
        let credited = self.credited_balance(to_index, amount)?;

        self.data_store[from_index].balance -= amount;
        self.data_store[to_index].balance = credited;
        info!(
            "Transferred {} from account {} (owner = {}) to account {} (owner = {})",
            amount,
            from,
            self.data_store[from_index].owner,
            to,
            self.data_store[to_index].owner
        );
        Ok(())
    }

    fn snapshot(&self) -> Vec<Account> {
        self.into_iter().collect()
    }
}
