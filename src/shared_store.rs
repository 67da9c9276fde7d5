use parking_lot::Mutex;
use std::sync::Arc;

use crate::account_store::{AccountStore, VecAccountStore};
use crate::error::LedgerError;
use crate::types::{Account, AccountId, Amount};

/// Cloneable handle to a single ledger that can be used from several threads
///
/// One lock covers the whole ledger, so a transfer is never observed half done and two
/// withdrawals can never race past the same balance check.
#[derive(Debug, Clone, Default)]
pub struct SharedAccountStore {
    inner: Arc<Mutex<VecAccountStore>>,
}

impl SharedAccountStore {
    pub fn new(store: VecAccountStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }
}

impl From<VecAccountStore> for SharedAccountStore {
    fn from(store: VecAccountStore) -> Self {
        Self::new(store)
    }
}

impl AccountStore for SharedAccountStore {
    fn lookup(&self, id: AccountId) -> Option<Account> {
        self.inner.lock().lookup(id)
    }

    fn create(&mut self, id: AccountId, owner: &str) -> Result<(), LedgerError> {
        self.inner.lock().create(id, owner)
    }

    fn deposit(&mut self, id: AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.inner.lock().deposit(id, amount)
    }

    fn withdraw(&mut self, id: AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.inner.lock().withdraw(id, amount)
    }

    fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.inner.lock().transfer(from, to, amount)
    }

    fn snapshot(&self) -> Vec<Account> {
        self.inner.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::ErrorKind;
    use rust_decimal_macros::dec;
    use std::thread;

    fn total(store: &SharedAccountStore) -> Amount {
        store.snapshot().iter().map(|account| account.balance).sum()
    }

    #[test]
    fn handles_share_state() {
        let mut first = SharedAccountStore::from(VecAccountStore::demo());
        let second = first.clone();

        first.create(3, "Ben").unwrap();
        first.deposit(3, dec!(300)).unwrap();
        assert_eq!(second.lookup(3).unwrap().balance, dec!(300));
    }

    #[test]
    fn concurrent_transfers_conserve_money() {
        let store = SharedAccountStore::from(VecAccountStore::demo());
        let before = total(&store);

        let workers: Vec<_> = (0..8)
            .map(|worker| {
                let mut store = store.clone();
                thread::spawn(move || {
                    let (from, to) = if worker % 2 == 0 { (1, 2) } else { (2, 1) };
                    for _ in 0..200 {
                        match store.transfer(from, to, dec!(7.5)) {
                            Ok(()) => {}
                            Err(err) => assert_eq!(err.kind(), ErrorKind::InsufficientFunds),
                        }
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(total(&store), before);
        for account in store.snapshot() {
            assert!(account.balance >= Amount::ZERO);
        }
    }

    #[test]
    fn concurrent_withdrawals_never_overdraw() {
        let store = SharedAccountStore::from(VecAccountStore::demo());

        let workers: Vec<_> = (0..10)
            .map(|_| {
                let mut store = store.clone();
                thread::spawn(move || {
                    (0..10)
                        .filter(|_| store.withdraw(1, dec!(10)).is_ok())
                        .count()
                })
            })
            .collect();
        let succeeded: usize = workers
            .into_iter()
            .map(|worker| worker.join().unwrap())
            .sum();

        assert_eq!(succeeded, 50);
        assert_eq!(store.lookup(1).unwrap().balance, dec!(0));
    }
}
