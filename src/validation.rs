//! Checks applied to loosely typed input before it reaches the ledger
//!
//! The ledger API itself is strongly typed, but commands read from a script carry plain JSON
//! values. A numeric-looking string such as `"1"` must not be mistaken for the account id `1`, so
//! every value is checked for its JSON type first and converted afterwards.

use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;
use std::str::FromStr;

use crate::error::LedgerError;
use crate::types::{AccountId, Amount};

/// Turn a JSON value into an account id, only JSON integers in range are accepted
pub fn account_id_from_value(value: &Value) -> Result<AccountId, LedgerError> {
    value
        .as_u64()
        .and_then(|id| AccountId::try_from(id).ok())
        .ok_or_else(|| {
            LedgerError::invalid(format!(
                "id must be an integer between 0 and {}, got {}",
                AccountId::MAX,
                value
            ))
        })
}

/// Turn a JSON value into an owner name
///
/// Only the type is checked, emptiness is left to `validate_owner` so that creating an existing
/// account reports the duplicate first.
pub fn owner_from_value(value: &Value) -> Result<String, LedgerError> {
    match value {
        Value::String(owner) => Ok(owner.clone()),
        other => Err(LedgerError::invalid(format!(
            "owner must be a non-empty string, got {}",
            other
        ))),
    }
}

/// Turn a JSON value into an amount, strings are rejected even when they look numeric
///
/// The sign is not checked here, the ledger operations do that.
pub fn amount_from_value(value: &Value) -> Result<Amount, LedgerError> {
    let number = match value {
        Value::Number(number) => number,
        other => {
            return Err(LedgerError::invalid(format!(
                "amount must be a positive finite number, got {}",
                other
            )))
        }
    };

    // Decimal notation is parsed exactly, exponent notation (large floats) goes through f64
    Amount::from_str(&number.to_string())
        .ok()
        .or_else(|| number.as_f64().and_then(Amount::from_f64))
        .ok_or_else(|| {
            LedgerError::invalid(format!("amount is out of the supported range: {}", number))
        })
}

/// Convert a float into an amount, NaN and the infinities are rejected
pub fn amount_from_f64(value: f64) -> Result<Amount, LedgerError> {
    if !value.is_finite() {
        return Err(LedgerError::invalid(format!(
            "amount must be a positive finite number, got {}",
            value
        )));
    }

    Amount::from_f64(value).ok_or_else(|| {
        LedgerError::invalid(format!("amount is out of the supported range: {}", value))
    })
}

/// Owners must contain something other than whitespace, the trimmed form is kept
pub fn validate_owner(owner: &str) -> Result<String, LedgerError> {
    let trimmed = owner.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::invalid("owner must be a non-empty string"));
    }
    Ok(trimmed.to_string())
}

/// Ids handed out to new accounts must be strictly positive
pub fn validate_new_id(id: AccountId) -> Result<(), LedgerError> {
    if id == 0 {
        return Err(LedgerError::invalid("account id must be a positive integer"));
    }
    Ok(())
}

/// Deposits, withdrawals and transfers only move strictly positive amounts
pub fn validate_amount(amount: Amount) -> Result<(), LedgerError> {
    if amount.is_zero() || amount.is_sign_negative() {
        return Err(LedgerError::invalid(format!(
            "amount must be a positive finite number, got {}",
            amount
        )));
    }
    Ok(())
}
