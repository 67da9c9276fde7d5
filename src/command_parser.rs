use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::io::BufRead;

use crate::types::{AccountId, Amount};
use crate::validation::{account_id_from_value, amount_from_value, owner_from_value};

/// The different operation identifiers as in the input script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawCommandType {
    Lookup,
    Create,
    Deposit,
    Withdraw,
    Transfer,
}

/// A single line of the input script
///
/// The operands are kept as plain JSON values so their type can be checked before conversion.
#[derive(Debug, Deserialize)]
struct RawCommand {
    op: RawCommandType,
    id: Option<Value>,
    owner: Option<Value>,
    from: Option<Value>,
    to: Option<Value>,
    amount: Option<Value>,
}

/// A ledger operation with all operands converted to their proper types
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Lookup {
        id: AccountId,
    },
    Create {
        id: AccountId,
        owner: String,
    },
    Deposit {
        id: AccountId,
        amount: Amount,
    },
    Withdraw {
        id: AccountId,
        amount: Amount,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Amount,
    },
}

fn required<'a>(value: &'a Option<Value>, field: &str, op: RawCommandType) -> Result<&'a Value> {
    value
        .as_ref()
        .ok_or_else(|| anyhow!("No '{}' for {:?}", field, op))
}

/// Turn a `RawCommand` into a `Command`, operands the operation does not use are ignored
fn raw_to_command(raw: RawCommand) -> Result<Command> {
    let op = raw.op;
    let command = match op {
        RawCommandType::Lookup => Command::Lookup {
            id: account_id_from_value(required(&raw.id, "id", op)?)?,
        },
        RawCommandType::Create => Command::Create {
            id: account_id_from_value(required(&raw.id, "id", op)?)?,
            owner: owner_from_value(required(&raw.owner, "owner", op)?)?,
        },
        RawCommandType::Deposit => Command::Deposit {
            id: account_id_from_value(required(&raw.id, "id", op)?)?,
            amount: amount_from_value(required(&raw.amount, "amount", op)?)?,
        },
        RawCommandType::Withdraw => Command::Withdraw {
            id: account_id_from_value(required(&raw.id, "id", op)?)?,
            amount: amount_from_value(required(&raw.amount, "amount", op)?)?,
        },
        RawCommandType::Transfer => Command::Transfer {
            from: account_id_from_value(required(&raw.from, "from", op)?)?,
            to: account_id_from_value(required(&raw.to, "to", op)?)?,
            amount: amount_from_value(required(&raw.amount, "amount", op)?)?,
        },
    };
    Ok(command)
}

fn parse_line(line: &str) -> Result<Command> {
    let raw: RawCommand = serde_json::from_str(line)?;
    raw_to_command(raw)
}

/// For each non-blank line of the input, read a `Command` (one JSON object per line)
///
/// Errors carry the line number (starting at 1) as context.
pub fn iter_commands(reader: impl std::io::Read) -> impl Iterator<Item = Result<Command>> {
    std::io::BufReader::new(reader)
        .lines()
        .enumerate()
        .filter(|(_, line)| line.as_ref().map_or(true, |line| !line.trim().is_empty()))
        .map(|(index, line)| {
            line.map_err(Into::into)
                .and_then(|line| parse_line(&line))
                .with_context(|| format!("line {}", index + 1))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::{ErrorKind, LedgerError};
    use rust_decimal_macros::dec;

    fn error_kind(err: &anyhow::Error) -> Option<ErrorKind> {
        err.downcast_ref::<LedgerError>().map(LedgerError::kind)
    }

    #[test]
    fn empty_file() {
        let buffer = br#""#;
        let count = iter_commands(&buffer[..]).count();
        assert_eq!(count, 0);
    }

    #[test]
    fn single_line() {
        let buffer = br#"
{"op": "deposit", "id": 3, "amount": 300}
"#;
        let entries: Vec<_> = iter_commands(&buffer[..]).map(|r| r.unwrap()).collect();
        assert_eq!(
            entries,
            vec![Command::Deposit {
                id: 3,
                amount: dec!(300)
            }]
        );
    }

    #[test]
    fn all_different_commands() {
        let buffer = br#"
{"op": "lookup", "id": 1}
{"op": "create", "id": 3, "owner": "Ben"}
{"op": "deposit", "id": 3, "amount": 300.5}

{"op": "withdraw", "id": 3, "amount": 100}
{"op": "transfer", "from": 1, "to": 3, "amount": 500}
"#;
        let entries: Vec<_> = iter_commands(&buffer[..]).map(|r| r.unwrap()).collect();
        assert_eq!(
            entries,
            vec![
                Command::Lookup { id: 1 },
                Command::Create {
                    id: 3,
                    owner: "Ben".to_string()
                },
                Command::Deposit {
                    id: 3,
                    amount: dec!(300.5)
                },
                Command::Withdraw {
                    id: 3,
                    amount: dec!(100)
                },
                Command::Transfer {
                    from: 1,
                    to: 3,
                    amount: dec!(500)
                },
            ]
        );
    }

    #[test]
    fn all_mixed_in_errors() {
        let buffer = br#"
{"op": "lookup", "id": 1}
{"op": "lookup", "id": "1"}
{"op": "create", "id": 3, "owner": ["Charlie"]}
{"op": "deposit", "id": 1, "amount": "300"}
{"op": "withdraw", "id": 1}
{"op": "dance", "id": 1}
not even json
{"op": "create", "id": 3, "owner": "  ", "amount": 4}
"#;
        let entries: Vec<_> = iter_commands(&buffer[..]).collect();
        assert_eq!(entries.len(), 8);
        assert!(entries[0].is_ok()); // all good
        assert!(entries[1].is_err()); // numeric-looking string id
        assert!(entries[2].is_err()); // owner is not a string
        assert!(entries[3].is_err()); // numeric-looking string amount
        assert!(entries[4].is_err()); // no amount
        assert!(entries[5].is_err()); // unsupported operation
        assert!(entries[6].is_err()); // garbage
        assert!(entries[7].is_ok()); // blank owner is up to the ledger, amount ignored
    }

    #[test]
    fn string_id_is_an_invalid_argument() {
        let buffer = br#"{"op": "lookup", "id": "1"}"#;
        let err = iter_commands(&buffer[..]).next().unwrap().unwrap_err();
        assert_eq!(error_kind(&err), Some(ErrorKind::InvalidArgument));
    }

    #[test]
    fn errors_name_the_line() {
        let buffer = br#"
{"op": "lookup", "id": 1}
{"op": "withdraw", "id": 1}
"#;
        let err = iter_commands(&buffer[..]).nth(1).unwrap().unwrap_err();
        assert_eq!(err.to_string(), "line 3");
        assert_eq!(error_kind(&err), None);
    }
}
