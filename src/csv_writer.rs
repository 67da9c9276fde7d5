use anyhow::Result;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::types::Account;

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Account", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("owner", &self.owner)?;
        state.serialize_field("balance", &self.balance)?;
        state.end()
    }
}

/// Write all accounts to the provided destination (in CSV format)
pub fn write_accounts(
    destination: &mut dyn std::io::Write,
    accounts: impl Iterator<Item = Account>,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(destination);

    for account in accounts {
        writer.serialize(account)?;
    }
    writer.flush()?;
    Ok(())
}
