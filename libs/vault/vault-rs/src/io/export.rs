use std::fs;
use std::path::Path;

use serde_json::Value;
use vault_shared::AccountRecord;

use crate::model::errors::{VaultErrKind, VaultResult};

/// Parses a collection export. Two shapes are accepted:
///
/// - an object keyed by document id: `{"uid1": {...}, "uid2": {...}}`
/// - an array of documents that each carry a `uid` field
///
/// Records are returned ordered by uid. A document's own `uid` field is
/// filled in from its key when absent.
pub fn parse_accounts(json: &str) -> VaultResult<Vec<(String, AccountRecord)>> {
    let value: Value = serde_json::from_str(json)?;

    let mut accounts = match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(uid, doc)| {
                let mut record: AccountRecord = serde_json::from_value(doc)?;
                record.uid.get_or_insert_with(|| uid.clone());
                Ok((uid, record))
            })
            .collect::<VaultResult<Vec<_>>>()?,
        Value::Array(docs) => docs
            .into_iter()
            .map(|doc| {
                let record: AccountRecord = serde_json::from_value(doc)?;
                let uid = record.uid.clone().ok_or(VaultErrKind::AccountIdMissing)?;
                Ok((uid, record))
            })
            .collect::<VaultResult<Vec<_>>>()?,
        other => {
            return Err(VaultErrKind::ExportInvalid(format!(
                "expected an object or array of accounts, found {}",
                json_kind(&other)
            ))
            .into())
        }
    };

    accounts.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(accounts)
}

pub fn read_accounts(path: impl AsRef<Path>) -> VaultResult<Vec<(String, AccountRecord)>> {
    let path = path.as_ref();
    debug!(?path, "reading account export");
    parse_accounts(&fs::read_to_string(path)?)
}

pub fn read_account(path: impl AsRef<Path>) -> VaultResult<AccountRecord> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_shared::SubscriptionStatus;

    #[test]
    fn keyed_export() {
        let accounts = parse_accounts(
            r#"{
                "b": {"subscriptionStatus": "active", "subscriptionTier": "pro"},
                "a": {}
            }"#,
        )
        .unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].0, "a");
        assert_eq!(accounts[0].1.uid.as_deref(), Some("a"));
        assert_eq!(accounts[1].1.subscription_status, Some(SubscriptionStatus::Active));
    }

    #[test]
    fn array_export() {
        let accounts =
            parse_accounts(r#"[{"uid": "z", "isTrialing": true}, {"uid": "y"}]"#).unwrap();
        assert_eq!(accounts[0].0, "y");
        assert!(accounts[1].1.is_trialing);
    }

    #[test]
    fn array_export_needs_uids() {
        let err = parse_accounts(r#"[{"isTrialing": true}]"#).unwrap_err();
        assert_eq!(err.kind, VaultErrKind::AccountIdMissing);
    }

    #[test]
    fn scalar_export() {
        let err = parse_accounts("42").unwrap_err();
        assert!(matches!(err.kind, VaultErrKind::ExportInvalid(msg) if msg.contains("a number")));
    }
}
