//! Typed views over bridge payloads
//!
//! The client itself never applies these; operations return the raw
//! `serde_json::Value`. Callers that want structure convert with
//! [`from_value`].

use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Convert a pass-through payload into a typed model
pub fn from_value<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(ApiError::Decode)
}

/// Account ids come back as strings or numbers depending on the source
fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Account entry of `GET /accounts`, keyed by account id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub name: String,
    /// asset, expense, revenue, cash...
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub account_role: Option<String>,
    /// Currency symbol and amount, e.g. "¥ 120.50"
    #[serde(default)]
    pub current_balance: Option<String>,
    #[serde(default)]
    pub links: Option<String>,
}

pub type Accounts = BTreeMap<String, AccountSummary>;

/// Transaction entry of `GET /transactions`, keyed by transaction id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub date: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub source_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub destination_id: Option<String>,
}

pub type Transactions = BTreeMap<String, TransactionSummary>;

/// Payload of `GET /default_account`
///
/// Unknown keys are user settings the server stores verbatim; they survive in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    pub default_revenue: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    pub default_expense: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firefly_iii_url: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Acknowledgment of `POST /record`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordReceipt {
    pub message: String,
    #[serde(default)]
    pub result: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagsAndCategories {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accounts_from_value() {
        let payload = json!({
            "1": {
                "name": "Checking",
                "type": "asset",
                "account_role": "defaultAsset",
                "current_balance": "¥ 1200.00",
                "links": "https://firefly.local/api/v1/accounts/1"
            },
            "4": { "name": "Groceries", "type": "expense" }
        });
        let accounts: Accounts = from_value(payload).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts["1"].account_type, "asset");
        assert_eq!(accounts["4"].account_role, None);
    }

    #[test]
    fn test_transaction_ids_accept_numbers() {
        let payload = json!({
            "42": {
                "date": "2025-05-25T11:49:00+08:00",
                "amount": "¥ 8.00",
                "description": "Lunch",
                "category_name": "Dining",
                "category_id": 3,
                "tags": ["lunch"],
                "source_id": "1",
                "destination_id": 4
            }
        });
        let transactions: Transactions = from_value(payload).unwrap();
        let lunch = &transactions["42"];
        assert_eq!(lunch.category_id.as_deref(), Some("3"));
        assert_eq!(lunch.source_id.as_deref(), Some("1"));
        assert_eq!(lunch.destination_id.as_deref(), Some("4"));
    }

    #[test]
    fn test_user_settings_keeps_unknown_keys() {
        let payload = json!({
            "default_revenue": "-1",
            "default_expense": 1,
            "version": "0.1.2",
            "currency": "CNY"
        });
        let settings: UserSettings = from_value(payload).unwrap();
        assert_eq!(settings.default_revenue.as_deref(), Some("-1"));
        assert_eq!(settings.default_expense.as_deref(), Some("1"));
        assert_eq!(settings.extra.get("currency"), Some(&json!("CNY")));
    }

    #[test]
    fn test_decode_error() {
        let err = from_value::<RecordReceipt>(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
