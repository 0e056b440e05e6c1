//! Customer records from `GET /api/customers`

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub balance: f64,
    /// active, suspended, ...
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_defaults_balance() {
        let customer: Customer =
            serde_json::from_str(r#"{"id": 3, "name": "Ada", "phone": "+15550101"}"#).unwrap();
        assert_eq!(customer.balance, 0.0);
        assert!(customer.plan.is_none());
    }
}
