use crate::dates::date_format;
use crate::store::{ImportPolicy, Record};
use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A single income (positive) or expense (negative) entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceRecord {
    pub id: u32,
    #[serde(deserialize_with = "finite_amount")]
    pub amount: f64,
    pub category: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    pub description: String,
}

impl FinanceRecord {
    pub fn new(
        id: u32,
        amount: f64,
        category: String,
        date: NaiveDate,
        description: String,
    ) -> Self {
        Self {
            id,
            amount,
            category,
            date,
            description,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}

impl Record for FinanceRecord {
    const LABEL: &'static str = "Finance record";
    const CSV_HEADERS: &'static [&'static str] =
        &["id", "amount", "category", "date", "description"];
    const IMPORT_POLICY: ImportPolicy = ImportPolicy::MintIds;

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn summary(&self) -> String {
        format!("{} {}", self.category, self.amount)
    }
}

/// Amounts must be finite: JSON has no NaN or infinity.
fn finite_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let amount = f64::deserialize(deserializer)?;
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(D::Error::custom(format!("amount must be a finite number, got {}", amount)))
    }
}
