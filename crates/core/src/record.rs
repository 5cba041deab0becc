use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// One leg of a transaction: an account path plus an optional signed
/// amount. Split transactions carry several postings; by convention
/// their amounts sum to zero, enforced upstream of this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub account: String,
    pub amount: Option<Amount>,
}

impl Posting {
    pub fn new(account: &str, amount: Amount) -> Self {
        Posting {
            account: account.to_string(),
            amount: Some(amount),
        }
    }

    /// A posting with no amount, e.g. an elided balancing leg.
    pub fn bare(account: &str) -> Self {
        Posting {
            account: account.to_string(),
            amount: None,
        }
    }
}

/// An incoming transaction record as handed over by a collaborator
/// (file importer, API layer). The engine never mutates a record; it
/// only derives identity tokens and duplicate verdicts from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    #[serde(default)]
    pub payee: String,
    #[serde(default)]
    pub narration: String,
    pub postings: Vec<Posting>,
    /// Currency substituted when a fallback posting carries no amount.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// External source id (e.g. the FITID of an OFX download), if any.
    #[serde(default)]
    pub source_ref: Option<String>,
    /// Identity token, present on reference-set records that already
    /// went through the engine in an earlier session.
    #[serde(default)]
    pub token: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Record {
    pub fn new(date: NaiveDate, payee: &str, narration: &str, postings: Vec<Posting>) -> Self {
        Record {
            date,
            payee: payee.to_string(),
            narration: narration.to_string(),
            postings,
            currency: default_currency(),
            source_ref: None,
            token: None,
        }
    }

    pub fn is_split(&self) -> bool {
        self.postings.len() > 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn usd(cents: i64) -> Amount {
        Amount::new(Decimal::new(cents, 2), "USD")
    }

    #[test]
    fn split_detection() {
        let two = Record::new(
            date(2024, 1, 15),
            "GROCERY STORE",
            "",
            vec![
                Posting::new("Expenses:Food", usd(8550)),
                Posting::new("Liabilities:CreditCard", usd(-8550)),
            ],
        );
        assert!(!two.is_split());

        let three = Record::new(
            date(2024, 1, 15),
            "GROCERY STORE",
            "",
            vec![
                Posting::new("Expenses:Food", usd(5000)),
                Posting::new("Expenses:Household", usd(3550)),
                Posting::new("Liabilities:CreditCard", usd(-8550)),
            ],
        );
        assert!(three.is_split());
    }

    #[test]
    fn bare_posting_has_no_amount() {
        let p = Posting::bare("Expenses:Unknown");
        assert!(p.amount.is_none());
    }
}
