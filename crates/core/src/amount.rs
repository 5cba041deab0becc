use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RecordError;

/// A signed monetary quantity with its currency code.
///
/// Displays as `"-85.50 USD"` — the exact form that participates in
/// fingerprint hashing, so the `Display` impl is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub number: Decimal,
    pub currency: String,
}

impl Amount {
    pub fn new(number: Decimal, currency: &str) -> Self {
        Amount {
            number,
            currency: currency.to_string(),
        }
    }

    /// Zero in the given currency, used when a posting carries no amount.
    pub fn zero(currency: &str) -> Self {
        Amount {
            number: Decimal::ZERO,
            currency: currency.to_string(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.number.is_zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.currency)
    }
}

impl FromStr for Amount {
    type Err = RecordError;

    /// Parses `"<number> <currency>"`, e.g. `"-85.50 USD"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let number = parts
            .next()
            .ok_or_else(|| RecordError::BadAmount(s.to_string()))?;
        let currency = parts
            .next()
            .ok_or_else(|| RecordError::BadAmount(s.to_string()))?;
        if parts.next().is_some() {
            return Err(RecordError::BadAmount(s.to_string()));
        }
        let number =
            Decimal::from_str(number).map_err(|_| RecordError::BadAmount(s.to_string()))?;
        Ok(Amount::new(number, currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_sign_and_currency() {
        let a = Amount::new(Decimal::from_str("-85.50").unwrap(), "USD");
        assert_eq!(a.to_string(), "-85.50 USD");
    }

    #[test]
    fn zero_amount() {
        let a = Amount::zero("EUR");
        assert!(a.is_zero());
        assert_eq!(a.to_string(), "0 EUR");
    }

    #[test]
    fn parse_round_trips() {
        let a: Amount = "-4.50 USD".parse().unwrap();
        assert_eq!(a.number, Decimal::from_str("-4.50").unwrap());
        assert_eq!(a.currency, "USD");
        assert_eq!(a.to_string(), "-4.50 USD");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Amount>().is_err());
        assert!("12.00".parse::<Amount>().is_err());
        assert!("twelve USD".parse::<Amount>().is_err());
        assert!("1 2 USD".parse::<Amount>().is_err());
    }
}
