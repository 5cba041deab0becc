//! Field canonicalization applied to every hash input before digesting.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use txident_core::RecordError;

/// The closed set of amount shapes accepted at the engine boundary.
/// Everything is rendered to one canonical string before hashing.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountValue {
    Decimal(Decimal),
    Float(f64),
    Text(String),
}

impl AmountValue {
    /// Canonical hash form. A missing or empty amount becomes the
    /// literal `"0"`; numerics keep their own rendering including sign.
    pub fn canonical(value: Option<&AmountValue>) -> String {
        match value {
            None => "0".to_string(),
            Some(AmountValue::Text(s)) if s.is_empty() => "0".to_string(),
            Some(v) => v.to_string(),
        }
    }

    /// Strict-mode check: the leading whitespace-separated part must
    /// parse as a decimal number (tolerates a trailing currency code,
    /// e.g. `"-11.75 USD"`).
    pub fn validate_numeric(value: Option<&AmountValue>) -> Result<(), RecordError> {
        let value = match value {
            Some(v) => v,
            None => return Err(RecordError::BadAmount("<missing>".to_string())),
        };
        if let AmountValue::Text(s) = value {
            let numeric_part = s
                .split_whitespace()
                .next()
                .ok_or_else(|| RecordError::BadAmount(s.clone()))?;
            Decimal::from_str(numeric_part).map_err(|_| RecordError::BadAmount(s.clone()))?;
        }
        Ok(())
    }
}

impl fmt::Display for AmountValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountValue::Decimal(d) => write!(f, "{d}"),
            AmountValue::Float(x) => write!(f, "{x}"),
            AmountValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&txident_core::Amount> for AmountValue {
    fn from(amount: &txident_core::Amount) -> Self {
        AmountValue::Text(amount.to_string())
    }
}

/// Missing payee becomes empty; present payee is passed through
/// untrimmed so the digest sees exactly what the source carried.
pub fn clean_payee(payee: Option<&str>) -> String {
    payee.unwrap_or_default().to_string()
}

/// Trimmed account path, or `None` when nothing usable remains. The
/// `None` case routes the generator to its fallback-token path.
pub fn clean_account(account: &str) -> Option<String> {
    let trimmed = account.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Strict-mode date check: non-blank and a real `YYYY-MM-DD` calendar
/// date. Outside strict mode the date passes through untouched.
pub fn validate_date(date: &str) -> Result<(), RecordError> {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return Err(RecordError::BadDate(date.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| RecordError::BadDate(date.to_string()))?;
    Ok(())
}

/// Strict-mode description check: payee or narration must carry
/// non-whitespace content.
pub fn validate_description(
    payee: &str,
    narration: &str,
    context: &str,
) -> Result<(), RecordError> {
    if payee.trim().is_empty() && narration.trim().is_empty() {
        return Err(RecordError::EmptyDescription(context.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_amount_is_zero() {
        assert_eq!(AmountValue::canonical(None), "0");
        assert_eq!(
            AmountValue::canonical(Some(&AmountValue::Text(String::new()))),
            "0"
        );
    }

    #[test]
    fn amounts_keep_sign_and_precision() {
        let d = AmountValue::Decimal(Decimal::from_str("-85.50").unwrap());
        assert_eq!(AmountValue::canonical(Some(&d)), "-85.50");

        let f = AmountValue::Float(-4.5);
        assert_eq!(AmountValue::canonical(Some(&f)), "-4.5");

        let t = AmountValue::Text("-85.50 USD".to_string());
        assert_eq!(AmountValue::canonical(Some(&t)), "-85.50 USD");
    }

    #[test]
    fn numeric_validation_accepts_currency_suffix() {
        let t = AmountValue::Text("-11.75 USD".to_string());
        assert!(AmountValue::validate_numeric(Some(&t)).is_ok());
    }

    #[test]
    fn numeric_validation_rejects_non_numbers() {
        let t = AmountValue::Text("twelve".to_string());
        assert!(AmountValue::validate_numeric(Some(&t)).is_err());
        assert!(AmountValue::validate_numeric(None).is_err());
        let blank = AmountValue::Text("   ".to_string());
        assert!(AmountValue::validate_numeric(Some(&blank)).is_err());
    }

    #[test]
    fn payee_passes_through_untrimmed() {
        assert_eq!(clean_payee(None), "");
        assert_eq!(clean_payee(Some("  SPACES  ")), "  SPACES  ");
    }

    #[test]
    fn account_is_trimmed_or_missing() {
        assert_eq!(clean_account(" Assets:Checking "), Some("Assets:Checking".to_string()));
        assert_eq!(clean_account("   "), None);
        assert_eq!(clean_account(""), None);
    }

    #[test]
    fn date_validation() {
        assert!(validate_date("2024-01-15").is_ok());
        assert!(validate_date("").is_err());
        assert!(validate_date("  ").is_err());
        assert!(validate_date("2024-13-01").is_err());
        assert!(validate_date("15/01/2024").is_err());
    }

    #[test]
    fn description_needs_payee_or_narration() {
        assert!(validate_description("STORE", "", "r1").is_ok());
        assert!(validate_description("", "note", "r1").is_ok());
        assert!(validate_description("", "   ", "r1").is_err());
    }
}
