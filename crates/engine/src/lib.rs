pub mod identity;
pub mod matcher;
pub mod normalize;
pub mod selector;
pub(crate) mod util;

pub use identity::{identify_once, GeneratorStats, IdGenerator, FALLBACK_PREFIX};
pub use matcher::{payee_similarity, DuplicateMatcher, MatchCriterion, MatchResult};
pub use normalize::AmountValue;
pub use selector::{select, SelectedPosting};

pub mod engine {
    use crate::*;
    use txident_core::{Record, RecordError};

    /// Identity token for a whole record: canonical-posting selection,
    /// field normalization, and generation in one call.
    pub fn identify(
        generator: &mut IdGenerator,
        record: &Record,
        kept_duplicate: bool,
    ) -> Result<String, RecordError> {
        let selected = selector::select(record)?;
        let amount = AmountValue::from(&selected.amount);
        Ok(generator.generate(
            &record.date.to_string(),
            Some(&record.payee),
            Some(&amount),
            &selected.account,
            kept_duplicate,
        ))
    }

    /// Strict variant: validation failures name the offending record.
    /// On top of the field checks, the selected account path must be a
    /// well-formed colon-delimited name.
    pub fn identify_strict(
        generator: &mut IdGenerator,
        record: &Record,
        kept_duplicate: bool,
    ) -> Result<String, RecordError> {
        let selected = selector::select(record)?;
        if !txident_core::is_valid_account_name(&selected.account) {
            return Err(RecordError::BadAccountName(selected.account));
        }
        let amount = AmountValue::from(&selected.amount);
        let context = format!("{} \"{}\"", record.date, record.payee);
        generator.generate_strict(
            &record.date.to_string(),
            Some(&record.payee),
            &record.narration,
            Some(&amount),
            &selected.account,
            kept_duplicate,
            &context,
        )
    }

    pub fn create_matcher(similarity_threshold: f32) -> DuplicateMatcher {
        DuplicateMatcher::new(similarity_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use txident_core::{Amount, Posting, Record};

    fn grocery_record() -> Record {
        Record::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "GROCERY STORE",
            "",
            vec![
                Posting::new(
                    "Expenses:Food",
                    Amount::new(Decimal::new(8550, 2), "USD"),
                ),
                Posting::new(
                    "Liabilities:CreditCard",
                    Amount::new(Decimal::new(-8550, 2), "USD"),
                ),
            ],
        )
    }

    #[test]
    fn identify_hashes_the_selected_posting() {
        let mut generator = IdGenerator::new();
        let token = engine::identify(&mut generator, &grocery_record(), false).unwrap();

        // Same result as generating from the explicit four-tuple.
        let amount = AmountValue::Text("-85.50 USD".to_string());
        let expected = identify_once(
            "2024-01-15",
            Some("GROCERY STORE"),
            Some(&amount),
            "Liabilities:CreditCard",
        );
        assert_eq!(token, expected);
    }

    #[test]
    fn identify_twice_collides_with_suffix() {
        let mut generator = IdGenerator::new();
        let record = grocery_record();
        let first = engine::identify(&mut generator, &record, false).unwrap();
        let second = engine::identify(&mut generator, &record, false).unwrap();
        assert_eq!(second, format!("{first}-2"));
    }

    #[test]
    fn identify_strict_rejects_malformed_account_name() {
        let mut generator = IdGenerator::new();
        let mut record = grocery_record();
        record.postings[1].account = "CreditCard".to_string();
        record.postings[0].account = "Food".to_string();
        let err = engine::identify_strict(&mut generator, &record, false).unwrap_err();
        assert!(matches!(
            err,
            txident_core::RecordError::BadAccountName(_)
        ));
    }

    #[test]
    fn identify_strict_rejects_blank_description() {
        let mut generator = IdGenerator::new();
        let mut record = grocery_record();
        record.payee = String::new();
        record.narration = String::new();
        let err = engine::identify_strict(&mut generator, &record, false).unwrap_err();
        assert!(err.to_string().contains("2024-01-15"));
    }
}
