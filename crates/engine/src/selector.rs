//! Picks the posting that represents "the" transaction for hashing and
//! duplicate comparison.

use txident_core::{AccountRoot, Amount, Posting, Record, RecordError};

/// The canonical (account, signed amount) pair for a record, tagged
/// with the priority tier that chose it.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPosting {
    pub account: String,
    pub amount: Amount,
    pub rule: &'static str,
}

/// One priority tier: a label plus the predicate a posting must satisfy.
/// Tiers are evaluated in order over the record's postings; the first
/// posting matching the earliest tier wins.
struct SelectionRule {
    name: &'static str,
    applies: fn(&Posting) -> bool,
}

/// Priority order: the physical account where money moved is the most
/// stable hash anchor, income is the next best signal, then any posting
/// that at least carries an amount.
const RULES: &[SelectionRule] = &[
    SelectionRule {
        name: "asset-or-liability",
        applies: anchors_physical_account,
    },
    SelectionRule {
        name: "income",
        applies: anchors_income_account,
    },
    SelectionRule {
        name: "carries-amount",
        applies: carries_amount,
    },
];

fn anchors_physical_account(posting: &Posting) -> bool {
    posting.amount.is_some()
        && matches!(
            AccountRoot::of(&posting.account),
            Some(AccountRoot::Assets | AccountRoot::Liabilities)
        )
}

fn anchors_income_account(posting: &Posting) -> bool {
    posting.amount.is_some()
        && matches!(AccountRoot::of(&posting.account), Some(AccountRoot::Income))
}

fn carries_amount(posting: &Posting) -> bool {
    posting.amount.is_some()
}

/// Select the canonical posting. Every record with at least one posting
/// resolves to something: when no tier matches, the first posting wins
/// and a missing amount is replaced by zero in the record's currency.
pub fn select(record: &Record) -> Result<SelectedPosting, RecordError> {
    let first = record.postings.first().ok_or(RecordError::NoPostings)?;

    for rule in RULES {
        if let Some(posting) = record.postings.iter().find(|p| (rule.applies)(p)) {
            let amount = posting
                .amount
                .clone()
                .unwrap_or_else(|| Amount::zero(&record.currency));
            return Ok(SelectedPosting {
                account: posting.account.clone(),
                amount,
                rule: rule.name,
            });
        }
    }

    Ok(SelectedPosting {
        account: first.account.clone(),
        amount: first
            .amount
            .clone()
            .unwrap_or_else(|| Amount::zero(&record.currency)),
        rule: "first-posting",
    })
}
