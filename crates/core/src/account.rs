use serde::{Deserialize, Serialize};
use std::fmt;

/// Root of a colon-delimited account path, e.g. `Liabilities` in
/// `Liabilities:CreditCard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountRoot {
    Assets,
    Liabilities,
    Equity,
    Income,
    Expenses,
}

impl AccountRoot {
    /// Classify an account path by its first colon segment.
    pub fn of(account: &str) -> Option<AccountRoot> {
        match account.split(':').next() {
            Some("Assets") => Some(AccountRoot::Assets),
            Some("Liabilities") => Some(AccountRoot::Liabilities),
            Some("Equity") => Some(AccountRoot::Equity),
            Some("Income") => Some(AccountRoot::Income),
            Some("Expenses") => Some(AccountRoot::Expenses),
            _ => None,
        }
    }
}

impl fmt::Display for AccountRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRoot::Assets => write!(f, "Assets"),
            AccountRoot::Liabilities => write!(f, "Liabilities"),
            AccountRoot::Equity => write!(f, "Equity"),
            AccountRoot::Income => write!(f, "Income"),
            AccountRoot::Expenses => write!(f, "Expenses"),
        }
    }
}

/// Validate an account path: at least two colon segments, a known root,
/// and segments limited to alphanumerics, `-`, and `_`.
pub fn is_valid_account_name(account: &str) -> bool {
    let parts: Vec<&str> = account.split(':').collect();
    if parts.len() < 2 {
        return false;
    }
    if AccountRoot::of(account).is_none() {
        return false;
    }
    parts.iter().all(|part| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_roots() {
        assert_eq!(
            AccountRoot::of("Liabilities:CreditCard"),
            Some(AccountRoot::Liabilities)
        );
        assert_eq!(AccountRoot::of("Assets:Checking"), Some(AccountRoot::Assets));
        assert_eq!(AccountRoot::of("Income:Salary"), Some(AccountRoot::Income));
        assert_eq!(AccountRoot::of("Misc:Stuff"), None);
        assert_eq!(AccountRoot::of(""), None);
    }

    #[test]
    fn valid_account_names() {
        assert!(is_valid_account_name("Assets:Checking"));
        assert!(is_valid_account_name("Expenses:Food:Coffee-Shops"));
        assert!(is_valid_account_name("Liabilities:Credit_Card"));
    }

    #[test]
    fn invalid_account_names() {
        assert!(!is_valid_account_name("Assets"));
        assert!(!is_valid_account_name("Banana:Stand"));
        assert!(!is_valid_account_name("Assets::Checking"));
        assert!(!is_valid_account_name("Assets:Check ing"));
        assert!(!is_valid_account_name(""));
    }
}
