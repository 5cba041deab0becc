pub mod account;
pub mod amount;
pub mod error;
pub mod record;

pub use account::{is_valid_account_name, AccountRoot};
pub use amount::Amount;
pub use error::RecordError;
pub use record::{Posting, Record};
