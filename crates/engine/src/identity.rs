//! Identity token generation with collision and kept-duplicate
//! disambiguation.
//!
//! A token is the SHA-256 digest of `date|payee|amount|account`,
//! possibly suffixed `-N` when the same fingerprint is issued more than
//! once in a session, or `-dup-N` when the caller retains a record that
//! was flagged as a probable re-import. Records without a usable
//! account get a random `fallback_xxxxxxxx` token instead.

use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use txident_core::RecordError;

use crate::normalize::{self, AmountValue};

pub const FALLBACK_PREFIX: &str = "fallback_";

/// Session counters exposed for caller-side reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeneratorStats {
    /// Every token handed out, including fallback and suffixed ones.
    pub tokens_issued: usize,
    /// Distinct base fingerprints that collided at least once.
    pub collided_bases: usize,
    /// Highest `-N` suffix issued so far (0 when no collision yet).
    pub max_collision_suffix: u32,
    pub fallback_tokens: usize,
}

/// Session-scoped token factory. One instance per import session,
/// called from a single thread; state never outlives the session.
#[derive(Debug, Default)]
pub struct IdGenerator {
    issued: HashSet<String>,
    collision_counters: HashMap<String, u32>,
    fallback_count: usize,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate an identity token for one record's hash fields.
    ///
    /// The same four-tuple always yields the same unsuffixed token on
    /// its first appearance in a session; repeats within the session
    /// get `-2`, `-3`, … suffixes and are never returned twice.
    pub fn generate(
        &mut self,
        date: &str,
        payee: Option<&str>,
        amount: Option<&AmountValue>,
        account: &str,
        kept_duplicate: bool,
    ) -> String {
        let account = match normalize::clean_account(account) {
            Some(account) => account,
            None => return self.fallback_token(),
        };

        let payee = normalize::clean_payee(payee);
        let amount = AmountValue::canonical(amount);
        let base = fingerprint(date, &payee, &amount, &account);

        let token = if kept_duplicate {
            self.next_duplicate_token(&base)
        } else {
            self.next_unique_token(&base)
        };
        self.issued.insert(token.clone());
        token
    }

    /// Strict variant: rejects malformed dates, non-numeric amounts,
    /// blank accounts, and records where payee and narration are both
    /// empty. `context` names the offending record in the error.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_strict(
        &mut self,
        date: &str,
        payee: Option<&str>,
        narration: &str,
        amount: Option<&AmountValue>,
        account: &str,
        kept_duplicate: bool,
        context: &str,
    ) -> Result<String, RecordError> {
        normalize::validate_date(date)?;
        normalize::validate_description(payee.unwrap_or_default(), narration, context)?;
        AmountValue::validate_numeric(amount)?;
        if normalize::clean_account(account).is_none() {
            return Err(RecordError::MissingAccount);
        }
        Ok(self.generate(date, payee, amount, account, kept_duplicate))
    }

    /// The composed hash-input string and its digest, for debugging and
    /// tests. Performs the same normalization as `generate` but touches
    /// no session state.
    pub fn hash_components(
        date: &str,
        payee: Option<&str>,
        amount: Option<&AmountValue>,
        account: &str,
    ) -> (String, String) {
        let payee = normalize::clean_payee(payee);
        let amount = AmountValue::canonical(amount);
        let account = account.trim();
        let input = format!("{date}|{payee}|{amount}|{account}");
        let digest = sha256_hex(&input);
        (input, digest)
    }

    /// Trim an external reference id (e.g. an OFX FITID); blank or
    /// missing ids are treated as absent.
    pub fn validate_reference_id(reference_id: Option<&str>) -> Option<String> {
        let cleaned = reference_id?.trim();
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned.to_string())
        }
    }

    pub fn stats(&self) -> GeneratorStats {
        GeneratorStats {
            tokens_issued: self.issued.len(),
            collided_bases: self.collision_counters.len(),
            max_collision_suffix: self.collision_counters.values().copied().max().unwrap_or(0),
            fallback_tokens: self.fallback_count,
        }
    }

    /// Drop all session state; the next `generate` behaves like the
    /// first call on a fresh instance.
    pub fn reset(&mut self) {
        self.issued.clear();
        self.collision_counters.clear();
        self.fallback_count = 0;
    }

    /// Random token for records with no usable account. Unconditionally
    /// unique: registered in the issued set and re-drawn on the off
    /// chance the same suffix already appeared this session.
    fn fallback_token(&mut self) -> String {
        let token = loop {
            let hex = Uuid::new_v4().simple().to_string();
            let candidate = format!("{FALLBACK_PREFIX}{}", &hex[..8]);
            if !self.issued.contains(&candidate) {
                break candidate;
            }
        };
        self.issued.insert(token.clone());
        self.fallback_count += 1;
        token
    }

    /// Smallest positive N such that `base-dup-N` has not been issued.
    /// Independent of the plain collision counter for the same base.
    fn next_duplicate_token(&self, base: &str) -> String {
        let mut n = 1u32;
        loop {
            let candidate = format!("{base}-dup-{n}");
            if !self.issued.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// The base fingerprint on first issue, then `-2`, `-3`, … on each
    /// repeat. The counter only advances, never resets within a session.
    fn next_unique_token(&mut self, base: &str) -> String {
        if !self.issued.contains(base) {
            return base.to_string();
        }
        let counter = self.collision_counters.entry(base.to_string()).or_insert(1);
        *counter += 1;
        format!("{base}-{counter}")
    }
}

/// The un-suffixed digest over the four canonical fields.
fn fingerprint(date: &str, payee: &str, amount: &str, account: &str) -> String {
    sha256_hex(&format!("{date}|{payee}|{amount}|{account}"))
}

/// Lowercase hex SHA-256 of a string (64 chars).
fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest: [u8; 32] = hasher.finalize().into();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// One-shot token generation without session state, for callers that
/// identify unrelated records and do not need collision handling.
pub fn identify_once(
    date: &str,
    payee: Option<&str>,
    amount: Option<&AmountValue>,
    account: &str,
) -> String {
    IdGenerator::new().generate(date, payee, amount, account, false)
}
