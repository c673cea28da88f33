//! Transaction validation and filtering
//!
//! Separates structurally valid records from invalid ones and applies the
//! optional region and amount filters. The stages run in a fixed order:
//!
//! 1. Profile the input (distinct regions, amount range)
//! 2. Drop invalid records, counting them
//! 3. Region filter (exact, case-sensitive)
//! 4. Amount filter (inclusive bounds, each optional)
//!
//! The input slice is never modified; a new collection is returned.

use crate::types::Transaction;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info};

/// Optional filters applied after validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub region: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

impl FilterCriteria {
    pub fn has_amount_bounds(&self) -> bool {
        self.min_amount.is_some() || self.max_amount.is_some()
    }

    fn amount_in_range(&self, amount: Decimal) -> bool {
        self.min_amount.map_or(true, |min| amount >= min)
            && self.max_amount.map_or(true, |max| amount <= max)
    }
}

/// The first validity rule a record breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    NonPositiveQuantity,
    NonPositiveUnitPrice,
    MissingCustomerId,
    MissingRegion,
    BadTransactionIdPrefix,
    BadProductIdPrefix,
    BadCustomerIdPrefix,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidReason::NonPositiveQuantity => "quantity must be positive",
            InvalidReason::NonPositiveUnitPrice => "unit price must be positive",
            InvalidReason::MissingCustomerId => "customer ID is empty",
            InvalidReason::MissingRegion => "region is empty",
            InvalidReason::BadTransactionIdPrefix => "transaction ID must start with 'T'",
            InvalidReason::BadProductIdPrefix => "product ID must start with 'P'",
            InvalidReason::BadCustomerIdPrefix => "customer ID must start with 'C'",
        };
        f.write_str(text)
    }
}

/// Check a record against the validity rules
///
/// # Returns
///
/// * `None` - The record is valid
/// * `Some(reason)` - The first rule the record breaks
pub fn invalid_reason(tx: &Transaction) -> Option<InvalidReason> {
    if tx.quantity() <= 0 {
        Some(InvalidReason::NonPositiveQuantity)
    } else if tx.unit_price() <= Decimal::ZERO {
        Some(InvalidReason::NonPositiveUnitPrice)
    } else if tx.customer_id().is_empty() {
        Some(InvalidReason::MissingCustomerId)
    } else if tx.region().is_empty() {
        Some(InvalidReason::MissingRegion)
    } else if !tx.transaction_id().starts_with('T') {
        Some(InvalidReason::BadTransactionIdPrefix)
    } else if !tx.product_id().starts_with('P') {
        Some(InvalidReason::BadProductIdPrefix)
    } else if !tx.customer_id().starts_with('C') {
        Some(InvalidReason::BadCustomerIdPrefix)
    } else {
        None
    }
}

pub fn is_valid(tx: &Transaction) -> bool {
    invalid_reason(tx).is_none()
}

/// Shape of the input data, reported before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataProfile {
    /// Distinct non-empty regions across all input records
    pub regions: BTreeSet<String>,
    /// `(min, max)` amount across all input records, `None` for empty input
    pub amount_range: Option<(Decimal, Decimal)>,
}

impl DataProfile {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let regions = transactions
            .iter()
            .map(Transaction::region)
            .filter(|region| !region.is_empty())
            .map(str::to_owned)
            .collect();

        let amount_range = transactions.iter().map(Transaction::amount).fold(
            None,
            |range: Option<(Decimal, Decimal)>, amount| match range {
                None => Some((amount, amount)),
                Some((min, max)) => Some((min.min(amount), max.max(amount))),
            },
        );

        DataProfile {
            regions,
            amount_range,
        }
    }
}

/// Record counts after each stage
///
/// `after_region` and `after_amount` always hold the number of records left
/// after that stage ran; when a filter is not applied the count simply carries
/// over from the previous stage. The `*_filter_applied` flags say which filters
/// were active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub total_input: usize,
    pub invalid: usize,
    pub after_region: usize,
    pub after_amount: usize,
    pub final_count: usize,
    pub region_filter_applied: bool,
    pub amount_filter_applied: bool,
}

/// Result of [`validate_and_filter`]
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    pub valid: Vec<Transaction>,
    pub invalid_count: usize,
    pub summary: ValidationSummary,
    pub profile: DataProfile,
}

/// Validate `transactions` and apply `criteria`
///
/// # Arguments
///
/// * `transactions` - Parsed records, in input order
/// * `criteria` - Optional region and amount filters
///
/// # Returns
///
/// A [`ValidationOutcome`] holding the surviving records (input order kept),
/// the number of invalid records, per-stage counts, and the input profile.
pub fn validate_and_filter(
    transactions: &[Transaction],
    criteria: &FilterCriteria,
) -> ValidationOutcome {
    let profile = DataProfile::from_transactions(transactions);
    info!(
        regions = %profile.regions.iter().cloned().collect::<Vec<_>>().join(", "),
        "available regions"
    );
    if let Some((min, max)) = profile.amount_range {
        info!(%min, %max, "transaction amount range");
    }

    let mut valid = Vec::with_capacity(transactions.len());
    let mut invalid_count = 0;
    for tx in transactions {
        match invalid_reason(tx) {
            None => valid.push(tx.clone()),
            Some(reason) => {
                debug!(transaction_id = tx.transaction_id(), %reason, "invalid record");
                invalid_count += 1;
            }
        }
    }

    let region_filter_applied = criteria.region.is_some();
    if let Some(region) = &criteria.region {
        valid.retain(|tx| tx.region() == region);
        info!(region = %region, remaining = valid.len(), "applied region filter");
    }
    let after_region = valid.len();

    let amount_filter_applied = criteria.has_amount_bounds();
    if amount_filter_applied {
        valid.retain(|tx| criteria.amount_in_range(tx.amount()));
        info!(remaining = valid.len(), "applied amount filter");
    }
    let after_amount = valid.len();

    let summary = ValidationSummary {
        total_input: transactions.len(),
        invalid: invalid_count,
        after_region,
        after_amount,
        final_count: valid.len(),
        region_filter_applied,
        amount_filter_applied,
    };

    ValidationOutcome {
        valid,
        invalid_count,
        summary,
        profile,
    }
}
