//! Sales aggregations
//!
//! Every function here is pure: it takes a slice of (already validated)
//! transactions and returns a freshly built result. No accumulator outlives
//! the call that created it, so functions can be called independently and in
//! any order.
//!
//! # Ordering and Ties
//!
//! Groupings are built in `BTreeMap`s and then stable-sorted by the ranking
//! key, so equal ranks always fall back to the lexical order of the group key:
//!
//! - Regions: total sales desc, then region name
//! - Products: quantity desc (top sellers) or asc (low performers), then name
//! - Customers: total spent desc, then customer ID
//! - Peak day: highest revenue, earliest date on ties
//!
//! Sums saturate at the numeric bounds instead of overflowing.

use crate::types::{AnalyticsError, Transaction};
use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

/// Default quantity below which a product is a low performer
pub const DEFAULT_LOW_PERFORMER_THRESHOLD: i64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct RegionStats {
    pub region: String,
    pub total_sales: Decimal,
    pub transaction_count: usize,
    /// Share of the grand total, in percent
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductStats {
    pub name: String,
    pub quantity_sold: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerStats {
    pub customer_id: String,
    pub total_spent: Decimal,
    pub purchase_count: usize,
    pub avg_order_value: Decimal,
    pub distinct_products: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyStats {
    pub date: String,
    pub revenue: Decimal,
    pub transaction_count: usize,
    pub unique_customers: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeakDay {
    pub date: String,
    pub revenue: Decimal,
    pub transaction_count: usize,
}

/// Sum of all transaction amounts
pub fn total_revenue(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .fold(Decimal::ZERO, |acc, tx| acc.saturating_add(tx.amount()))
}

/// Sales per region, ordered by total sales descending
///
/// Percentages are relative to [`total_revenue`] and are zero when the grand
/// total is zero.
pub fn region_wise_sales(transactions: &[Transaction]) -> Vec<RegionStats> {
    let grand_total = total_revenue(transactions);

    let grouped = transactions.iter().fold(
        BTreeMap::<&str, (Decimal, usize)>::new(),
        |mut acc, tx| {
            let entry = acc.entry(tx.region()).or_default();
            entry.0 = entry.0.saturating_add(tx.amount());
            entry.1 += 1;
            acc
        },
    );

    let mut stats: Vec<RegionStats> = grouped
        .into_iter()
        .map(|(region, (total_sales, transaction_count))| RegionStats {
            region: region.to_string(),
            total_sales,
            transaction_count,
            percentage: percentage_of(total_sales, grand_total),
        })
        .collect();

    stats.sort_by_key(|s| Reverse(s.total_sales));
    stats
}

fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

/// Quantity and revenue per product name, keyed by name
pub fn product_totals(transactions: &[Transaction]) -> BTreeMap<String, ProductStats> {
    transactions.iter().fold(BTreeMap::new(), |mut acc, tx| {
        let entry = acc
            .entry(tx.product_name().to_string())
            .or_insert_with(|| ProductStats {
                name: tx.product_name().to_string(),
                quantity_sold: 0,
                revenue: Decimal::ZERO,
            });
        entry.quantity_sold = entry.quantity_sold.saturating_add(tx.quantity());
        entry.revenue = entry.revenue.saturating_add(tx.amount());
        acc
    })
}

/// The `n` products with the highest total quantity sold
pub fn top_selling_products(transactions: &[Transaction], n: usize) -> Vec<ProductStats> {
    let mut products: Vec<ProductStats> = product_totals(transactions).into_values().collect();
    products.sort_by_key(|p| Reverse(p.quantity_sold));
    products.truncate(n);
    products
}

/// Every product whose total quantity is below `threshold`, lowest first
pub fn low_performing_products(transactions: &[Transaction], threshold: i64) -> Vec<ProductStats> {
    let mut products: Vec<ProductStats> = product_totals(transactions)
        .into_values()
        .filter(|p| p.quantity_sold < threshold)
        .collect();
    products.sort_by_key(|p| p.quantity_sold);
    products
}

/// Spending per customer, ordered by total spent descending
pub fn customer_analysis(transactions: &[Transaction]) -> Vec<CustomerStats> {
    let grouped = transactions.iter().fold(
        BTreeMap::<&str, (Decimal, usize, BTreeSet<String>)>::new(),
        |mut acc, tx| {
            let entry = acc.entry(tx.customer_id()).or_default();
            entry.0 = entry.0.saturating_add(tx.amount());
            entry.1 += 1;
            entry.2.insert(tx.product_name().to_string());
            acc
        },
    );

    let mut customers: Vec<CustomerStats> = grouped
        .into_iter()
        .map(|(customer_id, (total_spent, purchase_count, distinct_products))| CustomerStats {
            customer_id: customer_id.to_string(),
            total_spent,
            purchase_count,
            avg_order_value: total_spent / Decimal::from(purchase_count),
            distinct_products,
        })
        .collect();

    customers.sort_by_key(|c| Reverse(c.total_spent));
    customers
}

/// Revenue, transaction count and distinct customers per date, oldest first
///
/// Dates are ordered lexically, which is chronological for ISO-style dates.
pub fn daily_sales_trend(transactions: &[Transaction]) -> Vec<DailyStats> {
    let grouped = transactions.iter().fold(
        BTreeMap::<&str, (Decimal, usize, BTreeSet<&str>)>::new(),
        |mut acc, tx| {
            let entry = acc.entry(tx.date()).or_default();
            entry.0 = entry.0.saturating_add(tx.amount());
            entry.1 += 1;
            entry.2.insert(tx.customer_id());
            acc
        },
    );

    grouped
        .into_iter()
        .map(|(date, (revenue, transaction_count, customers))| DailyStats {
            date: date.to_string(),
            revenue,
            transaction_count,
            unique_customers: customers.len(),
        })
        .collect()
}

/// The date with the highest revenue
///
/// # Errors
///
/// Returns `EmptyData` when there are no transactions.
pub fn find_peak_sales_day(transactions: &[Transaction]) -> Result<PeakDay, AnalyticsError> {
    daily_sales_trend(transactions)
        .into_iter()
        // `max_by` keeps the last maximum, so compare in reverse date order
        .rev()
        .max_by(|a, b| a.revenue.cmp(&b.revenue))
        .map(|day| PeakDay {
            date: day.date,
            revenue: day.revenue,
            transaction_count: day.transaction_count,
        })
        .ok_or_else(|| AnalyticsError::empty_data("peak sales day"))
}

/// First and last distinct date, lexically
pub fn date_range(transactions: &[Transaction]) -> Option<(String, String)> {
    let first = transactions.iter().map(Transaction::date).min()?;
    let last = transactions.iter().map(Transaction::date).max()?;
    Some((first.to_string(), last.to_string()))
}
