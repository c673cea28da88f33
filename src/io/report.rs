//! Sales report rendering
//!
//! [`SalesReport`] gathers every aggregation the report needs in one place;
//! its `Display` implementation renders the fixed-layout text document.
//!
//! Sections, in order:
//! 1. Header (timestamp, records processed)
//! 2. Overall Summary
//! 3. Region-wise Performance
//! 4. Top 5 Products
//! 5. Top 5 Customers
//! 6. Daily Sales Trend
//! 7. Product Performance Analysis
//! 8. API Enrichment Summary

use crate::core::analytics::{
    self, CustomerStats, DailyStats, PeakDay, ProductStats, RegionStats,
};
use crate::core::enricher::EnrichmentSummary;
use crate::types::{AnalyticsError, EnrichedTransaction, Transaction};
use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

/// Default location of the report file
pub const DEFAULT_REPORT_PATH: &str = "output/report-data";

const CURRENCY: &str = "₹";
const TOP_N: usize = 5;
const RULE_WIDTH: usize = 50;
const SECTION_WIDTH: usize = 40;

/// Everything rendered into the sales report
#[derive(Debug, Clone)]
pub struct SalesReport {
    pub generated_at: NaiveDateTime,
    pub record_count: usize,
    pub total_revenue: Decimal,
    pub average_order_value: Decimal,
    pub date_range: Option<(String, String)>,
    pub regions: Vec<RegionStats>,
    pub top_products: Vec<ProductStats>,
    pub top_customers: Vec<CustomerStats>,
    pub daily_trend: Vec<DailyStats>,
    pub peak_day: Option<PeakDay>,
    pub low_threshold: i64,
    pub low_performers: Vec<ProductStats>,
    pub enrichment: EnrichmentSummary,
}

impl SalesReport {
    /// Run every aggregation the report needs
    ///
    /// # Arguments
    ///
    /// * `transactions` - Valid (and filtered) transactions
    /// * `enriched` - Enrichment output for the same transactions
    /// * `low_threshold` - Quantity below which a product is a low performer
    /// * `generated_at` - Timestamp printed in the header
    pub fn build(
        transactions: &[Transaction],
        enriched: &[EnrichedTransaction],
        low_threshold: i64,
        generated_at: NaiveDateTime,
    ) -> Self {
        let total_revenue = analytics::total_revenue(transactions);
        let record_count = transactions.len();
        let average_order_value = if record_count == 0 {
            Decimal::ZERO
        } else {
            total_revenue / Decimal::from(record_count)
        };

        let mut top_customers = analytics::customer_analysis(transactions);
        top_customers.truncate(TOP_N);

        SalesReport {
            generated_at,
            record_count,
            total_revenue,
            average_order_value,
            date_range: analytics::date_range(transactions),
            regions: analytics::region_wise_sales(transactions),
            top_products: analytics::top_selling_products(transactions, TOP_N),
            top_customers,
            daily_trend: analytics::daily_sales_trend(transactions),
            peak_day: analytics::find_peak_sales_day(transactions).ok(),
            low_threshold,
            low_performers: analytics::low_performing_products(transactions, low_threshold),
            enrichment: EnrichmentSummary::from_enriched(enriched),
        }
    }
}

/// Format `value` rounded to `decimals` places with `,` thousands separators
pub fn format_amount(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven);
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    grouped
}

/// Format a percentage rounded half away from zero to `decimals` places
///
/// `Decimal`'s own precision formatting truncates, so rounding happens first.
pub fn format_percent(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, rounded)
}

fn money(value: Decimal, decimals: u32) -> String {
    format!("{}{}", CURRENCY, format_amount(value, decimals))
}

impl fmt::Display for SalesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let section = "-".repeat(SECTION_WIDTH);

        writeln!(f, "{}", rule)?;
        writeln!(f, "          SALES ANALYTICS REPORT")?;
        writeln!(f, "        Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "        Records Processed: {}", self.record_count)?;
        writeln!(f, "{}", rule)?;
        writeln!(f)?;

        writeln!(f, "OVERALL SUMMARY")?;
        writeln!(f, "{}", section)?;
        writeln!(f, "Total Revenue:        {}", money(self.total_revenue, 2))?;
        writeln!(f, "Total Transactions:   {}", self.record_count)?;
        writeln!(f, "Average Order Value:  {}", money(self.average_order_value, 2))?;
        match &self.date_range {
            Some((first, last)) => writeln!(f, "Date Range:           {} to {}", first, last)?,
            None => writeln!(f, "Date Range:           N/A")?,
        }
        writeln!(f)?;

        writeln!(f, "REGION-WISE PERFORMANCE")?;
        writeln!(f, "{}", section)?;
        writeln!(f, "Region      Sales           % of Total    Transactions")?;
        for region in &self.regions {
            writeln!(
                f,
                "{:<12} {:>11} {:>8}% {:>12}",
                region.region,
                money(region.total_sales, 0),
                format_percent(region.percentage, 2),
                region.transaction_count
            )?;
        }
        writeln!(f)?;

        writeln!(f, "TOP 5 PRODUCTS")?;
        writeln!(f, "{}", section)?;
        writeln!(f, "Rank  Product Name          Quantity    Revenue")?;
        for (rank, product) in self.top_products.iter().enumerate() {
            writeln!(
                f,
                "{:<5} {:<20} {:>8} {:>11}",
                rank + 1,
                product.name,
                product.quantity_sold,
                money(product.revenue, 0)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "TOP 5 CUSTOMERS")?;
        writeln!(f, "{}", section)?;
        writeln!(f, "Rank  Customer ID  Total Spent    Order Count")?;
        for (rank, customer) in self.top_customers.iter().enumerate() {
            writeln!(
                f,
                "{:<5} {:<12} {:>11} {:>11}",
                rank + 1,
                customer.customer_id,
                money(customer.total_spent, 0),
                customer.purchase_count
            )?;
        }
        writeln!(f)?;

        writeln!(f, "DAILY SALES TREND")?;
        writeln!(f, "{}", section)?;
        writeln!(f, "Date          Revenue       Transactions  Unique Customers")?;
        for day in &self.daily_trend {
            writeln!(
                f,
                "{}  {:>11} {:>12} {:>15}",
                day.date,
                money(day.revenue, 0),
                day.transaction_count,
                day.unique_customers
            )?;
        }
        writeln!(f)?;

        writeln!(f, "PRODUCT PERFORMANCE ANALYSIS")?;
        writeln!(f, "{}", section)?;
        match &self.peak_day {
            Some(peak) => writeln!(
                f,
                "Best Selling Day: {} (Revenue: {}, Transactions: {})",
                peak.date,
                money(peak.revenue, 0),
                peak.transaction_count
            )?,
            None => writeln!(f, "Best Selling Day: N/A")?,
        }
        if self.low_performers.is_empty() {
            writeln!(f, "No low performing products found.")?;
        } else {
            writeln!(f, "Low Performing Products (Quantity < {}):", self.low_threshold)?;
            for product in &self.low_performers {
                writeln!(
                    f,
                    "  {}: {} units, {}",
                    product.name,
                    product.quantity_sold,
                    money(product.revenue, 0)
                )?;
            }
        }
        writeln!(f)?;

        writeln!(f, "API ENRICHMENT SUMMARY")?;
        writeln!(f, "{}", section)?;
        writeln!(f, "Total Products Enriched: {}", self.enrichment.total)?;
        writeln!(
            f,
            "Success Rate: {}%",
            format_percent(self.enrichment.success_rate, 1)
        )?;
        if self.enrichment.unmatched_products.is_empty() {
            write!(f, "All products successfully enriched.")?;
        } else {
            write!(f, "Products that couldn't be enriched:")?;
            for product in &self.enrichment.unmatched_products {
                write!(f, "\n  - {}", product)?;
            }
        }

        Ok(())
    }
}

/// Write the rendered report to `path` as UTF-8, creating parent directories
pub fn write_report(report: &SalesReport, path: &Path) -> Result<(), AnalyticsError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, report.to_string())?;
    info!(path = %path.display(), "wrote sales report");

    Ok(())
}
