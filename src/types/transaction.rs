//! Sales transaction types
//!
//! This module defines the typed sales record produced by the parser and
//! consumed by validation, aggregation and enrichment.

use super::error::AnalyticsError;
use rust_decimal::Decimal;

/// A single sales record parsed from the transaction log
///
/// Records are immutable once constructed. The line amount
/// (`quantity × unit_price`) is computed exactly, once, at construction time
/// and cached on the record.
///
/// Structural rules (ID prefixes, positive quantity and price) are not enforced
/// here; see [`crate::core::validator`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    transaction_id: String,
    date: String,
    product_id: String,
    product_name: String,
    quantity: i64,
    unit_price: Decimal,
    customer_id: String,
    region: String,
    amount: Decimal,
}

impl Transaction {
    /// Create a new transaction and compute its amount
    ///
    /// # Arguments
    ///
    /// * `transaction_id` - Transaction identifier (valid records start with `T`)
    /// * `date` - Lexically sortable date string, e.g. `2024-12-01`
    /// * `product_id` - Product identifier (valid records start with `P`)
    /// * `product_name` - Display name of the product
    /// * `quantity` - Units sold (may be zero or negative before validation)
    /// * `unit_price` - Price per unit
    /// * `customer_id` - Customer identifier (valid records start with `C`)
    /// * `region` - Sales region
    ///
    /// # Returns
    ///
    /// * `Ok(Transaction)` with the cached amount
    /// * `Err(AnalyticsError::ParseError)` if `quantity × unit_price` overflows
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transaction_id: impl Into<String>,
        date: impl Into<String>,
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Decimal,
        customer_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self, AnalyticsError> {
        let transaction_id = transaction_id.into();
        let amount = Decimal::from(quantity)
            .checked_mul(unit_price)
            .ok_or_else(|| {
                AnalyticsError::parse_error(
                    None,
                    format!(
                        "amount overflow for {}: {} x {}",
                        transaction_id, quantity, unit_price
                    ),
                )
            })?;

        Ok(Transaction {
            transaction_id,
            date: date.into(),
            product_id: product_id.into(),
            product_name: product_name.into(),
            quantity,
            unit_price,
            customer_id: customer_id.into(),
            region: region.into(),
            amount,
        })
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Line amount, `quantity × unit_price`
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::whole_units(5, dec!(2.50), dec!(12.50))]
    #[case::fractional_price(3, dec!(0.333), dec!(0.999))]
    #[case::zero_quantity(0, dec!(10.00), dec!(0.00))]
    #[case::negative_quantity(-2, dec!(4.25), dec!(-8.50))]
    fn test_amount_is_exact_product(
        #[case] quantity: i64,
        #[case] price: Decimal,
        #[case] expected: Decimal,
    ) {
        let tx = Transaction::new("T1", "2024-01-01", "P10", "Widget", quantity, price, "C1", "North")
            .unwrap();
        assert_eq!(tx.amount(), expected);
        assert_eq!(tx.amount(), Decimal::from(quantity) * price);
    }

    #[test]
    fn test_accessors_return_constructor_values() {
        let tx = Transaction::new("T9", "2024-02-03", "P7", "Gadget", 2, dec!(9.99), "C4", "East")
            .unwrap();

        assert_eq!(tx.transaction_id(), "T9");
        assert_eq!(tx.date(), "2024-02-03");
        assert_eq!(tx.product_id(), "P7");
        assert_eq!(tx.product_name(), "Gadget");
        assert_eq!(tx.quantity(), 2);
        assert_eq!(tx.unit_price(), dec!(9.99));
        assert_eq!(tx.customer_id(), "C4");
        assert_eq!(tx.region(), "East");
    }

    #[test]
    fn test_amount_overflow_is_reported() {
        let result = Transaction::new("T1", "2024-01-01", "P1", "X", i64::MAX, Decimal::MAX, "C1", "N");
        assert!(matches!(result, Err(AnalyticsError::ParseError { .. })));
    }
}
