//! Cart
//!
//! Flat, resolved cart lines are folded into a nested designer, product and color presentation
//! with per-product subtotals and a fixed service fee.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

mod groups;

pub use groups::{ColorGroup, DesignerGroup, LineItem, ProductGroup};

use groups::Grouping;

/// Number of decimal places money amounts are rounded to.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// The service fee charged on top of the cart total, as a fraction (2%).
pub fn service_fee() -> Percentage {
    Percentage::from(Decimal::new(2, 2))
}

/// Apply the service fee to an amount, rounding half away from zero to two decimal places.
pub fn with_service_fee(amount: Decimal) -> Decimal {
    (amount + service_fee() * amount)
        .round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// The designer a product belongs to, with the minimums retailers must meet when ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignerRef {
    /// Display name, also the grouping key.
    pub name: String,

    /// URL slug.
    pub slug: String,

    /// Cover image URL.
    pub cover_image: Option<String>,

    /// Minimum number of units per order.
    pub minimum_order_quantity: Option<u32>,

    /// Minimum order value.
    pub minimum_order_value: Option<Decimal>,
}

/// A product as referenced by a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRef {
    /// Product identifier.
    pub id: Uuid,

    /// Product name.
    pub name: String,

    /// URL slug.
    pub slug: String,

    /// Unit wholesale price.
    pub wholesale_price: Decimal,

    /// The designer selling the product.
    pub designer: DesignerRef,
}

/// One cart line resolved to its product and designer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Line identifier.
    pub id: Uuid,

    /// The product on this line.
    pub product: ProductRef,

    /// Color name.
    pub color: String,

    /// Size label.
    pub size: String,

    /// Units ordered, always positive.
    pub quantity: u32,
}

impl CartLine {
    /// The value of this line at wholesale price.
    pub fn amount(&self) -> Decimal {
        Decimal::from(self.quantity) * self.product.wholesale_price
    }
}

/// Sum of a product's lines at wholesale price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtotal {
    /// Product the subtotal belongs to.
    pub product_id: Uuid,

    /// Sum of the product's line amounts.
    pub value: Decimal,
}

/// Cart presentation grouped by designer, with totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSummary {
    /// Designer groups in the order their first line appears.
    pub items_by_designers: Vec<DesignerGroup>,

    /// Per-product subtotals in the order their first line appears.
    pub subtotals: Vec<Subtotal>,

    /// Sum of all subtotals.
    pub total_amount: Decimal,

    /// Total with the service fee applied.
    pub total_service_amount: Decimal,

    /// Sum of all line quantities.
    pub total_item_count: u64,
}

impl CartSummary {
    /// Aggregate cart lines, preserving first-encountered order at every level.
    ///
    /// An empty slice produces the default summary with all totals zero.
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let grouping = lines.iter().fold(Grouping::default(), Grouping::push);

        let (items_by_designers, subtotals) = grouping.finish();

        let total_amount: Decimal = subtotals.iter().map(|subtotal| subtotal.value).sum();
        let total_item_count = lines.iter().map(|line| u64::from(line.quantity)).sum();

        Self {
            items_by_designers,
            subtotals,
            total_amount,
            total_service_amount: with_service_fee(total_amount),
            total_item_count,
        }
    }

    /// Whether the summary holds no lines.
    pub fn is_empty(&self) -> bool {
        self.items_by_designers.is_empty()
    }
}

impl From<&[CartLine]> for CartSummary {
    fn from(lines: &[CartLine]) -> Self {
        Self::from_lines(lines)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn service_fee_is_two_percent() {
        assert_eq!(service_fee() * Decimal::ONE_HUNDRED, Decimal::TWO);
    }

    #[test]
    fn with_service_fee_rounds_half_up() -> TestResult {
        // 0.25 * 1.02 = 0.255
        assert_eq!(with_service_fee("0.25".parse()?), "0.26".parse::<Decimal>()?);

        // 100 * 1.02 = 102
        assert_eq!(with_service_fee(Decimal::ONE_HUNDRED), "102.00".parse::<Decimal>()?);

        // 19.99 * 1.02 = 20.3898
        assert_eq!(with_service_fee("19.99".parse()?), "20.39".parse::<Decimal>()?);

        Ok(())
    }

    #[test]
    fn with_service_fee_of_zero_is_zero() {
        assert_eq!(with_service_fee(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn line_amount_is_quantity_times_wholesale_price() -> TestResult {
        let line = CartLine {
            id: Uuid::nil(),
            product: ProductRef {
                id: Uuid::nil(),
                name: "Coat".to_string(),
                slug: "coat".to_string(),
                wholesale_price: "12.50".parse()?,
                designer: DesignerRef {
                    name: "Atelier".to_string(),
                    slug: "atelier".to_string(),
                    cover_image: None,
                    minimum_order_quantity: None,
                    minimum_order_value: None,
                },
            },
            color: "Black".to_string(),
            size: "M".to_string(),
            quantity: 3,
        };

        assert_eq!(line.amount(), "37.50".parse::<Decimal>()?);

        Ok(())
    }

    #[test]
    fn empty_cart_has_zero_totals() {
        let summary = CartSummary::from_lines(&[]);

        assert!(summary.is_empty());
        assert!(summary.subtotals.is_empty());
        assert_eq!(summary.total_amount, Decimal::ZERO);
        assert_eq!(summary.total_service_amount, Decimal::ZERO);
        assert_eq!(summary.total_item_count, 0);
        assert_eq!(summary, CartSummary::default());
    }
}
