//! Price Buckets

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;

use crate::filters::FilterError;

/// A bound on a price column.
///
/// The middle bucket of each price field is inclusive at both ends; the outer buckets are
/// strict, so every boundary value falls into exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBound {
    /// Strictly below the threshold.
    Below(Decimal),

    /// Within the range, both ends included.
    Between(Decimal, Decimal),

    /// Strictly above the threshold.
    Above(Decimal),
}

impl PriceBound {
    /// Whether `price` satisfies this bound.
    pub fn contains(&self, price: Decimal) -> bool {
        match *self {
            Self::Below(threshold) => price < threshold,
            Self::Between(low, high) => price >= low && price <= high,
            Self::Above(threshold) => price > threshold,
        }
    }
}

/// Wholesale price buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WholesalePriceRange {
    /// Below 100.
    LessThan100,

    /// From 100 to 250.
    Between100And250,

    /// Above 250.
    MoreThan250,
}

impl WholesalePriceRange {
    /// The literal accepted on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LessThan100 => "less_than_100",
            Self::Between100And250 => "between_100_and_250",
            Self::MoreThan250 => "more_than_250",
        }
    }

    /// The bound this bucket places on wholesale price.
    pub fn bound(self) -> PriceBound {
        match self {
            Self::LessThan100 => PriceBound::Below(Decimal::from(100)),
            Self::Between100And250 => PriceBound::Between(Decimal::from(100), Decimal::from(250)),
            Self::MoreThan250 => PriceBound::Above(Decimal::from(250)),
        }
    }
}

impl FromStr for WholesalePriceRange {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "less_than_100" => Ok(Self::LessThan100),
            "between_100_and_250" => Ok(Self::Between100And250),
            "more_than_250" => Ok(Self::MoreThan250),
            _ => Err(FilterError::invalid("wholesale_price_range", value)),
        }
    }
}

impl fmt::Display for WholesalePriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Retail price buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetailPriceRange {
    /// Below 500.
    LessThan500,

    /// From 500 to 1500.
    Between500And1500,

    /// Above 1500.
    MoreThan1500,
}

impl RetailPriceRange {
    /// The literal accepted on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LessThan500 => "less_than_500",
            Self::Between500And1500 => "between_500_and_1500",
            Self::MoreThan1500 => "more_than_1500",
        }
    }

    /// The bound this bucket places on retail price.
    pub fn bound(self) -> PriceBound {
        match self {
            Self::LessThan500 => PriceBound::Below(Decimal::from(500)),
            Self::Between500And1500 => PriceBound::Between(Decimal::from(500), Decimal::from(1500)),
            Self::MoreThan1500 => PriceBound::Above(Decimal::from(1500)),
        }
    }
}

impl FromStr for RetailPriceRange {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "less_than_500" => Ok(Self::LessThan500),
            "between_500_and_1500" => Ok(Self::Between500And1500),
            "more_than_1500" => Ok(Self::MoreThan1500),
            _ => Err(FilterError::invalid("retail_price_range", value)),
        }
    }
}

impl fmt::Display for RetailPriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price constraints on a listing. Both fields must hold when both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricePredicate {
    /// Bucket on the wholesale price.
    pub wholesale: Option<PriceBound>,

    /// Bucket on the retail price. Products without one never match.
    pub retail: Option<PriceBound>,
}

impl PricePredicate {
    /// Whether a product with these prices passes. A missing retail price fails any retail bound.
    pub fn matches(&self, wholesale_price: Decimal, retail_price: Option<Decimal>) -> bool {
        let wholesale = self
            .wholesale
            .is_none_or(|bound| bound.contains(wholesale_price));

        let retail = match (self.retail, retail_price) {
            (None, _) => true,
            (Some(bound), Some(price)) => bound.contains(price),
            (Some(_), None) => false,
        };

        wholesale && retail
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn between_100_and_250_includes_both_ends() -> TestResult {
        let bound = WholesalePriceRange::Between100And250.bound();

        assert!(bound.contains("100".parse()?), "100 should be included");
        assert!(bound.contains("250".parse()?), "250 should be included");
        assert!(!bound.contains("99.99".parse()?), "99.99 should be excluded");
        assert!(!bound.contains("250.01".parse()?), "250.01 should be excluded");

        Ok(())
    }

    #[test]
    fn outer_wholesale_buckets_are_strict() -> TestResult {
        let below = WholesalePriceRange::LessThan100.bound();
        let above = WholesalePriceRange::MoreThan250.bound();

        assert!(below.contains("99.99".parse()?));
        assert!(!below.contains("100".parse()?));
        assert!(above.contains("250.01".parse()?));
        assert!(!above.contains("250".parse()?));

        Ok(())
    }

    #[test]
    fn each_boundary_value_falls_in_exactly_one_bucket() -> TestResult {
        let buckets = [
            WholesalePriceRange::LessThan100,
            WholesalePriceRange::Between100And250,
            WholesalePriceRange::MoreThan250,
        ];

        for price in ["99.99", "100", "250", "250.01"] {
            let price: Decimal = price.parse()?;
            let matching = buckets
                .iter()
                .filter(|bucket| bucket.bound().contains(price))
                .count();

            assert_eq!(matching, 1, "{price} matched {matching} buckets");
        }

        Ok(())
    }

    #[test]
    fn retail_between_500_and_1500_includes_both_ends() -> TestResult {
        let bound = RetailPriceRange::Between500And1500.bound();

        assert!(bound.contains("500".parse()?));
        assert!(bound.contains("1500".parse()?));
        assert!(!bound.contains("499.99".parse()?));
        assert!(!bound.contains("1500.01".parse()?));

        Ok(())
    }

    #[test]
    fn parses_known_literals() -> TestResult {
        assert_eq!(
            "between_100_and_250".parse::<WholesalePriceRange>()?,
            WholesalePriceRange::Between100And250
        );
        assert_eq!(
            "more_than_1500".parse::<RetailPriceRange>()?,
            RetailPriceRange::MoreThan1500
        );

        Ok(())
    }

    #[test]
    fn unknown_literal_names_the_field() {
        let wholesale = "cheap".parse::<WholesalePriceRange>();
        let retail = "less_than_100".parse::<RetailPriceRange>();

        assert_eq!(
            wholesale,
            Err(FilterError::InvalidArgument {
                field: "wholesale_price_range",
                value: "cheap".to_string(),
            })
        );
        assert!(
            matches!(retail, Err(FilterError::InvalidArgument { field: "retail_price_range", .. })),
            "expected retail_price_range error, got {retail:?}"
        );
    }

    #[test]
    fn predicate_requires_both_fields() -> TestResult {
        let predicate = PricePredicate {
            wholesale: Some(WholesalePriceRange::LessThan100.bound()),
            retail: Some(RetailPriceRange::Between500And1500.bound()),
        };

        assert!(predicate.matches("80".parse()?, Some("600".parse()?)));
        assert!(!predicate.matches("80".parse()?, Some("400".parse()?)));
        assert!(!predicate.matches("120".parse()?, Some("600".parse()?)));
        assert!(!predicate.matches("80".parse()?, None));

        Ok(())
    }

    #[test]
    fn empty_predicate_matches_everything() -> TestResult {
        let predicate = PricePredicate::default();

        assert!(predicate.matches("10000".parse()?, None));

        Ok(())
    }
}
