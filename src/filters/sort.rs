//! Listing Sort

use std::{fmt, str::FromStr};

use crate::filters::FilterError;

/// Sort direction, parsed case-insensitively from `asc` or `desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Lowest first.
    Asc,

    /// Highest first.
    Desc,
}

impl SortDirection {
    /// Upper-case SQL keyword.
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(FilterError::invalid("sort_by_price", value))
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// How a product listing is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirective {
    /// Ascending product creation order.
    #[default]
    Default,

    /// By wholesale price.
    WholesalePrice(SortDirection),
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_direction_in_any_case() -> TestResult {
        assert_eq!("asc".parse::<SortDirection>()?, SortDirection::Asc);
        assert_eq!("DESC".parse::<SortDirection>()?, SortDirection::Desc);
        assert_eq!("Desc".parse::<SortDirection>()?, SortDirection::Desc);

        Ok(())
    }

    #[test]
    fn normalises_to_upper_case() -> TestResult {
        assert_eq!("desc".parse::<SortDirection>()?.to_string(), "DESC");

        Ok(())
    }

    #[test]
    fn rejects_anything_else() {
        for value in ["foo", "", "ascending", " asc"] {
            let result = value.parse::<SortDirection>();

            assert!(
                matches!(result, Err(FilterError::InvalidArgument { field: "sort_by_price", .. })),
                "{value:?} should be rejected, got {result:?}"
            );
        }
    }
}
