//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with the product schema applied
//! - `TestDataBuilder`: Deterministic test data generation
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let name = builder.name("product", "main");
//!     let price = builder.price();
//! }
//! ```
//!
//! Tests that start containers need a running Docker daemon.

use rust_decimal::Decimal;

mod postgres;

pub use postgres::{TestDatabase, split_sql_statements};

/// Builder for test data with deterministic randomization
///
/// Seeded from the test name so reruns produce identical rows.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Unique name: `test-{prefix}-{seed}-{suffix}`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("product", "main"), "test-product-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Category unique to this test, so category filters only see its own rows.
    pub fn category(&self, suffix: &str) -> String {
        format!("cat-{}-{}", self.seed, suffix)
    }

    /// Price between 0.01 and 999.99 with two decimal places.
    pub fn price(&self) -> Decimal {
        let cents = (self.seed % 99_999) + 1;
        Decimal::new(cents as i64, 2)
    }
}

/// Test assertion helpers
pub mod assertions {
    use rust_decimal::Decimal;

    /// Compare decimals by value, ignoring scale (`1.5 == 1.50`).
    pub fn assert_decimal_eq(actual: Decimal, expected: Decimal, context: &str) {
        assert_eq!(
            actual.normalize(),
            expected.normalize(),
            "{}: expected {}, got {}",
            context,
            expected,
            actual
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.price(), builder2.price());
        assert_eq!(
            builder1.name("product", "test"),
            builder2.name("product", "test")
        );
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.category("a"), builder2.category("a"));
    }

    #[test]
    fn test_price_is_positive_with_two_decimals() {
        for seed in [0, 1, 99_998, 99_999, u64::MAX] {
            let price = TestDataBuilder::new(seed).price();
            assert!(price > Decimal::ZERO);
            assert_eq!(price.scale(), 2);
        }
    }

    #[test]
    fn test_assert_decimal_eq_ignores_scale() {
        assertions::assert_decimal_eq(Decimal::new(150, 2), Decimal::new(15, 1), "price");
    }
}
