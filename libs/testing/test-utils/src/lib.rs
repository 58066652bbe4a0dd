//! Shared test utilities for the domain crates.
//!
//! - `TestDatabase`: PostgreSQL container with the ShareIt schema applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic names and emails
//! - `assertions`: assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let data = TestDataBuilder::from_test_name("my_postgres_test");
//!     let owner_id = db.create_test_user(&data.name("user", "owner"), &data.email("owner")).await;
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for deterministic test data.
///
/// Every value embeds the seed, so two tests sharing one database never
/// collide on unique columns such as `users.email`.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let data = TestDataBuilder::from_test_name("test_create_booking");
    /// assert!(data.email("booker").ends_with("@example.com"));
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `test-<prefix>-<seed>-<suffix>`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Unique, well-formed email for `who`.
    pub fn email(&self, who: &str) -> String {
        format!("{}-{}@example.com", who, self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some and return it
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `ids` holds exactly `expected`, in order.
    pub fn assert_ids(ids: impl IntoIterator<Item = i64>, expected: &[i64], context: &str) {
        let actual: Vec<i64> = ids.into_iter().collect();
        assert_eq!(actual, expected, "{}: unexpected ids", context);
    }
}
