
/// Transaction handling and cascade tests
pub mod transaction_tests;

use sea_orm::DatabaseConnection;

/// Fresh migrated in-memory database per test.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    crate::db::connect_memory().await
}
