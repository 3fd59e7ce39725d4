//! Persistence and aggregation core for Latency & Lattes.
//! This crate owns the store document and every business invariant on it;
//! presentation layers call in through repositories and services.

pub mod aggregate;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use aggregate::{
    average_throughput, summarize_shop, tally_votes, ShopSummary, ThroughputAverage, VoteTally,
};
pub use config::{ConfigError, CoreConfig, StoreConfig};
pub use db::{Store, StoreCause, StoreError, StoreResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::coffee_shop::CoffeeShop;
pub use model::document::StoreDocument;
pub use model::identity::{Identity, ShopId, SpeedTestId, UserId, VoteDirection};
pub use model::speed_test::SpeedTest;
pub use model::user::User;
pub use repo::coffee_shop_repo::CoffeeShopRepository;
pub use repo::speed_test_repo::SpeedTestRepository;
pub use repo::user_repo::UserRepository;
pub use repo::{RepoError, RepoResult, StoreRepository};
pub use service::account_service::AccountService;
pub use service::catalog_service::{CatalogService, ShopDetail};
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
