//! Coffee shop catalog use-cases: listing, detail, speed tests and votes.
//!
//! # Invariants
//! - Creating shops and voting require an authenticated identity.
//! - Speed tests may be anonymous but must reference an existing shop and
//!   carry finite, non-negative measurements.

use super::{ServiceError, ServiceResult};
use crate::aggregate::{
    average_throughput, summarize_shop, tally_votes, ShopSummary, ThroughputAverage, VoteTally,
};
use crate::model::coffee_shop::CoffeeShop;
use crate::model::identity::{Identity, ShopId, VoteDirection};
use crate::model::speed_test::SpeedTest;
use crate::repo::coffee_shop_repo::CoffeeShopRepository;
use crate::repo::speed_test_repo::SpeedTestRepository;
use log::{info, warn};
use serde::Serialize;

/// Everything the shop detail view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopDetail {
    pub shop: CoffeeShop,
    /// Submission order.
    pub tests: Vec<SpeedTest>,
    pub tally: VoteTally,
    pub average: Option<ThroughputAverage>,
}

pub struct CatalogService<R: CoffeeShopRepository + SpeedTestRepository> {
    repo: R,
}

impl<R: CoffeeShopRepository + SpeedTestRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All shops in insertion order with their aggregates.
    pub fn list_shop_summaries(&self) -> ServiceResult<Vec<ShopSummary>> {
        self.repo
            .list_shops()?
            .into_iter()
            .map(|shop| -> ServiceResult<ShopSummary> {
                let tests = self.repo.list_for_shop(shop.id)?;
                Ok(summarize_shop(shop, &tests))
            })
            .collect()
    }

    pub fn shop_detail(&self, shop_id: ShopId) -> ServiceResult<Option<ShopDetail>> {
        let Some(shop) = self.repo.find_shop(shop_id)? else {
            return Ok(None);
        };
        let tests = self.repo.list_for_shop(shop_id)?;
        Ok(Some(ShopDetail {
            tally: tally_votes(&shop),
            average: average_throughput(&tests),
            shop,
            tests,
        }))
    }

    /// Registers a shop owned by the signed-in user.
    ///
    /// Blank locations are stored as absent.
    pub fn add_shop(
        &mut self,
        identity: Identity,
        name: &str,
        location: Option<&str>,
    ) -> ServiceResult<CoffeeShop> {
        let owner = require_user(identity)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::InvalidInput("name"));
        }
        let location = location.map(str::trim).filter(|value| !value.is_empty());

        let shop = self.repo.create_shop(name, location, owner)?;
        info!(
            "event=shop_add module=service status=ok shop_id={}",
            shop.id
        );
        Ok(shop)
    }

    /// Records a speed test for an existing shop.
    ///
    /// # Errors
    /// - `InvalidMeasurement` for negative or non-finite values.
    /// - `ShopNotFound` when `shop_id` names no shop.
    pub fn submit_speed_test(
        &mut self,
        identity: Identity,
        shop_id: ShopId,
        download: f64,
        upload: f64,
    ) -> ServiceResult<SpeedTest> {
        validate_measurement("download", download)?;
        validate_measurement("upload", upload)?;
        if self.repo.find_shop(shop_id)?.is_none() {
            warn!(
                "event=speed_test_submit module=service status=rejected reason=shop_not_found shop_id={}",
                shop_id
            );
            return Err(ServiceError::ShopNotFound(shop_id));
        }

        let test = self
            .repo
            .create_speed_test(shop_id, download, upload, identity)?;
        info!(
            "event=speed_test_submit module=service status=ok test_id={} shop_id={}",
            test.id, shop_id
        );
        Ok(test)
    }

    /// Casts or replaces the signed-in user's vote on a shop.
    pub fn cast_vote(
        &mut self,
        identity: Identity,
        shop_id: ShopId,
        direction: VoteDirection,
    ) -> ServiceResult<CoffeeShop> {
        let voter = require_user(identity)?;
        self.repo
            .cast_vote(shop_id, voter, direction)?
            .ok_or(ServiceError::ShopNotFound(shop_id))
    }
}

fn require_user(identity: Identity) -> ServiceResult<Identity> {
    if identity.is_anonymous() {
        return Err(ServiceError::Unauthenticated);
    }
    Ok(identity)
}

fn validate_measurement(field: &'static str, value: f64) -> ServiceResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ServiceError::InvalidMeasurement { field, value })
    }
}
