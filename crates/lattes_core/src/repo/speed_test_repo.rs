//! Speed-test repository contract and document-backed implementation.
//!
//! # Invariants
//! - No referential or range validation at this layer; callers that need it
//!   go through `CatalogService`.

use super::{fresh_id, RepoResult, StoreRepository};
use crate::model::identity::{Identity, ShopId};
use crate::model::speed_test::SpeedTest;
use log::debug;

pub trait SpeedTestRepository {
    /// Tests for one shop, in submission order.
    fn list_for_shop(&self, shop_id: ShopId) -> RepoResult<Vec<SpeedTest>>;
    /// Appends a test stamped with the current time and flushes.
    fn create_speed_test(
        &mut self,
        coffee_shop_id: ShopId,
        download: f64,
        upload: f64,
        created_by: Identity,
    ) -> RepoResult<SpeedTest>;
}

impl SpeedTestRepository for StoreRepository<'_> {
    fn list_for_shop(&self, shop_id: ShopId) -> RepoResult<Vec<SpeedTest>> {
        Ok(self
            .document()
            .speed_tests
            .iter()
            .filter(|test| test.coffee_shop_id == shop_id)
            .cloned()
            .collect())
    }

    fn create_speed_test(
        &mut self,
        coffee_shop_id: ShopId,
        download: f64,
        upload: f64,
        created_by: Identity,
    ) -> RepoResult<SpeedTest> {
        let tests = &self.document().speed_tests;
        let mut test = SpeedTest::new(coffee_shop_id, download, upload, created_by);
        test.id = fresh_id(|candidate| tests.iter().any(|existing| existing.id == candidate));
        let stored = test.clone();
        self.commit(move |document| document.speed_tests.push(stored))?;

        debug!(
            "event=speed_test_create module=repo status=ok test_id={} shop_id={}",
            test.id, test.coffee_shop_id
        );
        Ok(test)
    }
}
