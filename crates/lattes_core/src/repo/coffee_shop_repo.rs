//! Coffee shop repository contract and document-backed implementation.

use super::{fresh_id, RepoResult, StoreRepository};
use crate::model::coffee_shop::CoffeeShop;
use crate::model::identity::{Identity, ShopId, VoteDirection};
use log::debug;

pub trait CoffeeShopRepository {
    /// All shops in insertion order (oldest first).
    fn list_shops(&self) -> RepoResult<Vec<CoffeeShop>>;
    /// Appends a shop with an empty vote map and flushes.
    fn create_shop(
        &mut self,
        name: &str,
        location: Option<&str>,
        created_by: Identity,
    ) -> RepoResult<CoffeeShop>;
    fn find_shop(&self, id: ShopId) -> RepoResult<Option<CoffeeShop>>;
    /// Sets `voter`'s vote on the shop, overwriting any earlier vote.
    ///
    /// Returns `None` without flushing when the shop does not exist.
    fn cast_vote(
        &mut self,
        shop_id: ShopId,
        voter: Identity,
        direction: VoteDirection,
    ) -> RepoResult<Option<CoffeeShop>>;
}

impl CoffeeShopRepository for StoreRepository<'_> {
    fn list_shops(&self) -> RepoResult<Vec<CoffeeShop>> {
        Ok(self.document().coffee_shops.clone())
    }

    fn create_shop(
        &mut self,
        name: &str,
        location: Option<&str>,
        created_by: Identity,
    ) -> RepoResult<CoffeeShop> {
        let shops = &self.document().coffee_shops;
        let id = fresh_id(|candidate| shops.iter().any(|shop| shop.id == candidate));
        let shop = CoffeeShop::with_id(id, name, location.map(str::to_string), created_by);
        let stored = shop.clone();
        self.commit(move |document| document.coffee_shops.push(stored))?;

        debug!(
            "event=shop_create module=repo status=ok shop_id={} created_by={}",
            shop.id, shop.created_by
        );
        Ok(shop)
    }

    fn find_shop(&self, id: ShopId) -> RepoResult<Option<CoffeeShop>> {
        Ok(self
            .document()
            .coffee_shops
            .iter()
            .find(|shop| shop.id == id)
            .cloned())
    }

    fn cast_vote(
        &mut self,
        shop_id: ShopId,
        voter: Identity,
        direction: VoteDirection,
    ) -> RepoResult<Option<CoffeeShop>> {
        let Some(index) = self
            .document()
            .coffee_shops
            .iter()
            .position(|shop| shop.id == shop_id)
        else {
            debug!("event=shop_vote module=repo status=not_found shop_id={shop_id}");
            return Ok(None);
        };

        let (updated, previous) = self.commit(|document| {
            let shop = &mut document.coffee_shops[index];
            let previous = shop.record_vote(voter, direction);
            (shop.clone(), previous)
        })?;

        debug!(
            "event=shop_vote module=repo status=ok shop_id={} voter={} direction={} replaced={}",
            shop_id,
            voter,
            direction,
            previous.is_some()
        );
        Ok(Some(updated))
    }
}
