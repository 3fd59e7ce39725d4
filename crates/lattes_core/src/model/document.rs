//! Aggregate root persisted as a single JSON document.

use crate::model::coffee_shop::CoffeeShop;
use crate::model::speed_test::SpeedTest;
use crate::model::user::User;
use serde::{Deserialize, Serialize};

/// The three ordered record collections.
///
/// Missing collection keys load as empty so partially written documents
/// from older tools stay readable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub coffee_shops: Vec<CoffeeShop>,
    #[serde(default)]
    pub speed_tests: Vec<SpeedTest>,
}

impl StoreDocument {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.coffee_shops.is_empty() && self.speed_tests.is_empty()
    }
}
