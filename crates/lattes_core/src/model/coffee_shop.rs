//! Coffee shop record and its per-user vote map.
//!
//! # Invariants
//! - At most one vote per identity; a repeated vote overwrites.
//! - `votes` is omitted from the wire form until the first vote is cast.

use crate::model::identity::{Identity, ShopId, VoteDirection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeShop {
    pub id: ShopId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Identity that registered the shop.
    pub created_by: Identity,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub votes: BTreeMap<Identity, VoteDirection>,
}

impl CoffeeShop {
    /// Creates a shop with a generated id and no votes.
    pub fn new(name: impl Into<String>, location: Option<String>, created_by: Identity) -> Self {
        Self::with_id(Uuid::new_v4(), name, location, created_by)
    }

    pub fn with_id(
        id: ShopId,
        name: impl Into<String>,
        location: Option<String>,
        created_by: Identity,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            created_by,
            votes: BTreeMap::new(),
        }
    }

    /// Records `voter`'s vote, replacing any earlier one.
    ///
    /// Returns the previous vote of that voter, if any.
    pub fn record_vote(
        &mut self,
        voter: Identity,
        direction: VoteDirection,
    ) -> Option<VoteDirection> {
        self.votes.insert(voter, direction)
    }

    pub fn vote_of(&self, voter: &Identity) -> Option<VoteDirection> {
        self.votes.get(voter).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::CoffeeShop;
    use crate::model::identity::{Identity, VoteDirection};
    use uuid::Uuid;

    #[test]
    fn record_vote_overwrites_previous_vote() {
        let voter = Identity::User(Uuid::new_v4());
        let mut shop = CoffeeShop::new("Bean There", None, voter);

        assert_eq!(shop.record_vote(voter, VoteDirection::Up), None);
        assert_eq!(
            shop.record_vote(voter, VoteDirection::Down),
            Some(VoteDirection::Up)
        );
        assert_eq!(shop.votes.len(), 1);
        assert_eq!(shop.vote_of(&voter), Some(VoteDirection::Down));
    }
}
