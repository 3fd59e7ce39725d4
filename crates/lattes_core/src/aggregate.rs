//! Read-time aggregates derived from loaded records.
//!
//! # Invariants
//! - Pure functions: no I/O and no store access.
//! - Results do not depend on record order.
//! - An empty measurement set yields `None`, never a zero average.
//! - Tests with a non-finite measurement are left out of averages.

use crate::model::coffee_shop::CoffeeShop;
use crate::model::identity::VoteDirection;
use crate::model::speed_test::SpeedTest;
use serde::Serialize;

/// Up/down vote counts for one shop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub up: usize,
    pub down: usize,
}

impl VoteTally {
    /// Net score (`up - down`).
    pub fn score(&self) -> i64 {
        self.up as i64 - self.down as i64
    }
}

/// Mean throughput in megabits per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThroughputAverage {
    pub avg_download: f64,
    pub avg_upload: f64,
}

/// Shop row for list views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopSummary {
    pub shop: CoffeeShop,
    pub tally: VoteTally,
    pub average: Option<ThroughputAverage>,
    pub test_count: usize,
}

pub fn tally_votes(shop: &CoffeeShop) -> VoteTally {
    shop.votes
        .values()
        .fold(VoteTally::default(), |mut tally, direction| {
            match direction {
                VoteDirection::Up => tally.up += 1,
                VoteDirection::Down => tally.down += 1,
            }
            tally
        })
}

/// Arithmetic mean of `download` and `upload` over the usable `tests`.
pub fn average_throughput<'a>(
    tests: impl IntoIterator<Item = &'a SpeedTest>,
) -> Option<ThroughputAverage> {
    let (count, download, upload) = tests
        .into_iter()
        .filter(|test| test.download.is_finite() && test.upload.is_finite())
        .fold((0_usize, 0.0_f64, 0.0_f64), |(count, down, up), test| {
            (count + 1, down + test.download, up + test.upload)
        });

    if count == 0 {
        return None;
    }

    let count = count as f64;
    Some(ThroughputAverage {
        avg_download: download / count,
        avg_upload: upload / count,
    })
}

/// Pairs a shop with its tally and the average over `tests`.
///
/// `tests` is expected to be the shop's own speed tests.
pub fn summarize_shop(shop: CoffeeShop, tests: &[SpeedTest]) -> ShopSummary {
    ShopSummary {
        tally: tally_votes(&shop),
        average: average_throughput(tests),
        test_count: tests.len(),
        shop,
    }
}

#[cfg(test)]
mod tests {
    use super::{average_throughput, summarize_shop, tally_votes, ThroughputAverage, VoteTally};
    use crate::model::coffee_shop::CoffeeShop;
    use crate::model::identity::{Identity, VoteDirection};
    use crate::model::speed_test::SpeedTest;
    use uuid::Uuid;

    fn user() -> Identity {
        Identity::User(Uuid::new_v4())
    }

    fn measurement(shop: &CoffeeShop, download: f64, upload: f64) -> SpeedTest {
        SpeedTest::new(shop.id, download, upload, Identity::Anonymous)
    }

    #[test]
    fn empty_vote_map_tallies_to_zero() {
        let shop = CoffeeShop::new("Quiet Corner", None, user());
        assert_eq!(tally_votes(&shop), VoteTally::default());
    }

    #[test]
    fn tally_counts_each_direction() {
        let mut shop = CoffeeShop::new("Busy Bean", None, user());
        for _ in 0..3 {
            shop.record_vote(user(), VoteDirection::Up);
        }
        for _ in 0..2 {
            shop.record_vote(user(), VoteDirection::Down);
        }

        let tally = tally_votes(&shop);
        assert_eq!(tally, VoteTally { up: 3, down: 2 });
        assert_eq!(tally.score(), 1);
    }

    #[test]
    fn average_of_nothing_is_absent() {
        assert_eq!(average_throughput(&Vec::<SpeedTest>::new()), None);
    }

    #[test]
    fn average_is_mean_of_each_direction() {
        let shop = CoffeeShop::new("Fast Brew", None, user());
        let tests = vec![measurement(&shop, 10.0, 2.0), measurement(&shop, 20.0, 4.0)];

        assert_eq!(
            average_throughput(&tests),
            Some(ThroughputAverage {
                avg_download: 15.0,
                avg_upload: 3.0,
            })
        );
    }

    #[test]
    fn average_does_not_depend_on_order() {
        let shop = CoffeeShop::new("Fast Brew", None, user());
        let mut tests = vec![
            measurement(&shop, 12.5, 1.5),
            measurement(&shop, 30.0, 6.0),
            measurement(&shop, 7.5, 4.5),
        ];
        let forward = average_throughput(&tests);
        tests.reverse();
        assert_eq!(average_throughput(&tests), forward);
    }

    #[test]
    fn measured_zero_is_distinct_from_no_data() {
        let shop = CoffeeShop::new("Dead Zone", None, user());
        let tests = vec![measurement(&shop, 0.0, 0.0)];
        assert_eq!(
            average_throughput(&tests),
            Some(ThroughputAverage {
                avg_download: 0.0,
                avg_upload: 0.0,
            })
        );
    }

    #[test]
    fn non_finite_measurements_are_left_out_of_the_average() {
        let shop = CoffeeShop::new("Legacy Cafe", None, user());
        let tests = vec![
            measurement(&shop, 20.0, 4.0),
            measurement(&shop, f64::NAN, 100.0),
        ];
        assert_eq!(
            average_throughput(&tests),
            Some(ThroughputAverage {
                avg_download: 20.0,
                avg_upload: 4.0,
            })
        );

        let only_bad = vec![measurement(&shop, f64::NAN, f64::NAN)];
        assert_eq!(average_throughput(&only_bad), None);

        let summary = summarize_shop(shop, &tests);
        assert_eq!(summary.test_count, 2);
    }

    #[test]
    fn summary_carries_count_tally_and_average() {
        let mut shop = CoffeeShop::new("Summary Cafe", Some("Main St".to_string()), user());
        shop.record_vote(user(), VoteDirection::Up);
        let tests = vec![measurement(&shop, 50.0, 10.0)];

        let summary = summarize_shop(shop.clone(), &tests);
        assert_eq!(summary.shop, shop);
        assert_eq!(summary.test_count, 1);
        assert_eq!(summary.tally, VoteTally { up: 1, down: 0 });
        assert_eq!(
            summary.average,
            Some(ThroughputAverage {
                avg_download: 50.0,
                avg_upload: 10.0,
            })
        );
    }
}
