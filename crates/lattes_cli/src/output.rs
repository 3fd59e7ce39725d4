//! Plain-text and JSON rendering of core results.

use anyhow::Result;
use lattes_core::{
    CoffeeShop, ShopDetail, ShopSummary, SpeedTest, ThroughputAverage, User, VoteTally,
};
use serde::Serialize;

pub fn user(user: &User, json: bool) -> Result<()> {
    if json {
        // Never echo the stored credential.
        return print_json(&serde_json::json!({
            "id": user.id,
            "username": user.username,
        }));
    }
    println!("{}  {}", user.id, user.username);
    Ok(())
}

pub fn shop(shop: &CoffeeShop, json: bool) -> Result<()> {
    if json {
        return print_json(shop);
    }
    println!("{}", shop_line(shop, &lattes_core::tally_votes(shop)));
    Ok(())
}

pub fn speed_test(test: &SpeedTest, json: bool) -> Result<()> {
    if json {
        return print_json(test);
    }
    println!("{}", speed_test_line(test));
    Ok(())
}

pub fn summaries(summaries: &[ShopSummary], json: bool) -> Result<()> {
    if json {
        return print_json(&summaries);
    }
    if summaries.is_empty() {
        println!("No coffee shops yet.");
        return Ok(());
    }
    for summary in summaries {
        println!(
            "{}  {}",
            shop_line(&summary.shop, &summary.tally),
            average_label(summary.average.as_ref())
        );
    }
    Ok(())
}

pub fn detail(detail: &ShopDetail, json: bool) -> Result<()> {
    if json {
        return print_json(detail);
    }
    println!(
        "{}  {}",
        shop_line(&detail.shop, &detail.tally),
        average_label(detail.average.as_ref())
    );
    if detail.tests.is_empty() {
        println!("No tests yet.");
    }
    for test in &detail.tests {
        println!("  {}", speed_test_line(test));
    }
    Ok(())
}

fn shop_line(shop: &CoffeeShop, tally: &VoteTally) -> String {
    let location = shop
        .location
        .as_deref()
        .map(|location| format!(" ({location})"))
        .unwrap_or_default();
    format!(
        "{}  {}{}  up {} | down {}",
        shop.id, shop.name, location, tally.up, tally.down
    )
}

fn speed_test_line(test: &SpeedTest) -> String {
    format!(
        "{}  down {} Mbps | up {} Mbps  by {}",
        test.created_at.format("%Y-%m-%d %H:%M:%S"),
        test.download,
        test.upload,
        test.created_by
    )
}

fn average_label(average: Option<&ThroughputAverage>) -> String {
    match average {
        Some(average) => format!(
            "avg down {:.1} Mbps | avg up {:.1} Mbps",
            average.avg_download, average.avg_upload
        ),
        None => "no speed tests".to_string(),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
