use chrono::{TimeZone, Utc};
use lattes_core::{CoffeeShop, Identity, SpeedTest, StoreDocument, User, VoteDirection};
use serde_json::json;
use uuid::Uuid;

#[test]
fn coffee_shop_serialization_uses_expected_wire_fields() {
    let owner = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let shop_id = Uuid::parse_str("aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee").unwrap();
    let mut shop = CoffeeShop::with_id(shop_id, "Bean There", None, owner.into());

    let fresh = serde_json::to_value(&shop).unwrap();
    assert_eq!(
        fresh,
        json!({
            "id": shop_id.to_string(),
            "name": "Bean There",
            "createdBy": owner.to_string(),
        })
    );

    shop.location = Some("Dock St".to_string());
    shop.record_vote(owner.into(), VoteDirection::Down);
    shop.record_vote(Identity::Anonymous, VoteDirection::Up);

    let voted = serde_json::to_value(&shop).unwrap();
    assert_eq!(voted["location"], "Dock St");
    assert_eq!(voted["votes"][owner.to_string()], -1);
    assert_eq!(voted["votes"]["anonymous"], 1);

    let decoded: CoffeeShop = serde_json::from_value(voted).unwrap();
    assert_eq!(decoded, shop);
}

#[test]
fn speed_test_timestamp_uses_millisecond_rfc3339() {
    let shop_id = Uuid::new_v4();
    let mut test = SpeedTest::new(shop_id, 50.5, 10.0, Identity::Anonymous);
    test.created_at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();

    let json = serde_json::to_value(&test).unwrap();
    assert_eq!(json["coffeeShopId"], shop_id.to_string());
    assert_eq!(json["download"], 50.5);
    assert_eq!(json["upload"], 10.0);
    assert_eq!(json["createdAt"], "2024-05-01T10:00:00.000Z");
    assert_eq!(json["createdBy"], "anonymous");
}

#[test]
fn document_written_by_earlier_tooling_loads() {
    let raw = r#"{
        "users": [
            {"id": "11111111-2222-4333-8444-555555555555", "username": "alice", "password": "x"}
        ],
        "coffeeShops": [
            {
                "id": "aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee",
                "name": "Legacy Cafe",
                "createdBy": "11111111-2222-4333-8444-555555555555",
                "votes": {"11111111-2222-4333-8444-555555555555": 1, "anonymous": -1}
            }
        ],
        "speedTests": [
            {
                "id": "99999999-8888-4777-8666-555555555555",
                "coffeeShopId": "aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee",
                "download": 42,
                "upload": 7.5,
                "createdAt": "2025-03-04T05:06:07.089Z",
                "createdBy": "anonymous"
            }
        ]
    }"#;

    let document: StoreDocument = serde_json::from_str(raw).unwrap();

    assert_eq!(document.users[0].username, "alice");
    let shop = &document.coffee_shops[0];
    assert_eq!(shop.location, None);
    assert_eq!(shop.vote_of(&Identity::Anonymous), Some(VoteDirection::Down));
    let test = &document.speed_tests[0];
    assert_eq!(test.download, 42.0);
    assert_eq!(test.created_by, Identity::Anonymous);
    assert_eq!(
        test.created_at,
        Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap()
            + chrono::Duration::milliseconds(89)
    );
}

#[test]
fn missing_collections_default_to_empty() {
    let document: StoreDocument = serde_json::from_str(r#"{"users": []}"#).unwrap();
    assert!(document.is_empty());

    let user = User::new("bob", "pw");
    let encoded = serde_json::to_value(&user).unwrap();
    assert_eq!(encoded["username"], "bob");
    assert_eq!(encoded["password"], "pw");
}

#[test]
fn null_measurement_from_earlier_tooling_loads_and_stays_null() {
    let raw = r#"{
        "speedTests": [
            {
                "id": "99999999-8888-4777-8666-555555555555",
                "coffeeShopId": "aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee",
                "download": null,
                "upload": 3.5,
                "createdAt": "2025-03-04T05:06:07.089Z",
                "createdBy": "anonymous"
            }
        ]
    }"#;

    let document: StoreDocument = serde_json::from_str(raw).unwrap();
    let test = &document.speed_tests[0];
    assert!(test.download.is_nan());
    assert_eq!(test.upload, 3.5);
    assert_eq!(lattes_core::average_throughput(&document.speed_tests), None);

    let encoded = serde_json::to_value(test).unwrap();
    assert!(encoded["download"].is_null());
    assert_eq!(encoded["upload"], 3.5);
}

#[test]
fn missing_measurement_is_still_rejected() {
    let raw = r#"{
        "id": "99999999-8888-4777-8666-555555555555",
        "coffeeShopId": "aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee",
        "upload": 3.5,
        "createdAt": "2025-03-04T05:06:07.089Z",
        "createdBy": "anonymous"
    }"#;
    assert!(serde_json::from_str::<SpeedTest>(raw).is_err());
}
