#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::PgPool;
use storage::{
    dto::{
        field::CreateFieldRequest,
        matches::CreateMatchRequest,
        venue::CreateVenueRequest,
    },
    repository::{field::FieldRepository, slot::SlotRepository, venue::VenueRepository},
    services::schedule::plan_slots,
};
use uuid::Uuid;

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

pub async fn user(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO users (email, full_name) VALUES ($1, $2) RETURNING user_id")
        .bind(format!("{name}@example.com"))
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// A venue owned by `owner` with one football field priced 500 per hour
pub async fn field(pool: &PgPool, owner: Uuid) -> Uuid {
    let venue = VenueRepository::new(pool)
        .create(
            owner,
            &CreateVenueRequest {
                title: "Central Arena".into(),
                description: None,
                phone_number: None,
            },
        )
        .await
        .unwrap();

    FieldRepository::new(pool)
        .create(
            venue.venue_id,
            &CreateFieldRequest {
                sport: "football".into(),
                address: "Abay 10".into(),
                price_per_hour: Decimal::from(500),
                description: None,
                amenities: None,
            },
        )
        .await
        .unwrap()
        .field_id
}

/// The field's single 10:00-11:00 slot on `day()`
pub async fn slot(pool: &PgPool, field_id: Uuid) -> Uuid {
    let windows = plan_slots(
        day(),
        day(),
        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        60,
    )
    .unwrap();
    let created = SlotRepository::new(pool)
        .insert_windows(field_id, &windows)
        .await
        .unwrap();
    assert_eq!(created, 1);

    SlotRepository::new(pool)
        .list_for_day(field_id, day())
        .await
        .unwrap()[0]
        .id
}

pub fn match_request(slot_id: Uuid, max_players: i32) -> CreateMatchRequest {
    CreateMatchRequest {
        title: "Evening 5x5".into(),
        slot_id,
        max_players,
        waitlist_enabled: true,
        is_private: false,
    }
}
