mod common;

use rust_decimal::Decimal;
use sqlx::PgPool;
use storage::{
    dto::{field::UpdateFieldRequest, venue::UpdateVenueRequest},
    error::StorageError,
    repository::{
        field::FieldRepository, matches::MatchRepository, slot::SlotRepository,
        venue::VenueRepository,
    },
};
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_field_price_update_reprices_slots(pool: PgPool) {
    let owner = common::user(&pool, "owner").await;
    let captain = common::user(&pool, "captain").await;
    let field_id = common::field(&pool, owner).await;
    let slot_id = common::slot(&pool, field_id).await;

    let updated = FieldRepository::new(&pool)
        .update(
            field_id,
            owner,
            &UpdateFieldRequest {
                price_per_hour: Some(Decimal::from(800)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price_per_hour, Decimal::from(800));
    assert_eq!(updated.sport, "football");

    let slots = SlotRepository::new(&pool)
        .list_for_day(field_id, common::day())
        .await
        .unwrap();
    assert_eq!(slots[0].price, Decimal::from(800));

    let detail = MatchRepository::new(&pool)
        .create(captain, &common::match_request(slot_id, 10))
        .await
        .unwrap();
    assert_eq!(detail.summary.field.price, Decimal::from(800));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_only_owner_updates_field(pool: PgPool) {
    let owner = common::user(&pool, "owner").await;
    let stranger = common::user(&pool, "stranger").await;
    let field_id = common::field(&pool, owner).await;
    let repo = FieldRepository::new(&pool);
    let request = UpdateFieldRequest {
        address: Some("Dostyk 5".into()),
        ..Default::default()
    };

    let denied = repo.update(field_id, stranger, &request).await;
    assert!(matches!(denied, Err(StorageError::NotFieldOwner)));
    assert_eq!(repo.find_by_id(field_id).await.unwrap().address, "Abay 10");

    let missing = repo.update(Uuid::new_v4(), owner, &request).await;
    assert!(matches!(missing, Err(StorageError::NotFound)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_only_owner_updates_venue(pool: PgPool) {
    let owner = common::user(&pool, "owner").await;
    let stranger = common::user(&pool, "stranger").await;
    let field_id = common::field(&pool, owner).await;
    let venue_id = FieldRepository::new(&pool)
        .find_by_id(field_id)
        .await
        .unwrap()
        .venue_id;
    let repo = VenueRepository::new(&pool);
    let request = UpdateVenueRequest {
        phone_number: Some("+7 701 000 00 00".into()),
        ..Default::default()
    };

    let denied = repo.update(venue_id, stranger, &request).await;
    assert!(matches!(denied, Err(StorageError::NotFieldOwner)));

    let updated = repo.update(venue_id, owner, &request).await.unwrap();
    assert_eq!(updated.phone_number.as_deref(), Some("+7 701 000 00 00"));
    assert_eq!(updated.title, "Central Arena");
}
