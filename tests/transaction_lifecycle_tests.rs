mod common;

use chrono::NaiveDate;
use logi_api::models::{NewTransaction, Transaction, TransactionState};
use logi_api::utils::errors::{AppError, ReferencedEntity};
use logi_api::utils::pagination::PageParams;

fn trip(vehicle_id: i64, driver_id: i64, ongoing: bool) -> NewTransaction {
    let dispatch = NaiveDate::from_ymd_opt(2024, 5, 2)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    NewTransaction {
        origin_location_id: 1,
        destiny_location_id: 2,
        vehicle_id,
        driver_id,
        dispatch_time: Some(dispatch),
        arrival_time: if ongoing { None } else { Some(dispatch + chrono::Duration::hours(6)) },
        cargo_description: Some("Café em grão".to_string()),
    }
}

#[tokio::test]
async fn test_busy_pair_blocks_only_overlapping_resources() {
    let state = common::seeded_state().await;
    let service = &state.transactions;

    let first = service.create(trip(1, 1, true)).await.unwrap();
    assert_eq!(first.state(), TransactionState::Ongoing);

    assert!(matches!(service.create(trip(1, 2, true)).await, Err(AppError::Conflict(_))));
    assert!(matches!(service.create(trip(2, 1, true)).await, Err(AppError::Conflict(_))));
    assert!(service.create(trip(2, 2, true)).await.is_ok());
}

#[tokio::test]
async fn test_completing_a_trip_frees_vehicle_and_driver() {
    let state = common::seeded_state().await;
    let service = &state.transactions;

    let ongoing = service.create(trip(1, 1, true)).await.unwrap();
    assert!(service.create(trip(1, 1, false)).await.is_err());

    service.update(ongoing.id, trip(1, 1, false)).await.unwrap();
    let next = service.create(trip(1, 1, true)).await.unwrap();
    assert_eq!(next.id, ongoing.id + 1);
}

#[tokio::test]
async fn test_deleting_an_asset_breaks_distance_but_not_history() {
    let state = common::seeded_state().await;
    let created = state.transactions.create(trip(1, 1, false)).await.unwrap();

    let km = state.transactions.calculate_distance(created.id).await.unwrap();
    assert!((km - 10007.543).abs() < 0.01);

    state.locations.delete(2).await.unwrap();
    assert!(state.transactions.get(created.id).await.is_ok());
    match state.transactions.calculate_distance(created.id).await {
        Err(AppError::NotFound(message)) => assert!(message.contains("destiny location")),
        other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
    }

    let err = state.transactions.create(trip(2, 2, false)).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::ReferenceNotFound { entity: ReferencedEntity::DestinyLocation, id: 2 }
    ));
}

#[tokio::test]
async fn test_list_sorted_by_dispatch_time_descending() {
    let state = common::seeded_state().await;
    let service = &state.transactions;

    let mut pending = trip(1, 1, false);
    pending.dispatch_time = None;
    pending.arrival_time = None;
    service.create(pending).await.unwrap();
    service.create(trip(2, 2, false)).await.unwrap();

    let request = PageParams {
        page: None,
        size: None,
        sort: Some("dispatchTime,desc".to_string()),
    }
    .resolve(Transaction::SORT_FIELDS)
    .unwrap();
    let page = service.list(&request).await.unwrap();
    let ids: Vec<i64> = page.content.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(page.total_elements, 2);
}
