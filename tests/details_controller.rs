mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{fast_options, sample_items, TestRepository};
use inventory::data::{Item, ItemsRepository, RepositoryError};
use inventory::ui::details::{DetailsStatus, ItemDetailsController};
use inventory::ui::navigation::{Route, SavedStateHandle, ENTERED_ITEM_ID_KEY};

fn details_for(repository: &Arc<TestRepository>, item_id: i32) -> ItemDetailsController {
    let saved_state = SavedStateHandle::for_route(&Route::ItemDetails { item_id });
    ItemDetailsController::new(repository.clone(), saved_state, fast_options())
}

fn sample() -> Arc<TestRepository> {
    Arc::new(TestRepository::new(sample_items()))
}

#[tokio::test]
async fn loads_item_into_details_state() {
    let repository = sample();
    let controller = details_for(&repository, 2);
    let mut rx = controller.subscribe();

    rx.wait_for(|s| s.is_ready()).await.unwrap();
    let state = controller.state();
    assert_eq!(controller.item_id(), 2);
    assert_eq!(state.item_details.name, "Pen");
    assert_eq!(state.item_details.quantity, "30");
    assert!(!state.out_of_stock);
}

#[tokio::test]
async fn zero_quantity_is_out_of_stock() {
    let repository = Arc::new(TestRepository::new(vec![Item::new("Pen", 1.0, 0).with_id(1)]));
    let controller = details_for(&repository, 1);
    let mut rx = controller.subscribe();

    rx.wait_for(|s| s.is_ready()).await.unwrap();
    assert!(controller.state().out_of_stock);
}

#[tokio::test(start_paused = true)]
async fn missing_item_reports_not_found_after_timeout() {
    let repository = sample();
    let controller = details_for(&repository, 5);
    let started = tokio::time::Instant::now();
    let mut rx = controller.subscribe();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(controller.state().status, DetailsStatus::Loading);

    rx.wait_for(|s| s.status == DetailsStatus::NotFound)
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(200));

    // Never confused with an item that merely has no stock.
    let state = controller.state();
    assert!(state.item_details.name.is_empty());
    assert_ne!(state.status, DetailsStatus::Ready);
}

#[tokio::test(start_paused = true)]
async fn item_arriving_before_timeout_cancels_not_found() {
    let repository = sample();
    let controller = details_for(&repository, 4);
    let mut rx = controller.subscribe();

    tokio::time::sleep(Duration::from_millis(100)).await;
    repository
        .insert_item(Item::new("Lamp", 20.0, 2))
        .await
        .unwrap();
    rx.wait_for(|s| s.is_ready()).await.unwrap();

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(controller.state().status, DetailsStatus::Ready);
}

#[tokio::test]
async fn reduce_quantity_by_one_updates_repository() {
    let repository = sample();
    let controller = details_for(&repository, 1);
    let mut rx = controller.subscribe();
    rx.wait_for(|s| s.is_ready()).await.unwrap();

    controller.reduce_quantity_by_one().await.unwrap();

    assert_eq!(repository.current(1).unwrap().quantity, 19);
    assert_eq!(controller.state().item_details.quantity, "19");
    // Other fields untouched.
    assert_eq!(repository.current(1).unwrap().name, "Game");
    assert_eq!(repository.current(1).unwrap().price, 100.0);
}

#[tokio::test]
async fn sell_keeps_stored_price_exact() {
    let repository = Arc::new(TestRepository::new(vec![Item::new("Chip", 1.234, 5).with_id(1)]));
    let controller = details_for(&repository, 1);
    let mut rx = controller.subscribe();
    rx.wait_for(|s| s.is_ready()).await.unwrap();

    controller.reduce_quantity_by_one().await.unwrap();

    assert_eq!(
        repository.current(1),
        Some(Item::new("Chip", 1.234, 4).with_id(1))
    );
}

#[tokio::test]
async fn reduce_at_zero_is_a_no_op() {
    let repository = Arc::new(TestRepository::new(vec![Item::new("Pen", 1.0, 0).with_id(1)]));
    let controller = details_for(&repository, 1);
    let mut rx = controller.subscribe();
    rx.wait_for(|s| s.is_ready()).await.unwrap();

    controller.reduce_quantity_by_one().await.unwrap();

    assert_eq!(repository.update_count(), 0);
    assert_eq!(repository.current(1).unwrap().quantity, 0);
    assert!(controller.state().error.is_none());
}

#[tokio::test]
async fn reduce_before_item_loads_does_nothing() {
    let repository = sample();
    let controller = details_for(&repository, 1);

    controller.reduce_quantity_by_one().await.unwrap();
    assert_eq!(repository.update_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn rapid_double_sell_of_last_unit_stops_at_zero() {
    let repository = Arc::new(TestRepository::new(vec![Item::new("Pen", 1.0, 1).with_id(1)]));
    let controller = details_for(&repository, 1);
    let mut rx = controller.subscribe();
    rx.wait_for(|s| s.is_ready()).await.unwrap();

    repository.set_write_delay(Duration::from_millis(50));
    let first = controller.reduce_quantity_by_one();
    let second = controller.reduce_quantity_by_one();
    first.await.unwrap();
    second.await.unwrap();

    assert_eq!(repository.current(1).unwrap().quantity, 0);
    assert_eq!(repository.update_count(), 1);
    assert!(controller.state().out_of_stock);
}

#[tokio::test]
async fn many_concurrent_sells_never_go_negative() {
    let repository = Arc::new(TestRepository::new(vec![Item::new("Pen", 1.0, 3).with_id(1)]));
    let controller = details_for(&repository, 1);
    let mut rx = controller.subscribe();
    rx.wait_for(|s| s.is_ready()).await.unwrap();

    let handles: Vec<_> = (0..10).map(|_| controller.reduce_quantity_by_one()).collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(repository.current(1).unwrap().quantity, 0);
    assert_eq!(repository.update_count(), 3);
}

#[tokio::test]
async fn failed_sell_surfaces_error_and_keeps_quantity() {
    let repository = sample();
    let controller = details_for(&repository, 3);
    let mut rx = controller.subscribe();
    rx.wait_for(|s| s.is_ready()).await.unwrap();

    repository.set_fail_writes(true);
    controller.reduce_quantity_by_one().await.unwrap();

    let state = controller.state();
    assert_eq!(state.error.as_deref(), Some("Storage unavailable: storage offline"));
    assert_eq!(state.item_details.quantity, "50");
    assert_eq!(repository.current(3).unwrap().quantity, 50);

    controller.dismiss_error();
    assert!(controller.state().error.is_none());
}

#[tokio::test]
async fn delete_item_removes_it_from_the_repository() {
    let repository = sample();
    let controller = details_for(&repository, 2);
    let mut rx = controller.subscribe();
    rx.wait_for(|s| s.is_ready()).await.unwrap();

    controller.delete_item().await.unwrap();

    assert!(repository.current(2).is_none());
    assert!(repository.stream_item(2).borrow().is_none());
    assert_eq!(controller.state().status, DetailsStatus::NotFound);
    assert_eq!(repository.stream_all_items().borrow().len(), 2);
}

#[tokio::test]
async fn delete_failure_is_returned_to_caller() {
    let repository = sample();
    let controller = details_for(&repository, 2);
    let mut rx = controller.subscribe();
    rx.wait_for(|s| s.is_ready()).await.unwrap();

    repository.set_fail_writes(true);
    let result = controller.delete_item().await;

    assert!(matches!(result, Err(RepositoryError::Unavailable { .. })));
    assert!(controller.state().error.is_some());
    assert!(controller.state().is_ready());
    assert!(repository.current(2).is_some());
}

#[tokio::test]
async fn delete_without_item_is_not_found() {
    let repository = sample();
    let controller = details_for(&repository, 9);

    let result = controller.delete_item().await;
    assert!(matches!(result, Err(RepositoryError::NotFound { id: 9 })));
}

#[tokio::test]
async fn entered_item_id_survives_reconstruction() {
    let repository = sample();
    let saved_state = SavedStateHandle::for_route(&Route::ItemDetails { item_id: 1 });

    let controller =
        ItemDetailsController::new(repository.clone(), saved_state.clone(), fast_options());
    controller.update_entered_item_id("42");
    assert_eq!(controller.state().item_id, "42");
    assert_eq!(saved_state.get(ENTERED_ITEM_ID_KEY).as_deref(), Some("42"));
    drop(controller);

    let rebuilt = ItemDetailsController::new(repository.clone(), saved_state, fast_options());
    assert_eq!(rebuilt.entered_item_id(), "42");
    assert_eq!(rebuilt.state().item_id, "42");
    // The subscribed id is still the one from the route.
    assert_eq!(rebuilt.item_id(), 1);
}

#[tokio::test]
async fn entered_id_is_kept_when_item_reloads() {
    let repository = sample();
    let controller = details_for(&repository, 1);
    let mut rx = controller.subscribe();
    rx.wait_for(|s| s.is_ready()).await.unwrap();

    controller.update_entered_item_id("7");
    repository
        .update_item(Item::new("Game", 100.0, 5).with_id(1))
        .await
        .unwrap();

    rx.wait_for(|s| s.item_details.quantity == "5").await.unwrap();
    assert_eq!(controller.state().item_id, "7");
}
