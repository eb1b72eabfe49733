//! Bulk listing against a fake backend

mod common;

use common::{client, client_with, mentor_rows, FakeBackend, Shape};
use mentor_records::{ClientConfig, MentorError, OrderBy};
use std::sync::Arc;

#[tokio::test]
async fn test_fetch_all_assembles_every_row() {
    let backend = Arc::new(FakeBackend::new(mentor_rows()).shaped(Shape::Wrapped));
    let mentors = client(&backend).fetch_all_mentors().await;

    assert_eq!(mentors.len(), 3);
    assert_eq!(mentors[0].display_name, "Asha Rao");
    assert_eq!(mentors[0].rating, 4.8);
    assert_eq!(mentors[0].rating_count, Some(31));
    assert_eq!(mentors[1].role, "Acting Coach");
    assert_eq!(mentors[1].price_display.as_deref(), Some("₹ 123"));
    assert_eq!(mentors[2].rating, 0.0);
    assert!(mentors[2].metadata_json.is_some());

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].filters.is_empty());
    assert_eq!(calls[0].limit, None);
}

#[tokio::test]
async fn test_listing_matches_detail_assembly() {
    let backend = Arc::new(FakeBackend::new(mentor_rows()));
    let client = client(&backend);

    let listed = client.fetch_all_mentors().await;
    let detail = client
        .resolve_mentor_detail(Some("m-3"), "V. Shah")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(listed[2], detail);
}

#[tokio::test]
async fn test_transport_failure_degrades_to_empty() {
    let backend = Arc::new(FakeBackend::new(mentor_rows()).reporting_error("503 upstream"));
    let client = client(&backend);

    assert!(client.fetch_all_mentors().await.is_empty());
    assert_eq!(
        client.try_fetch_all_mentors().await,
        Err(MentorError::Transport("503 upstream".into()))
    );
}

#[tokio::test]
async fn test_decode_failure_degrades_to_empty() {
    let backend = Arc::new(FakeBackend::new(mentor_rows()).shaped(Shape::Garbage));
    let client = client(&backend);

    assert!(client.fetch_all_mentors().await.is_empty());
    assert!(matches!(
        client.try_fetch_all_mentors().await,
        Err(MentorError::Decode(_))
    ));
}

#[tokio::test]
async fn test_listing_order_and_limit_passed_through() {
    let backend = Arc::new(FakeBackend::new(mentor_rows()));
    let mut config = ClientConfig::default();
    config.listing_order = Some(OrderBy::descending("rating"));
    config.listing_limit = Some(2);

    let mentors = client_with(&backend, config).fetch_all_mentors().await;

    assert_eq!(mentors.len(), 2);
    let calls = backend.calls();
    assert_eq!(calls[0].order, Some(OrderBy::descending("rating")));
    assert_eq!(calls[0].limit, Some(2));
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let backend = Arc::new(FakeBackend::new(mentor_rows()));
    let result = mentor_records::MentorClient::new(
        backend,
        ClientConfig::default().with_batch_scan_limit(0),
    );
    assert!(matches!(result, Err(MentorError::Config(_))));
}
