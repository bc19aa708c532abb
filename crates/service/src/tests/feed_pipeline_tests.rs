use std::sync::Arc;
use std::time::Duration;

use reelsync_core::MergeFilter;
use reelsync_feed::FeedClient;
use reelsync_storage::{FilmStore, MemoryStorage};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::reconciler;
use crate::RecordErrorKind;

fn entry(episode_id: i64, title: &str) -> serde_json::Value {
    serde_json::json!({
        "episode_id": episode_id,
        "title": title,
        "opening_crawl": "Turmoil has engulfed the Galactic Republic.",
        "director": "George Lucas",
        "producer": "Rick McCallum",
        "release_date": "1999-05-19",
        "characters": ["https://swapi.dev/api/people/2/"],
        "url": format!("https://swapi.dev/api/films/{episode_id}/")
    })
}

#[tokio::test]
async fn live_feed_with_one_bad_entry_still_syncs_the_rest() {
    let mut bad = entry(2, "Attack of the Clones");
    bad["opening_crawl"] = serde_json::Value::Null;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/films"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "count": 3,
            "next": null,
            "results": [entry(1, "The Phantom Menace"), bad, entry(3, "Revenge of the Sith")]
        })))
        .mount(&server)
        .await;

    let feed = FeedClient::new(&format!("{}/api/films", server.uri()), Duration::from_secs(5))
        .unwrap();
    let store = MemoryStorage::new();

    let run = reconciler(Arc::new(store.clone()), Arc::new(feed)).reconcile().await.unwrap();

    assert_eq!(run.fetched, 3);
    assert_eq!(run.inserted, 2);
    assert_eq!(run.error_count(), 1);
    assert!(run.is_balanced());
    let error = &run.errors[0];
    assert_eq!(error.kind, RecordErrorKind::Malformed);
    assert_eq!(error.position, 1);
    assert_eq!(error.episode_id, Some(2));

    let first = store.find_one_by_filter(&MergeFilter::episode(1)).await.unwrap().unwrap();
    assert!(first.is_external);
    assert_eq!(first.characters.len(), 1);
    assert!(store.find_one_by_filter(&MergeFilter::episode(2)).await.unwrap().is_none());
    assert!(store.find_one_by_filter(&MergeFilter::episode(3)).await.unwrap().is_some());
}
