//! Optimistic delete behavior through the full service stack.
//!
//! Drives the tag service against a mocked backend and inspects the
//! query cache directly: a confirmed delete keeps the patched page and
//! flags the key stale, a rejected delete restores the snapshot.

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use time::OffsetDateTime;
use url::Url;
use uuid::Uuid;

use crewdeck::application::Console;
use crewdeck::application::tags::TagService;
use crewdeck::cache::{CacheConfig, ListStore, QueryCache, QueryKey, StaleMarker};
use crewdeck::config::ApiSettings;
use crewdeck::infra::http::ConsoleClient;
use crewdeck_api_types::tags::{TagFilter, TagRead};
use crewdeck_api_types::{ListPage, PageRequest};

fn sample_tag(id: Uuid, name: &str) -> TagRead {
    TagRead {
        id,
        organization_id: Uuid::nil(),
        name: name.to_string(),
        color: Some("#4f46e5".to_string()),
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

fn console_for(server: &MockServer) -> (Console, Arc<QueryCache>) {
    let settings = ApiSettings {
        base_url: Url::parse(&server.base_url()).expect("mock server url"),
        token: None,
        request_timeout: Duration::from_secs(5),
    };
    let client = ConsoleClient::new(&settings).expect("client");
    let cache = Arc::new(QueryCache::new(&CacheConfig::default()));
    (Console::new(Arc::new(client), Arc::clone(&cache)), cache)
}

#[tokio::test]
async fn confirmed_delete_keeps_patched_page_and_marks_key_stale() {
    let server = MockServer::start();
    let (console, cache) = console_for(&server);

    let keep = sample_tag(Uuid::new_v4(), "alpha");
    let remove = sample_tag(Uuid::new_v4(), "beta");
    let page = ListPage {
        items: vec![keep.clone(), remove.clone()],
        total: 2,
        limit: 50,
        offset: 0,
    };

    let list_mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/tags");
        then.status(200).json_body_obj(&page);
    });
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE)
            .path(format!("/api/v1/tags/{}", remove.id));
        then.status(204);
    });

    let filter = TagFilter::default();
    let request = PageRequest::default();
    let fetched = console
        .tags
        .list(&filter, request)
        .await
        .expect("list should populate the cache");
    assert_eq!(fetched.len(), 2);

    let key = TagService::list_key(&filter, &request);
    console
        .tags
        .delete(key, remove.id)
        .await
        .expect("delete should be confirmed");

    delete_mock.assert();
    let cached = ListStore::<TagRead>::get_page(cache.as_ref(), &key).expect("cached page");
    assert_eq!(cached.items, vec![keep]);
    assert_eq!(cached.total, 1);
    assert!(cache.is_stale(&QueryKey::List(key)));

    // The stale key forces the next list through to the backend.
    console
        .tags
        .list(&filter, request)
        .await
        .expect("stale list should refetch");
    assert_eq!(list_mock.hits(), 2);
    assert!(!cache.is_stale(&QueryKey::List(key)));
}

#[tokio::test]
async fn rejected_delete_restores_the_cached_page() {
    let server = MockServer::start();
    let (console, cache) = console_for(&server);

    let first = sample_tag(Uuid::new_v4(), "alpha");
    let second = sample_tag(Uuid::new_v4(), "beta");
    let page = ListPage {
        items: vec![first.clone(), second.clone()],
        total: 2,
        limit: 50,
        offset: 0,
    };

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/tags");
        then.status(200).json_body_obj(&page);
    });
    server.mock(|when, then| {
        when.method(DELETE)
            .path(format!("/api/v1/tags/{}", second.id));
        then.status(404)
            .json_body(serde_json::json!({ "detail": "tag not found" }));
    });

    let filter = TagFilter::default();
    let request = PageRequest::default();
    console
        .tags
        .list(&filter, request)
        .await
        .expect("list should populate the cache");

    let key = TagService::list_key(&filter, &request);
    let error = console
        .tags
        .delete(key, second.id)
        .await
        .expect_err("delete should be rejected");
    assert!(error.is_not_found());

    let cached = ListStore::<TagRead>::get_page(cache.as_ref(), &key).expect("restored page");
    assert_eq!(cached, page);
    assert!(!cache.is_stale(&QueryKey::List(key)));
}

#[tokio::test]
async fn delete_without_cached_page_still_issues_the_request() {
    let server = MockServer::start();
    let (console, cache) = console_for(&server);

    let id = Uuid::new_v4();
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE).path(format!("/api/v1/tags/{id}"));
        then.status(204);
    });

    let key = TagService::list_key(&TagFilter::default(), &PageRequest::default());
    console
        .tags
        .delete(key, id)
        .await
        .expect("delete should be confirmed");

    delete_mock.assert();
    assert!(ListStore::<TagRead>::get_page(cache.as_ref(), &key).is_none());
    assert!(cache.is_stale(&QueryKey::List(key)));
}
