//! Wire-level contract tests for the reqwest backend adapter.

use std::time::Duration;

use httpmock::prelude::*;
use time::OffsetDateTime;
use url::Url;
use uuid::Uuid;

use crewdeck::application::api::{ApiError, ConsoleApi};
use crewdeck::config::ApiSettings;
use crewdeck::infra::http::ConsoleClient;
use crewdeck_api_types::agents::{AgentCreate, AgentFilter, AgentRead, AgentStatus};
use crewdeck_api_types::metrics::DashboardRangeKey;
use crewdeck_api_types::{ListPage, PageRequest};

fn client_for(server: &MockServer, token: Option<&str>) -> ConsoleClient {
    let settings = ApiSettings {
        base_url: Url::parse(&server.base_url()).expect("mock server url"),
        token: token.map(str::to_string),
        request_timeout: Duration::from_secs(5),
    };
    ConsoleClient::new(&settings).expect("client")
}

fn sample_agent(id: Uuid, name: &str) -> AgentRead {
    AgentRead {
        id,
        organization_id: Uuid::nil(),
        name: name.to_string(),
        role: Some("reviewer".to_string()),
        description: None,
        status: AgentStatus::Idle,
        board_id: None,
        gateway_id: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

#[tokio::test]
async fn list_sends_pagination_and_filter_query_params() {
    let server = MockServer::start();
    let client = client_for(&server, None);

    let page = ListPage::<AgentRead> {
        items: vec![sample_agent(Uuid::new_v4(), "scout")],
        total: 1,
        limit: 25,
        offset: 0,
    };
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/agents")
            .query_param("limit", "25")
            .query_param("offset", "0")
            .query_param("search", "scout")
            .query_param("status", "idle");
        then.status(200).json_body_obj(&page);
    });

    let filter = AgentFilter {
        search: Some("scout".to_string()),
        status: Some(AgentStatus::Idle),
        board_id: None,
    };
    let fetched = client
        .list_agents(&filter, PageRequest::new(25, 0))
        .await
        .expect("list should succeed");

    mock.assert();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched.total, 1);
}

#[tokio::test]
async fn create_posts_json_with_bearer_token() {
    let server = MockServer::start();
    let client = client_for(&server, Some("cd-live-token"));

    let input = AgentCreate {
        name: "scout".to_string(),
        role: Some("reviewer".to_string()),
        description: None,
        board_id: None,
        gateway_id: None,
    };
    let created = sample_agent(Uuid::new_v4(), "scout");
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/agents")
            .header("authorization", "Bearer cd-live-token")
            .json_body_obj(&input);
        then.status(201).json_body_obj(&created);
    });

    let agent = client.create_agent(&input).await.expect("create");
    mock.assert();
    assert_eq!(agent.id, created.id);
}

#[tokio::test]
async fn error_detail_is_lifted_from_the_response_body() {
    let server = MockServer::start();
    let client = client_for(&server, None);

    let id = Uuid::new_v4();
    server.mock(|when, then| {
        when.method(GET).path(format!("/api/v1/agents/{id}"));
        then.status(404)
            .json_body(serde_json::json!({ "detail": "agent not found" }));
    });

    let error = client.get_agent(id).await.expect_err("missing agent");
    match error {
        ApiError::Status { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(detail, "agent not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_envelope_error_body_falls_back_to_raw_text() {
    let server = MockServer::start();
    let client = client_for(&server, None);

    let id = Uuid::new_v4();
    server.mock(|when, then| {
        when.method(DELETE).path(format!("/api/v1/agents/{id}"));
        then.status(502).body("upstream unavailable");
    });

    let error = client.delete_agent(id).await.expect_err("bad gateway");
    match error {
        ApiError::Status { status, detail } => {
            assert_eq!(status, 502);
            assert_eq!(detail, "upstream unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn dashboard_metrics_sends_the_range_preset() {
    let server = MockServer::start();
    let client = client_for(&server, None);

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/metrics/dashboard")
            .query_param("range", "7d");
        then.status(200).json_body(serde_json::json!({
            "throughput": {
                "primary": { "range": "7d", "bucket": "day", "points": [] },
                "comparison": { "range": "7d", "bucket": "day", "points": [] }
            },
            "completions": {
                "primary": { "range": "7d", "bucket": "day", "points": [] },
                "comparison": { "range": "7d", "bucket": "day", "points": [] }
            },
            "wip": {
                "primary": { "range": "7d", "bucket": "day", "points": [] },
                "comparison": { "range": "7d", "bucket": "day", "points": [] }
            }
        }));
    });

    let snapshot = client
        .dashboard_metrics(DashboardRangeKey::Week)
        .await
        .expect("metrics");
    mock.assert();
    assert!(snapshot.throughput.primary.points.is_empty());
}
