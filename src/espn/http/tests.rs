//! Unit tests for the ESPN HTTP client

use super::*;
use crate::error::IntelError;
use crate::leagues;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

#[cfg(test)]
mod http_tests {
    use super::*;

    fn client_for(server: &MockServer) -> EspnClient {
        let http = crate::core::build_client(Duration::from_secs(5)).unwrap();
        EspnClient::with_base_urls(http, server.uri(), format!("{}/web", server.uri()))
    }

    fn nba() -> EspnLeague {
        leagues::league("nba").unwrap()
    }

    #[tokio::test]
    async fn test_get_scoreboard_success() {
        let mock_server = MockServer::start().await;

        let mock_response = json!({
            "events": [
                { "id": "1", "date": "2025-08-09T23:05Z" },
                { "id": "2", "date": "2025-08-10T01:00Z" }
            ]
        });

        Mock::given(method("GET"))
            .and(path("/basketball/nba/scoreboard"))
            .and(query_param("dates", "20250809"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&mock_response))
            .mount(&mock_server)
            .await;

        let date: GameDate = "2025-08-09".parse().unwrap();
        let events = client_for(&mock_server)
            .get_scoreboard(nba(), date)
            .await
            .expect("scoreboard should succeed with mock server");

        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["id"], "1");
    }

    #[tokio::test]
    async fn test_get_scoreboard_without_events_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/basketball/nba/scoreboard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "leagues": [] })))
            .mount(&mock_server)
            .await;

        let events = client_for(&mock_server)
            .get_scoreboard(nba(), "20250809".parse().unwrap())
            .await
            .unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_client_error_is_upstream_validation() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad dates"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server)
            .get_scoreboard(nba(), "20250809".parse().unwrap())
            .await
            .unwrap_err();

        match err {
            IntelError::UpstreamValidation {
                feed,
                status,
                message,
            } => {
                assert_eq!(feed, DataSource::Espn);
                assert_eq!(status, 400);
                assert_eq!(message, "bad dates");
            }
            other => panic!("Expected UpstreamValidation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_upstream_server() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).get_teams(nba()).await.unwrap_err();
        assert!(matches!(
            err,
            IntelError::UpstreamServer {
                feed: DataSource::Espn,
                status: Some(503),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_rate_limit_carries_retry_after() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).get_teams(nba()).await.unwrap_err();
        match err {
            IntelError::RateLimited { retry_after, .. } => {
                assert_eq!(retry_after, Some(Duration::from_secs(7)));
            }
            other => panic!("Expected RateLimited, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("invalid json"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).get_teams(nba()).await.unwrap_err();
        assert!(matches!(err, IntelError::Json(_)));
    }

    #[tokio::test]
    async fn test_slow_response_is_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let http = crate::core::build_client(Duration::from_millis(50)).unwrap();
        let client = EspnClient::with_base_urls(http, mock_server.uri(), mock_server.uri());

        let err = client.get_teams(nba()).await.unwrap_err();
        assert!(matches!(err, IntelError::Timeout { feed: DataSource::Espn }));
    }

    #[tokio::test]
    async fn test_get_game_log() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/web/basketball/nba/athletes/1966/gamelog"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "labels": ["MIN", "PTS"],
                "events": { "9": { "gameDate": "2025-01-01T00:30Z" } },
                "seasonTypes": [{ "categories": [{ "events": [
                    { "eventId": "9", "stats": ["36", "28"] }
                ]}]}]
            })))
            .mount(&mock_server)
            .await;

        let log = client_for(&mock_server)
            .get_game_log(nba(), "1966")
            .await
            .unwrap();
        assert_eq!(log.values("PTS"), vec![28.0]);
    }
}
