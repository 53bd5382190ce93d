//! Error handler aggregation through the public API

use sports_intel::{
    error::DataSource,
    error_handler::{ErrorCategory, ErrorContext, ErrorHandler, HandlerConfig, Recovery},
    IntelError,
};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_one_validation_one_timeout_two_server_errors() {
    let handler = ErrorHandler::new(HandlerConfig {
        max_retries: 3,
        base_delay: Duration::from_millis(50),
    });
    let ctx = ErrorContext::new("fetch_league_data").with_league("nba");

    let validation = handler
        .handle_error(
            &IntelError::UnknownLeague {
                league: "xfl".into(),
            },
            &ctx,
            true,
        )
        .await;
    assert_eq!(validation, Recovery::Fatal);

    handler
        .handle_error(&IntelError::Timeout { feed: DataSource::Espn }, &ctx, true)
        .await;
    for _ in 0..2 {
        handler
            .handle_error(
                &IntelError::UpstreamServer {
                    feed: DataSource::Espn,
                    status: Some(500),
                    message: "boom".into(),
                },
                &ctx,
                true,
            )
            .await;
    }

    let agg = handler.aggregate_errors();
    assert_eq!(agg.total_errors, 4);
    assert_eq!(agg.by_category.get(&ErrorCategory::Validation), Some(&1));
    assert_eq!(agg.by_category.get(&ErrorCategory::Timeout), Some(&1));
    assert_eq!(agg.by_category.get(&ErrorCategory::Espn), Some(&2));
    assert!(!agg.critical_failures.is_empty());
    assert_eq!(agg.critical_failures[0].category, ErrorCategory::Validation);
    assert_eq!(agg.top_operations, vec![("fetch_league_data".to_string(), 4)]);

    let summary = handler.summary();
    assert_eq!(summary.by_league.get("nba"), Some(&4));
}
