//! Classification, retry and fallback decisions for failed operations, plus
//! a running summary of everything that went wrong.
//!
//! Callers never sleep or count retries themselves. They hand each error to
//! [`ErrorHandler::handle_error`] (or let [`ErrorHandler::run_with_recovery`]
//! do it) and act on the returned [`Recovery`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    future::Future,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use crate::error::{DataSource, IntelError};
use crate::Result;


/// Timeouts get at most this many retries whatever the configured maximum.
pub const TIMEOUT_MAX_RETRIES: u32 = 2;

/// More total errors than this triggers the caching recommendation.
pub const CACHING_THRESHOLD: u64 = 10;

const TOP_OPERATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Espn,
    OddsApi,
    Analysis,
    Timeout,
    RateLimit,
    Validation,
    Unknown,
}

impl ErrorCategory {
    pub fn classify(err: &IntelError) -> Self {
        if err.is_validation() {
            return ErrorCategory::Validation;
        }
        match err {
            IntelError::Timeout { .. } => ErrorCategory::Timeout,
            IntelError::Http(e) if e.is_timeout() => ErrorCategory::Timeout,
            IntelError::RateLimited { .. } => ErrorCategory::RateLimit,
            IntelError::UpstreamServer { feed, .. } => match feed {
                DataSource::Espn => ErrorCategory::Espn,
                DataSource::OddsApi => ErrorCategory::OddsApi,
            },
            IntelError::Analysis { .. } => ErrorCategory::Analysis,
            _ => ErrorCategory::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Espn => "espn",
            ErrorCategory::OddsApi => "odds_api",
            ErrorCategory::Analysis => "analysis",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::RateLimit => "rate_limit",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What was being attempted when an error happened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    pub operation: String,
    pub league: Option<String>,
    pub retry_count: u32,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            ..Default::default()
        }
    }

    pub fn with_league(mut self, league: impl Into<String>) -> Self {
        self.league = Some(league.into());
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }
}

/// Placeholder payload handed back once retries are spent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fallback {
    EmptyData,
    TemplateAnalysis { message: String },
}

/// The handler's verdict on one error.
#[derive(Debug, Clone, PartialEq)]
pub enum Recovery {
    /// The backoff has already been slept; try again.
    Retry,
    /// Carry on with placeholder data.
    Degraded(Fallback),
    /// Give up and surface the error.
    Fatal,
}

/// Outcome of [`ErrorHandler::run_with_recovery`].
#[derive(Debug, Clone, PartialEq)]
pub enum Recovered<T> {
    Value(T),
    Degraded(Fallback),
}

impl<T> Recovered<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Recovered::Value(v) => Some(v),
            Recovered::Degraded(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandlerConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureNote {
    pub operation: String,
    pub league: Option<String>,
    pub category: ErrorCategory,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Running counters. Only grows; a fresh handler starts a fresh summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ErrorSummary {
    pub total_errors: u64,
    pub by_category: BTreeMap<ErrorCategory, u64>,
    pub by_league: BTreeMap<String, u64>,
    pub by_operation: BTreeMap<String, u64>,
    pub operations_by_league: BTreeMap<String, u64>,
    pub critical_failures: Vec<FailureNote>,
    pub warnings: Vec<FailureNote>,
    pub retries_attempted: u64,
    pub degraded_recoveries: u64,
}

/// Projection of an [`ErrorSummary`] for reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorAggregate {
    pub total_errors: u64,
    pub by_category: BTreeMap<ErrorCategory, u64>,
    /// Percentage of each league's recorded operations that failed.
    pub league_error_rates: BTreeMap<String, f64>,
    pub top_operations: Vec<(String, u64)>,
    pub critical_failures: Vec<FailureNote>,
    pub warnings: Vec<FailureNote>,
    pub retries_attempted: u64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ErrorHandler {
    config: HandlerConfig,
    summary: Mutex<ErrorSummary>,
}

impl ErrorHandler {
    pub fn new(config: HandlerConfig) -> Self {
        Self {
            config,
            summary: Mutex::new(ErrorSummary::default()),
        }
    }

    pub fn config(&self) -> HandlerConfig {
        self.config
    }

    fn lock(&self) -> MutexGuard<'_, ErrorSummary> {
        self.summary.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn summary(&self) -> ErrorSummary {
        self.lock().clone()
    }

    /// Count one attempted operation for `league`, the denominator of the
    /// per-league error rate.
    pub fn record_operation(&self, league: Option<&str>) {
        if let Some(league) = league {
            *self
                .lock()
                .operations_by_league
                .entry(league.to_string())
                .or_default() += 1;
        }
    }

    /// Classify `err`, update the summary and decide what to do next.
    ///
    /// When the verdict is [`Recovery::Retry`] the backoff delay has already
    /// elapsed by the time this returns.
    pub async fn handle_error(
        &self,
        err: &IntelError,
        ctx: &ErrorContext,
        allow_retry: bool,
    ) -> Recovery {
        let category = ErrorCategory::classify(err);
        let (recovery, delay) = self.decide(category, err, ctx, allow_retry);

        tracing::warn!(
            operation = %ctx.operation,
            league = ctx.league.as_deref().unwrap_or("-"),
            %category,
            retry = ctx.retry_count,
            ?recovery,
            error = %err,
            "operation failed"
        );

        self.record(category, err, ctx, &recovery);

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        recovery
    }

    fn decide(
        &self,
        category: ErrorCategory,
        err: &IntelError,
        ctx: &ErrorContext,
        allow_retry: bool,
    ) -> (Recovery, Option<Duration>) {
        let n = ctx.retry_count;
        let can_retry = allow_retry && n < self.config.max_retries;

        match category {
            ErrorCategory::Espn | ErrorCategory::OddsApi | ErrorCategory::Analysis => {
                if can_retry {
                    let factor = 2u32.saturating_pow(n);
                    (Recovery::Retry, Some(self.config.base_delay.saturating_mul(factor)))
                } else {
                    (Recovery::Degraded(fallback_for(category, err)), None)
                }
            }
            ErrorCategory::Timeout => {
                if allow_retry && n < TIMEOUT_MAX_RETRIES {
                    (Recovery::Retry, Some(self.config.base_delay.saturating_mul(2)))
                } else {
                    (Recovery::Fatal, None)
                }
            }
            ErrorCategory::RateLimit => match err {
                IntelError::RateLimited {
                    retry_after: Some(wait),
                    ..
                } if can_retry => (Recovery::Retry, Some(*wait)),
                _ => (Recovery::Fatal, None),
            },
            ErrorCategory::Validation | ErrorCategory::Unknown => (Recovery::Fatal, None),
        }
    }

    fn record(
        &self,
        category: ErrorCategory,
        err: &IntelError,
        ctx: &ErrorContext,
        recovery: &Recovery,
    ) {
        let note = FailureNote {
            operation: ctx.operation.clone(),
            league: ctx.league.clone(),
            category,
            message: err.to_string(),
            at: Utc::now(),
        };

        let mut summary = self.lock();
        summary.total_errors += 1;
        *summary.by_category.entry(category).or_default() += 1;
        if let Some(league) = &ctx.league {
            *summary.by_league.entry(league.clone()).or_default() += 1;
        }
        *summary
            .by_operation
            .entry(ctx.operation.clone())
            .or_default() += 1;

        match recovery {
            Recovery::Retry => summary.retries_attempted += 1,
            Recovery::Degraded(_) => {
                summary.degraded_recoveries += 1;
                summary.warnings.push(note);
            }
            Recovery::Fatal => summary.critical_failures.push(note),
        }
    }

    /// Run `op` until it succeeds, degrades or fails for good, funnelling
    /// every error through [`ErrorHandler::handle_error`].
    pub async fn run_with_recovery<T, F, Fut>(
        &self,
        mut ctx: ErrorContext,
        mut op: F,
    ) -> Result<Recovered<T>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        loop {
            self.record_operation(ctx.league.as_deref());
            let err = match op().await {
                Ok(value) => return Ok(Recovered::Value(value)),
                Err(e) => e,
            };

            match self.handle_error(&err, &ctx, true).await {
                Recovery::Retry => ctx.retry_count += 1,
                Recovery::Degraded(fallback) => return Ok(Recovered::Degraded(fallback)),
                Recovery::Fatal => return Err(err),
            }
        }
    }

    pub fn aggregate_errors(&self) -> ErrorAggregate {
        let summary = self.summary();

        let league_error_rates = summary
            .by_league
            .iter()
            .map(|(league, &errors)| {
                let ops = summary
                    .operations_by_league
                    .get(league)
                    .copied()
                    .unwrap_or(0)
                    .max(errors);
                (league.clone(), errors as f64 / ops as f64 * 100.0)
            })
            .collect::<BTreeMap<_, _>>();

        let mut top_operations: Vec<(String, u64)> = summary
            .by_operation
            .iter()
            .map(|(op, &n)| (op.clone(), n))
            .collect();
        top_operations.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_operations.truncate(TOP_OPERATIONS);

        let recommendations = recommendations(&summary, &league_error_rates);

        ErrorAggregate {
            total_errors: summary.total_errors,
            by_category: summary.by_category,
            league_error_rates,
            top_operations,
            critical_failures: summary.critical_failures,
            warnings: summary.warnings,
            retries_attempted: summary.retries_attempted,
            recommendations,
        }
    }
}

fn fallback_for(category: ErrorCategory, err: &IntelError) -> Fallback {
    match category {
        ErrorCategory::Analysis => Fallback::TemplateAnalysis {
            message: format!("Analysis unavailable ({err}); showing raw lines only."),
        },
        _ => Fallback::EmptyData,
    }
}

fn recommendations(summary: &ErrorSummary, rates: &BTreeMap<String, f64>) -> Vec<String> {
    let count = |c| summary.by_category.get(&c).copied().unwrap_or(0);
    let mut out = Vec::new();

    if summary.total_errors > CACHING_THRESHOLD {
        out.push(format!(
            "{} errors recorded: cache upstream responses to cut repeat requests",
            summary.total_errors
        ));
    }
    if count(ErrorCategory::Timeout) > 2 {
        out.push("Frequent timeouts: raise the request timeout or lower concurrency".to_string());
    }
    if count(ErrorCategory::RateLimit) > 0 {
        out.push("Rate limits hit: lower max concurrency or space out requests".to_string());
    }
    if count(ErrorCategory::Validation) > 0 {
        out.push("Validation failures: check league keys and dates".to_string());
    }
    for (league, rate) in rates {
        if *rate > 50.0 {
            out.push(format!("{league}: {rate:.0}% of requests failed, check the feed"));
        }
    }
    out
}
