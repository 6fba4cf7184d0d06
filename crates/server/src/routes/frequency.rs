use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wikicount::{analyze, Analysis, AnalysisRequest, FrequencyTable};

/// Query string for `GET /word-frequency`
///
/// Both fields are taken as strings so that a bad value is reported against
/// the field that carried it.
#[derive(Debug, Default, Deserialize)]
pub struct WordFrequencyQuery {
    #[serde(default)]
    pub article: Option<String>,
    #[serde(default)]
    pub depth: Option<String>,
}

/// Body for `POST /keywords`
#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    #[serde(default)]
    pub article: Option<String>,

    /// Link hops to follow from the start article
    #[serde(default)]
    pub depth: i64,

    /// Words dropped before counting, on top of the configured stop-words
    #[serde(default)]
    pub ignore_list: Option<Vec<String>>,

    /// Keep only the most frequent `100 - percentile` percent of words
    #[serde(default)]
    pub percentile: f64,
}

/// Response shared by both data routes
#[derive(Debug, Serialize)]
pub struct FrequencyResponse {
    pub start_article: String,
    pub max_depth: u32,
    pub word_frequency: FrequencyTable,
    /// Seconds, rounded to two decimals
    pub time_elapsed: f64,
}

impl From<Analysis> for FrequencyResponse {
    fn from(analysis: Analysis) -> Self {
        Self {
            start_article: analysis.start_article,
            max_depth: analysis.max_depth,
            word_frequency: analysis.table,
            time_elapsed: (analysis.elapsed.as_secs_f64() * 100.0).round() / 100.0,
        }
    }
}

/// Word frequencies for an article and the pages it links to.
///
/// `GET /word-frequency?article=<title>&depth=<n>`; `depth` defaults to 0.
/// Every word is kept (percentile 0) and only the configured stop-words are
/// ignored.
pub async fn word_frequency(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<WordFrequencyQuery>, QueryRejection>,
) -> ServerResult<Json<FrequencyResponse>> {
    metrics::counter!("wikicount_requests_total", "route" => "word_frequency").increment(1);

    let Query(query) = query?;
    let article = required_article(query.article)?;
    let depth = match query.depth.as_deref().map(str::trim) {
        None | Some("") => 0,
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| ServerError::validation("depth", format!("'{raw}' is not an integer")))?,
    };

    let request = AnalysisRequest::new(article)
        .with_depth(checked_depth(depth, state.max_depth_limit())?)
        .with_ignore(state.ignore_set::<String>(&[]));

    run(&state, request).await
}

/// Keywords for an article: word frequencies with an ignore list and a
/// percentile cut.
///
/// `POST /keywords` with `{"article", "depth", "ignore_list", "percentile"}`.
pub async fn keywords(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<KeywordsRequest>, JsonRejection>,
) -> ServerResult<Json<FrequencyResponse>> {
    metrics::counter!("wikicount_requests_total", "route" => "keywords").increment(1);

    let Json(body) = body?;
    let article = required_article(body.article)?;
    let ignore_list = body.ignore_list.unwrap_or_default();

    let request = AnalysisRequest::new(article)
        .with_depth(checked_depth(body.depth, state.max_depth_limit())?)
        .with_ignore(state.ignore_set(ignore_list.as_slice()))
        .with_percentile(body.percentile);

    run(&state, request).await
}

async fn run(state: &ServerState, request: AnalysisRequest) -> ServerResult<Json<FrequencyResponse>> {
    request.validate(state.max_depth_limit())?;

    let mut analysis = analyze(state.fetcher.as_ref(), &request, &state.pipeline.walk_config()).await;
    if let Some(err) = analysis.start_error.take() {
        return Err(ServerError::Fetch(err));
    }

    Ok(Json(analysis.into()))
}

fn required_article(article: Option<String>) -> ServerResult<String> {
    match article {
        Some(title) if !title.trim().is_empty() => Ok(title),
        _ => Err(ServerError::validation("article", "article title is required")),
    }
}

fn checked_depth(depth: i64, limit: u32) -> ServerResult<u32> {
    if depth < 0 {
        return Err(ServerError::validation("depth", "depth must be >= 0"));
    }
    u32::try_from(depth)
        .ok()
        .filter(|d| *d <= limit)
        .ok_or_else(|| {
            ServerError::validation("depth", format!("depth {depth} exceeds the maximum of {limit}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn checked_depth_bounds() {
        assert_eq!(checked_depth(0, 3).unwrap(), 0);
        assert_eq!(checked_depth(3, 3).unwrap(), 3);
        assert!(matches!(
            checked_depth(-1, 3),
            Err(ServerError::Validation { field, .. }) if field == "depth"
        ));
        assert!(checked_depth(4, 3).is_err());
        assert!(checked_depth(i64::MAX, 3).is_err());
    }

    #[test]
    fn blank_article_is_rejected() {
        assert!(required_article(None).is_err());
        assert!(required_article(Some("  ".into())).is_err());
        assert_eq!(required_article(Some("MSCI".into())).unwrap(), "MSCI");
    }

    #[test]
    fn elapsed_is_rounded_to_hundredths() {
        let analysis = Analysis {
            start_article: "MSCI".into(),
            max_depth: 1,
            table: FrequencyTable::default(),
            pages_visited: 1,
            pages_missing: 0,
            pages_failed: 0,
            start_error: None,
            elapsed: Duration::from_millis(1234),
        };
        let response = FrequencyResponse::from(analysis);
        assert_eq!(response.time_elapsed, 1.23);
    }
}
