//! Route handlers for the four query operations.

use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use marketlens_core::domain::Symbol;
use marketlens_core::query::{CompareReport, SummaryReport, TailReport, DEFAULT_TAIL};
use marketlens_core::DataError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct CompaniesResponse {
    pub companies: Vec<Symbol>,
}

#[derive(Debug, Deserialize)]
pub struct TailQuery {
    /// Number of trailing bars to return (default 30).
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub symbol1: String,
    pub symbol2: String,
}

/// GET /companies — symbols with data, based on CSV files in the data dir.
pub async fn companies(State(state): State<AppState>) -> Result<Json<CompaniesResponse>, ApiError> {
    let service = state.service.clone();
    let companies = blocking(move || service.list_symbols()).await?;
    Ok(Json(CompaniesResponse { companies }))
}

/// GET /data/{symbol}?limit=n — trailing bars with derived metrics and the
/// series summary as a side payload.
pub async fn data(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<TailQuery>,
) -> Result<Json<TailReport>, ApiError> {
    let service = state.service.clone();
    let n = params.limit.unwrap_or(DEFAULT_TAIL);
    let report = blocking(move || service.tail(&symbol, n)).await?;
    Ok(Json(report))
}

/// GET /summary/{symbol} — whole-series summary statistics.
pub async fn summary(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<SummaryReport>, ApiError> {
    let service = state.service.clone();
    let report = blocking(move || service.summary(&symbol)).await?;
    Ok(Json(report))
}

/// GET /compare?symbol1=A&symbol2=B — last close and 30-bar change for both.
pub async fn compare(
    State(state): State<AppState>,
    Query(params): Query<CompareQuery>,
) -> Result<Json<CompareReport>, ApiError> {
    let service = state.service.clone();
    let report = blocking(move || service.compare(&params.symbol1, &params.symbol2)).await?;
    Ok(Json(report))
}

/// Run a synchronous load on the blocking pool.
///
/// Dropping the future cancels nothing mid-file, but loads share no state, so
/// an abandoned load has no side effects beyond wasted work.
async fn blocking<T>(
    f: impl FnOnce() -> Result<T, DataError> + Send + 'static,
) -> Result<T, ApiError>
where
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(format!("blocking task failed: {e}")))?
        .map_err(ApiError::from)
}
