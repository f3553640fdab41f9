use axum::{
    extract::{Path, Query, State},
    Json,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use crate::server::AppState;
use crate::filter::{Filters, Selection};
use crate::models::{NewClaim, NewProvider};
use crate::storage::{Table, TableName};
use crate::views::{self, AnalysisQuery, ClaimChoices, Dashboard, FilterOptions};
use crate::Error;
use std::sync::Arc;

#[derive(Deserialize, Default)]
pub struct ListingParams {
    pub city: Option<String>,
    pub provider_type: Option<String>,
    pub food_type: Option<String>,
    pub meal_type: Option<String>,
}

impl From<ListingParams> for Filters {
    fn from(params: ListingParams) -> Self {
        Filters {
            city: Selection::from(params.city),
            provider_type: Selection::from(params.provider_type),
            food_type: Selection::from(params.food_type),
            meal_type: Selection::from(params.meal_type),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct AnalysisEntry {
    pub name: &'static str,
    pub slug: &'static str,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);
pub type ApiResult<T> = Result<Json<T>, ApiError>;

fn api_error(err: Error) -> ApiError {
    let status = match &err {
        Error::Validation(_) | Error::InvalidStatus(_) | Error::UnknownColumn { .. } => StatusCode::BAD_REQUEST,
        Error::UnknownAnalysis(_) | Error::UnknownTable(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Request failed: {}", err);
    }
    (status, Json(ErrorResponse { error: err.to_string() }))
}

pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> ApiResult<Dashboard> {
    let store = state.store.lock().await;
    views::dashboard(&store).map(Json).map_err(api_error)
}

pub async fn get_options(State(state): State<Arc<AppState>>) -> ApiResult<FilterOptions> {
    let store = state.store.lock().await;
    views::filter_options(&store).map(Json).map_err(api_error)
}

pub async fn get_listings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListingParams>,
) -> ApiResult<Table> {
    let filters = Filters::from(params);
    let store = state.store.lock().await;
    views::browse(&store, &filters).map(Json).map_err(api_error)
}

pub async fn get_choices(State(state): State<Arc<AppState>>) -> ApiResult<ClaimChoices> {
    let store = state.store.lock().await;
    views::claim_choices(&store).map(Json).map_err(api_error)
}

pub async fn post_claim(
    State(state): State<Arc<AppState>>,
    Json(claim): Json<NewClaim>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let store = state.store.lock().await;
    let id = views::create_claim(&store, &claim).map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "claim_id": id }))))
}

pub async fn post_provider(
    State(state): State<Arc<AppState>>,
    Json(provider): Json<NewProvider>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let store = state.store.lock().await;
    let id = views::add_provider(&store, &provider).map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "provider_id": id }))))
}

pub async fn list_analyses() -> Json<Vec<AnalysisEntry>> {
    Json(
        AnalysisQuery::all()
            .iter()
            .map(|q| AnalysisEntry { name: q.name(), slug: q.slug() })
            .collect(),
    )
}

pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Table> {
    let query: AnalysisQuery = name.parse().map_err(api_error)?;
    let store = state.store.lock().await;
    query.run(&store).map(Json).map_err(api_error)
}

pub async fn get_table(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Table> {
    let table: TableName = name.parse().map_err(api_error)?;
    let store = state.store.lock().await;
    store.load(table).map(Json).map_err(api_error)
}
