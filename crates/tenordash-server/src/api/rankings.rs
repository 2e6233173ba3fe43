use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use tenordash_core::{RankingsResponse, ResponseMeta};
use tenordash_db::QueryError;

use crate::middleware::RequestId;

use super::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct RankingsParams {
    pub username: Option<String>,
}

/// `GET /rankings?username=<handle or profile URL>`.
///
/// Always answers with a [`RankingsResponse`]; the status code is 400 for a
/// missing username or malformed query and 500 when the store fails.
pub(super) async fn get_rankings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    params: Result<Query<RankingsParams>, QueryRejection>,
) -> (StatusCode, Json<RankingsResponse>) {
    let meta = ResponseMeta::new(req_id.0);
    let username = match params {
        Ok(Query(params)) => params.username.unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "malformed rankings query");
            return (
                StatusCode::BAD_REQUEST,
                Json(RankingsResponse::failure(rejection.body_text(), meta)),
            );
        }
    };

    match tenordash_db::get_user_rankings(state.store.as_ref(), &state.query, &username).await {
        Ok(result) => (
            StatusCode::OK,
            Json(RankingsResponse::success(
                result.rankings,
                result.stats,
                meta.with_username(result.username.as_str()),
            )),
        ),
        Err(e @ QueryError::InvalidInput(_)) => {
            tracing::debug!(error = %e, "rejected rankings request");
            (
                StatusCode::BAD_REQUEST,
                Json(RankingsResponse::failure(e.to_string(), meta)),
            )
        }
        Err(e @ QueryError::Upstream(_)) => {
            tracing::error!(error = %e, username = %username, "rankings request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RankingsResponse::failure(e.to_string(), meta)),
            )
        }
    }
}
