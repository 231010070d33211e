use crate::model::TitleRecord;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use tracing::info;

/// Resolves the record's URL and answers with the populated record.
///
/// Always 200 once the body parses: a failed resolution comes back with an
/// empty title and an `error` object. Resolutions still running at
/// shutdown come back as `cancelled`.
pub async fn title_handler(
    State(state): State<AppState>,
    Json(record): Json<TitleRecord>,
) -> Json<TitleRecord> {
    let resolution = state
        .dispatcher()
        .handle_with_cancel(record.query(), state.shutdown())
        .await;

    let response = TitleRecord::from(resolution);
    info!(
        url = %response.url,
        title = %response.title,
        error = response.error.as_ref().map(|e| e.code.as_str()),
        "Handled title query"
    );
    Json(response)
}
