use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use prospector::page_service::root_domain;
use prospector::{parse_manual_entry, ErrorResponse, FailureNotice, KeywordExport, ProspectService};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::credential::{bearer_api_key, check_api_key};
use crate::keyword_payload::{AnalyzeForm, KeywordPayload};
use crate::keyword_response::KeywordResponse;
use crate::manual_request::{DownloadQuery, ManualRequest};
use crate::page;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ProspectService>,
}

pub fn router(service: Arc<ProspectService>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze))
        .route("/manual", post(manual))
        .route("/download", get(download))
        .route("/api/keywords", post(api_keywords))
        .layer(CorsLayer::permissive())
        .with_state(AppState { service })
}

async fn index() -> Html<String> {
    Html(page::index_page())
}

async fn analyze(State(state): State<AppState>, Form(form): Form<AnalyzeForm>) -> (StatusCode, Html<String>) {
    let url = form.url.trim();
    if url.is_empty() {
        let notice = FailureNotice {
            message: "Please enter a URL to analyze.".to_string(),
            hint: None,
        };
        return (StatusCode::BAD_REQUEST, Html(page::failure_page(url, &notice)));
    }

    let api_key = match check_api_key(&form.api_key) {
        Ok(key) => key,
        Err((status, Json(error))) => {
            let notice = FailureNotice::from_error(&anyhow::anyhow!(error.error));
            return (status, Html(page::failure_page(url, &notice)));
        }
    };

    match state.service.analyze(url, &api_key).await {
        Ok(report) => (StatusCode::OK, Html(page::report_page(&report))),
        Err(e) => {
            log::error!("Analysis of {} failed: {:#}", url, e);
            let notice = FailureNotice::from_error(&e);
            (StatusCode::BAD_GATEWAY, Html(page::failure_page(url, &notice)))
        }
    }
}

async fn manual(Form(request): Form<ManualRequest>) -> Html<String> {
    let extraction = parse_manual_entry(&request.keywords);
    log::info!(
        "Manual entry of {} keywords for {}",
        extraction.keywords.len(),
        request.domain
    );
    Html(page::manual_page(&request.domain, &extraction.keywords))
}

async fn download(Query(query): Query<DownloadQuery>) -> Response {
    let keywords: Vec<String> = query
        .keywords
        .split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    let export = KeywordExport::new(&query.domain, &keywords);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export.file_name.replace(['"', '\r', '\n'], "")
    );

    (
        [
            (header::CONTENT_TYPE, KeywordExport::MIME_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response()
}

async fn api_keywords(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(payload): Json<KeywordPayload>,
) -> Result<Json<KeywordResponse>, (StatusCode, Json<ErrorResponse>)> {
    let api_key = bearer_api_key(auth)?;

    if let Err(e) = root_domain(&payload.url) {
        return Err((StatusCode::BAD_REQUEST, Json(error_response(&e))));
    }

    match state.service.analyze(&payload.url, &api_key).await {
        Ok(report) => Ok(Json(KeywordResponse::from(report))),
        Err(e) => {
            log::error!("Analysis of {} failed: {:#}", payload.url, e);
            Err((StatusCode::BAD_GATEWAY, Json(error_response(&e))))
        }
    }
}

fn error_response(error: &anyhow::Error) -> ErrorResponse {
    let notice = FailureNotice::from_error(error);
    ErrorResponse {
        status: "error".to_string(),
        error: notice.message,
        hint: notice.hint,
    }
}
