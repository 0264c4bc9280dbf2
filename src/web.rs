use std::sync::{Arc, RwLock};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    declare::{Analysis, FetchState, Quote},
    search,
    store::SnapshotStore,
    view::ViewState,
};

/// 聚合給前端的看板輸出
#[derive(Serialize, Debug)]
pub struct BoardResponse {
    pub fetch: FetchState,
    pub analysis: Option<Analysis>,
    /// 依目前搜尋字串過濾後的結果
    pub results: Vec<Quote>,
    pub selected: Option<Quote>,
    pub dark_mode: bool,
}

#[derive(Deserialize, Debug)]
pub struct SearchRequest {
    pub text: String,
}

#[derive(Deserialize, Debug)]
pub struct SelectRequest {
    pub name: String,
}

#[derive(Clone)]
struct AppContext {
    store: Arc<SnapshotStore>,
    view: Arc<RwLock<ViewState>>,
}

pub fn router(store: Arc<SnapshotStore>) -> Router {
    let ctx = AppContext {
        store,
        view: Arc::new(RwLock::new(ViewState::default())),
    };

    Router::new()
        .route("/health", get(health))
        .route("/board", get(board))
        .route("/refresh", post(refresh))
        .route("/search", post(set_search))
        .route("/select", post(select).delete(clear_selection))
        .route("/theme", post(toggle_theme))
        .with_state(ctx)
}

async fn health() -> &'static str {
    "OK"
}

async fn board(State(ctx): State<AppContext>) -> Json<BoardResponse> {
    let state = ctx.store.current();
    let view = ctx
        .view
        .read()
        .map(|view| view.clone())
        .unwrap_or_default();

    let results = match state.fetch.snapshot() {
        Some(snapshot) => search::filter(snapshot, &view.search_text)
            .into_iter()
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    Json(BoardResponse {
        fetch: state.fetch,
        analysis: state.analysis,
        results,
        selected: view.selected,
        dark_mode: view.dark_mode,
    })
}

async fn refresh(State(ctx): State<AppContext>) -> StatusCode {
    ctx.store.refresh_now().await;

    StatusCode::ACCEPTED
}

async fn set_search(State(ctx): State<AppContext>, Json(req): Json<SearchRequest>) -> StatusCode {
    if let Ok(mut view) = ctx.view.write() {
        view.set_search_text(req.text);
    }

    StatusCode::NO_CONTENT
}

async fn select(State(ctx): State<AppContext>, Json(req): Json<SelectRequest>) -> StatusCode {
    let state = ctx.store.current();
    let quote = state
        .fetch
        .snapshot()
        .and_then(|snapshot| search::find_by_name(snapshot, &req.name))
        .cloned();

    match quote {
        Some(quote) => {
            if let Ok(mut view) = ctx.view.write() {
                view.select_quote(quote);
            }
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn clear_selection(State(ctx): State<AppContext>) -> StatusCode {
    if let Ok(mut view) = ctx.view.write() {
        view.clear_selection();
    }

    StatusCode::NO_CONTENT
}

async fn toggle_theme(State(ctx): State<AppContext>) -> Json<serde_json::Value> {
    let dark_mode = ctx
        .view
        .write()
        .map(|mut view| view.toggle_dark_mode())
        .unwrap_or(false);

    Json(serde_json::json!({ "dark_mode": dark_mode }))
}
