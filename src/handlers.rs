use crate::errors::AppError;
use crate::models::{
    DATE_FORMAT, DefaultsResponse, FormEntry, RawEntry, Record, TableView, View, ViewQuery,
};
use crate::normalizer::default_day_of_cycle;
use crate::state::AppState;
use crate::ui::{render_cycles, render_index};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

pub async fn index(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Html<String> {
    let log = state.log.lock().await;
    let defaults = defaults_for(log.first_date(), today());
    Html(render_index(&defaults, &log.table(query.view), None))
}

pub async fn cycles(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Html<String> {
    let log = state.log.lock().await;
    Html(render_cycles(&log.table(query.view)))
}

pub async fn get_defaults(State(state): State<AppState>) -> Json<DefaultsResponse> {
    let log = state.log.lock().await;
    Json(defaults_for(log.first_date(), today()))
}

pub async fn list_entries(State(state): State<AppState>) -> Json<Vec<Record>> {
    let log = state.log.lock().await;
    Json(log.all().to_vec())
}

pub async fn get_table(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Json<TableView> {
    let log = state.log.lock().await;
    Json(log.table(query.view))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(raw): Json<RawEntry>,
) -> Result<Json<Vec<Record>>, AppError> {
    let records = submit(&state, &raw).await?;
    Ok(Json(records))
}

pub async fn submit_form(State(state): State<AppState>, Form(form): Form<FormEntry>) -> Response {
    let result = match RawEntry::try_from(form) {
        Ok(raw) => submit(&state, &raw).await,
        Err(rejection) => {
            warn!(%rejection, "form submission rejected");
            Err(rejection.into())
        }
    };

    match result {
        Ok(_) => Redirect::to("/").into_response(),
        Err(err) => {
            let log = state.log.lock().await;
            let defaults = defaults_for(log.first_date(), today());
            let page = render_index(&defaults, &log.table(View::Full), Some(&err.message));
            (StatusCode::BAD_REQUEST, Html(page)).into_response()
        }
    }
}

/// Normalizes and appends under one lock so the default day and the append see the same log.
async fn submit(state: &AppState, raw: &RawEntry) -> Result<Vec<Record>, AppError> {
    let mut log = state.log.lock().await;
    let before = log.len();

    match log.submit(raw, today()) {
        Ok(records) => {
            if records.len() > before {
                info!(
                    date = %records[before].date_string(),
                    day_of_cycle = records[before].day_of_cycle,
                    total = records.len(),
                    "record appended"
                );
            } else {
                debug!("idle submission ignored");
            }
            Ok(records.to_vec())
        }
        Err(rejection) => {
            warn!(%rejection, "submission rejected");
            Err(rejection.into())
        }
    }
}

fn defaults_for(first_date: Option<NaiveDate>, today: NaiveDate) -> DefaultsResponse {
    DefaultsResponse {
        date: today.format(DATE_FORMAT).to_string(),
        day_of_cycle: default_day_of_cycle(first_date, today),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
