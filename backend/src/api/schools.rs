use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, Result},
    models::{
        filters::Filters,
        school::{CreateSchoolRequest, UpdateSchoolRequest},
    },
    store::Store,
    validator::Validator,
};

/// Sortable columns for the schools collection, including descending
/// variants. Kept in lockstep with what `Filters::validate` accepts.
const SORT_SAFELIST: &[&str] = &["id", "name", "level", "-id", "-name", "-level"];

pub async fn create_school(
    State(store): State<Store>,
    Json(req): Json<CreateSchoolRequest>,
) -> Result<impl IntoResponse> {
    let mut school = req.into_school();

    let mut v = Validator::new();
    school.validate(&mut v);
    if !v.valid() {
        return Err(AppError::Validation(v.errors));
    }

    store.schools.insert(&mut school).await?;

    let location = format!("/v1/schools/{}", school.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(json!({ "school": school })),
    ))
}

pub async fn show_school(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    let school = store.schools.get(id).await?;
    Ok(Json(json!({ "school": school })))
}

pub async fn update_school(
    State(store): State<Store>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateSchoolRequest>,
) -> Result<Json<Value>> {
    let mut school = store.schools.get(id).await?;
    req.apply(&mut school);

    let mut v = Validator::new();
    school.validate(&mut v);
    if !v.valid() {
        return Err(AppError::Validation(v.errors));
    }

    store.schools.update(&mut school).await?;
    Ok(Json(json!({ "school": school })))
}

pub async fn delete_school(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    store.schools.delete(id).await?;
    Ok(Json(json!({ "message": "school successfully deleted" })))
}

#[derive(Debug, Deserialize)]
pub struct ListSchoolsParams {
    pub name: Option<String>,
    pub level: Option<String>,
    /// Comma-separated set of modes; matching rows must contain all of them.
    pub mode: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort: Option<String>,
}

pub async fn list_schools(
    State(store): State<Store>,
    Query(params): Query<ListSchoolsParams>,
) -> Result<Json<Value>> {
    let name = params.name.unwrap_or_default();
    let level = params.level.unwrap_or_default();
    let mode: Vec<String> = params
        .mode
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let filters = Filters {
        page: params.page.unwrap_or(1),
        page_size: params.page_size.unwrap_or(20),
        sort: params.sort.unwrap_or_else(|| "id".to_string()),
        sort_safelist: SORT_SAFELIST.iter().map(|s| s.to_string()).collect(),
    };

    let mut v = Validator::new();
    filters.validate(&mut v);
    if !v.valid() {
        return Err(AppError::Validation(v.errors));
    }

    let schools = store.schools.list(&name, &level, &mode, &filters).await?;
    Ok(Json(json!({ "schools": schools })))
}
