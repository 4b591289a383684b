use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{extract::{Path, State}, Json};
use grades::{build_update_assignments, validate, Field, GradeRecord, Mode, StudentId};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::SharedState;

pub async fn get_grades(
    State(state): State<SharedState>,
) -> Result<Json<Vec<GradeRecord>>, ApiError> {
    let records = state.store.list_all().await?;
    Ok(Json(records))
}

pub async fn delete_grade(
    State(state): State<SharedState>,
    path: Result<Path<StudentId>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = path?;
    let deleted = state.store.delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(id));
    }

    info!(student_id = id, "grade deleted");
    Ok(Json(json!({ "deleted": id })))
}

pub async fn post_grade(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    let sanitized = validate(&body, Mode::Create)
        .into_result()
        .inspect_err(|e| warn!(errors = ?e.0, "create rejected"))?;

    let id = state.store.insert(&sanitized).await?;
    info!(student_id = id, "grade created");

    let mut created = json!(sanitized);
    created[Field::StudentId.name()] = json!(id);

    Ok(Json(json!({ "Created": created })))
}

pub async fn put_grade(
    State(state): State<SharedState>,
    path: Result<Path<StudentId>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = path?;
    let Json(mut body) = payload?;
    // the path is authoritative for the identifier
    if let Some(fields) = body.as_object_mut() {
        fields.insert(Field::StudentId.name().to_string(), json!(id));
    }

    let sanitized = validate(&body, Mode::Update)
        .into_result()
        .inspect_err(|e| warn!(student_id = id, errors = ?e.0, "update rejected"))?;

    let assignments = build_update_assignments(&sanitized, Field::StudentId);
    if assignments.is_empty() {
        return Err(ApiError::NothingToUpdate);
    }

    let changes = state.store.update(id, &assignments).await?;
    if changes == 0 {
        return Err(ApiError::NotFound(id));
    }

    let columns: Vec<String> = assignments.iter().map(|a| a.to_string()).collect();
    info!(student_id = id, ?columns, "grade updated");
    Ok(Json(json!({ "updated": id, "changes": changes })))
}
