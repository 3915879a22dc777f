use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::models::*;
use crate::services::{Notification, Summary};
use crate::state::AppState;
use crate::views::{CourseRow, EditMode, EnrollmentRow, course_rows, enrollment_rows};

#[derive(Deserialize)]
struct DeleteParams {
    #[serde(default)]
    confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub notification: Option<Notification>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/summary", get(summary))
        .route("/reload", post(reload))
        .route("/courses", get(list_courses).post(create_record::<Course>))
        .route(
            "/courses/{id}",
            get(get_record::<Course>)
                .patch(update_record::<Course>)
                .delete(delete_record::<Course>),
        )
        .route(
            "/instructors",
            get(list_records::<Instructor>).post(create_record::<Instructor>),
        )
        .route(
            "/instructors/{id}",
            get(get_record::<Instructor>)
                .patch(update_record::<Instructor>)
                .delete(delete_record::<Instructor>),
        )
        .route(
            "/participants",
            get(list_records::<Participant>).post(create_record::<Participant>),
        )
        .route(
            "/participants/{id}",
            get(get_record::<Participant>)
                .patch(update_record::<Participant>)
                .delete(delete_record::<Participant>),
        )
        .route("/rooms", get(list_records::<Room>).post(create_record::<Room>))
        .route(
            "/rooms/{id}",
            get(get_record::<Room>)
                .patch(update_record::<Room>)
                .delete(delete_record::<Room>),
        )
        .route(
            "/enrollments",
            get(list_enrollments).post(create_record::<Enrollment>),
        )
        .route(
            "/enrollments/{id}",
            get(get_record::<Enrollment>)
                .patch(update_record::<Enrollment>)
                .delete(delete_record::<Enrollment>),
        )
        .with_state(state)
}

/// Maps a notification onto the status the frontend sees.
fn respond(notification: Notification) -> (StatusCode, Json<Notification>) {
    let status = if notification.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    (status, Json(notification))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn summary(State(state): State<AppState>) -> Json<Summary> {
    let console = state.console.lock().await;
    Json(console.summary(Local::now().date_naive()))
}

async fn reload(State(state): State<AppState>) -> (StatusCode, Json<ReloadResponse>) {
    let mut console = state.console.lock().await;
    let notification = console.load_all().await;
    let status = if notification.is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (status, Json(ReloadResponse { notification }))
}

async fn list_courses(State(state): State<AppState>) -> Json<Vec<CourseRow>> {
    let console = state.console.lock().await;
    let current = console.state();
    Json(course_rows(
        &current.courses,
        &current.instructors,
        &current.rooms,
        Local::now().date_naive(),
    ))
}

async fn list_enrollments(State(state): State<AppState>) -> Json<Vec<EnrollmentRow>> {
    let console = state.console.lock().await;
    let current = console.state();
    Json(enrollment_rows(
        &current.enrollments,
        &current.participants,
        &current.courses,
    ))
}

async fn list_records<E: Entity>(State(state): State<AppState>) -> Json<Vec<Record<E>>> {
    let console = state.console.lock().await;
    Json(console.state().records::<E>().to_vec())
}

async fn get_record<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record<E>>, AppError> {
    let console = state.console.lock().await;
    let record = console.fetch_one::<E>(&RecordId::new(id)).await?;
    Ok(Json(record))
}

async fn create_record<E: Entity>(
    State(state): State<AppState>,
    Json(form): Json<E>,
) -> Result<(StatusCode, Json<Notification>), AppError> {
    let submission = EditMode::<E>::Create.submit(form)?;
    let mut console = state.console.lock().await;
    let notification = console.submit(submission).await;
    Ok(respond(notification))
}

async fn update_record<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<Value>,
) -> Result<(StatusCode, Json<Notification>), AppError> {
    let mut console = state.console.lock().await;
    let existing = console
        .state()
        .find::<E>(&RecordId::new(id))
        .cloned()
        .ok_or(AppError::NotFound)?;
    let form = merge_form(&existing.data, changes)?;
    let submission = EditMode::Edit(existing).submit(form)?;
    let notification = console.submit(submission).await;
    Ok(respond(notification))
}

/// Lays the keys of a partial update over the record's current values.
fn merge_form<E: Entity>(current: &E, changes: Value) -> Result<E, AppError> {
    let Value::Object(changes) = changes else {
        return Err(AppError::BadRequest(
            "update body must be a JSON object".to_string(),
        ));
    };

    let mut form = serde_json::to_value(current)?;
    if let Value::Object(fields) = &mut form {
        fields.extend(changes);
    }
    serde_json::from_value(form)
        .map_err(|e| AppError::BadRequest(format!("invalid {} form: {}", E::KIND, e)))
}

async fn delete_record<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<(StatusCode, Json<Notification>), AppError> {
    if !params.confirm {
        return Err(AppError::BadRequest(
            "deletion must be confirmed with ?confirm=true".to_string(),
        ));
    }

    let id = RecordId::new(id);
    let mut console = state.console.lock().await;
    if console.state().find::<E>(&id).is_none() {
        return Err(AppError::NotFound);
    }
    let notification = console.delete::<E>(&id).await;
    Ok(respond(notification))
}
