use crate::validation::{CreateSchoolPayload, FieldError, ListSchoolsQuery, Location};
use crate::{AppState, error::AppError};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use core_types::School;
use locator::{Locator, RankedSchool};
use serde::Serialize;
use std::sync::Arc;

/// The body of a successful `POST /addSchool`.
#[derive(Debug, Serialize)]
pub struct SchoolCreated {
    pub message: &'static str,
    pub school: School,
}

/// # POST /addSchool
/// Validates the body and stores one school.
pub async fn add_school(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateSchoolPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<SchoolCreated>), AppError> {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        // A body that was not sent as JSON is checked as if it were empty.
        Err(JsonRejection::MissingJsonContentType(_)) => CreateSchoolPayload::default(),
        Err(rejection) => {
            return Err(AppError::Validation(vec![FieldError::new(
                "body",
                Location::Body,
                &rejection.body_text(),
            )]));
        }
    };
    let new_school = payload.validate().map_err(AppError::Validation)?;

    let school = state
        .store
        .insert(&new_school)
        .await
        .map_err(AppError::InsertFailed)?;
    tracing::info!(id = %school.id, name = %school.name, "School added.");

    Ok((
        StatusCode::CREATED,
        Json(SchoolCreated {
            message: "School added successfully!",
            school,
        }),
    ))
}

/// # GET /listSchools?userLat=..&userLon=..
/// Returns every school, nearest to the given point first.
pub async fn list_schools(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListSchoolsQuery>, QueryRejection>,
) -> Result<Json<Vec<RankedSchool>>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        AppError::Validation(vec![FieldError::new(
            "query",
            Location::Query,
            &rejection.body_text(),
        )])
    })?;
    let origin = query.validate().map_err(AppError::Validation)?;

    let ranked = Locator::new(origin).run(state.store.as_ref()).await?;
    Ok(Json(ranked))
}
