use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Form, Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::CurrentUser,
    error::AppError,
    notice::{Notice, NoticeResponse},
    records::{
        dto::{
            CreatedHealthRecord, CreatedMedicine, DashboardPage, MedicinesPage, NewHealthRecord,
            NewMedicine, Recommendation,
        },
        recommend::recommend,
        repo::{HealthRecord, Medicine},
    },
    state::AppState,
};

pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard).post(add_health_record))
        .route("/records", get(list_medicines).post(add_medicine))
        .route("/delete_medicine/:id", get(delete_medicine))
        .route("/delete_health/:id", get(delete_health_record))
}

#[instrument(skip_all)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<DashboardPage>, AppError> {
    let records = HealthRecord::list_by_user(&state.db, user.user_id).await?;
    let recommendation = Recommendation::from(recommend(records.first()));
    Ok(Json(DashboardPage {
        records,
        recommendation,
    }))
}

#[instrument(skip_all)]
pub async fn add_health_record(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<NewHealthRecord>,
) -> Result<(StatusCode, Json<CreatedHealthRecord>), AppError> {
    let record = HealthRecord::create(
        &state.db,
        user.user_id,
        form.bp.as_deref(),
        form.sugar.as_deref(),
        form.heart_rate.as_deref(),
        form.weight.as_deref(),
    )
    .await?;

    info!(user_id = user.user_id, record_id = record.id, "health record added");
    Ok((
        StatusCode::CREATED,
        Json(CreatedHealthRecord {
            record,
            notices: vec![Notice::success("Health record added")],
        }),
    ))
}

#[instrument(skip_all)]
pub async fn list_medicines(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<MedicinesPage>, AppError> {
    let medicines = Medicine::list_by_user(&state.db, user.user_id).await?;
    Ok(Json(MedicinesPage { medicines }))
}

#[instrument(skip_all)]
pub async fn add_medicine(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<NewMedicine>,
) -> Result<(StatusCode, Json<CreatedMedicine>), AppError> {
    form.validate()?;

    let medicine = Medicine::create(
        &state.db,
        user.user_id,
        &form.name,
        &form.dosage,
        &form.time,
    )
    .await?;

    info!(user_id = user.user_id, medicine_id = medicine.id, "medicine added");
    Ok((
        StatusCode::CREATED,
        Json(CreatedMedicine {
            medicine,
            notices: vec![Notice::success("Medicine added")],
        }),
    ))
}

#[instrument(skip_all)]
pub async fn delete_medicine(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<NoticeResponse>, AppError> {
    if !Medicine::delete_for_user(&state.db, user.user_id, id).await? {
        warn!(user_id = user.user_id, medicine_id = id, "medicine not found");
        return Err(AppError::NotFound);
    }

    info!(user_id = user.user_id, medicine_id = id, "medicine deleted");
    Ok(Json(NoticeResponse {
        notices: vec![Notice::info("Medicine deleted")],
    }))
}

#[instrument(skip_all)]
pub async fn delete_health_record(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<NoticeResponse>, AppError> {
    if !HealthRecord::delete_for_user(&state.db, user.user_id, id).await? {
        warn!(user_id = user.user_id, record_id = id, "health record not found");
        return Err(AppError::NotFound);
    }

    info!(user_id = user.user_id, record_id = id, "health record deleted");
    Ok(Json(NoticeResponse {
        notices: vec![Notice::info("Health record deleted")],
    }))
}
