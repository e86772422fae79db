//! Employees API endpoints.

use api_types::employee::{
    EmployeeCreate, EmployeeListResponse, EmployeeStatus, EmployeeUpdate, EmployeeView,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{Data, ServerError, server::ServerState};
use engine::users;

fn map_status(status: engine::EmployeeStatus) -> EmployeeStatus {
    match status {
        engine::EmployeeStatus::Active => EmployeeStatus::Active,
        engine::EmployeeStatus::Inactive => EmployeeStatus::Inactive,
    }
}

fn unmap_status(status: EmployeeStatus) -> engine::EmployeeStatus {
    match status {
        EmployeeStatus::Active => engine::EmployeeStatus::Active,
        EmployeeStatus::Inactive => engine::EmployeeStatus::Inactive,
    }
}

// On create the status is free-form; only "inactive" means inactive.
fn coerce_status(status: &str) -> engine::EmployeeStatus {
    if status == "inactive" {
        engine::EmployeeStatus::Inactive
    } else {
        engine::EmployeeStatus::Active
    }
}

pub(crate) fn map_employee(employee: engine::Employee) -> EmployeeView {
    EmployeeView {
        id: employee.id,
        name: employee.name,
        contact: employee.contact,
        role: employee.role,
        joining_date: employee.joining_date,
        salary_minor: employee.salary_minor,
        status: map_status(employee.status),
        address: employee.address,
        created_at: employee.created_at,
        updated_at: employee.updated_at,
    }
}

pub async fn list(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Data<EmployeeListResponse>>, ServerError> {
    let employees = state
        .engine
        .employees(&user.username)
        .await?
        .into_iter()
        .map(map_employee)
        .collect();

    Ok(Json(Data::new(EmployeeListResponse { employees })))
}

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> Result<(StatusCode, Json<Data<EmployeeView>>), ServerError> {
    let employee = state
        .engine
        .create_employee(
            &user.username,
            engine::NewEmployee {
                name: payload.name,
                contact: payload.contact,
                role: payload.role,
                joining_date: payload.joining_date,
                salary_minor: payload.salary_minor,
                status: payload.status.as_deref().map(coerce_status),
                address: payload.address,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(Data::new(map_employee(employee)))))
}

pub async fn update(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(employee_id): Path<Uuid>,
    Json(payload): Json<EmployeeUpdate>,
) -> Result<Json<Data<EmployeeView>>, ServerError> {
    let employee = state
        .engine
        .update_employee(
            &user.username,
            employee_id,
            engine::EmployeeChanges {
                name: payload.name,
                contact: payload.contact,
                role: payload.role,
                joining_date: payload.joining_date,
                salary_minor: payload.salary_minor,
                status: payload.status.map(unmap_status),
                address: payload.address,
            },
        )
        .await?;

    Ok(Json(Data::new(map_employee(employee))))
}

pub async fn remove(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(employee_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_employee(&user.username, employee_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
