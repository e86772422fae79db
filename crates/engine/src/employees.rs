//! The module contains `Employee` and its persistence model.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl TryFrom<&str> for EmployeeStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(EngineError::Validation(format!(
                "invalid employee status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub contact: String,
    pub role: String,
    pub joining_date: Date,
    /// Monthly salary in minor units.
    pub salary_minor: i64,
    pub status: EmployeeStatus,
    pub address: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner: String,
    pub name: String,
    pub contact: String,
    pub role: String,
    pub joining_date: Date,
    pub salary_minor: i64,
    pub status: String,
    pub address: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Owner",
        to = "super::users::Column::Username",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Employee {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "employee")?,
            name: model.name,
            contact: model.contact,
            role: model.role,
            joining_date: model.joining_date,
            salary_minor: model.salary_minor,
            status: EmployeeStatus::try_from(model.status.as_str())?,
            address: model.address,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Input for [`crate::Engine::create_employee`].
#[derive(Clone, Debug)]
pub struct NewEmployee {
    pub name: String,
    pub contact: Option<String>,
    pub role: String,
    pub joining_date: Date,
    pub salary_minor: i64,
    pub status: Option<EmployeeStatus>,
    pub address: Option<String>,
}

/// Partial update for [`crate::Engine::update_employee`]; `None` fields
/// are left untouched.
#[derive(Clone, Debug, Default)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub role: Option<String>,
    pub joining_date: Option<Date>,
    pub salary_minor: Option<i64>,
    pub status: Option<EmployeeStatus>,
    pub address: Option<String>,
}
