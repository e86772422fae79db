use chrono::NaiveDate;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Attendance, AttendanceStatus, EngineError, ResultEngine, attendance, days_in_month,
};

use super::{Engine, with_tx};

/// One month of attendance rows for a single employee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttendanceMonth {
    pub entries: Vec<Attendance>,
    pub present_days: u32,
}

pub(super) fn month_bounds(year: i32, month: u32) -> ResultEngine<(NaiveDate, NaiveDate)> {
    let days = days_in_month(year, month)
        .ok_or_else(|| EngineError::Validation(format!("invalid month: {month}/{year}")))?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| EngineError::Validation(format!("invalid month: {month}/{year}")))?;
    let last = NaiveDate::from_ymd_opt(year, month, days)
        .ok_or_else(|| EngineError::Validation(format!("invalid month: {month}/{year}")))?;
    Ok((first, last))
}

impl Engine {
    /// Mark attendance for one employee on one day.
    ///
    /// A second mark for the same day replaces the first one.
    pub async fn mark_attendance(
        &self,
        owner: &str,
        employee_id: Uuid,
        day: NaiveDate,
        status: AttendanceStatus,
    ) -> ResultEngine<Attendance> {
        with_tx!(self, |db_tx| {
            let employee = self.require_employee(&db_tx, owner, employee_id).await?;

            attendance::Entity::delete_many()
                .filter(attendance::Column::EmployeeId.eq(employee.id.clone()))
                .filter(attendance::Column::Day.eq(day))
                .exec(&db_tx)
                .await?;

            let model = attendance::ActiveModel {
                employee_id: ActiveValue::Set(employee.id),
                day: ActiveValue::Set(day),
                status: ActiveValue::Set(status.as_str().to_string()),
            };
            let model = model.insert(&db_tx).await?;

            Ok(Attendance::try_from(model)?)
        })
    }

    /// Attendance rows of an employee for a calendar month, oldest first.
    pub async fn attendance_month(
        &self,
        owner: &str,
        employee_id: Uuid,
        year: i32,
        month: u32,
    ) -> ResultEngine<AttendanceMonth> {
        let (first, last) = month_bounds(year, month)?;
        let employee = self
            .require_employee(&self.database, owner, employee_id)
            .await?;

        let models = attendance::Entity::find()
            .filter(attendance::Column::EmployeeId.eq(employee.id))
            .filter(attendance::Column::Day.gte(first))
            .filter(attendance::Column::Day.lte(last))
            .order_by_asc(attendance::Column::Day)
            .all(&self.database)
            .await?;

        let entries = models
            .into_iter()
            .map(Attendance::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        let present_days = entries
            .iter()
            .filter(|entry| entry.status == AttendanceStatus::Present)
            .count() as u32;

        Ok(AttendanceMonth {
            entries,
            present_days,
        })
    }
}
