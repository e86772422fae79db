use chrono::Utc;
use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    Employee, EmployeeChanges, EmployeeStatus, EngineError, NewEmployee, ResultEngine, attendance,
    employees,
};

use super::{Engine, normalize_optional_text, normalize_required_text, with_tx};

impl Engine {
    /// List all employees of an owner, newest first.
    pub async fn employees(&self, owner: &str) -> ResultEngine<Vec<Employee>> {
        let models = employees::Entity::find()
            .filter(employees::Column::Owner.eq(owner))
            .order_by_desc(employees::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(Employee::try_from).collect()
    }

    /// Return a single employee.
    pub async fn employee(&self, owner: &str, employee_id: Uuid) -> ResultEngine<Employee> {
        let model = self.require_employee(&self.database, owner, employee_id).await?;
        Employee::try_from(model)
    }

    /// Hire a new employee.
    pub async fn create_employee(
        &self,
        owner: &str,
        new_employee: NewEmployee,
    ) -> ResultEngine<Employee> {
        let name = normalize_required_text(&new_employee.name, "employee name")?;
        let role = normalize_required_text(&new_employee.role, "employee role")?;
        if new_employee.salary_minor < 0 {
            return Err(EngineError::InvalidAmount(
                "salary must not be negative".to_string(),
            ));
        }

        let now = Utc::now();
        let model = employees::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            owner: ActiveValue::Set(owner.to_string()),
            name: ActiveValue::Set(name),
            contact: ActiveValue::Set(
                normalize_optional_text(new_employee.contact.as_deref()).unwrap_or_default(),
            ),
            role: ActiveValue::Set(role),
            joining_date: ActiveValue::Set(new_employee.joining_date),
            salary_minor: ActiveValue::Set(new_employee.salary_minor),
            status: ActiveValue::Set(
                new_employee
                    .status
                    .unwrap_or(EmployeeStatus::Active)
                    .as_str()
                    .to_string(),
            ),
            address: ActiveValue::Set(normalize_optional_text(new_employee.address.as_deref())),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };
        let model = model.insert(&self.database).await?;

        Employee::try_from(model)
    }

    /// Apply a partial update to an employee.
    pub async fn update_employee(
        &self,
        owner: &str,
        employee_id: Uuid,
        changes: EmployeeChanges,
    ) -> ResultEngine<Employee> {
        if let Some(salary) = changes.salary_minor
            && salary < 0
        {
            return Err(EngineError::InvalidAmount(
                "salary must not be negative".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let model = self.require_employee(&db_tx, owner, employee_id).await?;

            let mut active: employees::ActiveModel = model.into();
            if let Some(name) = changes.name.as_deref() {
                active.name = ActiveValue::Set(normalize_required_text(name, "employee name")?);
            }
            if let Some(contact) = changes.contact.as_deref() {
                active.contact = ActiveValue::Set(contact.trim().to_string());
            }
            if let Some(role) = changes.role.as_deref() {
                active.role = ActiveValue::Set(normalize_required_text(role, "employee role")?);
            }
            if let Some(joining_date) = changes.joining_date {
                active.joining_date = ActiveValue::Set(joining_date);
            }
            if let Some(salary) = changes.salary_minor {
                active.salary_minor = ActiveValue::Set(salary);
            }
            if let Some(status) = changes.status {
                active.status = ActiveValue::Set(status.as_str().to_string());
            }
            if let Some(address) = changes.address.as_deref() {
                active.address = ActiveValue::Set(normalize_optional_text(Some(address)));
            }
            active.updated_at = ActiveValue::Set(Utc::now());

            let model = active.update(&db_tx).await?;
            Ok(Employee::try_from(model)?)
        })
    }

    /// Remove an employee together with its attendance rows.
    pub async fn delete_employee(&self, owner: &str, employee_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_employee(&db_tx, owner, employee_id).await?;

            attendance::Entity::delete_many()
                .filter(attendance::Column::EmployeeId.eq(model.id.clone()))
                .exec(&db_tx)
                .await?;
            employees::Entity::delete_by_id(model.id).exec(&db_tx).await?;

            Ok(())
        })
    }

    pub(super) async fn require_employee<C: ConnectionTrait>(
        &self,
        db: &C,
        owner: &str,
        employee_id: Uuid,
    ) -> ResultEngine<employees::Model> {
        employees::Entity::find_by_id(employee_id.to_string())
            .filter(employees::Column::Owner.eq(owner))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("employee not exists".to_string()))
    }
}
