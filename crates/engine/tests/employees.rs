use chrono::NaiveDate;
use sea_orm::Database;

use engine::{
    AttendanceStatus, Engine, EngineError, EmployeeChanges, EmployeeStatus, NewEmployee, NewUser,
    Role,
};
use migration::MigratorTrait;

async fn engine_with_owner() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    engine
        .register_user(NewUser {
            username: "asha".to_string(),
            password: "secret".to_string(),
            full_name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            role: Role::Admin,
        })
        .await
        .unwrap();
    engine
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn hire(engine: &Engine, name: &str, salary_minor: i64) -> engine::Employee {
    engine
        .create_employee(
            "asha",
            NewEmployee {
                name: name.to_string(),
                contact: None,
                role: "Halwai".to_string(),
                joining_date: day(2026, 1, 1),
                salary_minor,
                status: None,
                address: None,
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn register_rejects_duplicate_username_and_email() {
    let engine = engine_with_owner().await;

    let err = engine
        .register_user(NewUser {
            username: "Asha".to_string(),
            password: "other".to_string(),
            full_name: "Asha Again".to_string(),
            email: "fresh@example.com".to_string(),
            role: Role::Manager,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));

    let err = engine
        .register_user(NewUser {
            username: "someone".to_string(),
            password: "other".to_string(),
            full_name: "Someone".to_string(),
            email: "ASHA@example.com".to_string(),
            role: Role::Manager,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));
}

#[tokio::test]
async fn new_employees_default_to_active() {
    let engine = engine_with_owner().await;
    let employee = hire(&engine, "Ravi", 1_800_000).await;

    assert_eq!(employee.status, EmployeeStatus::Active);
    assert_eq!(employee.contact, "");

    let fetched = engine.employee("asha", employee.id).await.unwrap();
    assert_eq!(fetched, employee);

    let err = engine
        .create_employee(
            "asha",
            NewEmployee {
                name: "  ".to_string(),
                contact: None,
                role: "Packer".to_string(),
                joining_date: day(2026, 1, 1),
                salary_minor: 1,
                status: None,
                address: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn negative_salary_is_rejected() {
    let engine = engine_with_owner().await;

    let err = engine
        .create_employee(
            "asha",
            NewEmployee {
                name: "Ravi".to_string(),
                contact: None,
                role: "Halwai".to_string(),
                joining_date: day(2026, 1, 1),
                salary_minor: -1,
                status: None,
                address: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let employee = hire(&engine, "Meena", 1_000_000).await;
    let err = engine
        .update_employee(
            "asha",
            employee.id,
            EmployeeChanges {
                salary_minor: Some(-5),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[tokio::test]
async fn marking_a_day_twice_replaces_the_row() {
    let engine = engine_with_owner().await;
    let employee = hire(&engine, "Ravi", 1_800_000).await;

    engine
        .mark_attendance("asha", employee.id, day(2026, 3, 2), AttendanceStatus::Absent)
        .await
        .unwrap();
    engine
        .mark_attendance("asha", employee.id, day(2026, 3, 2), AttendanceStatus::Present)
        .await
        .unwrap();

    let month = engine
        .attendance_month("asha", employee.id, 2026, 3)
        .await
        .unwrap();
    assert_eq!(month.entries.len(), 1);
    assert_eq!(month.entries[0].status, AttendanceStatus::Present);
    assert_eq!(month.present_days, 1);
}

#[tokio::test]
async fn attendance_listing_is_bounded_by_the_month() {
    let engine = engine_with_owner().await;
    let employee = hire(&engine, "Ravi", 1_800_000).await;

    engine
        .mark_attendance("asha", employee.id, day(2026, 2, 28), AttendanceStatus::Present)
        .await
        .unwrap();
    engine
        .mark_attendance("asha", employee.id, day(2026, 3, 1), AttendanceStatus::Present)
        .await
        .unwrap();
    engine
        .mark_attendance("asha", employee.id, day(2026, 3, 31), AttendanceStatus::Leave)
        .await
        .unwrap();
    engine
        .mark_attendance("asha", employee.id, day(2026, 4, 1), AttendanceStatus::Present)
        .await
        .unwrap();

    let month = engine
        .attendance_month("asha", employee.id, 2026, 3)
        .await
        .unwrap();
    assert_eq!(month.entries.len(), 2);
    assert_eq!(month.present_days, 1);

    let err = engine
        .attendance_month("asha", employee.id, 2026, 13)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn deleting_an_employee_drops_its_attendance() {
    let engine = engine_with_owner().await;
    let employee = hire(&engine, "Ravi", 1_800_000).await;

    engine
        .mark_attendance("asha", employee.id, day(2026, 3, 2), AttendanceStatus::Present)
        .await
        .unwrap();
    engine.delete_employee("asha", employee.id).await.unwrap();

    let err = engine.employee("asha", employee.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
    let err = engine
        .attendance_month("asha", employee.id, 2026, 3)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn salary_report_covers_every_employee() {
    let engine = engine_with_owner().await;
    let active = hire(&engine, "Ravi", 3_100_000).await;
    let inactive = hire(&engine, "Old Timer", 5_000_000).await;
    engine
        .update_employee(
            "asha",
            inactive.id,
            EmployeeChanges {
                status: Some(EmployeeStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    engine
        .mark_attendance("asha", active.id, day(2026, 3, 2), AttendanceStatus::Present)
        .await
        .unwrap();
    engine
        .mark_attendance("asha", active.id, day(2026, 3, 3), AttendanceStatus::Present)
        .await
        .unwrap();
    // Leave days do not count as present.
    engine
        .mark_attendance("asha", active.id, day(2026, 3, 4), AttendanceStatus::Leave)
        .await
        .unwrap();

    let report = engine.salary_report("asha", 2026, 3).await.unwrap();
    assert_eq!(report.days_in_month, 31);

    // Inactive staff still get a payroll row, sorted by name.
    assert_eq!(report.lines.len(), 2);
    assert_eq!(report.lines[0].name, "Old Timer");
    assert_eq!(report.lines[0].present_days, 0);
    assert_eq!(report.lines[0].calculated_salary_minor, 0);

    assert_eq!(report.lines[1].name, "Ravi");
    assert_eq!(report.lines[1].present_days, 2);
    assert_eq!(report.lines[1].calculated_salary_minor, 200_000);

    assert_eq!(report.total_payroll_minor, 200_000);
    assert_eq!(report.average_salary_minor, 100_000);
}

#[tokio::test]
async fn salary_report_for_empty_month_is_zeroed() {
    let engine = engine_with_owner().await;

    let report = engine.salary_report("asha", 2026, 3).await.unwrap();
    assert!(report.lines.is_empty());
    assert_eq!(report.total_payroll_minor, 0);
    assert_eq!(report.average_salary_minor, 0);
}
