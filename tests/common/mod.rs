#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use projects_api::dto::{CustomerDto, OrderDto, ProjectDto, ProjectLeaderDto, ServiceDto};
use projects_api::migrator::Migrator;

/// Fresh in-memory database with the full schema applied.
///
/// A single-connection pool keeps the shared in-memory database alive for
/// the whole test.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("connecting to in-memory sqlite");
    Migrator::up(&db, None).await.expect("running migrations");
    db
}

pub fn customer_dto(name: &str) -> CustomerDto {
    CustomerDto {
        id: 0,
        customer_name: name.to_string(),
        organization_number: "556000-0000".to_string(),
        address: None,
        discount: None,
    }
}

pub fn service_dto(name: &str) -> ServiceDto {
    ServiceDto {
        id: 0,
        service_name: name.to_string(),
    }
}

pub fn leader_dto(first: &str, last: &str) -> ProjectLeaderDto {
    ProjectLeaderDto {
        id: 0,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        phone: None,
        department: None,
        is_deleted: false,
    }
}

pub fn order_dto(customer_id: i32, service_id: i32, hours: Decimal, price: Decimal) -> OrderDto {
    OrderDto {
        project_id: 0,
        customer_id,
        service_id,
        customer_name: None,
        service_name: None,
        hours,
        price,
        total: dec!(0),
    }
}

pub fn project_dto(number: &str, leader_id: i32, orders: Vec<OrderDto>) -> ProjectDto {
    ProjectDto {
        id: 0,
        project_number: number.to_string(),
        description: Some("Test project".to_string()),
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        end_date: Some(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()),
        status: None,
        project_leader_id: leader_id,
        project_leader_name: None,
        orders,
        summary: None,
    }
}
