//! Pure constructors mapping DTOs (plus already-resolved related entities)
//! into new ActiveModels. Validation that does not need database access
//! lives here.

use chrono::NaiveDate;
use sea_orm::Set;

use crate::dto::{CustomerDto, OrderDto, ProjectDto, ProjectLeaderDto, ServiceDto, SummaryDto};
use crate::entities::{customer, order, project, project_leader, service, summary};
use crate::errors::ServiceError;

/// Status given to projects created without one.
pub const DEFAULT_PROJECT_STATUS: &str = "Planned";

/// A project's end date, when present, must not precede its start date.
pub fn validate_date_range(
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> Result<(), ServiceError> {
    if let Some(end) = end_date {
        if end < start_date {
            return Err(ServiceError::ValidationError(
                "End date cannot be before start date".to_string(),
            ));
        }
    }
    Ok(())
}

pub fn new_project(
    dto: &ProjectDto,
    leader: &project_leader::Model,
) -> Result<project::ActiveModel, ServiceError> {
    validate_date_range(dto.start_date, dto.end_date)?;

    let status = dto
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_PROJECT_STATUS);

    Ok(project::ActiveModel {
        project_number: Set(dto.project_number.clone()),
        description: Set(dto.description.clone()),
        start_date: Set(dto.start_date),
        end_date: Set(dto.end_date),
        status: Set(status.to_string()),
        project_leader_id: Set(leader.id),
        ..Default::default()
    })
}

pub fn new_order(project_id: i32, dto: &OrderDto) -> order::ActiveModel {
    order::ActiveModel {
        project_id: Set(project_id),
        customer_id: Set(dto.customer_id),
        service_id: Set(dto.service_id),
        hours: Set(dto.hours),
        price: Set(dto.price),
    }
}

pub fn new_summary(project_id: i32, dto: &SummaryDto) -> summary::ActiveModel {
    summary::ActiveModel {
        project_id: Set(project_id),
        total_hours: Set(dto.total_hours),
        total_price: Set(dto.total_price),
        notes: Set(dto.notes.clone()),
        ..Default::default()
    }
}

pub fn new_customer(dto: &CustomerDto) -> customer::ActiveModel {
    customer::ActiveModel {
        customer_name: Set(dto.customer_name.clone()),
        organization_number: Set(dto.organization_number.clone()),
        address: Set(dto.address.clone()),
        discount: Set(dto.discount),
        ..Default::default()
    }
}

pub fn new_service(dto: &ServiceDto) -> service::ActiveModel {
    service::ActiveModel {
        service_name: Set(dto.service_name.clone()),
        ..Default::default()
    }
}

pub fn new_project_leader(dto: &ProjectLeaderDto) -> project_leader::ActiveModel {
    project_leader::ActiveModel {
        first_name: Set(dto.first_name.clone()),
        last_name: Set(dto.last_name.clone()),
        email: Set(dto.email.clone()),
        phone: Set(dto.phone.clone()),
        department: Set(dto.department.clone()),
        is_deleted: Set(false),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sea_orm::ActiveValue;

    fn leader() -> project_leader::Model {
        project_leader::Model {
            id: 4,
            first_name: "Anna".into(),
            last_name: "Berg".into(),
            email: "anna.berg@example.com".into(),
            phone: None,
            department: None,
            is_deleted: false,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn project_dto(start: &str, end: Option<&str>, status: Option<&str>) -> ProjectDto {
        ProjectDto {
            id: 0,
            project_number: "P-1".into(),
            description: None,
            start_date: date(start),
            end_date: end.map(date),
            status: status.map(str::to_string),
            project_leader_id: 4,
            project_leader_name: None,
            orders: Vec::new(),
            summary: None,
        }
    }

    #[rstest]
    #[case("2025-01-10", None)]
    #[case("2025-01-10", Some("2025-01-10"))]
    #[case("2025-01-10", Some("2025-03-01"))]
    fn accepts_valid_date_ranges(#[case] start: &str, #[case] end: Option<&str>) {
        assert!(validate_date_range(date(start), end.map(date)).is_ok());
    }

    #[test]
    fn rejects_end_before_start() {
        let dto = project_dto("2025-01-10", Some("2025-01-09"), None);
        let err = new_project(&dto, &leader()).unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(_)));
    }

    #[rstest]
    #[case(None, DEFAULT_PROJECT_STATUS)]
    #[case(Some(""), DEFAULT_PROJECT_STATUS)]
    #[case(Some("   "), DEFAULT_PROJECT_STATUS)]
    #[case(Some("Ongoing"), "Ongoing")]
    fn blank_status_falls_back_to_default(#[case] status: Option<&str>, #[case] expected: &str) {
        let dto = project_dto("2025-01-10", None, status);
        let model = new_project(&dto, &leader()).unwrap();
        assert_eq!(model.status, ActiveValue::Set(expected.to_string()));
    }

    #[test]
    fn leader_id_comes_from_resolved_entity() {
        let dto = project_dto("2025-01-10", None, None);
        let model = new_project(&dto, &leader()).unwrap();
        assert_eq!(model.project_leader_id, ActiveValue::Set(4));
    }
}
