//! Data transfer objects exchanged between handlers and services.
//!
//! DTOs carry denormalized display fields (leader and customer names) so a
//! single fetch can feed a whole project page.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{customer, order, project, project_leader, service, summary};

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct CustomerDto {
    #[serde(default)]
    pub id: i32,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Customer name must be between 1 and 100 characters"
    ))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "Organization number is required"))]
    pub organization_number: String,
    pub address: Option<String>,
    pub discount: Option<Decimal>,
}

impl From<&customer::Model> for CustomerDto {
    fn from(model: &customer::Model) -> Self {
        Self {
            id: model.id,
            customer_name: model.customer_name.clone(),
            organization_number: model.organization_number.clone(),
            address: model.address.clone(),
            discount: model.discount,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct ServiceDto {
    #[serde(default)]
    pub id: i32,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Service name must be between 1 and 100 characters"
    ))]
    pub service_name: String,
}

impl From<&service::Model> for ServiceDto {
    fn from(model: &service::Model) -> Self {
        Self {
            id: model.id,
            service_name: model.service_name.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct ProjectLeaderDto {
    #[serde(default)]
    pub id: i32,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl From<&project_leader::Model> for ProjectLeaderDto {
    fn from(model: &project_leader::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name.clone(),
            last_name: model.last_name.clone(),
            email: model.email.clone(),
            phone: model.phone.clone(),
            department: model.department.clone(),
            is_deleted: model.is_deleted,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct OrderDto {
    #[serde(default)]
    pub project_id: i32,
    pub customer_id: i32,
    pub service_id: i32,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    pub hours: Decimal,
    pub price: Decimal,
    /// hours * price; recomputed on every read, ignored on writes.
    #[serde(default)]
    pub total: Decimal,
}

impl OrderDto {
    pub fn from_model(
        model: &order::Model,
        customer_name: Option<String>,
        service_name: Option<String>,
    ) -> Self {
        Self {
            project_id: model.project_id,
            customer_id: model.customer_id,
            service_id: model.service_id,
            customer_name,
            service_name,
            hours: model.hours,
            price: model.price,
            total: model.total(),
        }
    }

    /// Identity of an order within its project.
    pub fn key(&self) -> (i32, i32) {
        (self.customer_id, self.service_id)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct SummaryDto {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub project_id: i32,
    #[serde(default)]
    pub total_hours: Decimal,
    #[serde(default)]
    pub total_price: Decimal,
    pub notes: Option<String>,
}

impl From<&summary::Model> for SummaryDto {
    fn from(model: &summary::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            total_hours: model.total_hours,
            total_price: model.total_price,
            notes: model.notes.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct ProjectDto {
    #[serde(default)]
    pub id: i32,
    #[validate(length(
        min = 1,
        max = 50,
        message = "Project number must be between 1 and 50 characters"
    ))]
    pub project_number: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Defaults to "Planned" when omitted on create.
    #[serde(default)]
    pub status: Option<String>,
    pub project_leader_id: i32,
    #[serde(default)]
    pub project_leader_name: Option<String>,
    #[serde(default)]
    #[validate]
    pub orders: Vec<OrderDto>,
    #[serde(default)]
    pub summary: Option<SummaryDto>,
}

impl ProjectDto {
    pub fn from_header(model: &project::Model, leader: Option<&project_leader::Model>) -> Self {
        Self {
            id: model.id,
            project_number: model.project_number.clone(),
            description: model.description.clone(),
            start_date: model.start_date,
            end_date: model.end_date,
            status: Some(model.status.clone()),
            project_leader_id: model.project_leader_id,
            project_leader_name: leader.map(|l| format!("{} {}", l.first_name, l.last_name)),
            orders: Vec::new(),
            summary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn order_total_is_recomputed_from_model() {
        let model = order::Model {
            project_id: 1,
            customer_id: 2,
            service_id: 3,
            hours: dec!(2.5),
            price: dec!(80),
        };
        let dto = OrderDto::from_model(&model, Some("Acme".into()), Some("Consulting".into()));
        assert_eq!(dto.total, dec!(200.0));
        assert_eq!(dto.key(), (2, 3));
    }

    #[test]
    fn project_request_parses_without_optional_fields() {
        let body = json!({
            "project_number": "P-3",
            "start_date": "2025-02-01",
            "project_leader_id": 1,
        });
        let dto: ProjectDto = serde_json::from_value(body).unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.orders.is_empty());
        assert!(dto.summary.is_none());
        assert!(dto.status.is_none());
    }

    #[test]
    fn leader_request_rejects_bad_email() {
        let body = json!({
            "first_name": "Anna",
            "last_name": "Berg",
            "email": "not-an-email",
        });
        let dto: ProjectLeaderDto = serde_json::from_value(body).unwrap();
        assert!(dto.validate().is_err());
    }
}
