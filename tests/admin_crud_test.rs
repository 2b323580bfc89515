mod common;

use std::sync::Arc;

use rust_decimal_macros::dec;

use projects_api::errors::ServiceError;
use projects_api::services::{CatalogService, CustomerService, ProjectLeaderService, ProjectService};

#[tokio::test]
async fn customers_can_be_created_listed_and_deleted() {
    let db = Arc::new(common::setup_db().await);
    let customers = CustomerService::new(db);

    let id = customers
        .create_customer(common::customer_dto("Acme AB"))
        .await
        .unwrap();

    let listed = customers.list_customers().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].customer_name, "Acme AB");

    customers.delete_customer(id).await.unwrap();
    assert!(customers.list_customers().await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_missing_customer_is_not_found() {
    let db = Arc::new(common::setup_db().await);
    let customers = CustomerService::new(db);

    let err = customers.delete_customer(42).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn a_customer_referenced_by_orders_cannot_be_deleted() {
    let db = Arc::new(common::setup_db().await);
    let customers = CustomerService::new(db.clone());
    let catalog = CatalogService::new(db.clone());
    let leaders = ProjectLeaderService::new(db.clone());
    let projects = ProjectService::new(db);

    let customer = customers
        .create_customer(common::customer_dto("Acme AB"))
        .await
        .unwrap();
    let service = catalog
        .create_service(common::service_dto("Consulting"))
        .await
        .unwrap();
    let leader = leaders
        .create_leader(common::leader_dto("Anna", "Berg"))
        .await
        .unwrap();
    projects
        .create_project(common::project_dto(
            "P-1",
            leader,
            vec![common::order_dto(customer, service, dec!(2), dec!(50))],
        ))
        .await
        .unwrap();

    let err = customers.delete_customer(customer).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    // Same restriction applies to the catalog service.
    let err = catalog.delete_service(service).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn services_can_be_created_fetched_and_deleted() {
    let db = Arc::new(common::setup_db().await);
    let catalog = CatalogService::new(db);

    let id = catalog
        .create_service(common::service_dto("Consulting"))
        .await
        .unwrap();

    let fetched = catalog.get_service(id).await.unwrap();
    assert_eq!(fetched.service_name, "Consulting");

    catalog.delete_service(id).await.unwrap();
    let err = catalog.get_service(id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
