mod common;

use std::sync::Arc;

use rust_decimal_macros::dec;

use projects_api::dto::SummaryDto;
use projects_api::errors::ServiceError;
use projects_api::services::{CatalogService, CustomerService, ProjectLeaderService, ProjectService};

struct Fixture {
    projects: ProjectService,
    customer_a: i32,
    customer_b: i32,
    service_a: i32,
    service_b: i32,
    leader: i32,
}

/// Two customers, two catalog services and one leader, ready for projects.
async fn fixture() -> Fixture {
    let db = Arc::new(common::setup_db().await);

    let customers = CustomerService::new(db.clone());
    let catalog = CatalogService::new(db.clone());
    let leaders = ProjectLeaderService::new(db.clone());

    let customer_a = customers
        .create_customer(common::customer_dto("Acme AB"))
        .await
        .unwrap();
    let customer_b = customers
        .create_customer(common::customer_dto("Globex AB"))
        .await
        .unwrap();
    let service_a = catalog
        .create_service(common::service_dto("Consulting"))
        .await
        .unwrap();
    let service_b = catalog
        .create_service(common::service_dto("Development"))
        .await
        .unwrap();
    let leader = leaders
        .create_leader(common::leader_dto("Anna", "Berg"))
        .await
        .unwrap();

    Fixture {
        projects: ProjectService::new(db),
        customer_a,
        customer_b,
        service_a,
        service_b,
        leader,
    }
}

#[tokio::test]
async fn create_persists_full_graph_with_defaults() {
    let fx = fixture().await;

    let mut dto = common::project_dto(
        "P-1",
        fx.leader,
        vec![common::order_dto(fx.customer_a, fx.service_a, dec!(2), dec!(50))],
    );
    dto.summary = Some(SummaryDto {
        id: 0,
        project_id: 0,
        total_hours: dec!(2),
        total_price: dec!(100),
        notes: Some("kickoff".to_string()),
    });

    let id = fx.projects.create_project(dto).await.unwrap();
    let fetched = fx.projects.get_project(id).await.unwrap();

    assert_eq!(fetched.project_number, "P-1");
    assert_eq!(fetched.status.as_deref(), Some("Planned"));
    assert_eq!(fetched.project_leader_name.as_deref(), Some("Anna Berg"));
    assert_eq!(fetched.orders.len(), 1);
    assert_eq!(fetched.orders[0].total, dec!(100));
    assert_eq!(fetched.orders[0].customer_name.as_deref(), Some("Acme AB"));
    assert_eq!(
        fetched.summary.as_ref().and_then(|s| s.notes.as_deref()),
        Some("kickoff")
    );
}

#[tokio::test]
async fn create_rejects_unknown_leader() {
    let fx = fixture().await;

    let dto = common::project_dto("P-1", 9999, Vec::new());
    let err = fx.projects.create_project(dto).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn create_rejects_end_date_before_start_date() {
    let fx = fixture().await;

    let mut dto = common::project_dto("P-1", fx.leader, Vec::new());
    dto.end_date = Some(dto.start_date.pred_opt().unwrap());
    let err = fx.projects.create_project(dto).await.unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn update_rejects_end_date_before_start_date() {
    let fx = fixture().await;

    let id = fx
        .projects
        .create_project(common::project_dto("P-1", fx.leader, Vec::new()))
        .await
        .unwrap();

    let original = fx.projects.get_project(id).await.unwrap();

    let mut dto = original.clone();
    dto.end_date = Some(dto.start_date.pred_opt().unwrap());
    let err = fx.projects.update_project(dto).await.unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));

    let fetched = fx.projects.get_project(id).await.unwrap();
    assert_eq!(fetched.start_date, original.start_date);
    assert_eq!(fetched.end_date, original.end_date);
}

#[tokio::test]
async fn duplicate_order_keys_are_rejected_as_invalid_input() {
    let fx = fixture().await;

    // Two orders with the same (customer, service) pair on create.
    let dto = common::project_dto(
        "P-1",
        fx.leader,
        vec![
            common::order_dto(fx.customer_a, fx.service_a, dec!(2), dec!(50)),
            common::order_dto(fx.customer_a, fx.service_a, dec!(4), dec!(60)),
        ],
    );
    let err = fx.projects.create_project(dto).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    // Same pair twice on update.
    let id = fx
        .projects
        .create_project(common::project_dto(
            "P-1",
            fx.leader,
            vec![common::order_dto(fx.customer_a, fx.service_a, dec!(2), dec!(50))],
        ))
        .await
        .unwrap();

    let mut dto = fx.projects.get_project(id).await.unwrap();
    dto.orders = vec![
        common::order_dto(fx.customer_b, fx.service_b, dec!(1), dec!(80)),
        common::order_dto(fx.customer_b, fx.service_b, dec!(3), dec!(90)),
    ];
    let err = fx.projects.update_project(dto).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    // The stored order is untouched.
    let fetched = fx.projects.get_project(id).await.unwrap();
    assert_eq!(fetched.orders.len(), 1);
    assert_eq!(fetched.orders[0].key(), (fx.customer_a, fx.service_a));
}

#[tokio::test]
async fn project_numbers_continue_from_the_highest() {
    let fx = fixture().await;

    assert_eq!(fx.projects.next_project_number().await.unwrap(), "P-1");

    fx.projects
        .create_project(common::project_dto("P-7", fx.leader, Vec::new()))
        .await
        .unwrap();

    assert_eq!(fx.projects.next_project_number().await.unwrap(), "P-8");
}

#[tokio::test]
async fn update_diffs_orders_instead_of_recreating_them() {
    let fx = fixture().await;

    let id = fx
        .projects
        .create_project(common::project_dto(
            "P-1",
            fx.leader,
            vec![common::order_dto(fx.customer_a, fx.service_a, dec!(2), dec!(50))],
        ))
        .await
        .unwrap();

    // The (customer_a, service_a) order survives with new hours; a second
    // order appears; nothing is deleted.
    let mut dto = fx.projects.get_project(id).await.unwrap();
    dto.orders = vec![
        common::order_dto(fx.customer_a, fx.service_a, dec!(3), dec!(50)),
        common::order_dto(fx.customer_b, fx.service_b, dec!(1), dec!(80)),
    ];
    fx.projects.update_project(dto).await.unwrap();

    let mut fetched = fx.projects.get_project(id).await.unwrap();
    fetched.orders.sort_by_key(|o| (o.customer_id, o.service_id));
    assert_eq!(fetched.orders.len(), 2);

    let kept = &fetched.orders[0];
    assert_eq!(kept.key(), (fx.customer_a, fx.service_a));
    assert_eq!(kept.hours, dec!(3));
    assert_eq!(kept.total, dec!(150));

    let added = &fetched.orders[1];
    assert_eq!(added.key(), (fx.customer_b, fx.service_b));
    assert_eq!(added.total, dec!(80));
}

#[tokio::test]
async fn update_deletes_orders_missing_from_the_request() {
    let fx = fixture().await;

    let id = fx
        .projects
        .create_project(common::project_dto(
            "P-1",
            fx.leader,
            vec![
                common::order_dto(fx.customer_a, fx.service_a, dec!(2), dec!(50)),
                common::order_dto(fx.customer_b, fx.service_b, dec!(1), dec!(80)),
            ],
        ))
        .await
        .unwrap();

    let mut dto = fx.projects.get_project(id).await.unwrap();
    dto.orders = vec![common::order_dto(fx.customer_b, fx.service_b, dec!(1), dec!(80))];
    fx.projects.update_project(dto).await.unwrap();

    let fetched = fx.projects.get_project(id).await.unwrap();
    assert_eq!(fetched.orders.len(), 1);
    assert_eq!(fetched.orders[0].key(), (fx.customer_b, fx.service_b));
}

#[tokio::test]
async fn update_upserts_the_summary() {
    let fx = fixture().await;

    let id = fx
        .projects
        .create_project(common::project_dto("P-1", fx.leader, Vec::new()))
        .await
        .unwrap();

    // First update creates the summary.
    let mut dto = fx.projects.get_project(id).await.unwrap();
    dto.summary = Some(SummaryDto {
        id: 0,
        project_id: 0,
        total_hours: dec!(10),
        total_price: dec!(500),
        notes: None,
    });
    fx.projects.update_project(dto).await.unwrap();

    let fetched = fx.projects.get_project(id).await.unwrap();
    assert_eq!(fetched.summary.as_ref().unwrap().total_hours, dec!(10));

    // Second update overwrites it in place.
    let mut dto = fetched;
    dto.summary = Some(SummaryDto {
        id: 0,
        project_id: 0,
        total_hours: dec!(12),
        total_price: dec!(600),
        notes: Some("revised".to_string()),
    });
    fx.projects.update_project(dto).await.unwrap();

    let fetched = fx.projects.get_project(id).await.unwrap();
    let summary = fetched.summary.unwrap();
    assert_eq!(summary.total_hours, dec!(12));
    assert_eq!(summary.total_price, dec!(600));
    assert_eq!(summary.notes.as_deref(), Some("revised"));
}

#[tokio::test]
async fn failed_update_rolls_back_the_whole_transaction() {
    let fx = fixture().await;

    let id = fx
        .projects
        .create_project(common::project_dto(
            "P-1",
            fx.leader,
            vec![common::order_dto(fx.customer_a, fx.service_a, dec!(2), dec!(50))],
        ))
        .await
        .unwrap();

    // The first order change is valid but the second references a service
    // that does not exist, so neither must stick.
    let mut dto = fx.projects.get_project(id).await.unwrap();
    dto.orders = vec![
        common::order_dto(fx.customer_a, fx.service_a, dec!(9), dec!(50)),
        common::order_dto(fx.customer_b, 9999, dec!(1), dec!(80)),
    ];
    let err = fx.projects.update_project(dto).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let fetched = fx.projects.get_project(id).await.unwrap();
    assert_eq!(fetched.orders.len(), 1);
    assert_eq!(fetched.orders[0].hours, dec!(2));
}

#[tokio::test]
async fn update_of_missing_project_is_not_found() {
    let fx = fixture().await;

    let dto = common::project_dto("P-1", fx.leader, Vec::new());
    let err = fx.projects.update_project(dto).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn delete_removes_orders_and_summary_with_the_project() {
    let fx = fixture().await;

    let mut dto = common::project_dto(
        "P-1",
        fx.leader,
        vec![common::order_dto(fx.customer_a, fx.service_a, dec!(2), dec!(50))],
    );
    dto.summary = Some(SummaryDto {
        id: 0,
        project_id: 0,
        total_hours: dec!(2),
        total_price: dec!(100),
        notes: None,
    });
    let id = fx.projects.create_project(dto).await.unwrap();

    fx.projects.delete_project(id).await.unwrap();

    let err = fx.projects.get_project(id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert!(fx.projects.list_projects().await.unwrap().is_empty());
}
