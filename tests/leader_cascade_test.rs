mod common;

use std::sync::Arc;

use projects_api::entities::project_leader::UNASSIGNED_LEADER_ID;
use projects_api::errors::ServiceError;
use projects_api::services::{ProjectLeaderService, ProjectService};

#[tokio::test]
async fn deleting_a_leader_reassigns_their_projects_to_the_sentinel() {
    let db = Arc::new(common::setup_db().await);
    let leaders = ProjectLeaderService::new(db.clone());
    let projects = ProjectService::new(db);

    let anna = leaders
        .create_leader(common::leader_dto("Anna", "Berg"))
        .await
        .unwrap();
    let bjorn = leaders
        .create_leader(common::leader_dto("Bjorn", "Dahl"))
        .await
        .unwrap();

    let p1 = projects
        .create_project(common::project_dto("P-1", anna, Vec::new()))
        .await
        .unwrap();
    let p2 = projects
        .create_project(common::project_dto("P-2", anna, Vec::new()))
        .await
        .unwrap();
    let p3 = projects
        .create_project(common::project_dto("P-3", bjorn, Vec::new()))
        .await
        .unwrap();

    leaders.delete_leader(anna).await.unwrap();

    // Anna's projects now point at the unassigned sentinel.
    for id in [p1, p2] {
        let fetched = projects.get_project(id).await.unwrap();
        assert_eq!(fetched.project_leader_id, UNASSIGNED_LEADER_ID);
    }

    // Bjorn's project is untouched.
    let fetched = projects.get_project(p3).await.unwrap();
    assert_eq!(fetched.project_leader_id, bjorn);
}

#[tokio::test]
async fn deleted_leaders_stay_listed_with_the_flag_set() {
    let db = Arc::new(common::setup_db().await);
    let leaders = ProjectLeaderService::new(db);

    let anna = leaders
        .create_leader(common::leader_dto("Anna", "Berg"))
        .await
        .unwrap();
    leaders.delete_leader(anna).await.unwrap();

    let listed = leaders.list_leaders().await.unwrap();
    let deleted = listed.iter().find(|l| l.id == anna).unwrap();
    assert!(deleted.is_deleted);
}

#[tokio::test]
async fn deleting_a_missing_leader_is_not_found() {
    let db = Arc::new(common::setup_db().await);
    let leaders = ProjectLeaderService::new(db);

    let err = leaders.delete_leader(9999).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn the_sentinel_leader_cannot_be_deleted() {
    let db = Arc::new(common::setup_db().await);
    let leaders = ProjectLeaderService::new(db);

    let err = leaders.delete_leader(UNASSIGNED_LEADER_ID).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(_)));
}
