//! Integration tests for the organisation content repository
//!
//! Callers hold the repository through the trait, as a dashboard handler would.

use ogec_admin::app::models::domain::{Exportable, to_records};
use ogec_admin::app::models::OrgContent;
use ogec_admin::app::services::org_content::{
    InMemoryOrgContentRepository, NewOrgContent, OrgContentRepository, OrgContentUpdate,
};
use ogec_admin::{EncodeOptions, encode};
use std::sync::Arc;

fn shared_repository() -> Arc<dyn OrgContentRepository> {
    Arc::new(InMemoryOrgContentRepository::with_default_content())
}

#[tokio::test]
async fn test_repositories_do_not_share_state() {
    let first = shared_repository();
    let second = shared_repository();

    first
        .create(NewOrgContent {
            title: "Rentrée 2024".to_string(),
            description: "Programme de rentrée".to_string(),
            video_url: None,
            mission_statement: None,
            vision: None,
            history: None,
            is_active: false,
        })
        .await
        .unwrap();

    assert_eq!(first.list().await.unwrap().len(), 2);
    assert_eq!(second.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_updates_through_shared_handle() {
    let repository = shared_repository();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let repository = Arc::clone(&repository);
            tokio::spawn(async move {
                repository
                    .update(
                        1,
                        OrgContentUpdate {
                            history: Some(Some(format!("revision {}", i))),
                            ..Default::default()
                        },
                    )
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_some());
    }

    let active = repository.active().await.unwrap().unwrap();
    assert!(active.history.unwrap().starts_with("revision "));
}

#[tokio::test]
async fn test_content_exports_with_default_columns() {
    let repository = shared_repository();
    let items = repository.list().await.unwrap();

    let body = encode(
        &to_records(&items).unwrap(),
        &OrgContent::export_columns(),
        &EncodeOptions::default(),
    )
    .unwrap()
    .unwrap();

    let header = body.split("\r\n").next().unwrap();
    assert_eq!(
        header,
        "\"ID\",\"Title\",\"Description\",\"Mission\",\"Vision\",\"History\",\"Active\",\"Last Updated\""
    );
    assert!(body.contains("\"OGEC - Œuvre Générale pour l'Éducation et la Culture\""));
}
