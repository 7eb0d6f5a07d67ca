use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

use pena_core::domain::{Post, PostChanges, PostDraft, PostQuery};
use pena_core::error::RepoError;
use pena_core::ports::{BaseRepository, PostRepository};

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;

fn model(id: i32, slug: &str, published: bool) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        slug: slug.to_owned(),
        title: "Saúde Pública".to_owned(),
        excerpt: None,
        content: "Conteúdo".to_owned(),
        published,
        published_at: published.then(|| now.into()),
        created_at: now.into(),
        updated_at: now.into(),
        category: Some("educacao".to_owned()),
        tags: vec!["sus".to_owned()],
        reading_time: 1,
        meta_title: None,
        meta_description: None,
        featured_image: None,
    }
}

fn draft(slug: &str) -> PostDraft {
    PostDraft {
        slug: slug.to_owned(),
        title: "Saúde Pública".to_owned(),
        excerpt: None,
        content: "Conteúdo".to_owned(),
        published: false,
        published_at: None,
        category: None,
        tags: vec![],
        reading_time: 1,
        meta_title: None,
        meta_description: None,
        featured_image: None,
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(7, "saude-publica", true)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let repo: &dyn PostRepository = &repo;

    let post: Post = repo.find_by_id(7).await.unwrap().unwrap();

    assert_eq!(post.id, 7);
    assert_eq!(post.slug, "saude-publica");
    assert_eq!(post.tags, vec!["sus".to_string()]);
    assert!(post.published_at.is_some());
}

#[tokio::test]
async fn test_find_post_by_slug_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let repo: &dyn PostRepository = &repo;

    assert!(repo.find_by_slug("nada").await.unwrap().is_none());
}

#[tokio::test]
async fn test_insert_returns_stored_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "saude-publica", false)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let repo: &dyn PostRepository = &repo;

    let post = repo.insert(draft("saude-publica")).await.unwrap();
    assert_eq!(post.id, 1);
    assert!(!post.published);
}

#[tokio::test]
async fn test_insert_duplicate_slug_is_constraint() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"posts_slug_key\"".to_owned(),
        ))])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let repo: &dyn PostRepository = &repo;

    let err = repo.insert(draft("saude-publica")).await.unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));
}

#[tokio::test]
async fn test_update_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let repo: &dyn PostRepository = &repo;

    let changes = PostChanges {
        published: Some(true),
        published_at: Some(Some(Utc::now())),
        ..Default::default()
    };
    let err = repo.update(99, changes).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_delete_reports_missing_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let repo: &dyn PostRepository = &repo;

    assert!(repo.delete(1).await.is_ok());
    assert!(matches!(repo.delete(1).await, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_list_with_unknown_cursor_is_empty() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let repo: &dyn PostRepository = &repo;

    let query = PostQuery::published().starting_at(Some(5)).limit(11);
    assert!(repo.list(&query).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_published_filters_and_orders() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(2, "b", true), model(1, "a", true)]])
        .into_connection();

    let repo_owned = PostgresPostRepository::new(db);
    let repo: &dyn PostRepository = &repo_owned;

    let posts = repo
        .list(&PostQuery::published().tagged("sus").limit(3))
        .await
        .unwrap();
    assert_eq!(posts.len(), 2);

    let log = repo_owned.db.into_transaction_log();
    assert_eq!(log.len(), 1);
    let sql = format!("{:?}", log[0]);
    assert!(sql.contains("ANY("));
    assert!(sql.contains("published_at"));
    assert!(sql.contains("DESC"));
    assert!(sql.contains("LIMIT"));
}

#[tokio::test]
async fn test_list_after_cursor_uses_keyset() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(5, "ancora", true)]])
        .append_query_results([vec![model(5, "ancora", true), model(4, "seguinte", true)]])
        .into_connection();

    let repo_owned = PostgresPostRepository::new(db);
    let repo: &dyn PostRepository = &repo_owned;

    let query = PostQuery::published().starting_at(Some(5)).limit(3);
    let posts = repo.list(&query).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, 5);

    let log = repo_owned.db.into_transaction_log();
    assert_eq!(log.len(), 2);
    let sql = format!("{:?}", log[1]).replace("\\\"", "");
    assert!(sql.contains("published_at < $"));
    assert!(sql.contains("published_at = $"));
    assert!(sql.contains("id <= $"));
    assert!(sql.contains("published_at DESC"));
    assert!(sql.contains("id DESC"));
}

#[tokio::test]
async fn test_ping_runs_trivial_statement() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(repo.ping().await.is_ok());

    let log = repo.db.into_transaction_log();
    assert_eq!(log.len(), 1);
    assert!(format!("{:?}", log[0]).contains("SELECT 1"));
}
