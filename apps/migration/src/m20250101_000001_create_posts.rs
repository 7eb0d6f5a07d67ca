use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Slug,
    Title,
    Excerpt,
    Content,
    Published,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
    Category,
    Tags,
    ReadingTime,
    MetaTitle,
    MetaDescription,
    FeaturedImage,
}

const TAGS_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_posts_tags ON posts USING GIN (tags)";

fn posts_table() -> TableCreateStatement {
    Table::create()
        .table(Posts::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Posts::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Posts::Slug).string().not_null().unique_key())
        .col(ColumnDef::new(Posts::Title).string().not_null())
        .col(ColumnDef::new(Posts::Excerpt).text().null())
        .col(ColumnDef::new(Posts::Content).text().not_null())
        .col(
            ColumnDef::new(Posts::Published)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(Posts::PublishedAt)
                .timestamp_with_time_zone()
                .null(),
        )
        .col(
            ColumnDef::new(Posts::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Posts::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(ColumnDef::new(Posts::Category).string().null())
        .col(
            ColumnDef::new(Posts::Tags)
                .array(ColumnType::Text)
                .not_null()
                .default(Expr::cust("'{}'")),
        )
        .col(
            ColumnDef::new(Posts::ReadingTime)
                .integer()
                .not_null()
                .default(1),
        )
        .col(ColumnDef::new(Posts::MetaTitle).string().null())
        .col(ColumnDef::new(Posts::MetaDescription).text().null())
        .col(ColumnDef::new(Posts::FeaturedImage).string().null())
        .to_owned()
}

fn btree_indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .if_not_exists()
            .name("idx_posts_published_published_at")
            .table(Posts::Table)
            .col(Posts::Published)
            .col(Posts::PublishedAt)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_posts_category")
            .table(Posts::Table)
            .col(Posts::Category)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_posts_created_at")
            .table(Posts::Table)
            .col(Posts::CreatedAt)
            .to_owned(),
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(posts_table()).await?;

        for index in btree_indexes() {
            manager.create_index(index).await?;
        }

        // sea-query has no index method builder for GIN.
        manager
            .get_connection()
            .execute_unprepared(TAGS_INDEX)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_table_sql() {
        let sql = posts_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"CREATE TABLE IF NOT EXISTS "posts""#));
        assert!(sql.contains("UNIQUE"));
        assert!(sql.contains("text[]"));
        assert!(sql.contains("DEFAULT '{}'"));
    }

    #[test]
    fn test_index_names() {
        let sql: Vec<String> = btree_indexes()
            .iter()
            .map(|i| i.to_string(PostgresQueryBuilder))
            .collect();

        assert_eq!(sql.len(), 3);
        assert!(sql[0].contains("idx_posts_published_published_at"));
        assert!(sql.iter().all(|s| s.contains(r#"ON "posts""#)));
    }
}
