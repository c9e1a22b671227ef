use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Contact: owner listing ordered by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_contact_user_created")
                    .table(Contact::Table)
                    .col(Contact::UserId)
                    .col(Contact::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_contact_user_created").table(Contact::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Contact { Table, UserId, CreatedAt }
