//! Create `contact` table with FK to `user`.
//!
//! Column lengths mirror the limits enforced by `models::contact::validate`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contact::Table)
                    .if_not_exists()
                    .col(uuid(Contact::Id).primary_key())
                    .col(uuid(Contact::UserId).not_null())
                    .col(string_len(Contact::Nombre, 100).not_null())
                    .col(string_len(Contact::Apellido, 100).not_null())
                    .col(string_len(Contact::Telefono, 15).not_null())
                    .col(string_len_null(Contact::Email, 200))
                    .col(timestamp_with_time_zone(Contact::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Contact::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_user")
                            .from(Contact::Table, Contact::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Contact::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Contact { Table, Id, UserId, Nombre, Apellido, Telefono, Email, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
