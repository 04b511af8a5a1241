//! Migration: states and municipalities.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(States::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(States::Id)
                            .string_len(2)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(States::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Municipalities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Municipalities::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Municipalities::Name).string().not_null())
                    .col(
                        ColumnDef::new(Municipalities::StateId)
                            .string_len(2)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_municipalities_state_id")
                            .from(Municipalities::Table, Municipalities::StateId)
                            .to(States::Table, States::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_municipalities_state_id")
                    .table(Municipalities::Table)
                    .col(Municipalities::StateId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Municipalities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(States::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum States {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Municipalities {
    Table,
    Id,
    Name,
    StateId,
}
