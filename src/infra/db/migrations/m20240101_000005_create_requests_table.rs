//! Migration: citizen requests.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Requests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Requests::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Requests::Name).string().not_null())
                    .col(ColumnDef::new(Requests::Email).string().not_null())
                    .col(ColumnDef::new(Requests::State).string_len(2).not_null())
                    .col(ColumnDef::new(Requests::Municipality).string().not_null())
                    .col(ColumnDef::new(Requests::RequestType).string_len(32).not_null())
                    .col(ColumnDef::new(Requests::Message).text().not_null())
                    .col(
                        ColumnDef::new(Requests::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Requests::PoliticianId).uuid().null())
                    .col(ColumnDef::new(Requests::Response).text().null())
                    .col(
                        ColumnDef::new(Requests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Requests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_requests_location")
                    .table(Requests::Table)
                    .col(Requests::State)
                    .col(Requests::Municipality)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_requests_politician_id")
                    .table(Requests::Table)
                    .col(Requests::PoliticianId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Requests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Requests {
    Table,
    Id,
    Name,
    Email,
    State,
    Municipality,
    RequestType,
    Message,
    Status,
    PoliticianId,
    Response,
    CreatedAt,
    UpdatedAt,
}
