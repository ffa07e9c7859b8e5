use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240601_000006_create_store_info_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StoreInfo::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StoreInfo::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(StoreInfo::StoreName).string_len(100).not_null())
                    .col(ColumnDef::new(StoreInfo::Address).string_len(300).not_null())
                    .col(ColumnDef::new(StoreInfo::PhoneNumber).string_len(20).not_null())
                    .col(ColumnDef::new(StoreInfo::LogoUrl).string_len(500).null())
                    .col(
                        ColumnDef::new(StoreInfo::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StoreInfo::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StoreInfo::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StoreInfo {
    Table,
    Id,
    StoreName,
    Address,
    PhoneNumber,
    LogoUrl,
    CreatedAt,
    UpdatedAt,
}
