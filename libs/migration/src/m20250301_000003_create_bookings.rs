use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000000_create_users::Users;
use super::m20250301_000002_create_items::Items;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(timestamp(Bookings::StartDate))
                    .col(timestamp(Bookings::EndDate))
                    .col(big_integer(Bookings::ItemId))
                    .col(big_integer(Bookings::BookerId))
                    // WAITING | APPROVED | REJECTED
                    .col(string_len(Bookings::Status, 16).default("WAITING"))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_item_id")
                            .from(Bookings::Table, Bookings::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_booker_id")
                            .from(Bookings::Table, Bookings::BookerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_booker_start")
                    .table(Bookings::Table)
                    .col(Bookings::BookerId)
                    .col(Bookings::StartDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_item_start")
                    .table(Bookings::Table)
                    .col(Bookings::ItemId)
                    .col(Bookings::StartDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Bookings {
    Table,
    Id,
    StartDate,
    EndDate,
    ItemId,
    BookerId,
    Status,
}
