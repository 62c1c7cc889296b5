//! Create love table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Love::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Love::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Love::UserUid).string_len(128).not_null())
                    .col(ColumnDef::new(Love::PictureId).big_integer().not_null())
                    .col(ColumnDef::new(Love::IsActive).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Love::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Love::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_love_user")
                            .from(Love::Table, Love::UserUid)
                            .to(User::Table, User::Uid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_uid, picture_id) - one love per user per picture
        manager
            .create_index(
                Index::create()
                    .name("idx_love_user_picture")
                    .table(Love::Table)
                    .col(Love::UserUid)
                    .col(Love::PictureId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: picture_id (for the picture-removal cascade)
        manager
            .create_index(
                Index::create()
                    .name("idx_love_picture_id")
                    .table(Love::Table)
                    .col(Love::PictureId)
                    .to_owned(),
            )
            .await?;

        // Index: user_uid (for listing a user's loves)
        manager
            .create_index(
                Index::create()
                    .name("idx_love_user_uid")
                    .table(Love::Table)
                    .col(Love::UserUid)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for ordered listings)
        manager
            .create_index(
                Index::create()
                    .name("idx_love_created_at")
                    .table(Love::Table)
                    .col(Love::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Love::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Love {
    Table,
    Id,
    UserUid,
    PictureId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Uid,
}
