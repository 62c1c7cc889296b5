//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Stable external identity issued by the auth provider
    #[sea_orm(unique)]
    pub uid: String,

    /// Display name
    pub name: String,

    #[sea_orm(nullable)]
    pub email: Option<String>,

    /// Avatar URL
    #[sea_orm(nullable)]
    pub profile_img: Option<String>,

    #[sea_orm(nullable)]
    pub gender: Option<String>,

    #[sea_orm(nullable)]
    pub age: Option<i32>,

    /// False once the account has been deactivated
    #[sea_orm(default_value = true)]
    pub is_active: bool,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::love::Entity")]
    Loves,
}

impl Related<super::love::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loves.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
