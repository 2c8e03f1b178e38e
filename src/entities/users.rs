use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub first_name: String,

    pub last_name: String,

    /// Normalized (trimmed, lowercased) and unique across all accounts.
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// "guest" or "host"
    pub user_type: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favourites::Entity")]
    Favourites,
}

impl Related<super::favourites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favourites.def()
    }
}

impl Related<super::homes::Entity> for Entity {
    fn to() -> RelationDef {
        super::favourites::Relation::Homes.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::favourites::Relation::Users.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
