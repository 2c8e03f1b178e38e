use sea_orm::entity::prelude::*;

/// User-to-home bookmark. The autoincrement id preserves insertion order;
/// a unique index on (user_id, home_id) suppresses duplicates.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "favourites")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub user_id: i32,

    pub home_id: i32,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::homes::Entity",
        from = "Column::HomeId",
        to = "super::homes::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Homes,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::homes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Homes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
