use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "homes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub house_name: String,

    pub price: f64,

    pub location: String,

    pub rating: f64,

    pub description: Option<String>,

    /// Storage path of the listing photo, relative to the upload directory.
    pub photo: String,

    /// Optional storage path of the house-rules document (image or PDF).
    pub rules_document: Option<String>,

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

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::favourites::Relation::Users.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::favourites::Relation::Homes.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
