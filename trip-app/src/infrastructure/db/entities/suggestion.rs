use crate::domain::Category;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suggestions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub place_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub category: String,
    pub link: Option<String>,
    pub cost_estimate: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::place::Entity",
        from = "Column::PlaceId",
        to = "super::place::Column::Id",
        on_delete = "Cascade"
    )]
    Place,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Creator,
    #[sea_orm(has_many = "super::vote::Entity")]
    Votes,
}

impl Related<super::place::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Place.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Suggestion {
    fn from(m: Model) -> Self {
        let category = m.category.parse().unwrap_or_else(|_| {
            tracing::warn!(suggestion_id = %m.id, "Unknown category in store: {}", m.category);
            Category::Other
        });
        Self {
            id: m.id,
            place_id: m.place_id,
            title: m.title,
            description: m.description,
            category,
            link: m.link,
            cost_estimate: m.cost_estimate,
            created_by: m.created_by,
            created_at: m.created_at,
        }
    }
}
