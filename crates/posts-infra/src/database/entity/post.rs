//! Post entity for SeaORM.

use sea_orm::{FromQueryResult, Set};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub owner_id: String,
    pub category_id: i32,
    pub topic_id: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post (no category join).
impl From<Model> for posts_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            message: model.message,
            owner_id: model.owner_id,
            category_id: model.category_id,
            category_name: None,
            topic_id: model.topic_id,
            created_at: model.created_at.into(),
            reply_count: None,
            replies: None,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<posts_core::domain::Post> for ActiveModel {
    fn from(post: posts_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            message: Set(post.message),
            owner_id: Set(post.owner_id),
            category_id: Set(post.category_id),
            topic_id: Set(post.topic_id),
            created_at: Set(post.created_at.into()),
        }
    }
}

/// A post row joined with its category name.
#[derive(Debug, Clone, FromQueryResult)]
pub struct PostWithCategory {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub owner_id: String,
    pub category_id: i32,
    pub topic_id: i64,
    pub created_at: DateTimeWithTimeZone,
    pub category_name: Option<String>,
}

impl From<PostWithCategory> for posts_core::domain::Post {
    fn from(row: PostWithCategory) -> Self {
        Self {
            id: row.id,
            title: row.title,
            message: row.message,
            owner_id: row.owner_id,
            category_id: row.category_id,
            category_name: row.category_name,
            topic_id: row.topic_id,
            created_at: row.created_at.into(),
            reply_count: None,
            replies: None,
        }
    }
}
