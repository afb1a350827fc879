//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use portal_core::domain::PostType;

/// Stored form of [`PostType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PostKind {
    #[sea_orm(string_value = "blog")]
    Blog,
    #[sea_orm(string_value = "research")]
    Research,
}

impl From<PostType> for PostKind {
    fn from(value: PostType) -> Self {
        match value {
            PostType::Blog => PostKind::Blog,
            PostType::Research => PostKind::Research,
        }
    }
}

impl From<PostKind> for PostType {
    fn from(value: PostKind) -> Self {
        match value {
            PostKind::Blog => PostType::Blog,
            PostKind::Research => PostType::Research,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub post_type: PostKind,
    pub tags: Vec<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub likes: i64,
    pub views: i64,
    pub is_published: bool,
    pub reading_time: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for portal_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            author_id: model.author_id,
            author_name: model.author_name,
            post_type: model.post_type.into(),
            tags: model.tags,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            likes: model.likes,
            views: model.views,
            is_published: model.is_published,
            reading_time: model.reading_time,
            summary: model.summary,
        }
    }
}

impl From<portal_core::domain::Post> for ActiveModel {
    fn from(post: portal_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            author_id: Set(post.author_id),
            author_name: Set(post.author_name),
            post_type: Set(post.post_type.into()),
            tags: Set(post.tags),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
            likes: Set(post.likes),
            views: Set(post.views),
            is_published: Set(post.is_published),
            reading_time: Set(post.reading_time),
            summary: Set(post.summary),
        }
    }
}
