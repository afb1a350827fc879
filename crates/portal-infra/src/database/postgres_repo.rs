//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::{PgExpr, PgFunc};
use sea_orm::sea_query::{Alias, Expr, Func, OnConflict, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use portal_core::domain::{AuthorStats, Comment, Post, PostQuery, User};
use portal_core::error::RepoError;
use portal_core::ports::{
    CommentRepository, LikeRepository, PostRepository, UserRepository, WaitlistRepository,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::like::{self, Entity as LikeEntity};
use super::entity::post::{self, Entity as PostEntity, PostKind};
use super::entity::user::{self, Entity as UserEntity};
use super::entity::waitlist::Entity as WaitlistEntity;
use super::mask_email;
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL like repository.
pub type PostgresLikeRepository = PostgresBaseRepository<LikeEntity>;

/// PostgreSQL waitlist repository.
pub type PostgresWaitlistRepository = PostgresBaseRepository<WaitlistEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Email.eq(email))
                    .add(user::Column::Username.eq(username)),
            )
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }
}

#[derive(Debug, FromQueryResult)]
struct AuthorTotalsRow {
    posts: i64,
    likes: i64,
    views: i64,
}

/// `CAST(COALESCE(SUM(col), 0) AS BIGINT)`; SUM over BIGINT yields NUMERIC.
fn summed(column: post::Column) -> SimpleExpr {
    Func::cast_as(
        Func::coalesce([Func::sum(Expr::col(column)).into(), Expr::val(0i64).into()]),
        Alias::new("BIGINT"),
    )
    .into()
}

/// Postgres binds LIMIT/OFFSET as BIGINT.
fn page_bound(n: u64) -> u64 {
    n.min(i64::MAX as u64)
}

/// Escape LIKE metacharacters so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, query: PostQuery) -> Result<Vec<Post>, RepoError> {
        let mut select = PostEntity::find();
        if let Some(post_type) = query.post_type {
            select = select.filter(post::Column::PostType.eq(PostKind::from(post_type)));
        }

        let result = select
            .order_by_desc(post::Column::CreatedAt)
            .offset(page_bound(query.skip))
            .limit(page_bound(query.limit))
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn search(&self, term: &str, limit: u64) -> Result<Vec<Post>, RepoError> {
        let pattern = like_pattern(term);

        let result = PostEntity::find()
            .filter(
                Condition::any()
                    .add(Expr::col(post::Column::Title).ilike(pattern.clone()))
                    .add(Expr::col(post::Column::Content).ilike(pattern))
                    .add(Expr::val(term).eq(PgFunc::any(Expr::col(post::Column::Tags)))),
            )
            .order_by_desc(post::Column::CreatedAt)
            .limit(page_bound(limit))
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let updated = PostEntity::update_many()
            .col_expr(post::Column::Views, Expr::col(post::Column::Views).add(1))
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(updated.into_iter().next().map(Into::into))
    }

    async fn adjust_likes(&self, id: Uuid, delta: i64) -> Result<bool, RepoError> {
        let result = PostEntity::update_many()
            .col_expr(post::Column::Likes, Expr::col(post::Column::Likes).add(delta))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.rows_affected > 0)
    }

    async fn author_stats(&self, author_id: Uuid) -> Result<AuthorStats, RepoError> {
        let row = PostEntity::find()
            .select_only()
            .column_as(Expr::col(post::Column::Id).count(), "posts")
            .column_as(summed(post::Column::Likes), "likes")
            .column_as(summed(post::Column::Views), "views")
            .filter(post::Column::AuthorId.eq(author_id))
            .into_model::<AuthorTotalsRow>()
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(row
            .map(|row| AuthorStats {
                posts: u64::try_from(row.posts).unwrap_or_default(),
                likes: row.likes,
                views: row.views,
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: Uuid, limit: u64) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .limit(page_bound(limit))
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn insert_if_absent(&self, like: portal_core::domain::Like) -> Result<bool, RepoError> {
        let inserted = LikeEntity::insert(like::ActiveModel::from(like))
            .on_conflict(
                OnConflict::columns([like::Column::UserId, like::Column::PostId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(inserted > 0)
    }

    async fn remove_post_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, RepoError> {
        let result = LikeEntity::delete_many()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.rows_affected > 0)
    }
}

impl WaitlistRepository for PostgresWaitlistRepository {}
