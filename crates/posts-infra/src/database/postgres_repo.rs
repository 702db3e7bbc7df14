//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::sea_query::JoinType;
use sea_orm::{
    ColumnTrait, DatabaseTransaction, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, RelationTrait, Select, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use posts_core::domain::Post;
use posts_core::error::RepoError;
use posts_core::ports::{PostRepository, PostTransaction};

use super::entity::discourse::{self, Entity as DiscourseEntity};
use super::entity::post::{self, Entity as PostEntity, PostWithCategory};
use super::entity::category;

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    #[cfg(test)]
    pub(crate) fn into_connection(self) -> DbConn {
        self.db
    }

    /// Post columns plus `category_name`, joined with the given join type.
    fn select_with_category(join: JoinType) -> Select<PostEntity> {
        PostEntity::find()
            .select_only()
            .columns([
                post::Column::Id,
                post::Column::Title,
                post::Column::Message,
                post::Column::OwnerId,
                post::Column::CategoryId,
                post::Column::TopicId,
                post::Column::CreatedAt,
            ])
            .column_as(category::Column::Name, "category_name")
            .join(join, post::Relation::Category.def())
    }
}

/// Classify a database error, surfacing unique violations as `Constraint`.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return RepoError::Constraint(detail);
    }
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn begin(&self) -> Result<Box<dyn PostTransaction>, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        Ok(Box::new(PostgresPostTransaction { txn }))
    }

    async fn find_all(&self, categories: Option<&[i32]>) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(?categories, "Retrieving posts from database");

        let mut query = Self::select_with_category(JoinType::LeftJoin);
        if let Some(ids) = categories {
            query = query.filter(post::Column::CategoryId.is_in(ids.iter().copied()));
        }

        let rows = query
            .into_model::<PostWithCategory>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let row = Self::select_with_category(JoinType::InnerJoin)
            .filter(post::Column::Id.eq(id))
            .into_model::<PostWithCategory>()
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let result = PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        // Leave the linkage rows alone when there was no post to delete.
        if result.rows_affected == 0 {
            txn.rollback().await.map_err(map_db_err)?;
            return Err(RepoError::NotFound);
        }

        let linkage = DiscourseEntity::delete_many()
            .filter(discourse::Column::AssetId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        tracing::debug!(post_id = %id, linkage_rows = linkage.rows_affected, "Deleted discourse linkage");

        txn.commit().await.map_err(map_db_err)?;
        Ok(())
    }

    async fn count_by_owner(&self, owner_id: &str) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::OwnerId.eq(owner_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}

/// Insert scope backed by a SeaORM transaction.
pub struct PostgresPostTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl PostTransaction for PostgresPostTransaction {
    async fn insert(&mut self, post: Post) -> Result<Post, RepoError> {
        tracing::debug!(post_id = %post.id, "Inserting post in database");

        let active_model: post::ActiveModel = post.clone().into();
        PostEntity::insert(active_model)
            .exec_without_returning(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(post)
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        self.txn.commit().await.map_err(map_db_err)
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepoError> {
        self.txn.rollback().await.map_err(map_db_err)
    }
}
