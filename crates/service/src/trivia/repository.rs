use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait};

use models::{category, question};

use super::domain::{Category, Question, QuestionDraft, QuestionFilter};
use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::query::{self, ListFilter, PageResult};

/// Persistence for questions and categories.
#[async_trait]
pub trait TriviaRepository: Send + Sync {
    async fn categories(&self) -> Result<Vec<Category>, ServiceError>;
    async fn find_question(&self, id: i32) -> Result<Option<Question>, ServiceError>;
    async fn list_questions(&self, filter: QuestionFilter, page: Option<Pagination>) -> Result<PageResult<Question>, ServiceError>;
    async fn count_questions(&self) -> Result<u64, ServiceError>;
    async fn insert_question(&self, draft: QuestionDraft) -> Result<Question, ServiceError>;
    async fn delete_question(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmTriviaRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmTriviaRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn question_filter(filter: QuestionFilter) -> ListFilter<question::Column> {
    match filter {
        QuestionFilter::All => ListFilter::All,
        QuestionFilter::Category(id) => ListFilter::Eq(question::Column::Category, id.into()),
        QuestionFilter::Search(term) => ListFilter::Contains(question::Column::Question, term),
    }
}

#[async_trait]
impl TriviaRepository for SeaOrmTriviaRepository {
    async fn categories(&self) -> Result<Vec<Category>, ServiceError> {
        let rows = category::Entity::find().all(&self.db).await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_question(&self, id: i32) -> Result<Option<Question>, ServiceError> {
        let found = question::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Question::from))
    }

    async fn list_questions(&self, filter: QuestionFilter, page: Option<Pagination>) -> Result<PageResult<Question>, ServiceError> {
        let res = query::list::<question::Entity, _>(&self.db, &question_filter(filter), page).await?;
        Ok(res.map(Question::from))
    }

    async fn count_questions(&self) -> Result<u64, ServiceError> {
        Ok(question::Entity::find().count(&self.db).await?)
    }

    async fn insert_question(&self, draft: QuestionDraft) -> Result<Question, ServiceError> {
        // Dropping an uncommitted transaction rolls it back and releases the connection.
        let txn = self.db.begin().await?;
        let am = question::ActiveModel {
            question: Set(draft.question),
            answer: Set(draft.answer),
            category: Set(draft.category),
            difficulty: Set(draft.difficulty),
            ..Default::default()
        };
        let created = am.insert(&txn).await?;
        txn.commit().await?;
        Ok(created.into())
    }

    async fn delete_question(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        let res = question::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }
}
