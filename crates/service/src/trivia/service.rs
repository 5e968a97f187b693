use std::collections::BTreeMap;
use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, info, instrument};

use super::domain::{NewQuestion, Question, QuestionDraft, QuestionFilter, QuestionPage, QuizRequest};
use super::repository::TriviaRepository;
use crate::errors::ServiceError;
use crate::pagination::{Pagination, ITEMS_PER_PAGE};

/// Trivia business service independent of web framework
pub struct TriviaService<R: TriviaRepository> {
    repo: Arc<R>,
    per_page: u32,
}

impl<R: TriviaRepository> TriviaService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo, per_page: ITEMS_PER_PAGE } }

    pub fn with_page_size(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Category id to name map; serializes with string keys.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<BTreeMap<i32, String>, ServiceError> {
        let cats = self.repo.categories().await?;
        Ok(cats.into_iter().map(|c| (c.id, c.kind)).collect())
    }

    #[instrument(skip(self))]
    pub async fn questions_page(&self, page: u32) -> Result<QuestionPage, ServiceError> {
        self.page_of(QuestionFilter::All, page).await
    }

    /// First page of questions whose text contains `term`, ignoring case.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<QuestionPage, ServiceError> {
        self.page_of(QuestionFilter::Search(term.to_string()), 1).await
    }

    #[instrument(skip(self))]
    pub async fn questions_for_category(&self, category_id: i32, page: u32) -> Result<QuestionPage, ServiceError> {
        self.page_of(QuestionFilter::Category(category_id), page).await
    }

    async fn page_of(&self, filter: QuestionFilter, page: u32) -> Result<QuestionPage, ServiceError> {
        let res = self.repo.list_questions(filter, Some(Pagination::new(page, self.per_page))).await?;
        if res.is_empty() {
            debug!(page, total = res.total, "empty page");
            return Err(ServiceError::NotFound("no questions on this page".into()));
        }
        let current_category = res.items.first().map(|q| q.category);
        Ok(QuestionPage { questions: res.items, total_questions: res.total, current_category })
    }

    /// Store a new question and report the new total.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewQuestion) -> Result<(Question, u64), ServiceError> {
        let draft = validate_new(input)?;
        let created = self.repo.insert_question(draft).await?;
        let total = self.repo.count_questions().await?;
        info!(question_id = created.id, category = created.category, "question_created");
        Ok((created, total))
    }

    /// Delete a question; the reported total is counted after the delete.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(i32, u64), ServiceError> {
        if self.repo.find_question(id).await?.is_none() {
            return Err(ServiceError::not_found("question"));
        }
        if !self.repo.delete_question(id).await? {
            return Err(ServiceError::not_found("question"));
        }
        let total = self.repo.count_questions().await?;
        info!(question_id = id, total, "question_deleted");
        Ok((id, total))
    }

    /// Random question from the requested category (all when `0`) that is
    /// not in `previous_questions`; `None` once the pool is exhausted.
    #[instrument(skip(self, req), fields(asked = req.previous_questions.len()))]
    pub async fn next_quiz_question(&self, req: &QuizRequest) -> Result<Option<Question>, ServiceError> {
        let filter = match req.category() {
            Some(id) => QuestionFilter::Category(id),
            None => QuestionFilter::All,
        };
        let pool = self.repo.list_questions(filter, None).await?;
        let candidates: Vec<Question> = pool
            .items
            .into_iter()
            .filter(|q| !req.previous_questions.contains(&q.id))
            .collect();
        let picked = candidates.choose(&mut rand::thread_rng()).cloned();
        debug!(remaining = candidates.len(), "quiz_pick");
        Ok(picked)
    }
}

fn validate_new(input: NewQuestion) -> Result<QuestionDraft, ServiceError> {
    let question = input.question.ok_or_else(|| models::errors::ModelError::required("question"))?;
    let answer = input.answer.ok_or_else(|| models::errors::ModelError::required("answer"))?;
    let category = input.category.ok_or_else(|| models::errors::ModelError::required("category"))?;
    let difficulty = input.difficulty.ok_or_else(|| models::errors::ModelError::required("difficulty"))?;
    models::question::validate(&question, &answer, difficulty)?;
    Ok(QuestionDraft { question, answer, category, difficulty })
}
