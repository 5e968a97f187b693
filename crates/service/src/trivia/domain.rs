use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

/// Submitted question; every field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i32>,
    pub difficulty: Option<i32>,
}

/// Validated question ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionFilter {
    All,
    Category(i32),
    /// Case-insensitive substring of the question text.
    Search(String),
}

/// One page of questions as returned by the listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: u64,
    pub current_category: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategory {
    /// `0` plays every category.
    #[serde(default)]
    pub id: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i32>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

impl QuizRequest {
    pub fn category(&self) -> Option<i32> {
        self.quiz_category.map(|c| c.id).filter(|id| *id != 0)
    }
}

impl From<models::category::Model> for Category {
    fn from(m: models::category::Model) -> Self { Self { id: m.id, kind: m.kind } }
}

impl From<models::question::Model> for Question {
    fn from(m: models::question::Model) -> Self {
        Self { id: m.id, question: m.question, answer: m.answer, category: m.category, difficulty: m.difficulty }
    }
}
