pub mod check;
pub mod create;
pub mod list;
pub mod manage;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{declare_service, finish, internal, reject};
use crate::models::{
    ErrorCode,
    practice::{
        entities::PracticeQuestion,
        requests::{
            CheckAnswerRequest, CreatePracticeQuestionRequest, PracticeListParams,
            RandomPracticeParams, UpdatePracticeQuestionRequest,
        },
    },
    users::entities::User,
};
use crate::storage::Storage;

declare_service!(PracticeService);

const TOPIC_MAX: usize = 64;

impl PracticeService {
    pub async fn list_questions(
        &self,
        request: &HttpRequest,
        query: PracticeListParams,
    ) -> ActixResult<HttpResponse> {
        finish(list::list_questions(self, request, query).await)
    }

    // 随机抽题
    pub async fn random_questions(
        &self,
        request: &HttpRequest,
        query: RandomPracticeParams,
    ) -> ActixResult<HttpResponse> {
        finish(list::random_questions(self, request, query).await)
    }

    pub async fn list_topics(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        finish(list::list_topics(self, request).await)
    }

    pub async fn create_question(
        &self,
        request: &HttpRequest,
        question: CreatePracticeQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        finish(create::create_question(self, request, question).await)
    }

    pub async fn get_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(manage::get_question(self, request, question_id).await)
    }

    pub async fn update_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
        update: UpdatePracticeQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        finish(manage::update_question(self, request, question_id, update).await)
    }

    pub async fn delete_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(manage::delete_question(self, request, question_id).await)
    }

    pub async fn check_answer(
        &self,
        request: &HttpRequest,
        question_id: i64,
        answer: CheckAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        finish(check::check_answer(self, request, question_id, answer).await)
    }
}

/// 可见的班级范围，管理员为空（全部可见）
pub(super) async fn visible_class_ids(
    storage: &dyn Storage,
    user: &User,
) -> Result<Option<Vec<i64>>, HttpResponse> {
    if user.is_admin() {
        return Ok(None);
    }
    storage
        .list_user_class_ids(user.id)
        .await
        .map(Some)
        .map_err(internal("Failed to load classes"))
}

fn is_visible(question: &PracticeQuestion, visible: Option<&[i64]>) -> bool {
    match (question.class_id, visible) {
        (None, _) | (_, None) => true,
        (Some(class_id), Some(ids)) => ids.contains(&class_id),
    }
}

/// 作者与管理员可以看到答案并编辑
pub(super) fn can_edit(user: &User, question: &PracticeQuestion) -> bool {
    user.is_admin() || question.created_by == user.id
}

pub(super) async fn load_visible_question(
    storage: &dyn Storage,
    user: &User,
    question_id: i64,
) -> Result<PracticeQuestion, HttpResponse> {
    let not_found = || {
        reject(
            StatusCode::NOT_FOUND,
            ErrorCode::PracticeQuestionNotFound,
            "Practice question not found",
        )
    };
    let question = storage
        .get_practice_question_by_id(question_id)
        .await
        .map_err(internal("Failed to get practice question"))?
        .ok_or_else(not_found)?;
    let visible = visible_class_ids(storage, user).await?;
    if !is_visible(&question, visible.as_deref()) {
        return Err(not_found());
    }
    Ok(question)
}

pub(super) fn validate_topic(topic: &str) -> Result<(), HttpResponse> {
    crate::utils::validate::validate_required_text("Topic", topic, TOPIC_MAX)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::practice::entities::Difficulty;
    use crate::models::quizzes::entities::QuestionBody;
    use chrono::Utc;

    fn question(class_id: Option<i64>) -> PracticeQuestion {
        PracticeQuestion {
            id: 1,
            class_id,
            created_by: 1,
            topic: "loops".into(),
            difficulty: Difficulty::Easy,
            prompt: "?".into(),
            body: QuestionBody::TrueFalse { correct: true },
            explanation: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_visibility() {
        assert!(is_visible(&question(None), Some(&[])));
        assert!(is_visible(&question(Some(3)), None));
        assert!(is_visible(&question(Some(3)), Some(&[1, 3])));
        assert!(!is_visible(&question(Some(3)), Some(&[1])));
    }
}
