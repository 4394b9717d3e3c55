//! 测验的纯逻辑：题目校验、开放窗口、计时与判分
//!
//! 这里不访问存储，方便单独测试。

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::models::quizzes::entities::{
    AnswerSheet, PublicQuestion, QuestionResult, Quiz, QuizAttempt, QuizQuestion,
};

/// 截止后仍接受保存与交卷的秒数，抵消网络延迟
pub const GRACE_SECONDS: i64 = 30;

pub const MAX_QUESTIONS: usize = 200;
pub const MAX_TIME_LIMIT_MINUTES: i32 = 24 * 60;

/// 校验题目并为缺少 id 的题目生成 id
pub fn prepare_questions(mut questions: Vec<QuizQuestion>) -> Result<Vec<QuizQuestion>, String> {
    if questions.is_empty() {
        return Err("A quiz needs at least one question".into());
    }
    if questions.len() > MAX_QUESTIONS {
        return Err(format!("A quiz can have at most {MAX_QUESTIONS} questions"));
    }

    let mut seen = HashSet::new();
    for (index, question) in questions.iter_mut().enumerate() {
        let label = index + 1;
        if question.prompt.trim().is_empty() {
            return Err(format!("Question {label}: prompt must not be empty"));
        }
        if !(question.points.is_finite() && question.points > 0.0) {
            return Err(format!("Question {label}: points must be greater than 0"));
        }
        question
            .body
            .validate()
            .map_err(|e| format!("Question {label}: {e}"))?;

        if question.id.trim().is_empty() {
            question.id = uuid::Uuid::new_v4().simple().to_string()[..12].to_string();
        }
        if !seen.insert(question.id.clone()) {
            return Err(format!("Question {label}: duplicate id {}", question.id));
        }
    }
    Ok(questions)
}

/// 校验限时、次数与开放窗口
pub fn validate_settings(
    time_limit_minutes: Option<i32>,
    max_attempts: i32,
    available_from: Option<DateTime<Utc>>,
    available_until: Option<DateTime<Utc>>,
) -> Result<(), String> {
    if let Some(limit) = time_limit_minutes
        && !(1..=MAX_TIME_LIMIT_MINUTES).contains(&limit)
    {
        return Err(format!(
            "time_limit_minutes must be between 1 and {MAX_TIME_LIMIT_MINUTES}"
        ));
    }
    if max_attempts < 1 {
        return Err("max_attempts must be at least 1".into());
    }
    if let (Some(from), Some(until)) = (available_from, available_until)
        && from >= until
    {
        return Err("available_from must be before available_until".into());
    }
    Ok(())
}

/// 当前时刻能否开始作答
pub fn check_available(quiz: &Quiz, now: DateTime<Utc>) -> Result<(), &'static str> {
    if !quiz.published {
        return Err("Quiz is not published");
    }
    if quiz.available_from.is_some_and(|from| now < from) {
        return Err("Quiz is not open yet");
    }
    if quiz.available_until.is_some_and(|until| now > until) {
        return Err("Quiz is closed");
    }
    Ok(())
}

/// 作答截止时间：开始时间加限时，且不晚于测验关闭时间
pub fn compute_expiry(quiz: &Quiz, started_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let by_limit = quiz
        .time_limit_minutes
        .map(|minutes| started_at + Duration::minutes(i64::from(minutes)));
    match (by_limit, quiz.available_until) {
        (Some(limit), Some(until)) => Some(limit.min(until)),
        (limit, until) => limit.or(until),
    }
}

/// 已超过截止时间加宽限
pub fn is_past_deadline(attempt: &QuizAttempt, now: DateTime<Utc>) -> bool {
    attempt
        .expires_at
        .is_some_and(|expires| now > expires + Duration::seconds(GRACE_SECONDS))
}

pub fn remaining_seconds(attempt: &QuizAttempt, now: DateTime<Utc>) -> Option<i64> {
    attempt
        .expires_at
        .map(|expires| (expires - now).num_seconds().max(0))
}

/// 逐题判分，未作答的题记 0 分
pub fn grade(questions: &[QuizQuestion], answers: &AnswerSheet) -> (f64, Vec<QuestionResult>) {
    let results: Vec<QuestionResult> = questions
        .iter()
        .map(|question| {
            let correct = answers
                .get(&question.id)
                .is_some_and(|answer| question.body.is_correct(answer));
            QuestionResult {
                question_id: question.id.clone(),
                correct,
                points_awarded: if correct { question.points } else { 0.0 },
            }
        })
        .collect();
    let score = results.iter().map(|r| r.points_awarded).sum();
    (score, results)
}

/// 只保留属于该测验的作答
pub fn retain_known_answers(questions: &[QuizQuestion], answers: &mut AnswerSheet) {
    let ids: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
    answers.retain(|id, _| ids.contains(id.as_str()));
}

/// 交给学生的题目；乱序时以作答 id 为种子，同一次作答顺序固定
pub fn questions_for_attempt(quiz: &Quiz, attempt_id: i64) -> Vec<PublicQuestion> {
    let mut questions: Vec<PublicQuestion> =
        quiz.questions.iter().map(QuizQuestion::redacted).collect();
    if quiz.shuffle_questions {
        let mut rng = StdRng::seed_from_u64(attempt_id.unsigned_abs());
        questions.shuffle(&mut rng);
    }
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::entities::{AnswerValue, AttemptStatus, QuestionBody};

    fn question(id: &str, points: f64, body: QuestionBody) -> QuizQuestion {
        QuizQuestion {
            id: id.into(),
            prompt: format!("prompt {id}"),
            points,
            body,
        }
    }

    fn sample_questions() -> Vec<QuizQuestion> {
        vec![
            question(
                "q1",
                2.0,
                QuestionBody::SingleChoice {
                    options: vec!["a".into(), "b".into()],
                    correct: 1,
                },
            ),
            question(
                "q2",
                3.0,
                QuestionBody::MultipleChoice {
                    options: vec!["a".into(), "b".into(), "c".into()],
                    correct: vec![0, 2],
                },
            ),
            question("q3", 1.0, QuestionBody::TrueFalse { correct: false }),
            question(
                "q4",
                4.0,
                QuestionBody::ShortAnswer {
                    accepted: vec!["Rust".into()],
                    case_sensitive: false,
                },
            ),
        ]
    }

    fn quiz(questions: Vec<QuizQuestion>) -> Quiz {
        let now = Utc::now();
        Quiz {
            id: 1,
            class_id: 1,
            created_by: 1,
            title: "Quiz".into(),
            description: None,
            time_limit_minutes: None,
            max_attempts: 1,
            available_from: None,
            available_until: None,
            shuffle_questions: false,
            published: true,
            questions,
            created_at: now,
            updated_at: now,
        }
    }

    fn attempt(expires_at: Option<DateTime<Utc>>) -> QuizAttempt {
        QuizAttempt {
            id: 9,
            quiz_id: 1,
            student_id: 2,
            attempt_number: 1,
            status: AttemptStatus::InProgress,
            answers: AnswerSheet::new(),
            score: None,
            max_score: 10.0,
            results: None,
            started_at: Utc::now(),
            expires_at,
            submitted_at: None,
        }
    }

    #[test]
    fn test_grade_mixed_answers() {
        let questions = sample_questions();
        let mut answers = AnswerSheet::new();
        answers.insert("q1".into(), AnswerValue::Choice(1));
        answers.insert("q2".into(), AnswerValue::Choices(vec![0]));
        answers.insert("q3".into(), AnswerValue::Bool(false));
        answers.insert("q4".into(), AnswerValue::Text(" rust ".into()));

        let (score, results) = grade(&questions, &answers);
        assert_eq!(score, 7.0);
        assert_eq!(results.len(), 4);
        assert!(!results[1].correct);
        assert_eq!(results[3].points_awarded, 4.0);
    }

    #[test]
    fn test_grade_unanswered_is_zero() {
        let (score, results) = grade(&sample_questions(), &AnswerSheet::new());
        assert_eq!(score, 0.0);
        assert!(results.iter().all(|r| !r.correct));
    }

    #[test]
    fn test_prepare_questions_assigns_ids() {
        let mut questions = sample_questions();
        questions[0].id.clear();
        let prepared = prepare_questions(questions).unwrap();
        assert_eq!(prepared[0].id.len(), 12);

        let mut dup = sample_questions();
        dup[1].id = "q1".into();
        assert!(prepare_questions(dup).is_err());

        let mut zero = sample_questions();
        zero[2].points = 0.0;
        assert!(prepare_questions(zero).is_err());

        assert!(prepare_questions(vec![]).is_err());
    }

    #[test]
    fn test_settings_validation() {
        let now = Utc::now();
        assert!(validate_settings(Some(30), 1, None, None).is_ok());
        assert!(validate_settings(Some(0), 1, None, None).is_err());
        assert!(validate_settings(None, 0, None, None).is_err());
        assert!(validate_settings(None, 1, Some(now), Some(now - Duration::hours(1))).is_err());
    }

    #[test]
    fn test_availability_window() {
        let now = Utc::now();
        let mut q = quiz(sample_questions());
        assert!(check_available(&q, now).is_ok());

        q.available_from = Some(now + Duration::minutes(5));
        assert!(check_available(&q, now).is_err());

        q.available_from = None;
        q.available_until = Some(now - Duration::minutes(5));
        assert!(check_available(&q, now).is_err());

        q.available_until = None;
        q.published = false;
        assert!(check_available(&q, now).is_err());
    }

    #[test]
    fn test_expiry_capped_by_close_time() {
        let now = Utc::now();
        let mut q = quiz(sample_questions());
        assert_eq!(compute_expiry(&q, now), None);

        q.time_limit_minutes = Some(30);
        assert_eq!(compute_expiry(&q, now), Some(now + Duration::minutes(30)));

        q.available_until = Some(now + Duration::minutes(10));
        assert_eq!(compute_expiry(&q, now), Some(now + Duration::minutes(10)));

        q.time_limit_minutes = None;
        assert_eq!(compute_expiry(&q, now), q.available_until);
    }

    #[test]
    fn test_grace_period() {
        let now = Utc::now();
        let a = attempt(Some(now - Duration::seconds(GRACE_SECONDS - 5)));
        assert!(!is_past_deadline(&a, now));
        assert_eq!(remaining_seconds(&a, now), Some(0));

        let late = attempt(Some(now - Duration::seconds(GRACE_SECONDS + 1)));
        assert!(is_past_deadline(&late, now));

        assert!(!is_past_deadline(&attempt(None), now));
    }

    #[test]
    fn test_shuffle_is_stable_per_attempt() {
        let mut q = quiz(sample_questions());
        let plain: Vec<String> = questions_for_attempt(&q, 5)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(plain, vec!["q1", "q2", "q3", "q4"]);

        q.shuffle_questions = true;
        let first = questions_for_attempt(&q, 42);
        let second = questions_for_attempt(&q, 42);
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_retain_known_answers() {
        let mut answers = AnswerSheet::new();
        answers.insert("q1".into(), AnswerValue::Choice(0));
        answers.insert("other".into(), AnswerValue::Bool(true));
        retain_known_answers(&sample_questions(), &mut answers);
        assert_eq!(answers.len(), 1);
        assert!(answers.contains_key("q1"));
    }
}
