//! 作答状态机：in_progress -> submitted | expired
//!
//! 任何读取都会先结算已超时的作答。

use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};

use super::grading::{
    check_available, compute_expiry, grade, is_past_deadline, questions_for_attempt,
    remaining_seconds, retain_known_answers,
};
use super::{QuizService, load_quiz};
use crate::models::{
    ApiResponse, ErrorCode,
    quizzes::{
        entities::{AnswerSheet, AttemptStatus, Quiz, QuizAttempt},
        requests::{
            AttemptListParams, AttemptListQuery, FinalizeAttempt, NewAttempt, SaveAnswersRequest,
        },
        responses::{AttemptListResponse, AttemptResponse, AttemptSummary},
    },
    users::entities::User,
};
use crate::services::access::ClassAccess;
use crate::services::{Reply, current_user, internal, reject};
use crate::storage::Storage;

fn attempt_not_found() -> HttpResponse {
    reject(
        StatusCode::NOT_FOUND,
        ErrorCode::QuizAttemptNotFound,
        "Attempt not found",
    )
}

fn attempt_closed() -> HttpResponse {
    reject(
        StatusCode::CONFLICT,
        ErrorCode::QuizAttemptClosed,
        "Attempt is already finished",
    )
}

fn to_response(quiz: &Quiz, attempt: QuizAttempt, now: DateTime<Utc>) -> AttemptResponse {
    let in_progress = attempt.status == AttemptStatus::InProgress;
    AttemptResponse {
        percentage: attempt.percentage(),
        questions: in_progress.then(|| questions_for_attempt(quiz, attempt.id)),
        remaining_seconds: if in_progress {
            remaining_seconds(&attempt, now)
        } else {
            None
        },
        server_time: now,
        attempt,
    }
}

/// 按给定作答判分并结束；并发结束时返回最新记录
async fn finalize(
    storage: &dyn Storage,
    quiz: &Quiz,
    attempt: QuizAttempt,
    mut answers: AnswerSheet,
    status: AttemptStatus,
    now: DateTime<Utc>,
) -> Result<QuizAttempt, HttpResponse> {
    retain_known_answers(&quiz.questions, &mut answers);
    let (score, results) = grade(&quiz.questions, &answers);

    let finalized = storage
        .finalize_attempt(
            attempt.id,
            FinalizeAttempt {
                status,
                answers,
                score,
                results,
                submitted_at: now,
            },
        )
        .await
        .map_err(internal("Failed to finalize attempt"))?;

    match finalized {
        Some(done) => {
            tracing::info!(
                "Attempt {} of quiz {} finalized as {} ({}/{})",
                done.id,
                quiz.id,
                done.status,
                score,
                done.max_score
            );
            Ok(done)
        }
        None => storage
            .get_attempt_by_id(attempt.id)
            .await
            .map_err(internal("Failed to reload attempt"))?
            .ok_or_else(attempt_not_found),
    }
}

/// 超时的进行中作答按已保存答案结算为 expired
async fn settle(
    storage: &dyn Storage,
    quiz: &Quiz,
    attempt: QuizAttempt,
    now: DateTime<Utc>,
) -> Result<QuizAttempt, HttpResponse> {
    if attempt.status == AttemptStatus::InProgress && is_past_deadline(&attempt, now) {
        let saved = attempt.answers.clone();
        finalize(storage, quiz, attempt, saved, AttemptStatus::Expired, now).await
    } else {
        Ok(attempt)
    }
}

/// 加载作答；学生只能访问自己的作答
async fn load_attempt(
    storage: &dyn Storage,
    user: &User,
    attempt_id: i64,
) -> Result<(QuizAttempt, Quiz, ClassAccess), HttpResponse> {
    let attempt = storage
        .get_attempt_by_id(attempt_id)
        .await
        .map_err(internal("Failed to get attempt"))?
        .ok_or_else(attempt_not_found)?;
    let (quiz, _, access) = load_quiz(storage, user, attempt.quiz_id).await?;
    if attempt.student_id != user.id && !access.can_manage_content() {
        return Err(attempt_not_found());
    }
    Ok((attempt, quiz, access))
}

pub async fn start_attempt(service: &QuizService, request: &HttpRequest, quiz_id: i64) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let now = Utc::now();

    let (quiz, _, access) = load_quiz(storage.as_ref(), &user, quiz_id).await?;
    if !access.is_student() {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "Only students of this class can take quizzes",
        ));
    }

    // 继续未结束的作答
    let existing = storage
        .get_in_progress_attempt(quiz.id, user.id)
        .await
        .map_err(internal("Failed to load attempt"))?;
    if let Some(existing) = existing {
        let settled = settle(storage.as_ref(), &quiz, existing, now).await?;
        if settled.status == AttemptStatus::InProgress {
            return Ok(HttpResponse::Ok().json(ApiResponse::success(
                to_response(&quiz, settled, now),
                "Attempt resumed",
            )));
        }
    }

    check_available(&quiz, now)
        .map_err(|msg| reject(StatusCode::CONFLICT, ErrorCode::QuizNotAvailable, msg))?;

    let used = storage
        .count_attempts(quiz.id, user.id)
        .await
        .map_err(internal("Failed to count attempts"))?;
    if used >= i64::from(quiz.max_attempts) {
        return Err(reject(
            StatusCode::CONFLICT,
            ErrorCode::QuizAttemptLimitReached,
            format!("All {} attempts have been used", quiz.max_attempts),
        ));
    }

    let attempt = storage
        .create_attempt(NewAttempt {
            quiz_id: quiz.id,
            student_id: user.id,
            attempt_number: used as i32 + 1,
            max_score: quiz.total_points(),
            started_at: now,
            expires_at: compute_expiry(&quiz, now),
        })
        .await
        .map_err(internal("Failed to start attempt"))?;

    tracing::info!(
        "Student {} started attempt {} of quiz {}",
        user.id,
        attempt.attempt_number,
        quiz.id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        to_response(&quiz, attempt, now),
        "Attempt started",
    )))
}

pub async fn get_attempt(service: &QuizService, request: &HttpRequest, attempt_id: i64) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let now = Utc::now();

    let (attempt, quiz, _) = load_attempt(storage.as_ref(), &user, attempt_id).await?;
    let attempt = settle(storage.as_ref(), &quiz, attempt, now).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        to_response(&quiz, attempt, now),
        "Attempt retrieved successfully",
    )))
}

pub async fn save_answers(
    service: &QuizService,
    request: &HttpRequest,
    attempt_id: i64,
    answers: SaveAnswersRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let now = Utc::now();

    let (attempt, quiz, _) = load_attempt(storage.as_ref(), &user, attempt_id).await?;
    if attempt.student_id != user.id {
        return Err(attempt_not_found());
    }
    let attempt = settle(storage.as_ref(), &quiz, attempt, now).await?;
    if attempt.status != AttemptStatus::InProgress {
        return Err(attempt_closed());
    }

    let mut sheet = answers.answers;
    retain_known_answers(&quiz.questions, &mut sheet);
    let saved = storage
        .save_attempt_answers(attempt.id, sheet)
        .await
        .map_err(internal("Failed to save answers"))?
        .ok_or_else(attempt_closed)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        to_response(&quiz, saved, now),
        "Answers saved",
    )))
}

/// 宽限期内按提交的答案判分；超时后只认已保存的答案
pub async fn submit_attempt(
    service: &QuizService,
    request: &HttpRequest,
    attempt_id: i64,
    answers: SaveAnswersRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let now = Utc::now();

    let (attempt, quiz, _) = load_attempt(storage.as_ref(), &user, attempt_id).await?;
    if attempt.student_id != user.id {
        return Err(attempt_not_found());
    }
    if attempt.status != AttemptStatus::InProgress {
        return Err(attempt_closed());
    }

    let finished = if is_past_deadline(&attempt, now) {
        let saved = attempt.answers.clone();
        finalize(storage.as_ref(), &quiz, attempt, saved, AttemptStatus::Expired, now).await?
    } else {
        let mut merged = attempt.answers.clone();
        merged.extend(answers.answers);
        finalize(storage.as_ref(), &quiz, attempt, merged, AttemptStatus::Submitted, now).await?
    };

    let message = match finished.status {
        AttemptStatus::Expired => "Time was up; saved answers were graded",
        _ => "Attempt submitted",
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        to_response(&quiz, finished, now),
        message,
    )))
}

/// 教师看到全部作答（可按学生过滤），学生只看到自己的
pub async fn list_attempts(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    query: AttemptListParams,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let now = Utc::now();

    let (quiz, _, access) = load_quiz(storage.as_ref(), &user, quiz_id).await?;
    let student_id = if access.can_manage_content() {
        query.student_id
    } else {
        Some(user.id)
    };

    let page = storage
        .list_attempts_with_pagination(AttemptListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            quiz_id: quiz.id,
            student_id,
        })
        .await
        .map_err(internal("Failed to list attempts"))?;

    let student_ids: Vec<i64> = page.items.iter().map(|a| a.student_id).collect();
    let students: HashMap<i64, User> = storage
        .get_users_by_ids(&student_ids)
        .await
        .map_err(internal("Failed to load students"))?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let mut items = Vec::with_capacity(page.items.len());
    for attempt in page.items {
        let attempt = settle(storage.as_ref(), &quiz, attempt, now).await?;
        items.push(AttemptSummary {
            percentage: attempt.percentage(),
            student: students.get(&attempt.student_id).map(User::summary),
            attempt,
        });
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AttemptListResponse {
            items,
            pagination: page.pagination,
        },
        "Attempts retrieved successfully",
    )))
}
