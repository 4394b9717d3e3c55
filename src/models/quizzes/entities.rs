use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
    pub enum QuestionKind ("题型") {
        SingleChoice = "single_choice",
        MultipleChoice = "multiple_choice",
        TrueFalse = "true_false",
        ShortAnswer = "short_answer",
    }
}

/// 题目内容与标准答案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub enum QuestionBody {
    SingleChoice {
        options: Vec<String>,
        correct: usize,
    },
    MultipleChoice {
        options: Vec<String>,
        correct: Vec<usize>,
    },
    TrueFalse {
        correct: bool,
    },
    ShortAnswer {
        accepted: Vec<String>,
        #[serde(default)]
        case_sensitive: bool,
    },
}

/// 作答：数字为单选下标，数组为多选下标，布尔为判断，字符串为简答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub enum AnswerValue {
    Choice(usize),
    Choices(Vec<usize>),
    Bool(bool),
    Text(String),
}

impl QuestionBody {
    pub fn kind(&self) -> QuestionKind {
        match self {
            QuestionBody::SingleChoice { .. } => QuestionKind::SingleChoice,
            QuestionBody::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            QuestionBody::TrueFalse { .. } => QuestionKind::TrueFalse,
            QuestionBody::ShortAnswer { .. } => QuestionKind::ShortAnswer,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            QuestionBody::SingleChoice { options, .. }
            | QuestionBody::MultipleChoice { options, .. } => Some(options),
            _ => None,
        }
    }

    /// 检查题目本身是否合法
    pub fn validate(&self) -> Result<(), String> {
        match self {
            QuestionBody::SingleChoice { options, correct } => {
                if options.len() < 2 {
                    return Err("single_choice needs at least 2 options".into());
                }
                if *correct >= options.len() {
                    return Err(format!("correct option {correct} is out of range"));
                }
            }
            QuestionBody::MultipleChoice { options, correct } => {
                if options.len() < 2 {
                    return Err("multiple_choice needs at least 2 options".into());
                }
                if correct.is_empty() {
                    return Err("multiple_choice needs at least one correct option".into());
                }
                if let Some(bad) = correct.iter().find(|i| **i >= options.len()) {
                    return Err(format!("correct option {bad} is out of range"));
                }
            }
            QuestionBody::TrueFalse { .. } => {}
            QuestionBody::ShortAnswer { accepted, .. } => {
                if accepted.iter().all(|a| a.trim().is_empty()) {
                    return Err("short_answer needs at least one accepted answer".into());
                }
            }
        }
        Ok(())
    }

    /// 判定作答是否正确。多选题要求选项集合完全一致
    pub fn is_correct(&self, answer: &AnswerValue) -> bool {
        match (self, answer) {
            (QuestionBody::SingleChoice { correct, .. }, AnswerValue::Choice(given)) => {
                given == correct
            }
            (QuestionBody::SingleChoice { correct, .. }, AnswerValue::Choices(given)) => {
                given.as_slice() == [*correct]
            }
            (QuestionBody::MultipleChoice { correct, .. }, AnswerValue::Choices(given)) => {
                let mut expected = correct.clone();
                expected.sort_unstable();
                expected.dedup();
                let mut given = given.clone();
                given.sort_unstable();
                given.dedup();
                expected == given
            }
            (QuestionBody::MultipleChoice { correct, .. }, AnswerValue::Choice(given)) => {
                correct.len() == 1 && correct[0] == *given
            }
            (QuestionBody::TrueFalse { correct }, AnswerValue::Bool(given)) => given == correct,
            (
                QuestionBody::ShortAnswer {
                    accepted,
                    case_sensitive,
                },
                AnswerValue::Text(given),
            ) => {
                let given = given.trim();
                accepted.iter().any(|a| {
                    if *case_sensitive {
                        a.trim() == given
                    } else {
                        a.trim().to_lowercase() == given.to_lowercase()
                    }
                })
            }
            _ => false,
        }
    }

    /// 标准答案（简答题取第一个可接受答案）
    pub fn expected_answer(&self) -> AnswerValue {
        match self {
            QuestionBody::SingleChoice { correct, .. } => AnswerValue::Choice(*correct),
            QuestionBody::MultipleChoice { correct, .. } => AnswerValue::Choices(correct.clone()),
            QuestionBody::TrueFalse { correct } => AnswerValue::Bool(*correct),
            QuestionBody::ShortAnswer { accepted, .. } => {
                AnswerValue::Text(accepted.first().cloned().unwrap_or_default())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizQuestion {
    /// 创建时生成，作答以此为键
    #[serde(default)]
    pub id: String,
    pub prompt: String,
    pub points: f64,
    #[serde(flatten)]
    #[ts(flatten)]
    pub body: QuestionBody,
}

impl QuizQuestion {
    pub fn redacted(&self) -> PublicQuestion {
        PublicQuestion {
            id: self.id.clone(),
            prompt: self.prompt.clone(),
            points: self.points,
            kind: self.body.kind(),
            options: self.body.options().map(|o| o.to_vec()),
        }
    }
}

/// 去掉答案后交给学生的题目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct PublicQuestion {
    pub id: String,
    pub prompt: String,
    pub points: f64,
    pub kind: QuestionKind,
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct Quiz {
    pub id: i64,
    pub class_id: i64,
    pub created_by: i64,
    pub title: String,
    pub description: Option<String>,
    pub time_limit_minutes: Option<i32>,
    pub max_attempts: i32,
    pub available_from: Option<DateTime<Utc>>,
    pub available_until: Option<DateTime<Utc>>,
    pub shuffle_questions: bool,
    pub published: bool,
    pub questions: Vec<QuizQuestion>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    pub fn total_points(&self) -> f64 {
        self.questions.iter().map(|q| q.points).sum()
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            id: self.id,
            class_id: self.class_id,
            created_by: self.created_by,
            title: self.title.clone(),
            description: self.description.clone(),
            time_limit_minutes: self.time_limit_minutes,
            max_attempts: self.max_attempts,
            available_from: self.available_from,
            available_until: self.available_until,
            shuffle_questions: self.shuffle_questions,
            published: self.published,
            question_count: self.questions.len() as i64,
            total_points: self.total_points(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// 列表展示用，不含题目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizSummary {
    pub id: i64,
    pub class_id: i64,
    pub created_by: i64,
    pub title: String,
    pub description: Option<String>,
    pub time_limit_minutes: Option<i32>,
    pub max_attempts: i32,
    pub available_from: Option<DateTime<Utc>>,
    pub available_until: Option<DateTime<Utc>>,
    pub shuffle_questions: bool,
    pub published: bool,
    pub question_count: i64,
    pub total_points: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::define_string_enum! {
    /// 作答状态：in_progress 只能转为 submitted 或 expired
    #[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
    pub enum AttemptStatus ("作答状态") {
        InProgress = "in_progress",
        Submitted = "submitted",
        Expired = "expired",
    }
}

pub type AnswerSheet = BTreeMap<String, AnswerValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuestionResult {
    pub question_id: String,
    pub correct: bool,
    pub points_awarded: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizAttempt {
    pub id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    pub attempt_number: i32,
    pub status: AttemptStatus,
    #[ts(type = "Record<string, number | number[] | boolean | string>")]
    pub answers: AnswerSheet,
    pub score: Option<f64>,
    pub max_score: f64,
    pub results: Option<Vec<QuestionResult>>,
    pub started_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl QuizAttempt {
    pub fn percentage(&self) -> Option<f64> {
        match self.score {
            Some(score) if self.max_score > 0.0 => Some(score / self.max_score * 100.0),
            Some(_) => Some(0.0),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_json_shape() {
        let q: QuizQuestion = serde_json::from_str(
            r#"{"prompt":"2+2?","points":1,"kind":"single_choice","options":["3","4"],"correct":1}"#,
        )
        .unwrap();
        assert_eq!(q.body.kind(), QuestionKind::SingleChoice);
        assert!(q.id.is_empty());

        let public = serde_json::to_value(q.redacted()).unwrap();
        assert!(public.get("correct").is_none());
        assert_eq!(public["options"][1], "4");
    }

    #[test]
    fn test_answer_value_untagged() {
        let sheet: AnswerSheet =
            serde_json::from_str(r#"{"a":1,"b":[0,2],"c":true,"d":"Paris"}"#).unwrap();
        assert_eq!(sheet["a"], AnswerValue::Choice(1));
        assert_eq!(sheet["b"], AnswerValue::Choices(vec![0, 2]));
        assert_eq!(sheet["c"], AnswerValue::Bool(true));
        assert_eq!(sheet["d"], AnswerValue::Text("Paris".into()));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let q = QuestionBody::SingleChoice {
            options: vec!["a".into(), "b".into()],
            correct: 2,
        };
        assert!(q.validate().is_err());
        let q = QuestionBody::MultipleChoice {
            options: vec!["a".into(), "b".into()],
            correct: vec![],
        };
        assert!(q.validate().is_err());
        let q = QuestionBody::ShortAnswer {
            accepted: vec!["  ".into()],
            case_sensitive: false,
        };
        assert!(q.validate().is_err());
        assert!(QuestionBody::TrueFalse { correct: false }.validate().is_ok());
    }

    #[test]
    fn test_is_correct_by_kind() {
        let multi = QuestionBody::MultipleChoice {
            options: vec!["a".into(), "b".into(), "c".into()],
            correct: vec![2, 0],
        };
        assert!(multi.is_correct(&AnswerValue::Choices(vec![0, 2])));
        assert!(!multi.is_correct(&AnswerValue::Choices(vec![0])));
        assert!(!multi.is_correct(&AnswerValue::Choices(vec![0, 1, 2])));

        let short = QuestionBody::ShortAnswer {
            accepted: vec!["Paris".into()],
            case_sensitive: false,
        };
        assert!(short.is_correct(&AnswerValue::Text("  paris ".into())));
        assert!(!short.is_correct(&AnswerValue::Bool(true)));

        let strict = QuestionBody::ShortAnswer {
            accepted: vec!["Paris".into()],
            case_sensitive: true,
        };
        assert!(!strict.is_correct(&AnswerValue::Text("paris".into())));

        let tf = QuestionBody::TrueFalse { correct: true };
        assert!(tf.is_correct(&AnswerValue::Bool(true)));
        assert_eq!(tf.expected_answer(), AnswerValue::Bool(true));
    }
}
