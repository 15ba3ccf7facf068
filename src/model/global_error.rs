use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // 400 BAD REQUEST
    InvalidPayload,

    // 500 SERVER ERRORS
    DatabaseError,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidPayload => "요청 본문을 해석할 수 없습니다",

            ErrorCode::DatabaseError => "데이터베이스 오류가 발생했습니다",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidPayload => StatusCode::BAD_REQUEST,

            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// 이슈 엔드포인트의 클라이언트 입력 오류.
///
/// 정상 응답의 일부로 취급해 4xx 가 아닌 `200 OK` 와 `{"error": ..}` 본문으로 응답한다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssueError {
    #[error("required field(s) missing")]
    MissingRequiredFields,
    #[error("missing _id")]
    MissingId,
    #[error("no update field(s) sent")]
    NoUpdateFields(String),
    #[error("could not update")]
    UpdateFailed(String),
    #[error("could not delete")]
    DeleteFailed(String),
}

impl IssueError {
    pub fn id(&self) -> Option<&str> {
        match self {
            IssueError::MissingRequiredFields | IssueError::MissingId => None,
            IssueError::NoUpdateFields(id)
            | IssueError::UpdateFailed(id)
            | IssueError::DeleteFailed(id) => Some(id),
        }
    }

    pub fn body(&self) -> IssueErrorResponse {
        IssueErrorResponse {
            error: self.to_string(),
            id: self.id().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IssueErrorResponse {
    pub error: String,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ApiError(ErrorCode, Option<String>),
    #[error(transparent)]
    Issue(#[from] IssueError),
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        AppError::ApiError(code, None)
    }

    pub fn with_detail(code: ErrorCode, detail: String) -> Self {
        AppError::ApiError(code, Some(detail))
    }

    pub fn bad_request(detail: String) -> Self {
        Self::with_detail(ErrorCode::InvalidPayload, detail)
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        tracing::error!(error = %err, "데이터베이스 오류 발생");
        AppError::new(ErrorCode::DatabaseError)
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ApiError(code, _) => code.status_code(),
            AppError::Issue(_) => StatusCode::OK,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::ApiError(code, detail) => {
                let response = ErrorResponse {
                    code: format!("{:?}", code),
                    message: code.message().to_string(),
                    detail: detail.clone(),
                };

                HttpResponse::build(code.status_code())
                    .json(response)
            }
            AppError::Issue(err) => HttpResponse::Ok().json(err.body()),
        }
    }
}
