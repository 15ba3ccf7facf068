mod extract;
mod health;
mod issue;

use actix_web::web::{self, scope};
use actix_web::{get, HttpResponse, Responder};
use utoipa::OpenApi;

use crate::model::global_error::{AppError, ErrorResponse, IssueErrorResponse};
use crate::model::issue::{
    IssueActionResponse, IssueCreateRequest, IssueDeleteRequest, IssueResponse, IssueUpdateRequest,
};

pub use crate::api::health::health_check;
pub use crate::api::issue::{apply_issue_changes, create_issue, delete_issue, list_issues, remove_issue, update_issue};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        issue::create_issue,
        issue::list_issues,
        issue::update_issue,
        issue::delete_issue,
    ),
    components(schemas(
        IssueCreateRequest,
        IssueUpdateRequest,
        IssueDeleteRequest,
        IssueResponse,
        IssueActionResponse,
        IssueErrorResponse,
        ErrorResponse,
    )),
    tags(
        (name = "issues", description = "프로젝트 단위 이슈 CRUD"),
        (name = "health check", description = "서버 상태 확인"),
    ),
)]
pub struct ApiDoc;

#[get("/api-docs/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// 모든 라우트를 등록한다. `DatabaseConnection` 은 호출 측에서 `app_data` 로 넣어야 한다.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::bad_request(err.to_string()).into()),
    )
    .app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::bad_request(err.to_string()).into()),
    )
    .app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| AppError::bad_request(err.to_string()).into()),
    )
    .service(health_check)
    .service(openapi_json)
    .service(
        scope("/api")
            .service(create_issue)
            .service(list_issues)
            .service(update_issue)
            .service(delete_issue),
    );
}
