use std::collections::BTreeMap;

use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::api::extract::Payload;
use crate::entity::issue::{self, current_timestamp, ActiveModel as IssueActiveModel, Entity as IssueEntity};
use crate::model::global_error::{AppError, IssueError};
use crate::model::issue::{
    IssueActionResponse, IssueChanges, IssueCreateRequest, IssueDeleteRequest, IssueQuery,
    IssueResponse, IssueUpdate, IssueUpdateRequest,
};

#[utoipa::path(
    post,
    path = "/api/issues/{project}",
    summary = "이슈 생성",
    params(
        ("project" = String, Path, description = "프로젝트 이름", example = "apitest"),
    ),
    request_body = IssueCreateRequest,
    responses(
        (status = 200, description = "생성된 이슈, 또는 필수 필드 누락 시 `{error}`", body = IssueResponse),
    ),
    tag = "issues",
)]
#[post("/issues/{project}")]
#[instrument(skip_all, fields(project = %path))]
pub async fn create_issue(
    path: web::Path<String>,
    body: Payload<IssueCreateRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let project = path.into_inner();

    let new_issue = body
        .into_inner()
        .validate()
        .inspect_err(|err| debug!(error = %err, "이슈 생성 요청 검증 실패"))?;

    let inserted = IssueActiveModel::from_new_issue(&project, new_issue, current_timestamp())
        .insert(db.get_ref())
        .await?;

    info!(issue_id = %inserted.id, "이슈 생성 완료");

    Ok(HttpResponse::Ok().json(IssueResponse::from(inserted)))
}

#[utoipa::path(
    get,
    path = "/api/issues/{project}",
    summary = "프로젝트 이슈 목록 조회",
    description = "모든 쿼리 파라미터는 이슈 필드에 대한 일치 조건이며 AND 로 결합된다.",
    params(
        ("project" = String, Path, description = "프로젝트 이름", example = "apitest"),
        ("_id" = Option<String>, Query, description = "이슈 ID"),
        ("issue_title" = Option<String>, Query),
        ("issue_text" = Option<String>, Query),
        ("created_by" = Option<String>, Query, example = "Daniel"),
        ("assigned_to" = Option<String>, Query),
        ("status_text" = Option<String>, Query),
        ("open" = Option<bool>, Query),
        ("created_on" = Option<String>, Query, description = "RFC 3339"),
        ("updated_on" = Option<String>, Query, description = "RFC 3339"),
    ),
    responses(
        (status = 200, description = "조건에 맞는 이슈 목록", body = Vec<IssueResponse>),
    ),
    tag = "issues",
)]
#[get("/issues/{project}")]
#[instrument(skip_all, fields(project = %path))]
pub async fn list_issues(
    path: web::Path<String>,
    query: web::Query<BTreeMap<String, String>>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let project = path.into_inner();

    let Some(issue_query) = IssueQuery::from_params(&query) else {
        debug!(params = ?query, "일치할 수 없는 필터, 빈 목록 반환");
        return Ok(HttpResponse::Ok().json(Vec::<IssueResponse>::new()));
    };

    let issues = IssueEntity::find()
        .filter(issue_query.condition(&project))
        .order_by_asc(issue::Column::CreatedOn)
        .order_by_asc(issue::Column::Id)
        .all(db.get_ref())
        .await?;

    let response: Vec<IssueResponse> = issues
        .into_iter()
        .map(IssueResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    put,
    path = "/api/issues/{project}",
    summary = "이슈 부분 수정",
    params(
        ("project" = String, Path, description = "프로젝트 이름", example = "apitest"),
    ),
    request_body = IssueUpdateRequest,
    responses(
        (status = 200, description = "`{result, _id}` 또는 `{error, _id}`", body = IssueActionResponse),
    ),
    tag = "issues",
)]
#[put("/issues/{project}")]
#[instrument(skip_all, fields(project = %path))]
pub async fn update_issue(
    path: web::Path<String>,
    body: Payload<IssueUpdateRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let project = path.into_inner();

    let IssueUpdate { id, changes } = body
        .into_inner()
        .validate()
        .inspect_err(|err| debug!(error = %err, "이슈 수정 요청 검증 실패"))?;

    let Some(issue_id) = parse_issue_id(&id) else {
        debug!(id = %id, "잘못된 형식의 이슈 ID");
        return Err(IssueError::UpdateFailed(id).into());
    };

    match apply_issue_changes(db.get_ref(), &project, issue_id, changes).await {
        Ok(0) => {
            debug!(%issue_id, "수정할 이슈 없음");
            Err(IssueError::UpdateFailed(id).into())
        }
        Ok(_) => {
            info!(%issue_id, "이슈 수정 완료");
            Ok(HttpResponse::Ok().json(IssueActionResponse::updated(id)))
        }
        Err(err) => {
            error!(%issue_id, error = %err, "이슈 수정 중 오류 발생");
            Err(IssueError::UpdateFailed(id).into())
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/issues/{project}",
    summary = "이슈 삭제",
    params(
        ("project" = String, Path, description = "프로젝트 이름", example = "apitest"),
    ),
    request_body = IssueDeleteRequest,
    responses(
        (status = 200, description = "`{result, _id}` 또는 `{error, _id}`", body = IssueActionResponse),
    ),
    tag = "issues",
)]
#[delete("/issues/{project}")]
#[instrument(skip_all, fields(project = %path))]
pub async fn delete_issue(
    path: web::Path<String>,
    body: Payload<IssueDeleteRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let project = path.into_inner();

    let id = body
        .into_inner()
        .validate()
        .inspect_err(|err| debug!(error = %err, "이슈 삭제 요청 검증 실패"))?;

    let Some(issue_id) = parse_issue_id(&id) else {
        debug!(id = %id, "잘못된 형식의 이슈 ID");
        return Err(IssueError::DeleteFailed(id).into());
    };

    match remove_issue(db.get_ref(), &project, issue_id).await {
        Ok(0) => {
            debug!(%issue_id, "삭제할 이슈 없음");
            Err(IssueError::DeleteFailed(id).into())
        }
        Ok(_) => {
            info!(%issue_id, "이슈 삭제 완료");
            Ok(HttpResponse::Ok().json(IssueActionResponse::deleted(id)))
        }
        Err(err) => {
            error!(%issue_id, error = %err, "이슈 삭제 중 오류 발생");
            Err(IssueError::DeleteFailed(id).into())
        }
    }
}

fn parse_issue_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

/// 변경된 행 수를 반환한다. 다른 프로젝트의 이슈는 건드리지 않는다.
pub async fn apply_issue_changes(
    db: &DatabaseConnection,
    project: &str,
    issue_id: Uuid,
    changes: IssueChanges,
) -> Result<u64, DbErr> {
    let result = IssueEntity::update_many()
        .set(IssueActiveModel::from_changes(changes, current_timestamp()))
        .filter(issue::Column::Id.eq(issue_id))
        .filter(issue::Column::Project.eq(project))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

pub async fn remove_issue(
    db: &DatabaseConnection,
    project: &str,
    issue_id: Uuid,
) -> Result<u64, DbErr> {
    let result = IssueEntity::delete_many()
        .filter(issue::Column::Id.eq(issue_id))
        .filter(issue::Column::Project.eq(project))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
