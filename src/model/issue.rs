use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, Condition};
use sea_query::SimpleExpr;
use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::issue::{self, Model as IssueModel};
use crate::model::global_error::IssueError;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct IssueCreateRequest {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
}

/// 필수 필드 검증을 통과한 생성 요청
#[derive(Debug, Clone, PartialEq)]
pub struct NewIssue {
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
}

impl IssueCreateRequest {
    pub fn validate(self) -> Result<NewIssue, IssueError> {
        match (
            non_blank(self.issue_title),
            non_blank(self.issue_text),
            non_blank(self.created_by),
        ) {
            (Some(issue_title), Some(issue_text), Some(created_by)) => Ok(NewIssue {
                issue_title,
                issue_text,
                created_by,
                assigned_to: self.assigned_to.unwrap_or_default(),
                status_text: self.status_text.unwrap_or_default(),
            }),
            _ => Err(IssueError::MissingRequiredFields),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct IssueUpdateRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_open")]
    pub open: Option<bool>,
}

/// 값이 있는 필드만 변경 대상이다.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IssueChanges {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
}

impl IssueChanges {
    pub fn is_empty(&self) -> bool {
        self.issue_title.is_none()
            && self.issue_text.is_none()
            && self.created_by.is_none()
            && self.assigned_to.is_none()
            && self.status_text.is_none()
            && self.open.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssueUpdate {
    pub id: String,
    pub changes: IssueChanges,
}

impl IssueUpdateRequest {
    /// 빈 문자열은 보내지 않은 것으로 본다. HTML 폼은 손대지 않은 입력을 빈 값으로 보낸다.
    pub fn validate(self) -> Result<IssueUpdate, IssueError> {
        let id = non_blank(self.id).ok_or(IssueError::MissingId)?;

        let changes = IssueChanges {
            issue_title: non_blank(self.issue_title),
            issue_text: non_blank(self.issue_text),
            created_by: non_blank(self.created_by),
            assigned_to: non_blank(self.assigned_to),
            status_text: non_blank(self.status_text),
            open: self.open,
        };

        if changes.is_empty() {
            return Err(IssueError::NoUpdateFields(id));
        }

        Ok(IssueUpdate { id, changes })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct IssueDeleteRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

impl IssueDeleteRequest {
    pub fn validate(self) -> Result<String, IssueError> {
        non_blank(self.id).ok_or(IssueError::MissingId)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IssueResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl From<IssueModel> for IssueResponse {
    fn from(model: IssueModel) -> Self {
        Self {
            id: model.id,
            project: model.project,
            issue_title: model.issue_title,
            issue_text: model.issue_text,
            created_by: model.created_by,
            assigned_to: model.assigned_to,
            status_text: model.status_text,
            open: model.open,
            created_on: model.created_on,
            updated_on: model.updated_on,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IssueActionResponse {
    pub result: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl IssueActionResponse {
    pub fn updated(id: String) -> Self {
        Self {
            result: "successfully updated".to_string(),
            id,
        }
    }

    pub fn deleted(id: String) -> Self {
        Self {
            result: "successfully deleted".to_string(),
            id,
        }
    }
}

/// 조회 쿼리의 `field=value` 한 쌍. 값은 필드 타입으로 파싱된다.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueFilter {
    Id(Uuid),
    Project(String),
    IssueTitle(String),
    IssueText(String),
    CreatedBy(String),
    AssignedTo(String),
    StatusText(String),
    Open(bool),
    CreatedOn(DateTime<Utc>),
    UpdatedOn(DateTime<Utc>),
}

impl IssueFilter {
    /// 모르는 필드이거나 필드 타입으로 파싱할 수 없는 값이면 `None`. 이런 필터에 맞는 이슈는 없다.
    pub fn parse(field: &str, value: &str) -> Option<Self> {
        let filter = match field {
            "_id" => Self::Id(Uuid::parse_str(value.trim()).ok()?),
            "project" => Self::Project(value.to_string()),
            "issue_title" => Self::IssueTitle(value.to_string()),
            "issue_text" => Self::IssueText(value.to_string()),
            "created_by" => Self::CreatedBy(value.to_string()),
            "assigned_to" => Self::AssignedTo(value.to_string()),
            "status_text" => Self::StatusText(value.to_string()),
            "open" => Self::Open(value.trim().parse().ok()?),
            "created_on" => Self::CreatedOn(parse_timestamp(value)?),
            "updated_on" => Self::UpdatedOn(parse_timestamp(value)?),
            _ => return None,
        };
        Some(filter)
    }

    pub fn to_expr(&self) -> SimpleExpr {
        match self {
            Self::Id(id) => issue::Column::Id.eq(*id),
            Self::Project(project) => issue::Column::Project.eq(project.as_str()),
            Self::IssueTitle(title) => issue::Column::IssueTitle.eq(title.as_str()),
            Self::IssueText(text) => issue::Column::IssueText.eq(text.as_str()),
            Self::CreatedBy(created_by) => issue::Column::CreatedBy.eq(created_by.as_str()),
            Self::AssignedTo(assigned_to) => issue::Column::AssignedTo.eq(assigned_to.as_str()),
            Self::StatusText(status_text) => issue::Column::StatusText.eq(status_text.as_str()),
            Self::Open(open) => issue::Column::Open.eq(*open),
            Self::CreatedOn(created_on) => issue::Column::CreatedOn.eq(*created_on),
            Self::UpdatedOn(updated_on) => issue::Column::UpdatedOn.eq(*updated_on),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct IssueQuery {
    pub filters: Vec<IssueFilter>,
}

impl IssueQuery {
    /// `None` 이면 어떤 이슈와도 일치할 수 없는 필터가 있으므로 결과는 빈 목록이다.
    pub fn from_params(params: &BTreeMap<String, String>) -> Option<Self> {
        let filters = params
            .iter()
            .map(|(field, value)| IssueFilter::parse(field, value))
            .collect::<Option<Vec<_>>>()?;

        Some(Self { filters })
    }

    pub fn condition(&self, project: &str) -> Condition {
        self.filters.iter().fold(
            Condition::all().add(issue::Column::Project.eq(project)),
            |condition, filter| condition.add(filter.to_expr()),
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// 폼 전송은 "true"/"false" 문자열, JSON 은 bool 을 보낸다.
fn deserialize_open<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(open)) => Ok(Some(open)),
        Some(BoolOrString::Str(raw)) => match raw.trim() {
            "" => Ok(None),
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(de::Error::custom(format!(
                "invalid value for open: {other:?}, expected true or false"
            ))),
        },
    }
}
