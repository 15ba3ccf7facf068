use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::model::issue::{IssueChanges, NewIssue};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "issues")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub project: String,
    pub issue_title: String,
    #[sea_orm(column_type = "Text")]
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// 저장소가 보존하는 마이크로초 단위로 자른 현재 시각.
/// 생성/수정 응답의 시각이 이후 조회 결과와 같아야 한다.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl ActiveModel {
    pub fn from_new_issue(project: &str, issue: NewIssue, now: DateTime<Utc>) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            project: Set(project.to_string()),
            issue_title: Set(issue.issue_title),
            issue_text: Set(issue.issue_text),
            created_by: Set(issue.created_by),
            assigned_to: Set(issue.assigned_to),
            status_text: Set(issue.status_text),
            open: Set(true),
            created_on: Set(now),
            updated_on: Set(now),
        }
    }

    /// 전달된 필드만 `Set` 으로 두고 나머지는 `NotSet` 으로 남긴다.
    pub fn from_changes(changes: IssueChanges, now: DateTime<Utc>) -> Self {
        let mut model = Self {
            updated_on: Set(now),
            ..Default::default()
        };

        if let Some(issue_title) = changes.issue_title {
            model.issue_title = Set(issue_title);
        }
        if let Some(issue_text) = changes.issue_text {
            model.issue_text = Set(issue_text);
        }
        if let Some(created_by) = changes.created_by {
            model.created_by = Set(created_by);
        }
        if let Some(assigned_to) = changes.assigned_to {
            model.assigned_to = Set(assigned_to);
        }
        if let Some(status_text) = changes.status_text {
            model.status_text = Set(status_text);
        }
        if let Some(open) = changes.open {
            model.open = Set(open);
        }

        model
    }
}
