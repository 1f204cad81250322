//! 任务模型定义

use crate::desk::types::{TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 任务负责人（内部团队成员）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignee {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// 任务评论
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskComment {
    /// 任务内顺延的评论 ID（"1"、"2"…）
    pub id: String,
    pub author: TaskAssignee,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// 清单项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// 任务
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// 任务 ID，形如 `TASK-001`
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// 负责人列表，可为空（未分配）
    pub assignees: Vec<TaskAssignee>,
    pub labels: Vec<String>,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub checklist: Vec<ChecklistItem>,
    pub comments: Vec<TaskComment>,
    /// 附件文件名
    pub attachments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl Task {
    /// 已完成的清单项数
    pub fn checklist_done(&self) -> usize {
        self.checklist.iter().filter(|item| item.completed).count()
    }

    /// 清单进度百分比，向下取整；空清单为 0
    pub fn checklist_percent(&self) -> u32 {
        if self.checklist.is_empty() {
            return 0;
        }
        (self.checklist_done() * 100 / self.checklist.len()) as u32
    }

    /// 卡片上的进度文案，"已完成/总数"
    pub fn checklist_label(&self) -> String {
        format!("{}/{}", self.checklist_done(), self.checklist.len())
    }

    /// 是否逾期：截止时间已过且任务未完成
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now && self.status != TaskStatus::Done
    }
}
