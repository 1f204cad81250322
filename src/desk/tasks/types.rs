//! 任务视图类型（过滤条件、侧边栏计数、创建输入）

use crate::desk::tasks::models::TaskAssignee;
use crate::desk::types::{TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};

/// 任务负责人过滤面（与工单不同，按成员 ID 匹配）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAssigneeFilter {
    /// 只看没有负责人的任务
    Unassigned,
    /// 负责人列表包含该成员 ID
    Id(String),
}

/// 任务过滤条件
///
/// 文本匹配标题、描述或任务 ID；标签面要求任务的标签列表包含所选标签。
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub query: String,
    pub priority: Option<TaskPriority>,
    pub assignee: Option<TaskAssigneeFilter>,
    pub label: Option<String>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_assignee(mut self, assignee: TaskAssigneeFilter) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// 侧边栏优先级计数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPriorityTally {
    pub priority: TaskPriority,
    pub count: usize,
}

/// 侧边栏成员计数（固定团队名册顺序）
#[derive(Debug, Clone, PartialEq)]
pub struct TaskAssigneeTally {
    pub assignee: TaskAssignee,
    pub count: usize,
}

/// 创建任务的输入（对话框表单字段）
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    /// 初始列（表单默认 todo，可选其他列）
    pub status: TaskStatus,
    /// 截止时间；不填时服务给默认值
    pub due_date: Option<DateTime<Utc>>,
    pub assignees: Vec<TaskAssignee>,
    pub labels: Vec<String>,
    pub project: Option<String>,
}
