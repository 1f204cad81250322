//! 工单视图类型（过滤条件、侧边栏计数、创建输入）

use crate::desk::types::{Channel, Priority, User};

/// 负责人过滤面
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeFilter {
    /// 只看未分配的工单
    Unassigned,
    /// 按负责人显示名精确匹配
    Name(String),
}

/// 工单过滤条件
///
/// 文本匹配标题、描述、工单 ID 或客户姓名；全部条件 AND 组合。
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub query: String,
    pub priority: Option<Priority>,
    pub assignee: Option<AssigneeFilter>,
}

impl TicketFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_assignee(mut self, assignee: AssigneeFilter) -> Self {
        self.assignee = Some(assignee);
        self
    }
}

/// 侧边栏优先级计数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityTally {
    pub priority: Priority,
    pub count: usize,
}

/// 侧边栏负责人计数（首次出现顺序）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeTally {
    pub name: String,
    pub count: usize,
}

/// 创建工单的输入（对话框表单字段）
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub channel: Channel,
    pub requester: User,
    pub assignee: Option<User>,
    pub tags: Vec<String>,
}
