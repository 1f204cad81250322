//! 控制台共享类型定义
//!
//! 所有页面共用的枚举和用户结构。枚举值集是封闭的：
//! 夹具数据在反序列化时就会拒绝未知值，看板渲染阶段不存在"静默丢弃"。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SLA 预警窗口（小时），到期前不足该小时数进入 warning
pub const SLA_WARNING_WINDOW_HOURS: i64 = 2;

// ========== 渠道 ==========

/// 消息渠道
///
/// 前四个渠道有固定的葡语显示名，其余渠道展示原始标识（与工单/联系人
/// 数据里只出现前四个渠道的约定一致）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Whatsapp,
    Instagram,
    Email,
    Webchat,
    Pinterest,
    X,
    Threads,
    Telegram,
}

impl Channel {
    /// 渠道标识（与夹具 JSON 中的字面量一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Whatsapp => "whatsapp",
            Channel::Instagram => "instagram",
            Channel::Email => "email",
            Channel::Webchat => "webchat",
            Channel::Pinterest => "pinterest",
            Channel::X => "x",
            Channel::Threads => "threads",
            Channel::Telegram => "telegram",
        }
    }

    /// 渠道显示名；未映射的渠道回退为原始标识
    pub fn display_name(&self) -> &'static str {
        match self {
            Channel::Whatsapp => "WhatsApp",
            Channel::Instagram => "Instagram",
            Channel::Email => "E-mail",
            Channel::Webchat => "Chat Web",
            other => other.as_str(),
        }
    }

    /// 收件箱侧边栏展示的四个主渠道（顺序固定）
    pub fn sidebar_channels() -> [Channel; 4] {
        [
            Channel::Whatsapp,
            Channel::Email,
            Channel::Instagram,
            Channel::Webchat,
        ]
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whatsapp" => Ok(Channel::Whatsapp),
            "instagram" => Ok(Channel::Instagram),
            "email" => Ok(Channel::Email),
            "webchat" => Ok(Channel::Webchat),
            "pinterest" => Ok(Channel::Pinterest),
            "x" => Ok(Channel::X),
            "threads" => Ok(Channel::Threads),
            "telegram" => Ok(Channel::Telegram),
            other => Err(format!("未知渠道: {}", other)),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========== 优先级 ==========

/// 会话/工单优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::Low => "Baixa",
            Priority::Medium => "Média",
            Priority::High => "Alta",
        }
    }

    /// 侧边栏计数使用的展示顺序
    pub fn all() -> [Priority; 3] {
        [Priority::High, Priority::Medium, Priority::Low]
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("未知优先级: {}", other)),
        }
    }
}

/// 任务优先级（比工单多一个 urgent 档）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Baixa",
            TaskPriority::Medium => "Média",
            TaskPriority::High => "Alta",
            TaskPriority::Urgent => "Urgente",
        }
    }

    pub fn all() -> [TaskPriority; 4] {
        [
            TaskPriority::Urgent,
            TaskPriority::High,
            TaskPriority::Medium,
            TaskPriority::Low,
        ]
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            other => Err(format!("未知任务优先级: {}", other)),
        }
    }
}

// ========== SLA ==========

/// SLA 状态，三档严重度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    Ok,
    Warning,
    Critical,
}

impl SlaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlaStatus::Ok => "ok",
            SlaStatus::Warning => "warning",
            SlaStatus::Critical => "critical",
        }
    }

    /// 详情面板使用的完整标签
    pub fn display_name(&self) -> &'static str {
        match self {
            SlaStatus::Ok => "No prazo",
            SlaStatus::Warning => "Atenção",
            SlaStatus::Critical => "Crítico",
        }
    }

    /// 会话列表徽标使用的短标签（前面拼 "SLA "）
    pub fn short_label(&self) -> &'static str {
        match self {
            SlaStatus::Ok => "OK",
            SlaStatus::Warning => "Atenção",
            SlaStatus::Critical => "Crítico",
        }
    }
}

// ========== 状态 ==========

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    Active,
    Resolved,
    Pending,
}

impl ConversationStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            ConversationStatus::Active => "Ativo",
            ConversationStatus::Resolved => "Resolvido",
            ConversationStatus::Pending => "Pendente",
        }
    }
}

/// 工单状态，同时定义看板列的固定顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    WaitingCustomer,
    Resolved,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::WaitingCustomer => "waiting_customer",
            TicketStatus::Resolved => "resolved",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Aberto",
            TicketStatus::InProgress => "Em andamento",
            TicketStatus::WaitingCustomer => "Aguardando cliente",
            TicketStatus::Resolved => "Resolvido",
        }
    }

    /// 看板列顺序
    pub fn board_columns() -> [TicketStatus; 4] {
        [
            TicketStatus::Open,
            TicketStatus::InProgress,
            TicketStatus::WaitingCustomer,
            TicketStatus::Resolved,
        ]
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "waiting_customer" => Ok(TicketStatus::WaitingCustomer),
            "resolved" => Ok(TicketStatus::Resolved),
            other => Err(format!("未知工单状态: {}", other)),
        }
    }
}

/// 任务状态，同时定义任务看板列的固定顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "A Fazer",
            TaskStatus::InProgress => "Em Progresso",
            TaskStatus::Review => "Em Revisão",
            TaskStatus::Done => "Concluído",
        }
    }

    pub fn board_columns() -> [TaskStatus; 4] {
        [
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Review,
            TaskStatus::Done,
        ]
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "review" => Ok(TaskStatus::Review),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!("未知任务状态: {}", other)),
        }
    }
}

// ========== 消息 ==========

/// 消息内容类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Text,
    Image,
    File,
    Audio,
}

/// 消息投递状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
}

impl MessageStatus {
    /// 气泡右下角的状态符号（仅己方消息展示）
    pub fn indicator(&self) -> &'static str {
        match self {
            MessageStatus::Sent => "🕐",
            MessageStatus::Delivered => "✓",
            MessageStatus::Read => "✓✓",
        }
    }
}

// ========== 用户 ==========

/// 坐席/客户用户信息（工单的 requester 和 assignee 共用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: String,
}
