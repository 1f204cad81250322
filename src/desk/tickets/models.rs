//! 工单模型定义

use crate::desk::format;
use crate::desk::types::{Channel, Priority, SlaStatus, TicketStatus, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 工单
///
/// 夹具里带有存量 `sla_status` 字段，但展示层一律用 [`Ticket::live_sla_status`]
/// 按当前时钟重算，存量值只服务于数据契约。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// 工单 ID，形如 `T-001`
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: Priority,
    /// 负责人，可为空（未分配）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    /// 发起工单的客户
    pub requester: User,
    pub channel: Channel,
    pub tags: Vec<String>,
    /// SLA 截止时间
    pub sla_deadline: DateTime<Utc>,
    /// 存量 SLA 状态（不可信，见模块注释）
    pub sla_status: SlaStatus,
    pub created_at: DateTime<Utc>,
    /// 最后更新时间，列表与看板列都按它降序
    pub updated_at: DateTime<Utc>,
    /// 来源会话 ID（从收件箱升级成工单时存在）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl Ticket {
    /// 按当前时钟重算 SLA 状态
    pub fn live_sla_status(&self, now: DateTime<Utc>) -> SlaStatus {
        format::sla_status(self.sla_deadline, now)
    }

    /// 卡片上的 SLA 剩余时间文案（"Vencido" / "1h 30min" / "45min"）
    pub fn sla_time_remaining(&self, now: DateTime<Utc>) -> String {
        format::format_sla_time(self.sla_deadline, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ticket_due_in(hours: i64) -> Ticket {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        Ticket {
            id: "T-001".to_string(),
            title: "Problema com pedido".to_string(),
            description: "Cliente não consegue acompanhar o pedido".to_string(),
            status: TicketStatus::Open,
            priority: Priority::High,
            assignee: None,
            requester: User {
                id: "c1".to_string(),
                name: "Maria Silva".to_string(),
                avatar: None,
                role: "Cliente".to_string(),
            },
            channel: Channel::Whatsapp,
            tags: vec!["pedido".to_string()],
            sla_deadline: now + Duration::hours(hours),
            sla_status: SlaStatus::Ok,
            created_at: now - Duration::hours(1),
            updated_at: now,
            conversation_id: Some("1".to_string()),
        }
    }

    #[test]
    fn live_sla_ignores_stored_field() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        // 存量字段写 ok，截止已过 → 实时为 critical
        let overdue = ticket_due_in(-1);
        assert_eq!(overdue.sla_status, SlaStatus::Ok);
        assert_eq!(overdue.live_sla_status(now), SlaStatus::Critical);

        assert_eq!(ticket_due_in(1).live_sla_status(now), SlaStatus::Warning);
        assert_eq!(ticket_due_in(3).live_sla_status(now), SlaStatus::Ok);
    }

    #[test]
    fn sla_time_remaining_renders_card_label() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(ticket_due_in(-1).sla_time_remaining(now), "Vencido");
        assert_eq!(ticket_due_in(2).sla_time_remaining(now), "2h 0min");
    }

    #[test]
    fn ticket_without_assignee_parses() {
        let json = r#"{
            "id": "T-003",
            "title": "Erro no login",
            "description": "Usuário relata erro 500",
            "status": "open",
            "priority": "high",
            "requester": { "id": "c4", "name": "Pedro Oliveira", "role": "Cliente" },
            "channel": "webchat",
            "tags": ["login", "bug"],
            "slaDeadline": "2024-01-15T12:00:00Z",
            "slaStatus": "critical",
            "createdAt": "2024-01-15T11:20:00Z",
            "updatedAt": "2024-01-15T11:20:00Z"
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert!(ticket.assignee.is_none());
        assert!(ticket.conversation_id.is_none());
        assert_eq!(ticket.status, TicketStatus::Open);
    }
}
