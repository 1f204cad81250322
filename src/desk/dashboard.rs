//! 面板（Dashboard）KPI 快照
//!
//! 活跃会话、SLA 预警、平均满意度从已载入的集合实时推导；
//! TMA、渠道量、最近活动和快捷操作是固定演示内容。

use crate::desk::contacts::ContactService;
use crate::desk::format;
use crate::desk::inbox::InboxService;
use crate::desk::tickets::TicketService;
use crate::desk::types::{Channel, ConversationStatus, SlaStatus, TicketStatus};
use chrono::{DateTime, Utc};

/// 过去 24 小时各渠道会话量（固定演示值）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelVolume {
    pub channel: Channel,
    pub count: u32,
}

/// 最近活动的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Conversation,
    Ticket,
    Sla,
}

/// 最近活动条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: &'static str,
    pub kind: ActivityKind,
    pub title: &'static str,
    pub description: &'static str,
    /// 固定演示时间戳，渲染时转相对时间
    pub time: DateTime<Utc>,
    pub badge: &'static str,
}

impl Activity {
    /// 条目的相对时间文案
    pub fn relative_label(&self, now: DateTime<Utc>) -> String {
        format::format_relative_time(self.time, now)
    }
}

/// 快捷操作入口
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAction {
    pub title: &'static str,
    pub description: &'static str,
    pub href: &'static str,
}

/// 面板快照
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    /// "Conversas Ativas"：状态不是已解决的会话数
    pub active_conversations: usize,
    /// 副标题 "N não lidas"：所有会话未读数之和
    pub unread_messages: u32,
    /// "SLA a Vencer"：未解决且实时分级为 warning 的工单数
    pub sla_due_soon: usize,
    /// "Satisfação"：有评分联系人的平均分，一位小数
    pub average_rating: f64,
    /// "TMA" 固定演示值
    pub average_handling_time: &'static str,
    pub channel_volume: Vec<ChannelVolume>,
    pub recent_activities: Vec<Activity>,
    pub quick_actions: Vec<QuickAction>,
}

impl DashboardSnapshot {
    /// 从三个领域服务采集快照，`now` 用于 SLA 实时分级
    pub fn capture(
        inbox: &InboxService,
        tickets: &TicketService,
        contacts: &ContactService,
        now: DateTime<Utc>,
    ) -> Self {
        let active_conversations = inbox
            .conversations()
            .iter()
            .filter(|c| c.status != ConversationStatus::Resolved)
            .count();

        let sla_due_soon = tickets
            .tickets()
            .iter()
            .filter(|t| {
                t.status != TicketStatus::Resolved && t.live_sla_status(now) == SlaStatus::Warning
            })
            .count();

        Self {
            active_conversations,
            unread_messages: inbox.total_unread(),
            sla_due_soon,
            average_rating: average_contact_rating(contacts),
            average_handling_time: "2h 15min",
            channel_volume: demo_channel_volume(),
            recent_activities: demo_activities(),
            quick_actions: demo_quick_actions(),
        }
    }

    /// "Satisfação" 卡片的展示值，例如 "4.8"
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.average_rating)
    }
}

/// 有评分联系人（average_rating > 0）的平均分，四舍五入到一位小数；
/// 没有可计入的联系人时为 0.0
fn average_contact_rating(contacts: &ContactService) -> f64 {
    let rated: Vec<f64> = contacts
        .contacts()
        .iter()
        .filter(|c| c.average_rating > 0.0)
        .map(|c| c.average_rating)
        .collect();
    if rated.is_empty() {
        return 0.0;
    }
    let mean = rated.iter().sum::<f64>() / rated.len() as f64;
    (mean * 10.0).round() / 10.0
}

fn fixed_time(iso: &str) -> DateTime<Utc> {
    iso.parse().unwrap_or_default()
}

fn demo_channel_volume() -> Vec<ChannelVolume> {
    vec![
        ChannelVolume { channel: Channel::Whatsapp, count: 24 },
        ChannelVolume { channel: Channel::Email, count: 16 },
        ChannelVolume { channel: Channel::Instagram, count: 8 },
        ChannelVolume { channel: Channel::Webchat, count: 4 },
    ]
}

fn demo_activities() -> Vec<Activity> {
    vec![
        Activity {
            id: "1",
            kind: ActivityKind::Conversation,
            title: "Nova conversa no WhatsApp",
            description: "Maria Silva iniciou uma conversa",
            time: fixed_time("2024-01-15T11:30:00Z"),
            badge: "WhatsApp",
        },
        Activity {
            id: "2",
            kind: ActivityKind::Ticket,
            title: "Ticket resolvido",
            description: "T-007 foi marcado como resolvido",
            time: fixed_time("2024-01-15T11:15:00Z"),
            badge: "Resolvido",
        },
        Activity {
            id: "3",
            kind: ActivityKind::Sla,
            title: "SLA a vencer",
            description: "T-003 vence em 5 minutos",
            time: fixed_time("2024-01-15T11:00:00Z"),
            badge: "Crítico",
        },
    ]
}

fn demo_quick_actions() -> Vec<QuickAction> {
    vec![
        QuickAction {
            title: "Abrir Inbox",
            description: "Visualizar conversas pendentes",
            href: "/inbox",
        },
        QuickAction {
            title: "Criar Ticket",
            description: "Abrir novo ticket de suporte",
            href: "/tickets",
        },
        QuickAction {
            title: "Conectar WhatsApp",
            description: "Configurar canal WhatsApp",
            href: "/settings",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desk::contacts::ContactDetails;
    use crate::desk::inbox::{Contact, Conversation};
    use crate::desk::tickets::Ticket;
    use crate::desk::types::{Priority, User};
    use chrono::{Duration, TimeZone};
    use std::collections::HashMap;

    fn base_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn conv(id: &str, status: ConversationStatus, unread: u32) -> Conversation {
        Conversation {
            id: id.to_string(),
            contact: Contact {
                id: format!("c{}", id),
                name: "Cliente".to_string(),
                avatar: None,
                phone: None,
                email: None,
            },
            channel: Channel::Whatsapp,
            last_message: "Olá".to_string(),
            priority: Priority::Medium,
            sla_status: SlaStatus::Ok,
            unread_count: unread,
            updated_at: base_now(),
            status,
        }
    }

    fn ticket(id: &str, status: TicketStatus, deadline: DateTime<Utc>) -> Ticket {
        let requester = User {
            id: "u1".to_string(),
            name: "Maria Silva".to_string(),
            avatar: None,
            role: "customer".to_string(),
        };
        Ticket {
            id: id.to_string(),
            title: "Problema".to_string(),
            description: "Detalhes".to_string(),
            status,
            priority: Priority::Medium,
            assignee: None,
            requester,
            channel: Channel::Email,
            tags: vec![],
            sla_deadline: deadline,
            sla_status: SlaStatus::Ok,
            created_at: base_now() - Duration::days(1),
            updated_at: base_now(),
            conversation_id: None,
        }
    }

    fn contact_rated(id: &str, rating: f64) -> ContactDetails {
        ContactDetails {
            id: id.to_string(),
            name: "Cliente".to_string(),
            email: None,
            phone: None,
            document: None,
            avatar: None,
            tags: vec![],
            primary_channel: Channel::Whatsapp,
            last_interaction: base_now(),
            notes: String::new(),
            created_at: base_now() - Duration::days(90),
            total_tickets: 3,
            resolved_tickets: 2,
            average_rating: rating,
            preferred_language: "pt-BR".to_string(),
            timezone: "America/Sao_Paulo".to_string(),
            custom_fields: serde_json::Map::new(),
        }
    }

    fn snapshot_with(
        conversations: Vec<Conversation>,
        tickets: Vec<Ticket>,
        contacts: Vec<ContactDetails>,
    ) -> DashboardSnapshot {
        let inbox = InboxService::new("agent1".to_string(), conversations, HashMap::new());
        let tickets = TicketService::new(tickets);
        let contacts = ContactService::new(contacts);
        DashboardSnapshot::capture(&inbox, &tickets, &contacts, base_now())
    }

    #[test]
    fn active_count_excludes_resolved_conversations() {
        let snap = snapshot_with(
            vec![
                conv("1", ConversationStatus::Active, 2),
                conv("2", ConversationStatus::Pending, 0),
                conv("3", ConversationStatus::Resolved, 1),
            ],
            vec![],
            vec![],
        );
        assert_eq!(snap.active_conversations, 2);
        assert_eq!(snap.unread_messages, 3);
    }

    #[test]
    fn sla_due_soon_counts_live_warnings_only() {
        let now = base_now();
        let snap = snapshot_with(
            vec![],
            vec![
                // 1 小时后到期，warning
                ticket("T-001", TicketStatus::Open, now + Duration::hours(1)),
                // 3 小时后到期，ok
                ticket("T-002", TicketStatus::Open, now + Duration::hours(3)),
                // 已过期，critical 不计入
                ticket("T-003", TicketStatus::InProgress, now - Duration::hours(1)),
                // warning 窗口内但已解决，不计入
                ticket("T-004", TicketStatus::Resolved, now + Duration::minutes(30)),
            ],
            vec![],
        );
        assert_eq!(snap.sla_due_soon, 1);
    }

    #[test]
    fn average_rating_skips_unrated_contacts() {
        let snap = snapshot_with(
            vec![],
            vec![],
            vec![
                contact_rated("c1", 4.8),
                contact_rated("c2", 4.2),
                contact_rated("c3", 0.0),
            ],
        );
        assert_eq!(snap.average_rating, 4.5);
        assert_eq!(snap.rating_label(), "4.5");
    }

    #[test]
    fn average_rating_defaults_to_zero_without_rated_contacts() {
        let snap = snapshot_with(vec![], vec![], vec![contact_rated("c1", 0.0)]);
        assert_eq!(snap.average_rating, 0.0);
        assert_eq!(snap.rating_label(), "0.0");
    }

    #[test]
    fn fixed_demo_blocks_are_stable() {
        let snap = snapshot_with(vec![], vec![], vec![]);
        assert_eq!(snap.average_handling_time, "2h 15min");

        let volumes: Vec<u32> = snap.channel_volume.iter().map(|v| v.count).collect();
        assert_eq!(volumes, vec![24, 16, 8, 4]);
        assert_eq!(snap.channel_volume[0].channel, Channel::Whatsapp);

        assert_eq!(snap.recent_activities.len(), 3);
        assert_eq!(snap.recent_activities[0].title, "Nova conversa no WhatsApp");
        assert_eq!(snap.recent_activities[2].badge, "Crítico");
        // 相对时间基于固定时间戳
        assert_eq!(
            snap.recent_activities[0].relative_label(base_now()),
            "há 30 minutos"
        );

        let titles: Vec<&str> = snap.quick_actions.iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Abrir Inbox", "Criar Ticket", "Conectar WhatsApp"]);
    }
}
