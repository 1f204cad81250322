//! 收件箱服务层
//!
//! 持有会话与消息集合，按过滤条件产出可见子集，并处理本地发送

use crate::desk::inbox::listener::{EmptyInboxListener, InboxListener};
use crate::desk::inbox::models::{Conversation, Message};
use crate::desk::inbox::types::{ChannelTally, InboxFilter, MessageTemplate, Queue};
use crate::desk::types::{Channel, MessageStatus, MessageType};
use anyhow::{bail, Result};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// 收件箱服务
pub struct InboxService {
    /// 坐席 ID（本地发送消息的 authorId）
    agent_id: String,
    /// 全量会话
    conversations: Vec<Conversation>,
    /// 消息历史，按会话 ID 分组
    messages: HashMap<String, Vec<Message>>,
    /// 收件箱监听器
    listener: Arc<dyn InboxListener>,
}

impl InboxService {
    /// 创建收件箱服务（使用默认空监听器）
    pub fn new(
        agent_id: String,
        conversations: Vec<Conversation>,
        messages: HashMap<String, Vec<Message>>,
    ) -> Self {
        Self::with_listener(agent_id, conversations, messages, Arc::new(EmptyInboxListener))
    }

    /// 创建收件箱服务（带自定义监听器）
    pub fn with_listener(
        agent_id: String,
        conversations: Vec<Conversation>,
        messages: HashMap<String, Vec<Message>>,
        listener: Arc<dyn InboxListener>,
    ) -> Self {
        debug!(
            "[Inbox] 初始化收件箱，会话数: {}, 含消息历史的会话数: {}",
            conversations.len(),
            messages.len()
        );
        Self {
            agent_id,
            conversations,
            messages,
            listener,
        }
    }

    /// 注册收件箱监听器
    pub fn set_listener(&mut self, listener: Arc<dyn InboxListener>) {
        self.listener = listener;
    }

    /// 全量会话（未过滤、未排序）
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// 按 ID 查找会话
    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    /// 默认选中的会话（列表第一条）
    pub fn first_conversation(&self) -> Option<&Conversation> {
        self.conversations.first()
    }

    /// 按过滤条件产出可见会话，按最后活动时间降序
    ///
    /// 文本匹配联系人姓名或最新消息（小写子串），渠道面为精确匹配，
    /// 两个条件同时激活时取交集。
    pub fn filtered_conversations(&self, filter: &InboxFilter) -> Vec<Conversation> {
        let query = filter.query.to_lowercase();
        let mut list: Vec<Conversation> = self
            .conversations
            .iter()
            .filter(|conv| {
                if !query.is_empty()
                    && !conv.contact.name.to_lowercase().contains(&query)
                    && !conv.last_message.to_lowercase().contains(&query)
                {
                    return false;
                }
                if let Some(channel) = filter.channel {
                    if conv.channel != channel {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        debug!(
            "[Inbox] 过滤会话: query=\"{}\", channel={:?}, 结果 {} 条",
            filter.query,
            filter.channel,
            list.len()
        );
        list
    }

    /// 会话的消息历史（无历史时返回空切片）
    pub fn messages(&self, conversation_id: &str) -> &[Message] {
        self.messages
            .get(conversation_id)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// 本地发送一条文本消息
    ///
    /// 追加到会话的消息历史并触发监听器回调；不回写会话的
    /// lastMessage/updatedAt（与页面行为一致，列表摘要保持存量值）。
    pub fn send_message(&mut self, conversation_id: &str, content: &str) -> Result<Message> {
        if content.trim().is_empty() {
            bail!("消息内容为空，拒绝发送");
        }
        if self.conversation(conversation_id).is_none() {
            bail!("会话不存在: {}", conversation_id);
        }

        let message = Message {
            id: Uuid::new_v4().to_string(),
            conversation_id: conversation_id.to_string(),
            author_id: self.agent_id.clone(),
            author_name: "Você".to_string(),
            content: content.to_string(),
            message_type: MessageType::Text,
            is_mine: true,
            timestamp: Utc::now(),
            status: MessageStatus::Sent,
            attachments: Vec::new(),
        };

        self.messages
            .entry(conversation_id.to_string())
            .or_default()
            .push(message.clone());

        info!(
            "[Inbox] 📤 发送消息: conversationID={}, messageID={}",
            conversation_id, message.id
        );
        self.listener.on_message_sent(conversation_id, &message);
        Ok(message)
    }

    /// 侧边栏主渠道计数（按数据统计，顺序固定）
    pub fn channel_tallies(&self) -> Vec<ChannelTally> {
        Channel::sidebar_channels()
            .into_iter()
            .map(|channel| ChannelTally {
                channel,
                count: self
                    .conversations
                    .iter()
                    .filter(|c| c.channel == channel)
                    .count(),
            })
            .collect()
    }

    /// "Todos" 徽标的会话总数
    pub fn total_count(&self) -> usize {
        self.conversations.len()
    }

    /// 总未读数
    pub fn total_unread(&self) -> u32 {
        self.conversations.iter().map(|c| c.unread_count).sum()
    }

    /// 侧边栏队列列表（静态模拟数据，选中队列不参与过滤）
    pub fn queues(&self) -> [Queue; 3] {
        [
            Queue { id: "support", name: "Suporte", count: 7 },
            Queue { id: "sales", name: "Vendas", count: 3 },
            Queue { id: "billing", name: "Financeiro", count: 2 },
        ]
    }

    /// 侧边栏展示的固定标签
    pub fn sidebar_tags(&self) -> [&'static str; 3] {
        ["urgente", "vip", "bug"]
    }

    /// 撰写区的快捷回复模板
    pub fn message_templates(&self) -> [MessageTemplate; 4] {
        [
            MessageTemplate {
                name: "Saudação",
                content: "Olá! Como posso ajudar você hoje?",
            },
            MessageTemplate {
                name: "Aguardando informações",
                content: "Obrigado pelo contato. Estou analisando sua solicitação e retorno em breve com mais informações.",
            },
            MessageTemplate {
                name: "Problema resolvido",
                content: "Ótimo! Problema resolvido. Há mais alguma coisa em que posso ajudar?",
            },
            MessageTemplate {
                name: "Encerramento",
                content: "Obrigado pelo contato! Se precisar de mais alguma coisa, estarei aqui para ajudar.",
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desk::inbox::models::Contact;
    use crate::desk::types::{ConversationStatus, Priority, SlaStatus};
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn conv(id: &str, name: &str, last: &str, channel: Channel, minutes_ago: i64) -> Conversation {
        let base = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        Conversation {
            id: id.to_string(),
            contact: Contact {
                id: format!("c{}", id),
                name: name.to_string(),
                avatar: None,
                phone: None,
                email: None,
            },
            channel,
            last_message: last.to_string(),
            priority: Priority::Medium,
            sla_status: SlaStatus::Ok,
            unread_count: 1,
            updated_at: base - Duration::minutes(minutes_ago),
            status: ConversationStatus::Active,
        }
    }

    fn service() -> InboxService {
        InboxService::new(
            "agent1".to_string(),
            vec![
                conv("1", "Maria Silva", "Preciso de ajuda com meu pedido", Channel::Whatsapp, 30),
                conv("2", "João Santos", "Quero cancelar a assinatura", Channel::Email, 10),
                conv("3", "Ana Costa", "Vi a promoção no Instagram", Channel::Instagram, 60),
            ],
            HashMap::new(),
        )
    }

    #[test]
    fn empty_filter_returns_all_sorted_by_recency() {
        let svc = service();
        let list = svc.filtered_conversations(&InboxFilter::new());
        assert_eq!(list.len(), 3);
        // 最近活动在前
        assert_eq!(list[0].id, "2");
        assert_eq!(list[1].id, "1");
        assert_eq!(list[2].id, "3");
    }

    #[test]
    fn query_matches_contact_name_case_insensitive() {
        let svc = service();
        let list = svc.filtered_conversations(&InboxFilter::new().with_query("MARIA"));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "1");
    }

    #[test]
    fn query_matches_last_message() {
        let svc = service();
        let list = svc.filtered_conversations(&InboxFilter::new().with_query("promoção"));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "3");
    }

    #[test]
    fn channel_facet_composes_with_query() {
        let svc = service();
        // 查询单独命中两条（"a" 在多个名字里），渠道面收窄到一条
        let filter = InboxFilter::new().with_query("an").with_channel(Channel::Instagram);
        let list = svc.filtered_conversations(&filter);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].contact.name, "Ana Costa");
    }

    #[test]
    fn zero_match_facet_yields_empty_list() {
        let svc = service();
        let list = svc.filtered_conversations(&InboxFilter::new().with_channel(Channel::Telegram));
        assert!(list.is_empty());
    }

    #[test]
    fn messages_for_unknown_conversation_are_empty() {
        let svc = service();
        assert!(svc.messages("999").is_empty());
    }

    #[test]
    fn send_message_appends_history_and_notifies() {
        struct Counting(AtomicUsize);
        impl InboxListener for Counting {
            fn on_message_sent(&self, _conversation_id: &str, _message: &Message) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let listener = Arc::new(Counting(AtomicUsize::new(0)));
        let mut svc = service();
        svc.set_listener(listener.clone());

        let sent = svc.send_message("1", "Olá Maria! Em que posso ajudar?").unwrap();
        assert!(sent.is_mine);
        assert_eq!(sent.author_name, "Você");
        assert_eq!(sent.status, MessageStatus::Sent);
        assert_eq!(svc.messages("1").len(), 1);
        assert_eq!(listener.0.load(Ordering::SeqCst), 1);

        // 会话上的摘要不回写
        assert_eq!(
            svc.conversation("1").unwrap().last_message,
            "Preciso de ajuda com meu pedido"
        );
    }

    #[test]
    fn send_message_rejects_blank_content() {
        let mut svc = service();
        assert!(svc.send_message("1", "   ").is_err());
        assert!(svc.send_message("999", "oi").is_err());
    }

    #[test]
    fn channel_tallies_count_from_data() {
        let svc = service();
        let tallies = svc.channel_tallies();
        assert_eq!(tallies.len(), 4);
        assert_eq!(tallies[0].channel, Channel::Whatsapp);
        assert_eq!(tallies[0].count, 1);
        // 无会话的渠道计数为零而不是缺项
        let webchat = tallies.iter().find(|t| t.channel == Channel::Webchat).unwrap();
        assert_eq!(webchat.count, 0);
    }

    #[test]
    fn total_unread_sums_all_conversations() {
        let svc = service();
        assert_eq!(svc.total_unread(), 3);
    }
}
