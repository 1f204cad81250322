//! 会话与消息模型定义

use crate::desk::types::{
    Channel, ConversationStatus, MessageStatus, MessageType, Priority, SlaStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 会话中内嵌的联系人摘要（完整档案见 contacts 模块）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// 会话
///
/// `sla_status` 是数据里存好的值，展示时直接使用（会话没有截止时间字段，
/// 无法像工单那样实时重算）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// 会话 ID
    pub id: String,
    /// 联系人
    pub contact: Contact,
    /// 渠道
    pub channel: Channel,
    /// 最新一条消息的摘要
    pub last_message: String,
    /// 优先级
    pub priority: Priority,
    /// SLA 状态（存量值）
    pub sla_status: SlaStatus,
    /// 未读数
    pub unread_count: u32,
    /// 最后活动时间，列表按它降序排列
    pub updated_at: DateTime<Utc>,
    /// 会话状态
    pub status: ConversationStatus,
}

/// 消息附件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAttachment {
    pub id: String,
    pub name: String,
    pub url: String,
    /// MIME 类型
    #[serde(rename = "type")]
    pub attachment_type: String,
    /// 字节数
    pub size: u64,
}

/// 消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// 消息 ID
    pub id: String,
    /// 所属会话 ID
    pub conversation_id: String,
    /// 作者 ID（客户为联系人 ID，坐席为 agent ID）
    pub author_id: String,
    /// 作者显示名
    pub author_name: String,
    /// 正文
    pub content: String,
    /// 内容类型
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// 是否本方坐席发出（气泡靠右、展示投递状态）
    pub is_mine: bool,
    /// 发送时间
    pub timestamp: DateTime<Utc>,
    /// 投递状态
    pub status: MessageStatus,
    /// 附件列表（缺失时为空）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<MessageAttachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_parses_camel_case_fields() {
        let json = r#"{
            "id": "1",
            "contact": { "id": "c1", "name": "Maria Silva", "phone": "+55 11 99999-1234" },
            "channel": "whatsapp",
            "lastMessage": "Olá, preciso de ajuda",
            "priority": "high",
            "slaStatus": "warning",
            "unreadCount": 3,
            "updatedAt": "2024-01-15T10:30:00Z",
            "status": "active"
        }"#;
        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conv.contact.name, "Maria Silva");
        assert_eq!(conv.channel, Channel::Whatsapp);
        assert_eq!(conv.sla_status, SlaStatus::Warning);
        assert_eq!(conv.unread_count, 3);
        assert!(conv.contact.email.is_none());
    }

    #[test]
    fn message_type_field_uses_type_keyword() {
        let json = r#"{
            "id": "m1",
            "conversationId": "1",
            "authorId": "c1",
            "authorName": "Maria Silva",
            "content": "Olá! Bom dia",
            "type": "text",
            "isMine": false,
            "timestamp": "2024-01-15T10:00:00Z",
            "status": "read"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.message_type, MessageType::Text);
        assert!(!msg.is_mine);
        assert!(msg.attachments.is_empty());
    }
}
