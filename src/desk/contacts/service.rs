//! 联系人服务层
//!
//! 目录搜索与档案操作。列表保持集合原始顺序，不做排序。

use crate::desk::contacts::listener::{ContactListener, EmptyContactListener};
use crate::desk::contacts::models::ContactDetails;
use crate::desk::contacts::types::{ContactChannelTally, ContactFilter};
use crate::desk::types::Channel;
use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// 联系人服务
pub struct ContactService {
    /// 全量联系人
    contacts: Vec<ContactDetails>,
    /// 联系人监听器
    listener: Arc<dyn ContactListener>,
}

impl ContactService {
    /// 创建联系人服务（使用默认空监听器）
    pub fn new(contacts: Vec<ContactDetails>) -> Self {
        Self::with_listener(contacts, Arc::new(EmptyContactListener))
    }

    /// 创建联系人服务（带自定义监听器）
    pub fn with_listener(
        contacts: Vec<ContactDetails>,
        listener: Arc<dyn ContactListener>,
    ) -> Self {
        debug!("[Contacts] 初始化联系人服务，联系人数: {}", contacts.len());
        Self { contacts, listener }
    }

    /// 注册联系人监听器
    pub fn set_listener(&mut self, listener: Arc<dyn ContactListener>) {
        self.listener = listener;
    }

    /// 全量联系人（集合原始顺序）
    pub fn contacts(&self) -> &[ContactDetails] {
        &self.contacts
    }

    /// 按 ID 查找联系人
    pub fn contact(&self, id: &str) -> Option<&ContactDetails> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// 按过滤条件产出联系人列表，保持集合原始顺序
    ///
    /// 姓名/邮箱小写匹配，电话/证件原样匹配；缺失的可选字段不参与匹配。
    pub fn filtered_contacts(&self, filter: &ContactFilter) -> Vec<ContactDetails> {
        let query = filter.query.to_lowercase();
        let list: Vec<ContactDetails> = self
            .contacts
            .iter()
            .filter(|contact| {
                if !filter.query.is_empty() {
                    let hit = contact.name.to_lowercase().contains(&query)
                        || contact
                            .email
                            .as_ref()
                            .is_some_and(|e| e.to_lowercase().contains(&query))
                        || contact
                            .phone
                            .as_ref()
                            .is_some_and(|p| p.contains(&filter.query))
                        || contact
                            .document
                            .as_ref()
                            .is_some_and(|d| d.contains(&filter.query));
                    if !hit {
                        return false;
                    }
                }
                if let Some(channel) = filter.channel {
                    if contact.primary_channel != channel {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        debug!(
            "[Contacts] 过滤联系人: query=\"{}\", channel={:?}, 结果 {} 条",
            filter.query,
            filter.channel,
            list.len()
        );
        list
    }

    /// 侧边栏主渠道计数（顺序固定）
    pub fn channel_tallies(&self) -> Vec<ContactChannelTally> {
        Channel::sidebar_channels()
            .into_iter()
            .map(|channel| ContactChannelTally {
                channel,
                count: self
                    .contacts
                    .iter()
                    .filter(|c| c.primary_channel == channel)
                    .count(),
            })
            .collect()
    }

    /// "Todos" 徽标的联系人总数
    pub fn total_count(&self) -> usize {
        self.contacts.len()
    }

    /// 给档案追加标签（去空白、去重）
    pub fn add_tag(&mut self, contact_id: &str, tag: &str) -> Result<ContactDetails> {
        let tag = tag.trim();
        if tag.is_empty() {
            bail!("标签为空");
        }
        let contact = self.contact_mut(contact_id)?;
        if contact.tags.iter().any(|t| t == tag) {
            debug!("[Contacts] 联系人 {} 已有标签 \"{}\"", contact_id, tag);
            return Ok(contact.clone());
        }
        info!("[Contacts] 联系人 {} 追加标签 \"{}\"", contact_id, tag);
        contact.tags.push(tag.to_string());
        let updated = contact.clone();
        self.listener.on_contact_updated(&updated);
        Ok(updated)
    }

    /// 覆盖档案备注
    pub fn update_notes(&mut self, contact_id: &str, notes: &str) -> Result<ContactDetails> {
        let contact = self.contact_mut(contact_id)?;
        info!("[Contacts] 更新联系人 {} 的备注", contact_id);
        contact.notes = notes.to_string();
        let updated = contact.clone();
        self.listener.on_contact_updated(&updated);
        Ok(updated)
    }

    fn contact_mut(&mut self, id: &str) -> Result<&mut ContactDetails> {
        match self.contacts.iter_mut().find(|c| c.id == id) {
            Some(contact) => Ok(contact),
            None => bail!("联系人不存在: {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn contact(
        id: &str,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        document: Option<&str>,
        channel: Channel,
    ) -> ContactDetails {
        ContactDetails {
            id: id.to_string(),
            name: name.to_string(),
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
            document: document.map(str::to_string),
            avatar: None,
            tags: vec![],
            primary_channel: channel,
            last_interaction: "2024-01-15T10:30:00Z".parse().unwrap(),
            notes: String::new(),
            created_at: "2023-06-15T14:20:00Z".parse().unwrap(),
            total_tickets: 4,
            resolved_tickets: 3,
            average_rating: 4.5,
            preferred_language: "pt-BR".to_string(),
            timezone: "America/Sao_Paulo".to_string(),
            custom_fields: serde_json::Map::new(),
        }
    }

    fn service() -> ContactService {
        ContactService::new(vec![
            contact("c1", "Maria Silva", Some("maria.silva@email.com"), Some("+55 11 99999-1234"), Some("123.456.789-00"), Channel::Whatsapp),
            contact("c2", "João Santos", Some("joao@empresa.com"), Some("+55 11 98888-2345"), Some("987.654.321-00"), Channel::Email),
            contact("c3", "Ana Costa", None, Some("+55 21 98888-5678"), None, Channel::Instagram),
        ])
    }

    #[test]
    fn search_matches_email_case_insensitive() {
        let svc = service();
        let list = svc.filtered_contacts(&ContactFilter::new().with_query("EMPRESA"));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "c2");
    }

    #[test]
    fn search_matches_phone_and_document_raw_substring() {
        let svc = service();
        let by_phone = svc.filtered_contacts(&ContactFilter::new().with_query("99999"));
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].id, "c1");

        let by_document = svc.filtered_contacts(&ContactFilter::new().with_query("987.654"));
        assert_eq!(by_document.len(), 1);
        assert_eq!(by_document[0].id, "c2");
    }

    #[test]
    fn missing_optional_fields_do_not_match() {
        let svc = service();
        // c3 没有邮箱和证件
        let list = svc.filtered_contacts(&ContactFilter::new().with_query("ana"));
        assert_eq!(list.len(), 1);
        let none = svc.filtered_contacts(&ContactFilter::new().with_query("123.456"));
        assert_eq!(none.len(), 1);
        assert_eq!(none[0].id, "c1");
    }

    #[test]
    fn channel_facet_filters_by_primary_channel() {
        let svc = service();
        let list = svc.filtered_contacts(&ContactFilter::new().with_channel(Channel::Instagram));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "c3");

        let none = svc.filtered_contacts(&ContactFilter::new().with_channel(Channel::Webchat));
        assert!(none.is_empty());
    }

    #[test]
    fn empty_filter_preserves_collection_order() {
        let svc = service();
        let list = svc.filtered_contacts(&ContactFilter::new());
        let ids: Vec<&str> = list.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn add_tag_and_update_notes_notify_listener() {
        struct Counting(AtomicUsize);
        impl ContactListener for Counting {
            fn on_contact_updated(&self, _contact: &ContactDetails) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
        let listener = Arc::new(Counting(AtomicUsize::new(0)));
        let mut svc = service();
        svc.set_listener(listener.clone());

        svc.add_tag("c1", "vip").unwrap();
        svc.add_tag("c1", "vip").unwrap(); // 重复，不再通知
        svc.update_notes("c1", "Cliente prioritário").unwrap();

        assert_eq!(svc.contact("c1").unwrap().tags, vec!["vip".to_string()]);
        assert_eq!(svc.contact("c1").unwrap().notes, "Cliente prioritário");
        assert_eq!(listener.0.load(Ordering::SeqCst), 2);
        assert!(svc.add_tag("c99", "x").is_err());
    }

    #[test]
    fn channel_tallies_count_primary_channels() {
        let svc = service();
        let tallies = svc.channel_tallies();
        assert_eq!(tallies[0].channel, Channel::Whatsapp);
        assert_eq!(tallies[0].count, 1);
        let webchat = tallies.iter().find(|t| t.channel == Channel::Webchat).unwrap();
        assert_eq!(webchat.count, 0);
    }
}
