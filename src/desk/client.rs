//! GhitDesk 客户端核心实现模块
//!
//! 聚合收件箱、工单、任务、联系人四个领域服务，创建时载入内置演示数据。

use crate::desk::contacts::{ContactListener, ContactService};
use crate::desk::dashboard::DashboardSnapshot;
use crate::desk::fixtures;
use crate::desk::inbox::{InboxListener, InboxService};
use crate::desk::tasks::{TaskListener, TaskService};
use crate::desk::tickets::{TicketListener, TicketService};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// 客户端配置
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// 坐席 ID
    pub agent_id: String,
    /// 坐席显示名
    pub agent_name: String,
    /// 界面语言，例如 "pt-BR"
    pub locale: String,
    /// 坐席所在时区
    pub timezone: String,
}

impl ClientConfig {
    /// 创建默认配置
    pub fn new(agent_id: String, agent_name: String) -> Self {
        Self {
            agent_id,
            agent_name,
            locale: "pt-BR".to_string(),
            timezone: "America/Sao_Paulo".to_string(),
        }
    }
}

/// GhitDesk 客户端
///
/// 控制台核心逻辑实现
pub struct DeskClient {
    pub(crate) config: ClientConfig,
    /// 收件箱服务（会话 + 消息）
    inbox: InboxService,
    /// 工单服务（看板 + SLA）
    tickets: TicketService,
    /// 任务服务（内部团队看板）
    tasks: TaskService,
    /// 联系人目录服务
    contacts: ContactService,
}

impl DeskClient {
    /// 创建新的客户端并载入演示数据
    /// - `config`: 客户端配置
    pub fn new(config: ClientConfig) -> Result<Self> {
        info!(
            "[Client] 🔗 初始化 GhitDesk 客户端 (agent={}, locale={})",
            config.agent_id, config.locale
        );

        let conversations = fixtures::load_conversations()?;
        let messages = fixtures::load_messages()?;
        let inbox = InboxService::new(config.agent_id.clone(), conversations, messages);

        let tickets = TicketService::new(fixtures::load_tickets()?);
        let tasks = TaskService::new(fixtures::task_team(), fixtures::seed_tasks(Utc::now()));
        let contacts = ContactService::new(fixtures::load_contacts()?);

        info!(
            "[Client] ✅ 演示数据载入完成: {} 会话, {} 工单, {} 任务, {} 联系人",
            inbox.total_count(),
            tickets.tickets().len(),
            tasks.tasks().len(),
            contacts.total_count()
        );

        Ok(Self {
            config,
            inbox,
            tickets,
            tasks,
            contacts,
        })
    }

    /// 当前配置
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 注册收件箱监听器
    pub fn set_inbox_listener(&mut self, listener: Arc<dyn InboxListener>) {
        self.inbox.set_listener(listener);
    }

    /// 注册工单监听器
    pub fn set_ticket_listener(&mut self, listener: Arc<dyn TicketListener>) {
        self.tickets.set_listener(listener);
    }

    /// 注册任务监听器
    pub fn set_task_listener(&mut self, listener: Arc<dyn TaskListener>) {
        self.tasks.set_listener(listener);
    }

    /// 注册联系人监听器
    pub fn set_contact_listener(&mut self, listener: Arc<dyn ContactListener>) {
        self.contacts.set_listener(listener);
    }

    /// 收件箱服务
    pub fn inbox(&self) -> &InboxService {
        &self.inbox
    }

    /// 收件箱服务（可变，用于发送消息等写操作）
    pub fn inbox_mut(&mut self) -> &mut InboxService {
        &mut self.inbox
    }

    /// 工单服务
    pub fn tickets(&self) -> &TicketService {
        &self.tickets
    }

    /// 工单服务（可变，用于创建、分配等写操作）
    pub fn tickets_mut(&mut self) -> &mut TicketService {
        &mut self.tickets
    }

    /// 任务服务
    pub fn tasks(&self) -> &TaskService {
        &self.tasks
    }

    /// 任务服务（可变，用于创建、打勾、评论等写操作）
    pub fn tasks_mut(&mut self) -> &mut TaskService {
        &mut self.tasks
    }

    /// 联系人服务
    pub fn contacts(&self) -> &ContactService {
        &self.contacts
    }

    /// 联系人服务（可变，用于标签、备注等写操作）
    pub fn contacts_mut(&mut self) -> &mut ContactService {
        &mut self.contacts
    }

    /// 面板 KPI 快照，`now` 用于 SLA 实时分级
    pub fn dashboard(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        DashboardSnapshot::capture(&self.inbox, &self.tickets, &self.contacts, now)
    }
}
