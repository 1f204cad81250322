//! 工单服务层
//!
//! 看板分列、过滤与本地操作。列内与平铺列表都按更新时间降序。

use crate::desk::tickets::listener::{EmptyTicketListener, TicketListener};
use crate::desk::tickets::models::Ticket;
use crate::desk::tickets::types::{
    AssigneeFilter, AssigneeTally, NewTicket, PriorityTally, TicketFilter,
};
use crate::desk::types::{Priority, SlaStatus, TicketStatus, User};
use anyhow::{bail, Result};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// 新工单的 SLA 期限，按优先级给定（小时）
fn sla_hours_for(priority: Priority) -> i64 {
    match priority {
        Priority::High => 4,
        Priority::Medium => 8,
        Priority::Low => 24,
    }
}

/// 工单服务
pub struct TicketService {
    /// 全量工单
    tickets: Vec<Ticket>,
    /// 工单监听器
    listener: Arc<dyn TicketListener>,
}

impl TicketService {
    /// 创建工单服务（使用默认空监听器）
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self::with_listener(tickets, Arc::new(EmptyTicketListener))
    }

    /// 创建工单服务（带自定义监听器）
    pub fn with_listener(tickets: Vec<Ticket>, listener: Arc<dyn TicketListener>) -> Self {
        debug!("[Tickets] 初始化工单服务，工单数: {}", tickets.len());
        Self { tickets, listener }
    }

    /// 注册工单监听器
    pub fn set_listener(&mut self, listener: Arc<dyn TicketListener>) {
        self.listener = listener;
    }

    /// 全量工单（未过滤、未排序）
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// 按 ID 查找工单
    pub fn ticket(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// 过滤条件是否命中一条工单
    fn matches(ticket: &Ticket, filter: &TicketFilter, query: &str) -> bool {
        if !query.is_empty()
            && !ticket.title.to_lowercase().contains(query)
            && !ticket.description.to_lowercase().contains(query)
            && !ticket.id.to_lowercase().contains(query)
            && !ticket.requester.name.to_lowercase().contains(query)
        {
            return false;
        }
        if let Some(priority) = filter.priority {
            if ticket.priority != priority {
                return false;
            }
        }
        if let Some(ref assignee) = filter.assignee {
            match assignee {
                AssigneeFilter::Unassigned => {
                    if ticket.assignee.is_some() {
                        return false;
                    }
                }
                AssigneeFilter::Name(name) => match ticket.assignee {
                    Some(ref agent) if &agent.name == name => {}
                    _ => return false,
                },
            }
        }
        true
    }

    /// 按过滤条件产出平铺工单列表，按更新时间降序
    pub fn filtered_tickets(&self, filter: &TicketFilter) -> Vec<Ticket> {
        let query = filter.query.to_lowercase();
        let mut list: Vec<Ticket> = self
            .tickets
            .iter()
            .filter(|t| Self::matches(t, filter, &query))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        debug!(
            "[Tickets] 过滤工单: query=\"{}\", priority={:?}, 结果 {} 条",
            filter.query,
            filter.priority,
            list.len()
        );
        list
    }

    /// 看板视图：按固定列顺序分桶，列内按更新时间降序
    ///
    /// 过滤后的每条工单恰好落入一列（状态是封闭枚举）。
    pub fn board(&self, filter: &TicketFilter) -> Vec<(TicketStatus, Vec<Ticket>)> {
        let list = self.filtered_tickets(filter);
        TicketStatus::board_columns()
            .into_iter()
            .map(|status| {
                let column: Vec<Ticket> =
                    list.iter().filter(|t| t.status == status).cloned().collect();
                (status, column)
            })
            .collect()
    }

    /// 下一个顺延的工单 ID（`T-NNN`）
    fn next_ticket_id(&self) -> String {
        let max = self
            .tickets
            .iter()
            .filter_map(|t| t.id.strip_prefix("T-").and_then(|n| n.parse::<u32>().ok()))
            .max()
            .unwrap_or(0);
        format!("T-{:03}", max + 1)
    }

    /// 本地创建工单
    ///
    /// 新工单进入 `open` 列；SLA 期限按优先级给定（高 4h / 中 8h / 低 24h）。
    pub fn create_ticket(&mut self, input: NewTicket) -> Result<Ticket> {
        if input.title.trim().is_empty() {
            bail!("工单标题为空");
        }
        if input.description.trim().is_empty() {
            bail!("工单描述为空");
        }

        let now = Utc::now();
        let ticket = Ticket {
            id: self.next_ticket_id(),
            title: input.title,
            description: input.description,
            status: TicketStatus::Open,
            priority: input.priority,
            assignee: input.assignee,
            requester: input.requester,
            channel: input.channel,
            tags: input.tags,
            sla_deadline: now + Duration::hours(sla_hours_for(input.priority)),
            sla_status: SlaStatus::Ok,
            created_at: now,
            updated_at: now,
            conversation_id: None,
        };

        info!("[Tickets] 🎫 创建工单: {} \"{}\"", ticket.id, ticket.title);
        self.tickets.push(ticket.clone());
        self.listener.on_ticket_created(&ticket);
        Ok(ticket)
    }

    /// 指派负责人，刷新更新时间
    pub fn assign(&mut self, ticket_id: &str, agent: User) -> Result<Ticket> {
        let ticket = self.ticket_mut(ticket_id)?;
        info!("[Tickets] 指派工单 {} 给 {}", ticket_id, agent.name);
        ticket.assignee = Some(agent);
        ticket.updated_at = Utc::now();
        let updated = ticket.clone();
        self.listener.on_ticket_updated(&updated);
        Ok(updated)
    }

    /// 取消指派，刷新更新时间
    pub fn unassign(&mut self, ticket_id: &str) -> Result<Ticket> {
        let ticket = self.ticket_mut(ticket_id)?;
        info!("[Tickets] 取消工单 {} 的指派", ticket_id);
        ticket.assignee = None;
        ticket.updated_at = Utc::now();
        let updated = ticket.clone();
        self.listener.on_ticket_updated(&updated);
        Ok(updated)
    }

    /// 追加标签（去空白、去重），刷新更新时间
    pub fn add_tag(&mut self, ticket_id: &str, tag: &str) -> Result<Ticket> {
        let tag = tag.trim();
        if tag.is_empty() {
            bail!("标签为空");
        }
        let ticket = self.ticket_mut(ticket_id)?;
        if ticket.tags.iter().any(|t| t == tag) {
            // 重复标签静默忽略，不触发回调
            debug!("[Tickets] 工单 {} 已有标签 \"{}\"", ticket_id, tag);
            return Ok(ticket.clone());
        }
        info!("[Tickets] 工单 {} 追加标签 \"{}\"", ticket_id, tag);
        ticket.tags.push(tag.to_string());
        ticket.updated_at = Utc::now();
        let updated = ticket.clone();
        self.listener.on_ticket_updated(&updated);
        Ok(updated)
    }

    fn ticket_mut(&mut self, id: &str) -> Result<&mut Ticket> {
        match self.tickets.iter_mut().find(|t| t.id == id) {
            Some(ticket) => Ok(ticket),
            None => bail!("工单不存在: {}", id),
        }
    }

    /// "Todas" 徽标的工单总数
    pub fn total_count(&self) -> usize {
        self.tickets.len()
    }

    /// 侧边栏优先级计数（高/中/低顺序）
    pub fn priority_tallies(&self) -> Vec<PriorityTally> {
        Priority::all()
            .into_iter()
            .map(|priority| PriorityTally {
                priority,
                count: self.tickets.iter().filter(|t| t.priority == priority).count(),
            })
            .collect()
    }

    /// 侧边栏负责人计数，按首次出现顺序去重
    pub fn assignee_tallies(&self) -> Vec<AssigneeTally> {
        let mut tallies: Vec<AssigneeTally> = Vec::new();
        for ticket in &self.tickets {
            let Some(ref agent) = ticket.assignee else { continue };
            match tallies.iter_mut().find(|t| t.name == agent.name) {
                Some(tally) => tally.count += 1,
                None => tallies.push(AssigneeTally { name: agent.name.clone(), count: 1 }),
            }
        }
        tallies
    }

    /// 未分配的工单数（"Não atribuído" 徽标）
    pub fn unassigned_count(&self) -> usize {
        self.tickets.iter().filter(|t| t.assignee.is_none()).count()
    }

    /// 侧边栏的热门标签（固定列表）
    pub fn popular_tags(&self) -> [&'static str; 4] {
        ["pedido", "login", "cancelamento", "demo"]
    }
}
