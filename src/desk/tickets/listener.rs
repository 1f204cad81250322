//! 工单监听器回调接口

use crate::desk::tickets::models::Ticket;

/// 工单监听器回调接口
pub trait TicketListener: Send + Sync {
    /// 本地创建工单后触发
    fn on_ticket_created(&self, ticket: &Ticket);

    /// 工单被指派/打标签等更新后触发
    fn on_ticket_updated(&self, ticket: &Ticket);
}

/// 空实现（默认监听器）
pub struct EmptyTicketListener;

impl TicketListener for EmptyTicketListener {
    fn on_ticket_created(&self, _ticket: &Ticket) {}
    fn on_ticket_updated(&self, _ticket: &Ticket) {}
}
