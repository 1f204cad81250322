//! 工单模块
//!
//! 工单看板、过滤与本地操作（创建、指派、打标签）

pub mod listener;
pub mod models;
pub mod service;
pub mod types;

// 重新导出主要类型
pub use listener::{EmptyTicketListener, TicketListener};
pub use models::Ticket;
pub use service::TicketService;
pub use types::{AssigneeFilter, AssigneeTally, NewTicket, PriorityTally, TicketFilter};
