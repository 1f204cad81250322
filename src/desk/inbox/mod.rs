//! 收件箱模块
//!
//! 多渠道会话列表、消息历史与本地发送

pub mod listener;
pub mod models;
pub mod service;
pub mod types;

// 重新导出主要类型
pub use listener::{EmptyInboxListener, InboxListener};
pub use models::{Contact, Conversation, Message, MessageAttachment};
pub use service::InboxService;
pub use types::{ChannelTally, InboxFilter, MessageTemplate, Queue};
