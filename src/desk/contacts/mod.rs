//! 联系人模块
//!
//! 联系人目录：搜索、主渠道过滤与档案操作

pub mod listener;
pub mod models;
pub mod service;
pub mod types;

// 重新导出主要类型
pub use listener::{ContactListener, EmptyContactListener};
pub use models::ContactDetails;
pub use service::ContactService;
pub use types::{ContactChannelTally, ContactFilter};
