pub mod auth;
pub mod client;
pub mod contacts;
pub mod dashboard;
pub mod fixtures;
pub mod format;
pub mod inbox;
pub mod tasks;
pub mod tickets;
pub mod types;

// 重新导出登录和面板相关类型
pub use auth::{login, Session};
pub use dashboard::DashboardSnapshot;
