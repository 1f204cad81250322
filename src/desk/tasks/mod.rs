//! 任务模块
//!
//! 内部任务看板：清单进度、评论与本地操作

pub mod listener;
pub mod models;
pub mod service;
pub mod types;

// 重新导出主要类型
pub use listener::{EmptyTaskListener, TaskListener};
pub use models::{ChecklistItem, Task, TaskAssignee, TaskComment};
pub use service::TaskService;
pub use types::{NewTask, TaskAssigneeFilter, TaskAssigneeTally, TaskFilter, TaskPriorityTally};
