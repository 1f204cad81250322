//! 任务监听器回调接口

use crate::desk::tasks::models::Task;

/// 任务监听器回调接口
pub trait TaskListener: Send + Sync {
    /// 本地创建任务后触发
    fn on_task_created(&self, task: &Task);

    /// 清单切换/评论等更新后触发
    fn on_task_updated(&self, task: &Task);
}

/// 空实现（默认监听器）
pub struct EmptyTaskListener;

impl TaskListener for EmptyTaskListener {
    fn on_task_created(&self, _task: &Task) {}
    fn on_task_updated(&self, _task: &Task) {}
}
