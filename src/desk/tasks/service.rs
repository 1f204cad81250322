//! 任务服务层
//!
//! 任务看板分列与本地操作。任务和联系人一样保持集合原始顺序，
//! 不做时间排序（与工单看板不同）。

use crate::desk::tasks::listener::{EmptyTaskListener, TaskListener};
use crate::desk::tasks::models::{Task, TaskAssignee, TaskComment};
use crate::desk::tasks::types::{
    NewTask, TaskAssigneeFilter, TaskAssigneeTally, TaskFilter, TaskPriorityTally,
};
use crate::desk::types::{TaskPriority, TaskStatus};
use anyhow::{bail, Result};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// 不填截止时间的任务默认一周后到期
const DEFAULT_DUE_DAYS: i64 = 7;

/// 侧边栏最多展示的标签数
const POPULAR_LABEL_LIMIT: usize = 8;

/// 任务服务
pub struct TaskService {
    /// 固定团队名册（负责人面用它列出成员）
    team: Vec<TaskAssignee>,
    /// 全量任务
    tasks: Vec<Task>,
    /// 任务监听器
    listener: Arc<dyn TaskListener>,
}

impl TaskService {
    /// 创建任务服务（使用默认空监听器）
    pub fn new(team: Vec<TaskAssignee>, tasks: Vec<Task>) -> Self {
        Self::with_listener(team, tasks, Arc::new(EmptyTaskListener))
    }

    /// 创建任务服务（带自定义监听器）
    pub fn with_listener(
        team: Vec<TaskAssignee>,
        tasks: Vec<Task>,
        listener: Arc<dyn TaskListener>,
    ) -> Self {
        debug!(
            "[Tasks] 初始化任务服务，任务数: {}, 团队成员: {}",
            tasks.len(),
            team.len()
        );
        Self { team, tasks, listener }
    }

    /// 注册任务监听器
    pub fn set_listener(&mut self, listener: Arc<dyn TaskListener>) {
        self.listener = listener;
    }

    /// 全量任务（集合原始顺序）
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// 固定团队名册
    pub fn team(&self) -> &[TaskAssignee] {
        &self.team
    }

    /// 按 ID 查找任务
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn matches(task: &Task, filter: &TaskFilter, query: &str) -> bool {
        if !query.is_empty()
            && !task.title.to_lowercase().contains(query)
            && !task.description.to_lowercase().contains(query)
            && !task.id.to_lowercase().contains(query)
        {
            return false;
        }
        if let Some(priority) = filter.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(ref assignee) = filter.assignee {
            match assignee {
                TaskAssigneeFilter::Unassigned => {
                    if !task.assignees.is_empty() {
                        return false;
                    }
                }
                TaskAssigneeFilter::Id(id) => {
                    if !task.assignees.iter().any(|a| &a.id == id) {
                        return false;
                    }
                }
            }
        }
        if let Some(ref label) = filter.label {
            if !task.labels.iter().any(|l| l == label) {
                return false;
            }
        }
        true
    }

    /// 按过滤条件产出任务列表，保持集合原始顺序
    pub fn filtered_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        let query = filter.query.to_lowercase();
        let list: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| Self::matches(t, filter, &query))
            .cloned()
            .collect();
        debug!(
            "[Tasks] 过滤任务: query=\"{}\", priority={:?}, label={:?}, 结果 {} 条",
            filter.query,
            filter.priority,
            filter.label,
            list.len()
        );
        list
    }

    /// 看板视图：按固定列顺序分桶，列内保持集合原始顺序
    pub fn board(&self, filter: &TaskFilter) -> Vec<(TaskStatus, Vec<Task>)> {
        let list = self.filtered_tasks(filter);
        TaskStatus::board_columns()
            .into_iter()
            .map(|status| {
                let column: Vec<Task> =
                    list.iter().filter(|t| t.status == status).cloned().collect();
                (status, column)
            })
            .collect()
    }

    /// 下一个顺延的任务 ID（`TASK-NNN`）
    fn next_task_id(&self) -> String {
        let max = self
            .tasks
            .iter()
            .filter_map(|t| t.id.strip_prefix("TASK-").and_then(|n| n.parse::<u32>().ok()))
            .max()
            .unwrap_or(0);
        format!("TASK-{:03}", max + 1)
    }

    /// 本地创建任务
    pub fn create_task(&mut self, input: NewTask) -> Result<Task> {
        if input.title.trim().is_empty() {
            bail!("任务标题为空");
        }

        let now = Utc::now();
        let task = Task {
            id: self.next_task_id(),
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
            assignees: input.assignees,
            labels: input.labels,
            due_date: input
                .due_date
                .unwrap_or_else(|| now + Duration::days(DEFAULT_DUE_DAYS)),
            created_at: now,
            updated_at: now,
            checklist: Vec::new(),
            comments: Vec::new(),
            attachments: Vec::new(),
            project: input.project,
        };

        info!("[Tasks] 📋 创建任务: {} \"{}\"", task.id, task.title);
        self.tasks.push(task.clone());
        self.listener.on_task_created(&task);
        Ok(task)
    }

    /// 切换清单项的完成状态，刷新更新时间
    pub fn toggle_checklist_item(&mut self, task_id: &str, item_id: &str) -> Result<Task> {
        let task = self.task_mut(task_id)?;
        let Some(item) = task.checklist.iter_mut().find(|i| i.id == item_id) else {
            bail!("任务 {} 没有清单项 {}", task_id, item_id);
        };
        item.completed = !item.completed;
        info!(
            "[Tasks] 清单项切换: task={}, item={}, completed={}",
            task_id, item_id, item.completed
        );
        task.updated_at = Utc::now();
        let updated = task.clone();
        self.listener.on_task_updated(&updated);
        Ok(updated)
    }

    /// 追加评论（任务内顺延 ID），刷新更新时间
    pub fn add_comment(
        &mut self,
        task_id: &str,
        author: TaskAssignee,
        content: &str,
    ) -> Result<Task> {
        if content.trim().is_empty() {
            bail!("评论内容为空");
        }
        let task = self.task_mut(task_id)?;
        let next_id = task
            .comments
            .iter()
            .filter_map(|c| c.id.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let now = Utc::now();
        task.comments.push(TaskComment {
            id: next_id.to_string(),
            author,
            content: content.to_string(),
            created_at: now,
        });
        info!("[Tasks] 💬 任务 {} 新增评论 #{}", task_id, next_id);
        task.updated_at = now;
        let updated = task.clone();
        self.listener.on_task_updated(&updated);
        Ok(updated)
    }

    fn task_mut(&mut self, id: &str) -> Result<&mut Task> {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => Ok(task),
            None => bail!("任务不存在: {}", id),
        }
    }

    /// "Todas" 徽标的任务总数
    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    /// 侧边栏优先级计数（紧急/高/中/低顺序）
    pub fn priority_tallies(&self) -> Vec<TaskPriorityTally> {
        TaskPriority::all()
            .into_iter()
            .map(|priority| TaskPriorityTally {
                priority,
                count: self.tasks.iter().filter(|t| t.priority == priority).count(),
            })
            .collect()
    }

    /// 侧边栏成员计数（团队名册顺序，含零计数成员）
    pub fn assignee_tallies(&self) -> Vec<TaskAssigneeTally> {
        self.team
            .iter()
            .map(|member| TaskAssigneeTally {
                assignee: member.clone(),
                count: self
                    .tasks
                    .iter()
                    .filter(|t| t.assignees.iter().any(|a| a.id == member.id))
                    .count(),
            })
            .collect()
    }

    /// 没有负责人的任务数
    pub fn unassigned_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.assignees.is_empty()).count()
    }

    /// 热门标签：按首次出现顺序去重，最多取前 8 个
    pub fn popular_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for task in &self.tasks {
            for label in &task.labels {
                if !labels.contains(label) {
                    labels.push(label.clone());
                }
            }
        }
        labels.truncate(POPULAR_LABEL_LIMIT);
        labels
    }
}
