//! 收件箱视图类型（过滤条件与侧边栏数据）

use crate::desk::types::Channel;

/// 收件箱过滤条件
///
/// 空查询匹配全部，未选渠道匹配全部；两者同时生效时取交集。
#[derive(Debug, Clone, Default)]
pub struct InboxFilter {
    /// 自由文本，匹配联系人姓名或最新消息（大小写不敏感的子串）
    pub query: String,
    /// 渠道面
    pub channel: Option<Channel>,
}

impl InboxFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = Some(channel);
        self
    }
}

/// 侧边栏渠道计数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTally {
    pub channel: Channel,
    pub count: usize,
}

/// 侧边栏队列（静态模拟数据，尚未参与过滤）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue {
    pub id: &'static str,
    pub name: &'static str,
    pub count: usize,
}

/// 快捷回复模板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pub name: &'static str,
    pub content: &'static str,
}
