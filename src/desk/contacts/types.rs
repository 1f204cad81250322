//! 联系人视图类型

use crate::desk::types::Channel;

/// 联系人过滤条件
///
/// 文本对姓名/邮箱做小写子串匹配，对电话/证件做原样子串匹配
/// （数字串搜索不需要大小写折叠）。
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    pub query: String,
    /// 主渠道面
    pub channel: Option<Channel>,
}

impl ContactFilter {
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

/// 侧边栏主渠道计数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactChannelTally {
    pub channel: Channel,
    pub count: usize,
}
