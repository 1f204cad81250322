//! 收件箱监听器回调接口

use crate::desk::inbox::models::Message;

/// 收件箱监听器回调接口
pub trait InboxListener: Send + Sync {
    /// 本地发送消息后触发
    fn on_message_sent(&self, conversation_id: &str, message: &Message);
}

/// 空实现（默认监听器）
pub struct EmptyInboxListener;

impl InboxListener for EmptyInboxListener {
    fn on_message_sent(&self, _conversation_id: &str, _message: &Message) {}
}
