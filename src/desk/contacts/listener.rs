//! 联系人监听器回调接口

use crate::desk::contacts::models::ContactDetails;

/// 联系人监听器回调接口
pub trait ContactListener: Send + Sync {
    /// 档案被修改（打标签、更新备注）后触发
    fn on_contact_updated(&self, contact: &ContactDetails);
}

/// 空实现（默认监听器）
pub struct EmptyContactListener;

impl ContactListener for EmptyContactListener {
    fn on_contact_updated(&self, _contact: &ContactDetails) {}
}
