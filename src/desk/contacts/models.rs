//! 联系人档案模型定义

use crate::desk::types::Channel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 联系人完整档案
///
/// `custom_fields` 是开放映射，值可以是字符串或数字（夹具里有
/// `"idade": 24` 这样的数字字段），所以用 `serde_json::Value` 承接。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// CPF/CNPJ，展示时套掩码
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub tags: Vec<String>,
    /// 最常用的联系渠道
    pub primary_channel: Channel,
    pub last_interaction: DateTime<Utc>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub total_tickets: u32,
    pub resolved_tickets: u32,
    /// 平均评分，0 表示尚无评价
    pub average_rating: f64,
    pub preferred_language: String,
    pub timezone: String,
    pub custom_fields: serde_json::Map<String, serde_json::Value>,
}

impl ContactDetails {
    /// 解决率（四舍五入的百分比）；没有工单时为 0
    pub fn resolution_rate(&self) -> u32 {
        if self.total_tickets == 0 {
            return 0;
        }
        ((self.resolved_tickets as f64 / self.total_tickets as f64) * 100.0).round() as u32
    }

    /// 档案面板的评分文案，一位小数
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.average_rating)
    }
}
