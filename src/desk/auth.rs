//! 模拟登录
//!
//! 纯本地校验，无后端、无 token。校验通过后返回演示坐席的会话。

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// 登录后的本地会话
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// 坐席 ID（与消息历史中的 authorId 一致）
    pub agent_id: String,
    /// 坐席显示名
    pub agent_name: String,
    /// 登录时刻
    pub logged_in_at: DateTime<Utc>,
}

/// 模拟登录：邮箱和密码非空且邮箱含 '@' 即通过
pub fn login(email: &str, password: &str) -> Result<Session> {
    if email.trim().is_empty() || password.is_empty() || !email.contains('@') {
        warn!("[Auth] ❌ 登录校验未通过: email=\"{}\"", email);
        bail!("Email ou senha incorretos. Tente novamente.");
    }

    info!("[Auth] ✅ 登录成功: {}", email);
    Ok(Session {
        agent_id: "agent1".to_string(),
        agent_name: "Carlos Mendes".to_string(),
        logged_in_at: Utc::now(),
    })
}
