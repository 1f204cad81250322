//! GhitDesk CLI 控制台（演示版）
//!
//! 非交互式 CLI，用于在终端渲染客服控制台的各个页面
//! 通过子命令选择页面，过滤条件由命令行参数传入；demo 子命令
//! 依次执行各服务的写操作，展示监听器回调链路

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use ghitdesk_console_rust::desk::client::{ClientConfig, DeskClient};
use ghitdesk_console_rust::desk::contacts::{ContactDetails, ContactFilter, ContactListener};
use ghitdesk_console_rust::desk::format;
use ghitdesk_console_rust::desk::inbox::{InboxFilter, InboxListener, Message};
use ghitdesk_console_rust::desk::tasks::{
    NewTask, Task, TaskAssigneeFilter, TaskFilter, TaskListener,
};
use ghitdesk_console_rust::desk::tickets::{
    AssigneeFilter, NewTicket, Ticket, TicketFilter, TicketListener,
};
use ghitdesk_console_rust::desk::types::{Channel, Priority, TaskPriority, TaskStatus, User};
use std::sync::Arc;
use tracing::info;

/// GhitDesk CLI 控制台
#[derive(Parser, Debug)]
#[command(name = "ghitdesk-cli")]
#[command(about = "GhitDesk CLI 控制台 - 在终端渲染客服工作台页面", long_about = None)]
struct Args {
    /// 日志级别（默认: info,ghitdesk_console_rust=debug）
    #[arg(long, default_value = "info,ghitdesk_console_rust=debug")]
    log_level: String,

    /// 页面子命令（缺省时渲染仪表盘）
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 仪表盘：KPI、渠道量、最近活动与快捷操作
    Dashboard,
    /// 收件箱：会话列表与选中会话的消息历史
    Inbox {
        /// 搜索词（匹配联系人姓名或最新消息）
        #[arg(short, long, default_value = "")]
        query: String,
        /// 渠道面（whatsapp/email/instagram/webchat）
        #[arg(short, long)]
        channel: Option<Channel>,
        /// 选中的会话 ID（缺省取列表第一个）
        #[arg(long)]
        conversation: Option<String>,
    },
    /// 工单看板：四个状态列
    Tickets {
        /// 搜索词（匹配标题、描述、工单 ID 或客户姓名）
        #[arg(short, long, default_value = "")]
        query: String,
        /// 优先级面（high/medium/low）
        #[arg(short, long)]
        priority: Option<Priority>,
        /// 按负责人显示名过滤
        #[arg(short, long)]
        assignee: Option<String>,
        /// 只看未分配的工单
        #[arg(long)]
        unassigned: bool,
    },
    /// 任务看板：四个状态列
    Tasks {
        /// 搜索词（匹配标题、描述或任务 ID）
        #[arg(short, long, default_value = "")]
        query: String,
        /// 优先级面（urgent/high/medium/low）
        #[arg(short, long)]
        priority: Option<TaskPriority>,
        /// 按成员 ID 过滤（如 1..5）
        #[arg(short, long)]
        assignee: Option<String>,
        /// 只看没有负责人的任务
        #[arg(long)]
        unassigned: bool,
        /// 标签面
        #[arg(short, long)]
        label: Option<String>,
    },
    /// 联系人目录
    Contacts {
        /// 搜索词（姓名/邮箱/电话/证件）
        #[arg(short, long, default_value = "")]
        query: String,
        /// 主渠道面
        #[arg(short, long)]
        channel: Option<Channel>,
    },
    /// 演示：依次执行各服务的写操作，观察监听器回调
    Demo,
}

/// 初始化日志（同时输出到 stdout 和文件）
fn init_logger(log_level: &str) {
    use std::fs::OpenOptions;
    use std::io;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // 优先使用环境变量 RUST_LOG（如果设置了），否则使用命令行参数
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // 创建日志文件（追加模式）
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("无法创建日志文件 debug.log");

    // 输出到 stdout（控制台），保留 ANSI 颜色代码用于终端显示
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(true);

    // 输出到文件，禁用 ANSI 颜色代码（文件不需要颜色）
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    info!("[CLI] 📝 日志已同时输出到控制台和文件: debug.log");
}

/// 设置监听器（本地写操作成功后打印回调事件）
fn setup_listeners(client: &mut DeskClient) {
    // 收件箱监听器
    struct CliInboxListener;
    impl InboxListener for CliInboxListener {
        fn on_message_sent(&self, conversation_id: &str, message: &Message) {
            info!(
                "[CLI/Inbox] 📨 消息已发送: 会话 {} | {}",
                conversation_id, message.content
            );
        }
    }
    client.set_inbox_listener(Arc::new(CliInboxListener));

    // 工单监听器
    struct CliTicketListener;
    impl TicketListener for CliTicketListener {
        fn on_ticket_created(&self, ticket: &Ticket) {
            info!("[CLI/Ticket] 🎫 工单已创建: {} | {}", ticket.id, ticket.title);
        }

        fn on_ticket_updated(&self, ticket: &Ticket) {
            info!("[CLI/Ticket] 🔄 工单已更新: {}", ticket.id);
        }
    }
    client.set_ticket_listener(Arc::new(CliTicketListener));

    // 任务监听器
    struct CliTaskListener;
    impl TaskListener for CliTaskListener {
        fn on_task_created(&self, task: &Task) {
            info!("[CLI/Task] 📋 任务已创建: {} | {}", task.id, task.title);
        }

        fn on_task_updated(&self, task: &Task) {
            info!("[CLI/Task] 🔄 任务已更新: {}", task.id);
        }
    }
    client.set_task_listener(Arc::new(CliTaskListener));

    // 联系人监听器
    struct CliContactListener;
    impl ContactListener for CliContactListener {
        fn on_contact_updated(&self, contact: &ContactDetails) {
            info!("[CLI/Contact] 👤 联系人已更新: {}", contact.name);
        }
    }
    client.set_contact_listener(Arc::new(CliContactListener));
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志
    init_logger(&args.log_level);

    info!("[CLI] 🚀 GhitDesk CLI 控制台（演示模式）");

    let config = ClientConfig::new("agent1".to_string(), "Carlos Mendes".to_string());
    info!("[CLI] 👤 坐席: {} ({})", config.agent_name, config.agent_id);

    let mut client = DeskClient::new(config)?;
    setup_listeners(&mut client);

    let now = Utc::now();
    match args.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => render_dashboard(&client, now),
        Command::Inbox {
            query,
            channel,
            conversation,
        } => {
            let mut filter = InboxFilter::new().with_query(query);
            if let Some(channel) = channel {
                filter = filter.with_channel(channel);
            }
            render_inbox(&client, &filter, conversation.as_deref(), now);
        }
        Command::Tickets {
            query,
            priority,
            assignee,
            unassigned,
        } => {
            let mut filter = TicketFilter::new().with_query(query);
            if let Some(priority) = priority {
                filter = filter.with_priority(priority);
            }
            if unassigned {
                filter = filter.with_assignee(AssigneeFilter::Unassigned);
            } else if let Some(name) = assignee {
                filter = filter.with_assignee(AssigneeFilter::Name(name));
            }
            render_tickets(&client, &filter, now);
        }
        Command::Tasks {
            query,
            priority,
            assignee,
            unassigned,
            label,
        } => {
            let mut filter = TaskFilter::new().with_query(query);
            if let Some(priority) = priority {
                filter = filter.with_priority(priority);
            }
            if unassigned {
                filter = filter.with_assignee(TaskAssigneeFilter::Unassigned);
            } else if let Some(id) = assignee {
                filter = filter.with_assignee(TaskAssigneeFilter::Id(id));
            }
            if let Some(label) = label {
                filter = filter.with_label(label);
            }
            render_tasks(&client, &filter, now);
        }
        Command::Contacts { query, channel } => {
            let mut filter = ContactFilter::new().with_query(query);
            if let Some(channel) = channel {
                filter = filter.with_channel(channel);
            }
            render_contacts(&client, &filter, now);
        }
        Command::Demo => run_demo(&mut client)?,
    }

    info!("[CLI] 👋 渲染完成");
    Ok(())
}

/// 仪表盘页面
fn render_dashboard(client: &DeskClient, now: DateTime<Utc>) {
    let snapshot = client.dashboard(now);

    println!("======== Dashboard ========");
    println!();
    println!(
        "Conversas Ativas: {} ({} não lidas)",
        snapshot.active_conversations, snapshot.unread_messages
    );
    println!("SLA a Vencer: {} (próximas 2 horas)", snapshot.sla_due_soon);
    println!(
        "TMA: {} (tempo médio de atendimento)",
        snapshot.average_handling_time
    );
    println!("Satisfação: {} (avaliação média)", snapshot.rating_label());
    println!();
    println!("Volume por Canal (últimas 24 horas)");
    for volume in &snapshot.channel_volume {
        println!("  {:<10} {:>3}", volume.channel.display_name(), volume.count);
    }
    println!();
    println!("Atividades Recentes");
    for activity in &snapshot.recent_activities {
        println!(
            "  [{}] {} ({})",
            activity.badge,
            activity.title,
            activity.relative_label(now)
        );
        println!("        {}", activity.description);
    }
    println!();
    println!("Ações Rápidas");
    for action in &snapshot.quick_actions {
        println!("  {} - {} ({})", action.title, action.description, action.href);
    }
}

/// 收件箱页面
fn render_inbox(
    client: &DeskClient,
    filter: &InboxFilter,
    conversation_id: Option<&str>,
    now: DateTime<Utc>,
) {
    let inbox = client.inbox();

    println!("======== Inbox ========");
    println!();
    println!("Canais (Todos: {})", inbox.total_count());
    for tally in inbox.channel_tallies() {
        println!("  {:<10} {:>3}", tally.channel.display_name(), tally.count);
    }
    println!();
    println!("Filas");
    for queue in inbox.queues() {
        println!("  {:<12} {:>3}", queue.name, queue.count);
    }
    println!();
    println!("Tags: {}", inbox.sidebar_tags().join(", "));
    println!();

    let conversations = inbox.filtered_conversations(filter);
    if conversations.is_empty() {
        println!("Nenhuma conversa encontrada");
        return;
    }

    println!("Conversas ({})", conversations.len());
    for conversation in &conversations {
        let preview: String = conversation.last_message.chars().take(40).collect();
        let unread = if conversation.unread_count > 0 {
            format!(" [{}]", conversation.unread_count)
        } else {
            String::new()
        };
        println!(
            "  {} | {} | {} | SLA {} | {}{}",
            conversation.contact.name,
            conversation.channel.display_name(),
            format::format_relative_time(conversation.updated_at, now),
            conversation.sla_status.short_label(),
            preview,
            unread
        );
    }

    // 选中会话：参数指定，缺省取过滤后列表的第一个
    let selected = conversation_id
        .and_then(|id| inbox.conversation(id))
        .or_else(|| conversations.first());
    if let Some(conversation) = selected {
        println!();
        println!(
            "--- {} ({}) ---",
            conversation.contact.name,
            conversation.channel.display_name()
        );
        println!(
            "Prioridade: {} | SLA: {} | Canal: {}",
            conversation.priority.display_name(),
            conversation.sla_status.short_label(),
            conversation.channel.display_name()
        );
        let messages = inbox.messages(&conversation.id);
        if messages.is_empty() {
            println!("Nenhuma mensagem ainda");
        } else {
            for message in messages {
                let status = if message.is_mine {
                    format!(" {}", message.status.indicator())
                } else {
                    String::new()
                };
                println!(
                    "  [{}] {}: {}{}",
                    format::format_time(message.timestamp),
                    message.author_name,
                    message.content,
                    status
                );
                for attachment in &message.attachments {
                    println!("      📎 {}", attachment.name);
                }
            }
        }
    }

    let templates = inbox.message_templates();
    let names: Vec<&str> = templates.iter().map(|template| template.name).collect();
    println!();
    println!("Modelos: {}", names.join(", "));
}

/// 工单看板页面
fn render_tickets(client: &DeskClient, filter: &TicketFilter, now: DateTime<Utc>) {
    let tickets = client.tickets();

    println!("======== Tickets ========");
    println!();
    println!("Prioridade (Todas: {})", tickets.total_count());
    for tally in tickets.priority_tallies() {
        println!("  {:<8} {:>3}", tally.priority.display_name(), tally.count);
    }
    println!();
    println!(
        "Responsáveis (Todos: {} | Não atribuído: {})",
        tickets.total_count(),
        tickets.unassigned_count()
    );
    for tally in tickets.assignee_tallies() {
        println!("  {:<16} {:>3}", tally.name, tally.count);
    }
    println!();
    println!("Tags Populares: {}", tickets.popular_tags().join(", "));
    println!();

    for (status, column) in tickets.board(filter) {
        println!("== {} ({}) ==", status.display_name(), column.len());
        if column.is_empty() {
            println!("  Nenhum ticket {}", status.display_name().to_lowercase());
        } else {
            for ticket in &column {
                println!(
                    "  {} [{}] {}",
                    ticket.id,
                    ticket.priority.display_name(),
                    ticket.title
                );
                println!(
                    "      {} | {} | SLA: {} ({})",
                    ticket.requester.name,
                    ticket.channel.display_name(),
                    format::format_sla_time(ticket.sla_deadline, now),
                    ticket.live_sla_status(now).short_label()
                );
                let assignee = ticket
                    .assignee
                    .as_ref()
                    .map(|user| user.name.as_str())
                    .unwrap_or("Não atribuído");
                if ticket.tags.is_empty() {
                    println!("      {}", assignee);
                } else {
                    println!("      {} | {}", ticket.tags.join(", "), assignee);
                }
            }
        }
        println!();
    }
}

/// 任务看板页面
fn render_tasks(client: &DeskClient, filter: &TaskFilter, now: DateTime<Utc>) {
    let tasks = client.tasks();

    println!("======== Tarefas ========");
    println!();
    println!("Prioridade (Todas: {})", tasks.total_count());
    for tally in tasks.priority_tallies() {
        println!("  {:<8} {:>3}", tally.priority.display_name(), tally.count);
    }
    println!();
    println!(
        "Responsáveis (Todos: {} | Não atribuído: {})",
        tasks.total_count(),
        tasks.unassigned_count()
    );
    for tally in tasks.assignee_tallies() {
        println!("  {:<16} {:>3}", tally.assignee.name, tally.count);
    }
    println!();
    println!("Labels Populares: {}", tasks.popular_labels().join(", "));
    println!();

    for (status, column) in tasks.board(filter) {
        println!("== {} ({}) ==", status.display_name(), column.len());
        if column.is_empty() {
            println!("  Nenhuma tarefa {}", status.display_name().to_lowercase());
        } else {
            for task in &column {
                println!(
                    "  {} [{}] {}",
                    task.id,
                    task.priority.display_name(),
                    task.title
                );
                let overdue = if task.is_overdue(now) { " ⚠" } else { "" };
                println!(
                    "      Checklist {} ({}%) | {}{}",
                    task.checklist_label(),
                    task.checklist_percent(),
                    format::format_relative_time(task.due_date, now),
                    overdue
                );
                if !task.labels.is_empty() {
                    println!("      Labels: {}", task.labels.join(", "));
                }
                let assignees = if task.assignees.is_empty() {
                    "Não atribuído".to_string()
                } else {
                    let names: Vec<&str> = task
                        .assignees
                        .iter()
                        .map(|assignee| assignee.name.as_str())
                        .collect();
                    names.join(", ")
                };
                let mut extras = String::new();
                if !task.comments.is_empty() {
                    extras.push_str(&format!(" | comentários: {}", task.comments.len()));
                }
                if !task.attachments.is_empty() {
                    extras.push_str(&format!(" | anexos: {}", task.attachments.len()));
                }
                if let Some(project) = &task.project {
                    extras.push_str(&format!(" | {}", project));
                }
                println!("      {}{}", assignees, extras);
            }
        }
        println!();
    }
}

/// 联系人目录页面
fn render_contacts(client: &DeskClient, filter: &ContactFilter, now: DateTime<Utc>) {
    let contacts = client.contacts();

    println!("======== Contatos ========");
    println!();
    println!("Canais");
    for tally in contacts.channel_tallies() {
        println!("  {:<10} {:>3}", tally.channel.display_name(), tally.count);
    }
    println!();

    let rows = contacts.filtered_contacts(filter);
    if rows.is_empty() {
        println!("Nenhum contato encontrado");
        return;
    }

    println!("Contatos ({} de {})", rows.len(), contacts.total_count());
    for contact in &rows {
        let email = contact.email.as_deref().unwrap_or("-");
        let phone = contact
            .phone
            .as_deref()
            .map(format::format_phone)
            .unwrap_or_else(|| "-".to_string());
        let document = contact
            .document
            .as_deref()
            .map(format::format_document)
            .unwrap_or_else(|| "-".to_string());
        println!("  {} | {} | {}", contact.name, email, phone);
        println!(
            "      {} | {} | {} | ★ {}",
            document,
            contact.primary_channel.display_name(),
            format::format_relative_time(contact.last_interaction, now),
            contact.rating_label()
        );
        println!(
            "      Tickets: {}/{} ({}%) | Tags: {}",
            contact.resolved_tickets,
            contact.total_tickets,
            contact.resolution_rate(),
            contact.tags.join(", ")
        );
        if !contact.notes.is_empty() {
            println!("      Notas: {}", contact.notes);
        }
    }
}

/// 演示写路径：发消息、建单指派、建任务评论、联系人打标签
fn run_demo(client: &mut DeskClient) -> Result<()> {
    info!("[CLI] 💡 演示模式：依次执行各服务的写操作");

    let message = client
        .inbox_mut()
        .send_message("1", "Olá! Recebemos seu pedido e já estamos verificando.")?;
    info!("[CLI] 📤 回复已入会话 1: {}", message.id);

    let config = client.config().clone();
    let agent = User {
        id: config.agent_id.clone(),
        name: config.agent_name.clone(),
        avatar: None,
        role: "agent".to_string(),
    };
    let requester = User {
        id: "c2".to_string(),
        name: "João Santos".to_string(),
        avatar: None,
        role: "customer".to_string(),
    };
    let ticket = client.tickets_mut().create_ticket(NewTicket {
        title: "Acesso de administrador ao painel".to_string(),
        description: "Cliente solicitou elevação de acesso para gerenciar a loja".to_string(),
        priority: Priority::Medium,
        channel: Channel::Email,
        requester,
        assignee: None,
        tags: vec!["demo".to_string()],
    })?;
    let ticket = client.tickets_mut().assign(&ticket.id, agent)?;
    info!("[CLI] 🎫 工单 {} 已指派给 {}", ticket.id, config.agent_name);

    let author = match client.tasks().team().first() {
        Some(member) => member.clone(),
        None => bail!("团队名册为空"),
    };
    let task = client.tasks_mut().create_task(NewTask {
        title: "Revisar fluxo de onboarding".to_string(),
        description: "Atualizar as telas iniciais com o novo tom de voz".to_string(),
        priority: TaskPriority::Medium,
        status: TaskStatus::Todo,
        due_date: None,
        assignees: vec![author.clone()],
        labels: vec!["onboarding".to_string()],
        project: Some("GhitDesk UI".to_string()),
    })?;
    client
        .tasks_mut()
        .add_comment(&task.id, author, "Começando pela tela de boas-vindas")?;
    client.tasks_mut().toggle_checklist_item("TASK-001", "3")?;

    let contact = client.contacts_mut().add_tag("c1", "demo")?;
    client
        .contacts_mut()
        .update_notes(&contact.id, "Cliente acompanhado de perto durante a demo")?;

    info!(
        "[CLI] ✅ 演示结束: {} 工单, {} 任务",
        client.tickets().total_count(),
        client.tasks().total_count()
    );
    Ok(())
}
