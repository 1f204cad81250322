//! 内置演示数据
//!
//! 会话、工单、联系人来自打包的 JSON 文件；任务的时间字段相对当前时刻，
//! 因此在运行时基于传入的 `now` 构造。

use crate::desk::contacts::ContactDetails;
use crate::desk::inbox::{Conversation, Message};
use crate::desk::tasks::{ChecklistItem, Task, TaskAssignee, TaskComment};
use crate::desk::tickets::Ticket;
use crate::desk::types::{TaskPriority, TaskStatus};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

const CONVERSATIONS_JSON: &str = include_str!("fixtures/conversations.json");
const MESSAGES_JSON: &str = include_str!("fixtures/messages.json");
const TICKETS_JSON: &str = include_str!("fixtures/tickets.json");
const CONTACTS_JSON: &str = include_str!("fixtures/contacts.json");

/// 加载收件箱会话列表
pub fn load_conversations() -> Result<Vec<Conversation>> {
    serde_json::from_str(CONVERSATIONS_JSON).context("解析会话数据失败")
}

/// 加载各会话的消息历史，键为会话 ID
pub fn load_messages() -> Result<HashMap<String, Vec<Message>>> {
    serde_json::from_str(MESSAGES_JSON).context("解析消息数据失败")
}

/// 加载工单列表
pub fn load_tickets() -> Result<Vec<Ticket>> {
    serde_json::from_str(TICKETS_JSON).context("解析工单数据失败")
}

/// 加载联系人目录
pub fn load_contacts() -> Result<Vec<ContactDetails>> {
    serde_json::from_str(CONTACTS_JSON).context("解析联系人数据失败")
}

/// 任务面板的团队成员名册
pub fn task_team() -> Vec<TaskAssignee> {
    fn member(id: &str, name: &str, seed: &str) -> TaskAssignee {
        TaskAssignee {
            id: id.to_string(),
            name: name.to_string(),
            avatar: Some(format!(
                "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
                seed
            )),
        }
    }
    vec![
        member("1", "Ana Silva", "Ana"),
        member("2", "Bruno Costa", "Bruno"),
        member("3", "Carla Santos", "Carla"),
        member("4", "Diego Alves", "Diego"),
        member("5", "Elena Ferreira", "Elena"),
    ]
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn check_item(id: &str, title: &str, completed: bool) -> ChecklistItem {
    ChecklistItem {
        id: id.to_string(),
        title: title.to_string(),
        completed,
    }
}

/// 以 `now` 为基准构造任务集合，截止与更新时间均为相对偏移
pub fn seed_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let team = task_team();
    vec![
        Task {
            id: "TASK-001".to_string(),
            title: "Implementar autenticação com 2FA".to_string(),
            description: "Adicionar autenticação de dois fatores para aumentar a segurança da plataforma".to_string(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            assignees: vec![team[0].clone(), team[1].clone()],
            labels: strings(&["desenvolvimento", "segurança"]),
            due_date: now + Duration::days(2),
            created_at: now - Duration::days(5),
            updated_at: now - Duration::hours(1),
            checklist: vec![
                check_item("1", "Implementar backend", true),
                check_item("2", "Criar interface de usuário", true),
                check_item("3", "Testes de integração", false),
            ],
            comments: vec![TaskComment {
                id: "1".to_string(),
                author: team[0].clone(),
                content: "Backend já implementado, iniciando frontend".to_string(),
                created_at: now - Duration::hours(2),
            }],
            attachments: strings(&["design-2fa.pdf"]),
            project: Some("GhitDesk Core".to_string()),
        },
        Task {
            id: "TASK-002".to_string(),
            title: "Revisar documentação da API".to_string(),
            description: "Atualizar a documentação com os novos endpoints criados no último sprint".to_string(),
            status: TaskStatus::Review,
            priority: TaskPriority::Medium,
            assignees: vec![team[2].clone()],
            labels: strings(&["documentação"]),
            due_date: now + Duration::days(1),
            created_at: now - Duration::days(3),
            updated_at: now - Duration::minutes(30),
            checklist: vec![
                check_item("1", "Listar endpoints novos", true),
                check_item("2", "Escrever exemplos", true),
                check_item("3", "Revisão do time", false),
            ],
            comments: vec![],
            attachments: vec![],
            project: Some("GhitDesk Core".to_string()),
        },
        Task {
            id: "TASK-003".to_string(),
            title: "Corrigir bug no filtro de tickets".to_string(),
            description: "Filtro por data não está funcionando corretamente".to_string(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Urgent,
            assignees: vec![team[3].clone()],
            labels: strings(&["bug", "tickets"]),
            due_date: now + Duration::hours(12),
            created_at: now - Duration::days(1),
            updated_at: now - Duration::days(1),
            checklist: vec![
                check_item("1", "Reproduzir o bug", false),
                check_item("2", "Identificar causa raiz", false),
                check_item("3", "Implementar correção", false),
            ],
            comments: vec![],
            attachments: strings(&["bug-report.png"]),
            project: Some("GhitDesk Core".to_string()),
        },
        Task {
            id: "TASK-004".to_string(),
            title: "Design do dashboard v2".to_string(),
            description: "Criar protótipo do novo dashboard com métricas avançadas".to_string(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::Medium,
            assignees: vec![team[4].clone()],
            labels: strings(&["design", "ui/ux"]),
            due_date: now + Duration::days(5),
            created_at: now - Duration::days(7),
            updated_at: now - Duration::hours(3),
            checklist: vec![
                check_item("1", "Wireframes", true),
                check_item("2", "Protótipo de alta fidelidade", false),
                check_item("3", "Validação com stakeholders", false),
            ],
            comments: vec![TaskComment {
                id: "1".to_string(),
                author: team[4].clone(),
                content: "Wireframes aprovados, começando protótipo".to_string(),
                created_at: now - Duration::hours(4),
            }],
            attachments: strings(&["wireframes-v2.fig"]),
            project: Some("GhitDesk UI".to_string()),
        },
        Task {
            id: "TASK-005".to_string(),
            title: "Configurar CI/CD".to_string(),
            description: "Configurar pipeline de integração e deploy contínuo".to_string(),
            status: TaskStatus::Done,
            priority: TaskPriority::High,
            assignees: vec![team[1].clone()],
            labels: strings(&["devops", "infraestrutura"]),
            due_date: now - Duration::days(2),
            created_at: now - Duration::days(10),
            updated_at: now - Duration::days(2),
            checklist: vec![
                check_item("1", "Configurar GitHub Actions", true),
                check_item("2", "Testes automatizados", true),
                check_item("3", "Deploy staging", true),
            ],
            comments: vec![],
            attachments: vec![],
            project: Some("GhitDesk Core".to_string()),
        },
        Task {
            id: "TASK-006".to_string(),
            title: "Implementar busca global".to_string(),
            description: "Adicionar campo de busca global que pesquisa em tickets, contatos e conversas".to_string(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            assignees: vec![team[0].clone()],
            labels: strings(&["feature", "busca"]),
            due_date: now + Duration::days(7),
            created_at: now - Duration::days(2),
            updated_at: now - Duration::days(2),
            checklist: vec![],
            comments: vec![],
            attachments: vec![],
            project: Some("GhitDesk Core".to_string()),
        },
        Task {
            id: "TASK-007".to_string(),
            title: "Otimizar performance do inbox".to_string(),
            description: "Melhorar tempo de carregamento e renderização da lista de conversas".to_string(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Low,
            assignees: vec![],
            labels: strings(&["performance", "otimização"]),
            due_date: now + Duration::days(14),
            created_at: now - Duration::days(1),
            updated_at: now - Duration::days(1),
            checklist: vec![],
            comments: vec![],
            attachments: vec![],
            project: Some("GhitDesk Core".to_string()),
        },
        Task {
            id: "TASK-008".to_string(),
            title: "Integração com Slack".to_string(),
            description: "Permitir notificações e respostas através do Slack".to_string(),
            status: TaskStatus::Review,
            priority: TaskPriority::Low,
            assignees: vec![team[3].clone(), team[1].clone()],
            labels: strings(&["integração", "feature"]),
            due_date: now + Duration::days(10),
            created_at: now - Duration::days(15),
            updated_at: now - Duration::hours(5),
            checklist: vec![
                check_item("1", "Configurar OAuth", true),
                check_item("2", "Webhook de notificações", true),
                check_item("3", "Testes de integração", true),
            ],
            comments: vec![],
            attachments: vec![],
            project: Some("GhitDesk Integrations".to_string()),
        },
        Task {
            id: "TASK-009".to_string(),
            title: "Relatório de SLA mensal".to_string(),
            description: "Criar relatório automático de métricas de SLA".to_string(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::Medium,
            assignees: vec![team[2].clone()],
            labels: strings(&["relatórios", "analytics"]),
            due_date: now + Duration::days(4),
            created_at: now - Duration::days(6),
            updated_at: now - Duration::hours(2),
            checklist: vec![
                check_item("1", "Definir métricas", true),
                check_item("2", "Criar queries", false),
                check_item("3", "Template do relatório", false),
            ],
            comments: vec![],
            attachments: vec![],
            project: Some("GhitDesk Analytics".to_string()),
        },
        Task {
            id: "TASK-010".to_string(),
            title: "Teste de carga da API".to_string(),
            description: "Realizar testes de carga para validar escalabilidade".to_string(),
            status: TaskStatus::Todo,
            priority: TaskPriority::High,
            assignees: vec![team[1].clone()],
            labels: strings(&["testes", "performance"]),
            due_date: now + Duration::days(3),
            created_at: now - Duration::days(4),
            updated_at: now - Duration::days(4),
            checklist: vec![],
            comments: vec![],
            attachments: vec![],
            project: Some("GhitDesk Core".to_string()),
        },
        Task {
            id: "TASK-011".to_string(),
            title: "Atualizar dependências do projeto".to_string(),
            description: "Atualizar todas as bibliotecas para versões mais recentes".to_string(),
            status: TaskStatus::Done,
            priority: TaskPriority::Low,
            assignees: vec![team[0].clone()],
            labels: strings(&["manutenção"]),
            due_date: now - Duration::days(1),
            created_at: now - Duration::days(8),
            updated_at: now - Duration::days(1),
            checklist: vec![
                check_item("1", "Verificar breaking changes", true),
                check_item("2", "Atualizar packages", true),
                check_item("3", "Testar aplicação", true),
            ],
            comments: vec![],
            attachments: vec![],
            project: Some("GhitDesk Core".to_string()),
        },
        Task {
            id: "TASK-012".to_string(),
            title: "Implementar tema customizável".to_string(),
            description: "Permitir que usuários personalizem cores do tema".to_string(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Low,
            assignees: vec![],
            labels: strings(&["feature", "ui/ux"]),
            due_date: now + Duration::days(20),
            created_at: now - Duration::days(3),
            updated_at: now - Duration::days(3),
            checklist: vec![],
            comments: vec![],
            attachments: vec![],
            project: Some("GhitDesk UI".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desk::types::Channel;
    use chrono::TimeZone;

    #[test]
    fn bundled_json_parses() {
        let conversations = load_conversations().unwrap();
        assert_eq!(conversations.len(), 14);
        assert_eq!(conversations[0].contact.name, "Maria Silva");
        assert_eq!(conversations[0].channel, Channel::Whatsapp);

        let messages = load_messages().unwrap();
        assert_eq!(messages.get("1").map(Vec::len), Some(3));
        assert_eq!(messages.get("4").map(Vec::len), Some(3));

        let tickets = load_tickets().unwrap();
        assert_eq!(tickets.len(), 7);
        assert_eq!(tickets[0].id, "T-001");

        let contacts = load_contacts().unwrap();
        assert_eq!(contacts.len(), 8);
        assert!(contacts.iter().any(|c| c.name == "Roberto Lima"));
    }

    #[test]
    fn team_roster_has_five_members() {
        let team = task_team();
        assert_eq!(team.len(), 5);
        assert_eq!(team[0].name, "Ana Silva");
        assert_eq!(
            team[4].avatar.as_deref(),
            Some("https://api.dicebear.com/7.x/avataaars/svg?seed=Elena")
        );
    }

    #[test]
    fn seeded_tasks_use_relative_offsets() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let tasks = seed_tasks(now);
        assert_eq!(tasks.len(), 12);

        let first = &tasks[0];
        assert_eq!(first.id, "TASK-001");
        assert_eq!(first.due_date, now + Duration::days(2));
        assert_eq!(first.created_at, now - Duration::days(5));
        assert_eq!(first.checklist_label(), "2/3");
        assert_eq!(first.comments.len(), 1);

        let urgent = tasks.iter().find(|t| t.id == "TASK-003").unwrap();
        assert_eq!(urgent.priority, TaskPriority::Urgent);
        assert_eq!(urgent.due_date, now + Duration::hours(12));

        let done = tasks.iter().find(|t| t.id == "TASK-005").unwrap();
        assert_eq!(done.status, TaskStatus::Done);
        assert!(!done.is_overdue(now));

        let unassigned = tasks.iter().find(|t| t.id == "TASK-007").unwrap();
        assert!(unassigned.assignees.is_empty());
    }
}
