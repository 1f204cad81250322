pub mod desk;

// 重新导出常用类型和函数，方便外部使用
pub use desk::{
    auth::{login, Session},
    client::{ClientConfig, DeskClient},
    contacts::ContactDetails,
    inbox::{Conversation, Message},
    tasks::Task,
    tickets::Ticket,
};
