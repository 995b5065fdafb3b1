//! Infrastructure 層
//!
//! Domain 層で定義された trait の具体的な実装と、プロセス内の
//! ファンアウト機構、DTO を提供します。

pub mod auth;
pub mod dto;
pub mod fanout;
pub mod publisher;
pub mod store;
