//! プロセス内ファンアウト機構
//!
//! 部屋ごとの接続レジストリと、Store のチャネルから届いたイベントを
//! 接続中クライアントへ中継するワーカーを提供します。

pub mod registry;
pub mod relay;

pub use registry::{ConnectionRegistry, ConnectionSender};
pub use relay::RelaySupervisor;
