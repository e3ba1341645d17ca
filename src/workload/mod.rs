//! 工作负载生成模块
//!
//! 此模块把客户端映射到流量画像、目的服务器和具体的发包指令。

mod assign;
mod directive;
mod routing;

pub use assign::{ClientAssignment, DEFAULT_START_WINDOW_SECS, WorkloadAssigner};
pub use directive::{Burst, ClientDirective, SinkDirective, emit, sink_directives};
pub use routing::{ProfileRouting, server_port};
