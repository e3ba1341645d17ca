//! 场景驱动模块
//!
//! 此模块根据场景参数组装拓扑、地址、监听端与客户端发包指令。

mod config;
mod driver;

pub use config::{DEFAULT_PORT_BASE, DEFAULT_SEED, DEFAULT_SERVERS, ScenarioConfig, Variant};
pub use driver::{
    DatasetLabel, ScenarioPlan, build_scenario, build_scenario_with_catalog, execute,
};
