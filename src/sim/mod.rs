//! 执行引擎接口模块
//!
//! 此模块包含仿真时间、随机数源、引擎设置以及交给外部引擎执行的接口。

// 子模块声明
mod engine;
mod rng;
mod settings;
mod time;

// 重新导出公共接口
pub use engine::{EngineCall, EngineError, PlanFileEngine, RecordingEngine, SimulationEngine};
pub use rng::seeded_rng;
pub use settings::{
    CaptureSettings, EngineSettings, PropagationLoss, WiredLink, WiredSegment, WirelessSegment,
};
pub use time::SimTime;
