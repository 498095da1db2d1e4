//! 场景模块
//!
//! 此模块包含外部输入契约（工作者名册、到达计划、种子与运行边界）
//! 以及随机场景生成。

// 子模块声明
mod arrivals;
mod spec;

// 重新导出公共接口
pub use arrivals::{GenOpts, exponential_arrival_times, random_scenario};
pub use spec::{
    ArrivalSpec, BoundsSpec, ScenarioMeta, ScenarioSpec, WorkerSpec, build_system,
};
