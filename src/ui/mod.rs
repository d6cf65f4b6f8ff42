//! 计算器界面控制器
//!
//! MVI 结构：
//! - Model (state.rs): 会话、表单、结果显示与主题
//! - View (view/): 按状态绘制表单、结果卡片和提示框
//! - Intent (actions.rs / input.rs): 按键 -> Action，由 logic.rs 统一处理

pub mod actions;
pub mod input;
pub mod logic;
pub mod state;
pub mod view;

pub use input::handle_key_event;
pub use state::App;
pub use view::render;
