//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

use crate::bmi::Gender;

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,

    // 表单
    NextField,
    PrevField,
    Input(char),
    DeleteChar,
    SelectGender(Gender),

    // 按钮
    Calculate,
    ClearSaved,
    ToggleTheme,

    Dismiss, // 关闭提示框
}
