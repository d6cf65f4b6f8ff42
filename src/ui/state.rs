//! App 状态定义 (Model)
//!
//! 包含会话状态、表单、结果显示以及主题状态

use crate::bmi::{Category, Gender};
use crate::models::{ResultRecord, Theme};
use crate::storage::Persistence;

/// 占位符
pub const PLACEHOLDER: &str = "—";

/// 应用状态
pub struct App {
    pub session: SessionState,
    pub theme: ThemeState,
    pub form: Form,
    pub display: Display,
    pub mode: AppMode,
    pub persistence: Persistence,
    pub started: bool,
}

/// 会话状态：当前性别与最近一次结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub gender: Gender,
    pub last_result: Option<ResultRecord>,
}

/// 主题状态（唯一的主题来源）
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeState {
    pub theme: Theme,
    pub pressed: bool,
    pub icon: &'static str,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            pressed: false,
            icon: Theme::Light.icon(),
        }
    }
}

/// 输入表单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    pub age: String,
    pub height: String,
    pub weight: String,
    pub focus: InputField,
}

impl Form {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            InputField::Age => &mut self.age,
            InputField::Height => &mut self.height,
            InputField::Weight => &mut self.weight,
        }
    }
}

/// 输入字段类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputField {
    Age,
    #[default]
    Height,
    Weight,
}

impl InputField {
    pub fn next(self) -> Self {
        match self {
            InputField::Age => InputField::Height,
            InputField::Height => InputField::Weight,
            InputField::Weight => InputField::Age,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            InputField::Age => InputField::Weight,
            InputField::Height => InputField::Age,
            InputField::Weight => InputField::Height,
        }
    }
}

/// 结果区域显示内容
#[derive(Debug, Clone, PartialEq)]
pub struct Display {
    pub bmi_text: String,
    pub category_text: String,
    pub card_style: Option<Category>, // 至多一个分类样式
    pub saved_info: String,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            bmi_text: PLACEHOLDER.to_string(),
            category_text: PLACEHOLDER.to_string(),
            card_style: None,
            saved_info: String::new(),
        }
    }
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Alert(String), // 阻塞提示，关闭前忽略其他操作
}

impl App {
    /// 创建新的应用实例（尚未加载持久化数据，见 `startup`）
    pub fn new(persistence: Persistence) -> Self {
        Self {
            session: SessionState::default(),
            theme: ThemeState::default(),
            form: Form::default(),
            display: Display::default(),
            mode: AppMode::Normal,
            persistence,
            started: false,
        }
    }
}
