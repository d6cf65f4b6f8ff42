//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑以及计算、清除、主题切换和启动流程

use super::actions::Action;
use super::state::{App, AppMode, PLACEHOLDER, ThemeState};
use crate::bmi::{self, Gender};
use crate::models::{ResultRecord, Theme};

/// 输入框中显示的数字，0 或 NaN 显示为空
fn format_field(value: f64) -> String {
    if value == 0.0 || value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

impl App {
    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> bool {
        if let AppMode::Alert(_) = self.mode {
            if action == Action::Dismiss {
                self.mode = AppMode::Normal;
            }
            return false;
        }

        match action {
            Action::Quit => return true,
            Action::NextField => self.form.focus = self.form.focus.next(),
            Action::PrevField => self.form.focus = self.form.focus.prev(),
            Action::Input(c) => self.form.focused_mut().push(c),
            Action::DeleteChar => {
                self.form.focused_mut().pop();
            }
            Action::SelectGender(gender) => self.select_gender(gender),
            Action::Calculate => self.calculate(),
            Action::ClearSaved => self.clear_saved(),
            Action::ToggleTheme => self.toggle_theme(),
            Action::Dismiss => {}
        }
        false
    }

    // ============ 启动 ============

    /// 恢复上次结果并应用主题，只执行一次
    pub fn startup(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        if let Some(record) = self.persistence.load_result() {
            tracing::info!(bmi = record.bmi, "restored saved result");
            self.populate_from(record);
        }

        let theme = self.persistence.load_theme();
        self.apply_theme(theme);
    }

    /// 用记录回填表单和结果区域
    pub fn populate_from(&mut self, record: ResultRecord) {
        self.form.age = record.age.clone();
        self.form.height = format_field(record.height);
        self.form.weight = format_field(record.weight);
        self.session.gender = record.gender;

        self.display.bmi_text = if record.bmi.is_nan() {
            PLACEHOLDER.to_string()
        } else {
            format!("{:.2}", record.bmi)
        };
        self.display.category_text = if record.category.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            record.category.clone()
        };

        let bmi = record.bmi;
        self.session.last_result = Some(record);
        self.apply_category_style(Some(bmi));
        self.show_saved_info();
    }

    // ============ 性别 ============

    pub fn select_gender(&mut self, gender: Gender) {
        self.session.gender = gender;
    }

    // ============ 计算 ============

    /// 计算并保存结果；输入无效时弹出提示且不修改任何状态
    pub fn calculate(&mut self) {
        let height = bmi::parse_measure(&self.form.height).unwrap_or(f64::NAN);
        let weight = bmi::parse_measure(&self.form.weight).unwrap_or(f64::NAN);

        let outcome = match bmi::calculate(height, weight) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::info!(height = %self.form.height, weight = %self.form.weight, "rejected input");
                self.mode = AppMode::Alert(e.to_string());
                return;
            }
        };

        tracing::info!(bmi = outcome.bmi, style = outcome.category.style_class(), "calculated");
        self.display.bmi_text = format!("{:.2}", outcome.bmi);
        self.display.category_text = outcome.category.label().to_string();

        let record = ResultRecord::new(
            self.form.age.clone(),
            height,
            weight,
            self.session.gender,
            outcome,
        );

        match self.persistence.save_result(&record) {
            Ok(()) => tracing::debug!(timestamp = record.timestamp, "auto-saved last result"),
            Err(e) => tracing::warn!(error = %e, "auto-save failed"),
        }
        self.session.last_result = Some(record);

        self.apply_category_style(Some(outcome.bmi));
        self.show_saved_info();
    }

    /// 结果卡片最多带一个分类样式
    pub fn apply_category_style(&mut self, value: Option<f64>) {
        self.display.card_style = value.filter(|b| !b.is_nan()).map(bmi::classify);
    }

    pub fn show_saved_info(&mut self) {
        self.display.saved_info = match &self.session.last_result {
            Some(record) => record.summary(),
            None => String::new(),
        };
    }

    // ============ 清除 ============

    /// 删除已保存结果并重置结果区域
    pub fn clear_saved(&mut self) {
        if let Err(e) = self.persistence.clear_result() {
            tracing::warn!(error = %e, "failed to remove saved result");
        }
        self.session.last_result = None;
        self.display.saved_info = "Cleared saved result.".to_string();
        self.display.bmi_text = PLACEHOLDER.to_string();
        self.display.category_text = PLACEHOLDER.to_string();
        self.display.card_style = None;
    }

    // ============ 主题 ============

    pub fn apply_theme(&mut self, theme: Theme) {
        self.theme = ThemeState {
            theme,
            pressed: theme == Theme::Dark,
            icon: theme.icon(),
        };
    }

    pub fn toggle_theme(&mut self) {
        let next = self.theme.theme.toggled();
        self.apply_theme(next);
        self.persistence.save_theme(next);
        tracing::debug!(theme = next.as_str(), "theme toggled");
    }
}
