//! 主题配色
//!
//! 明暗两套基础色，以及六种分类样式对应的颜色

use ratatui::style::Color;

use crate::bmi::Category;
use crate::models::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub alert: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Rgb(18, 18, 24),
                foreground: Color::Rgb(230, 230, 235),
                muted: Color::DarkGray,
                accent: Color::Cyan,
                alert: Color::LightRed,
            },
            Theme::Light => Self {
                background: Color::Rgb(250, 250, 248),
                foreground: Color::Rgb(30, 30, 36),
                muted: Color::Gray,
                accent: Color::Blue,
                alert: Color::Red,
            },
        }
    }

    /// 结果卡片颜色；无分类时使用普通边框色
    pub fn card_color(&self, style: Option<Category>) -> Color {
        match style {
            None => self.muted,
            Some(Category::SeverelyUnderweight) => Color::LightBlue,
            Some(Category::Underweight) => Color::Cyan,
            Some(Category::Normal) => Color::Green,
            Some(Category::Overweight) => Color::Yellow,
            Some(Category::Obese) => Color::LightRed,
            Some(Category::ExtremelyObese) => Color::Red,
        }
    }
}
