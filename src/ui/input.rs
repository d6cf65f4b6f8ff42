//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use std::io;

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode};
use crate::bmi::Gender;

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Tab | KeyCode::Down => Some(Action::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::PrevField),
            KeyCode::Char('m') => Some(Action::SelectGender(Gender::Male)),
            KeyCode::Char('f') => Some(Action::SelectGender(Gender::Female)),
            KeyCode::Enter => Some(Action::Calculate),
            KeyCode::Char('c') => Some(Action::ClearSaved),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '.' | '-' | '+') => {
                Some(Action::Input(c))
            }
            _ => None,
        },
        AppMode::Alert(_) => match key {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::Dismiss),
            _ => None,
        },
    }
}

/// 处理按键事件
pub fn handle_key_event(app: &mut App, key: KeyCode) -> io::Result<bool> {
    if let Some(action) = get_action(&app.mode, key) {
        Ok(app.dispatch(action))
    } else {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_mode_keys() {
        let mode = AppMode::Normal;
        assert_eq!(get_action(&mode, KeyCode::Enter), Some(Action::Calculate));
        assert_eq!(get_action(&mode, KeyCode::Char('t')), Some(Action::ToggleTheme));
        assert_eq!(
            get_action(&mode, KeyCode::Char('f')),
            Some(Action::SelectGender(Gender::Female))
        );
        assert_eq!(get_action(&mode, KeyCode::Char('7')), Some(Action::Input('7')));
        assert_eq!(get_action(&mode, KeyCode::Char('x')), None);
    }

    #[test]
    fn test_alert_blocks_everything_but_dismiss() {
        let mode = AppMode::Alert("boom".to_string());
        assert_eq!(get_action(&mode, KeyCode::Enter), Some(Action::Dismiss));
        assert_eq!(get_action(&mode, KeyCode::Char('q')), None);
        assert_eq!(get_action(&mode, KeyCode::Char('c')), None);
    }
}
