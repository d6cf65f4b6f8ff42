//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;
pub mod palette;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::state::{App, AppMode, InputField};
use crate::bmi::Gender;
use components::{render_dialog_framework, render_input_widget, toggle_span};
use layouts::centered_rect;
use palette::Palette;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.theme.theme);

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Length(3), // 性别
            Constraint::Length(3), // 输入
            Constraint::Min(6),    // 结果卡片
            Constraint::Length(3), // 上次保存
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0], &palette);
    render_gender(frame, app, chunks[1], &palette);
    render_inputs(frame, app, chunks[2], &palette);
    render_card(frame, app, chunks[3], &palette);
    render_saved_info(frame, app, chunks[4], &palette);
    render_help(frame, chunks[5], &palette);

    if let AppMode::Alert(message) = &app.mode {
        render_alert(frame, message, &palette);
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let pressed = if app.theme.pressed { "on" } else { "off" };
    let line = Line::from(vec![
        Span::styled(
            "BMI Calculator",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("[t] {} dark:{}", app.theme.icon, pressed),
            Style::default().fg(palette.muted),
        ),
    ]);
    let title = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_gender(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let gender = app.session.gender;
    let line = Line::from(vec![
        toggle_span("[m] Male", gender == Gender::Male, palette.accent),
        Span::raw("  "),
        toggle_span("[f] Female", gender == Gender::Female, palette.accent),
    ]);
    let widget = Paragraph::new(line).block(Block::default().title("Gender").borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_inputs(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let focus = app.form.focus;
    render_input_widget(frame, chunks[0], "Age", &app.form.age, focus == InputField::Age, palette);
    render_input_widget(
        frame,
        chunks[1],
        "Height (cm)",
        &app.form.height,
        focus == InputField::Height,
        palette,
    );
    render_input_widget(
        frame,
        chunks[2],
        "Weight (kg)",
        &app.form.weight,
        focus == InputField::Weight,
        palette,
    );
}

fn render_card(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let color = palette.card_color(app.display.card_style);
    let text = vec![
        Line::from(Span::styled(
            app.display.bmi_text.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            app.display.category_text.as_str(),
            Style::default().fg(color),
        )),
    ];

    let card = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .title("Your BMI")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(card, area);
}

fn render_saved_info(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let info = Paragraph::new(app.display.saved_info.as_str())
        .style(Style::default().fg(palette.muted))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(info, area);
}

fn render_help(frame: &mut Frame, area: Rect, palette: &Palette) {
    let help = Paragraph::new(
        "[Tab/↑↓] field  [m/f] gender  [Enter] calculate  [c] clear saved  [t] theme  [q] quit",
    )
    .style(Style::default().fg(palette.muted))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn render_alert(frame: &mut Frame, message: &str, palette: &Palette) {
    let area = centered_rect(50, 20, frame.area());
    let inner = render_dialog_framework(frame, area, "⚠️ Notice", palette);

    let dialog = Paragraph::new(format!("{message}\n\n[Enter] OK"))
        .style(Style::default().fg(palette.foreground))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(dialog, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, Persistence};
    use crate::ui::actions::Action;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_result_and_alert() {
        let mut app = App::new(Persistence::new(Box::new(MemoryStore::new()), None));
        app.startup();
        app.form.height = "180".to_string();
        app.form.weight = "75".to_string();
        app.dispatch(Action::Calculate);

        let text = screen_text(&app);
        assert!(text.contains("23.15"));
        assert!(text.contains("Normal"));

        app.form.height.clear();
        app.dispatch(Action::Calculate);
        let text = screen_text(&app);
        assert!(text.contains("Please enter valid height and weight values"));
    }
}
