mod bmi;
mod config;
mod error;
mod models;
mod storage;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::config::Config;
use crate::storage::{FileStore, Persistence, open_store, store_or_memory, system_theme};
use crate::ui::{App, render};

/// 日志写入数据目录下的文件，终端由 TUI 占用；没有可写目录时丢弃日志
fn init_logging(data_dir: Option<&Path>, level: tracing::Level) -> Option<io::Error> {
    let builder = tracing_subscriber::fmt().with_max_level(level).with_ansi(false);

    let opened = data_dir.map(|dir| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("bmicalc.log"))
    });
    match opened {
        Some(Ok(file)) => {
            builder.with_writer(Mutex::new(file)).init();
            None
        }
        Some(Err(e)) => {
            builder.with_writer(io::sink).init();
            Some(e)
        }
        None => {
            builder.with_writer(io::sink).init();
            None
        }
    }
}

fn main() -> io::Result<()> {
    let config = match Config::default_path() {
        Some(path) => Config::load(&path).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        None => Config::default(),
    };

    // 存储与日志失败都不致命
    let opened = open_store(config.data_dir().as_deref());
    let log_error = init_logging(opened.as_ref().ok().map(FileStore::dir), config.log_level());
    if let Some(e) = log_error {
        tracing::warn!(error = %e, "log file unavailable");
    }

    let colorfgbg = std::env::var("COLORFGBG").ok();
    let persistence = Persistence::new(store_or_memory(opened), system_theme(colorfgbg.as_deref()));

    // 创建应用状态并恢复上次结果与主题
    let mut app = App::new(persistence);
    app.startup();

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press {
                if ui::handle_key_event(app, key.code)? {
                    break;
                }
            }
        }
    }
    Ok(())
}
