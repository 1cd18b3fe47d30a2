mod event;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use event::{AppEvent, EventHandler};
use keyrace::app::App;
use keyrace::config::Config;
use keyrace::logging;
use keyrace::session::policy::RaceMode;
use keyrace::text::{self, TextCategory};
use keyrace::ui::components::keyboard_diagram::KeyboardDiagram;
use keyrace::ui::components::results_panel::{self, ResultsPanel};
use keyrace::ui::components::stats_header::StatsHeader;
use keyrace::ui::components::typing_area::TypingArea;
use keyrace::ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "keyrace", version, about = "Terminal typing race with live feedback")]
struct Cli {
    #[arg(short, long, help = "Race mode (completion, accuracy, time-trial)")]
    mode: Option<String>,

    #[arg(short, long, help = "Text category (words, quotes, rust, python, typescript)")]
    category: Option<String>,

    #[arg(short, long, help = "Race against the contents of this file")]
    file: Option<PathBuf>,

    #[arg(long, help = "Maximum line width")]
    width: Option<usize>,

    #[arg(short, long, help = "Keyboard layout (qwerty, dvorak, colemak)")]
    layout: Option<String>,

    #[arg(short, long, help = "Number of words in a word race")]
    words: Option<usize>,

    #[arg(long, help = "Print the last finished race as JSON on exit")]
    json: bool,

    #[arg(long, help = "Write logs to this file")]
    log_file: Option<PathBuf>,

    #[arg(long, help = "Save the given options to the config file")]
    save_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let mut config = Config::load().context("loading config")?;
    apply_overrides(&mut config, &cli)?;
    config.validate()?;
    if cli.save_config {
        config.save().context("saving config")?;
        info!(path = %Config::config_path().display(), "saved config");
    }

    let practice_text = match &cli.file {
        Some(path) => Some(text::load_file(path, config.tab_width)?),
        None => None,
    };
    let mut app = App::new(config, practice_text)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if let Ok(size) = terminal.size() {
        app.resize(size.width);
    }

    let events = EventHandler::new(Duration::from_millis(250));
    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    if let Some(result) = &app.last_result {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(result)?);
        } else {
            println!("{}", results_panel::summary(result));
        }
    }
    info!("exiting");
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(name) = &cli.mode {
        let Some(mode) = RaceMode::from_name(name) else {
            bail!("unknown race mode `{name}`");
        };
        config.race_mode = mode;
    }
    if let Some(name) = &cli.category {
        let Some(category) = TextCategory::from_name(name) else {
            bail!("unknown text category `{name}`");
        };
        config.text_category = category;
    }
    if let Some(width) = cli.width {
        config.max_line_width = width;
    }
    if let Some(layout) = &cli.layout {
        config.keyboard_layout = layout.clone();
    }
    if let Some(words) = cli.words {
        config.word_count = words;
    }
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => app.handle_key(key),
            // Redraw only; time limits are checked on keystrokes.
            AppEvent::Tick => {}
            AppEvent::Resize(width, _) => app.resize(width),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area(), app.config.lines_shown);

    frame.render_widget(StatsHeader::new(&app.session, &app.theme), layout.header);
    frame.render_widget(
        TypingArea::new(&app.session, app.config.lines_shown, &app.theme),
        layout.typing,
    );
    if let Some(area) = layout.keyboard {
        frame.render_widget(
            KeyboardDiagram::new(&app.keyboard_model, &app.key_history, &app.theme),
            area,
        );
    }
    frame.render_widget(
        ResultsPanel::new(
            app.session.result(),
            app.status_message.as_deref(),
            &app.theme,
        ),
        layout.footer,
    );
}
