mod app;
mod filter;
mod loader;
mod menu;
mod modal;
mod theme;
mod ui;

use app::{App, InputMode};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use modal::ModalId;
use theme::FileStore;

/// TUI viewer for restaurant menus stored as JSON documents
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path or URL of the menu document (fallback if no subcommand)
    #[arg(short, long)]
    menu: Option<String>,
}

const DEFAULT_MENU_PATH: &str = "data/menu.json";

#[derive(Subcommand)]
enum Commands {
    /// Run the menu viewer (default)
    Run {
        /// Path or URL of the menu document
        #[arg(short, long)]
        menu: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Normalize command
    let menu_arg = match cli.command {
        Some(Commands::Run { menu }) => menu,
        None => cli.menu,
    }
    .unwrap_or_else(|| DEFAULT_MENU_PATH.to_string());
    let source = loader::MenuSource::parse(&menu_arg);

    let project_dirs = directories::ProjectDirs::from("com", "menuexplorer", "menu-explorer")
        .ok_or("Could not determine home directory")?;
    let state_dir = project_dirs.data_local_dir();
    std::fs::create_dir_all(state_dir)?;
    let store = FileStore::open(&state_dir.join("state.json"));

    let mut app = App::new(Box::new(store));
    app.init_theme();

    // The document is awaited before the terminal takes over, so load
    // diagnostics stay on stderr.
    match loader::load_menu(&source).await {
        Ok(doc) => {
            app.set_menu(doc, source.base_dir());
            // Shown on every startup; the seen marker is never consulted.
            app.modals.open_ad();
        }
        Err(e) => {
            eprintln!("Error loading {}: {}", source.describe(), e.user_message());
            app.set_load_error(&e);
        }
    }

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app);
    ratatui::restore();

    result
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if event::poll(std::time::Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                // Every frame redraws in full; resizes need no bookkeeping.
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // An open overlay owns the keys; the shared scroll lock keeps the
    // list and search inert underneath it.
    if let Some(active) = app.modals.active() {
        handle_overlay_key(app, active, key);
        return;
    }

    if app.input_mode == InputMode::Editing {
        handle_search_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.list_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.list_prev();
        }
        KeyCode::PageDown => {
            app.list_page_down();
        }
        KeyCode::PageUp => {
            app.list_page_up();
        }
        KeyCode::Char('g') => {
            app.list_home();
        }
        KeyCode::Char('G') => {
            app.list_end();
        }
        KeyCode::Enter => {
            app.open_selected_detail();
        }
        KeyCode::Esc => {
            app.clear_search();
        }
        _ => {}
    }
}

fn handle_overlay_key(app: &mut App, active: ModalId, key: KeyEvent) {
    match active {
        ModalId::AdGate => match key.code {
            // One-time continue affordance
            KeyCode::Enter => app.ad_continue(),
            KeyCode::Esc | KeyCode::Char('x') => app.modals.close(ModalId::AdGate),
            _ => {}
        },
        ModalId::ItemDetail => match key.code {
            KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('q') => {
                app.modals.close(ModalId::ItemDetail)
            }
            _ => {}
        },
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.search_pop();
        }
        KeyCode::Char(c) => {
            app.search_push(c);
        }
        _ => {}
    }
}
