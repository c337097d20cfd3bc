use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc;

use a9s::action::Action;
use a9s::app::{App, Effect, View};
use a9s::client::HttpUyuniClient;
use a9s::config::{Cli, ConfigFile, Settings};
use a9s::event::{key_to_action, AppEvent, RawEventHandler};
use a9s::widgets;
use a9s::worker::{ApiHandle, ApiRequest, ApiWorker};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let file = ConfigFile::load().unwrap_or_default();
    let settings = Settings::resolve(cli, file).map_err(|msg| eyre!(msg))?;

    // Set up logging
    if let Some(ref log_file) = settings.log_file {
        let file = std::fs::File::create(log_file)?;
        tracing_subscriber::fmt()
            .with_writer(Arc::new(file))
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    run_tui(settings).await
}

async fn run_tui(settings: Settings) -> Result<()> {
    // Log in to the Uyuni server
    let client = HttpUyuniClient::connect(
        &settings.url,
        &settings.user,
        &settings.password,
        settings.insecure,
    )
    .await;

    let client: Arc<dyn a9s::client::UyuniClient> = match client {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Failed to log in to {}: {}", settings.url, e);
            eprintln!();
            eprintln!("Check the server URL and credentials.");
            eprintln!("  UYUNI_URL={}", settings.url);
            eprintln!("  UYUNI_USER={}", settings.user);
            std::process::exit(1);
        }
    };

    // Initialize app state
    let mut app = App::new(settings.minion_id);

    // Set up channels
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create worker
    let (worker, api_handle) = ApiWorker::new(client, action_tx.clone());
    tokio::spawn(worker.run());

    // Initial data load
    api_handle.send(ApiRequest::LoadPlaybooks {
        minion_server_id: settings.minion_id,
    });

    // Set up terminal
    let mut terminal = a9s::tui::init()?;

    // Set up event handler
    let mut events = RawEventHandler::new(Duration::from_secs(1));

    // Main loop
    loop {
        // Render
        terminal.draw(|frame| render(&mut app, frame))?;

        // Handle events
        tokio::select! {
            Some(event) = events.next() => {
                match event {
                    AppEvent::Key(key) => {
                        if let Some(action) = key_to_action(key, &app.view, app.show_help) {
                            let effects = app.update(action);
                            handle_effects(effects, &api_handle, &app);
                        }
                    }
                    AppEvent::Tick => {
                        let effects = app.update(Action::Tick);
                        handle_effects(effects, &api_handle, &app);
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                let effects = app.update(action);
                handle_effects(effects, &api_handle, &app);
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    a9s::tui::restore()?;

    Ok(())
}

fn render(app: &mut App, frame: &mut ratatui::Frame) {
    let area = frame.area();

    frame.render_widget(
        ratatui::widgets::Block::default()
            .style(ratatui::style::Style::default().bg(a9s::theme::BG_DARK)),
        area,
    );

    let layout = Layout::vertical([
        Constraint::Length(1), // Status bar
        Constraint::Fill(1),   // Content
        Constraint::Length(1), // Footer
    ])
    .split(area);

    widgets::status_bar::render(app, frame, layout[0]);

    match app.view {
        View::PlaybookList => widgets::playbook_list::render(app, frame, layout[1]),
        View::ScheduleForm => widgets::schedule_form::render(app, frame, layout[1]),
    }

    widgets::footer::render(app, frame, layout[2]);

    if app.show_help {
        widgets::help_overlay::render(frame, area);
    }
}

fn handle_effects(effects: Vec<Effect>, api_handle: &ApiHandle, app: &App) {
    for effect in effects {
        match effect {
            Effect::LoadPlaybooks => {
                api_handle.send(ApiRequest::LoadPlaybooks {
                    minion_server_id: app.minion_id,
                });
            }
            Effect::LoadScheduleForm {
                playbook,
                generation,
            } => {
                api_handle.send(ApiRequest::LoadScheduleForm {
                    playbook,
                    generation,
                });
            }
            Effect::SubmitSchedule(request) => {
                api_handle.send(ApiRequest::SchedulePlaybook { request });
            }
            Effect::Quit => {}
        }
    }
}
