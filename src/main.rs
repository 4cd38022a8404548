use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use slide_deck::{
    bundled_deck, draw_presentation, draw_quit_confirmation, draw_slide_picker,
    handle_picker_input, handle_presentation_input, handle_quit_confirm_input, load_deck, logger,
    AppState, Config, PresentationController, ProgressTracker,
};
use std::io;
use std::process;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> io::Result<()> {
    let config = Config::from_env();
    logger::init(&config.log_path);
    logger::log(&format!("Starting with {:?}", config));

    let deck = match &config.content_path {
        Some(path) => load_deck(path),
        None => bundled_deck(),
    };
    let deck = match deck {
        Ok(deck) => deck,
        Err(e) => {
            logger::log(&format!("Failed to load deck: {}", e));
            eprintln!("Failed to load deck: {}", e);
            process::exit(1);
        }
    };
    logger::log(&format!(
        "Loaded \"{}\" with {} slides",
        deck.title,
        deck.total_slides()
    ));

    let progress = ProgressTracker::new(deck.total_slides());
    let mut controller = PresentationController::new(deck, progress, &config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut controller);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    logger::log(&format!("Session ended. {}", controller.progress().summary()));
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut PresentationController,
) -> io::Result<()> {
    let mut app_state = AppState::Presentation;

    loop {
        controller.tick();

        terminal.draw(|f| match app_state {
            AppState::Presentation => draw_presentation(f, controller),
            AppState::SlidePicker => {
                draw_presentation(f, controller);
                draw_slide_picker(f, controller);
            }
            AppState::QuitConfirm => draw_quit_confirmation(f, controller),
            AppState::Exit => {}
        })?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match app_state {
                AppState::Presentation => {
                    handle_presentation_input(controller, key, &mut app_state)
                }
                AppState::SlidePicker => handle_picker_input(controller, key, &mut app_state),
                AppState::QuitConfirm => handle_quit_confirm_input(key, &mut app_state),
                AppState::Exit => {}
            }
        }

        if app_state == AppState::Exit {
            break;
        }
    }

    Ok(())
}
