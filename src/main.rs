#![warn(clippy::all, clippy::pedantic)]

use std::cell::RefCell;
use std::io;
use std::os::fd::AsRawFd;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::KeyCode;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use ratatui::{Terminal, prelude::*};

use lanecatch::components::Lane;
use lanecatch::config::{CONFIG, Config};
use lanecatch::input::{self, CommandReceiver, CommandSender};
use lanecatch::session::GameSession;
use lanecatch::ui;

fn main() -> Result<()> {
    // Create log file and redirect stderr to it; a raw-mode TUI owns the
    // terminal, so logs cannot go to the screen
    let log_path = "lanecatch.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let stderr_handle = std::io::stderr();
    let stderr_fd = stderr_handle.as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting lanecatch");

    if Config::force_reload() {
        info!("Configuration loaded successfully");
    } else {
        error!("Failed to load configuration, continuing with defaults");
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tick_interval, rng_seed) = {
        let config = CONFIG.read().unwrap();
        (
            Duration::from_millis(config.frontend.tick_interval_ms),
            config.frontend.rng_seed,
        )
    };

    let mut session = match rng_seed {
        Some(seed) => GameSession::with_seed(seed),
        None => GameSession::new(),
    };

    // The end notification only records the result; showing the game-over
    // overlay is this frontend's job, not the core's
    let last_result: Rc<RefCell<Option<(u32, u32)>>> = Rc::new(RefCell::new(None));
    let result_writer = Rc::clone(&last_result);
    session.set_on_session_end(move |score, level| {
        *result_writer.borrow_mut() = Some((score, level));
    });

    let (sender, receiver) = input::command_channel();

    let res = run_app(
        &mut terminal,
        session,
        &sender,
        &receiver,
        &last_result,
        tick_interval,
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut session: GameSession,
    sender: &CommandSender,
    receiver: &CommandReceiver,
    last_result: &Rc<RefCell<Option<(u32, u32)>>>,
    tick_interval: Duration,
) -> Result<()> {
    let render_interval = Duration::from_millis(33); // ~30 FPS
    let clock_interval = Duration::from_secs(1);

    let mut last_render = Instant::now();
    let mut last_tick = Instant::now();
    let mut last_clock = Instant::now();

    // Flush any pending input events that might be in the buffer
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        if last_render.elapsed() >= render_interval {
            let result = *last_result.borrow();
            terminal.draw(|f| ui::render(f, &mut session, result))?;
            last_render = Instant::now();
        }

        if last_tick.elapsed() >= tick_interval {
            last_tick = Instant::now();
            // Commands apply before physics reads the catcher lane
            input::drain_commands(receiver, &mut session);
            session.tick();
        }

        if last_clock.elapsed() >= clock_interval {
            last_clock = Instant::now();
            session.clock_tick();
        }

        if event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') => {
                        session.stop();
                        return Ok(());
                    }
                    KeyCode::Enter => {
                        if !session.is_active() {
                            *last_result.borrow_mut() = None;
                            session.start();
                            // A fresh session gets a full first second
                            last_clock = Instant::now();
                        }
                    }
                    KeyCode::Left | KeyCode::Char('a') => {
                        let _ = sender.try_send(Lane::Left);
                    }
                    KeyCode::Down | KeyCode::Char('s') => {
                        let _ = sender.try_send(Lane::Center);
                    }
                    KeyCode::Right | KeyCode::Char('d') => {
                        let _ = sender.try_send(Lane::Right);
                    }
                    _ => {}
                }
            }
        }
    }
}
