use std::{
    io::{Stdout, Write},
    time::{Duration, Instant},
};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, ClearType},
};
use tracing_appender::non_blocking::WorkerGuard;

use mazecarve::{
    config::Config,
    generators::Algorithm,
    render,
    session::{Command, Session},
};

/// How long to wait for a key press before advancing the animation
const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(5);
/// Maze sizes reachable with `+` and `-`
const RESIZE_RANGE: std::ops::RangeInclusive<u16> = 5..=100;
const RESIZE_STEP: u16 = 2;

/// Log to a file since the terminal is taken by the maze.
/// The level comes from `MAZECARVE_LOG`, `info` by default.
fn init_tracing() -> WorkerGuard {
    let level = std::env::var("MAZECARVE_LOG")
        .ok()
        .and_then(|s| s.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);
    let file_appender = tracing_appender::rolling::never(".", "mazecarve.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .init();
    guard
}

/// Usage: `mazecarve [width] [height] [seed] [--instant]`
fn parse_args(args: impl Iterator<Item = String>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let mut positional = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--instant" => config.animate = false,
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    if let Some(width) = positional.next() {
        config.width = width
            .parse()
            .with_context(|| format!("invalid width {:?}", width))?;
    }
    if let Some(height) = positional.next() {
        config.height = height
            .parse()
            .with_context(|| format!("invalid height {:?}", height))?;
    }
    if let Some(seed) = positional.next() {
        config.seed = Some(
            seed.parse()
                .with_context(|| format!("invalid seed {:?}", seed))?,
        );
    }
    Ok(config)
}

/// Set a panic hook to restore terminal state on panic
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()
}

fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    terminal::disable_raw_mode()
}

/// Maps a key to a session command. `None` for keys handled elsewhere or ignored.
fn command_for(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Enter => Command::Generate,
        KeyCode::Char('s') => Command::Solve,
        KeyCode::Char(' ') => Command::RegenerateInstantly,
        KeyCode::Char('g') => Command::ToggleAnimation,
        KeyCode::Char('f') => Command::AnimateSolution,
        KeyCode::Char('v') => Command::ToggleSolutionVisibility,
        KeyCode::Char(c @ '1'..='3') => {
            Command::SelectAlgorithm(Algorithm::ALL[c as usize - '1' as usize])
        }
        _ => return None,
    };
    Some(command)
}

fn resize_step(session: &mut Session, grow: bool) -> anyhow::Result<()> {
    let step = |n: u16| {
        let n = if grow {
            n.saturating_add(RESIZE_STEP)
        } else {
            n.saturating_sub(RESIZE_STEP)
        };
        n.clamp(*RESIZE_RANGE.start(), *RESIZE_RANGE.end())
    };
    let (width, height) = (step(session.grid().width()), step(session.grid().height()));
    session.resize(width, height)?;
    tracing::info!("[main] resized maze to {}x{}", width, height);
    Ok(())
}

fn run(stdout: &mut Stdout, session: &mut Session) -> anyhow::Result<()> {
    let clock = Instant::now();
    render::draw(stdout, session)?;
    loop {
        let mut dirty = false;
        if event::poll(INPUT_POLL_TIMEOUT)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => {
                        tracing::debug!("[main] quit requested");
                        return Ok(());
                    }
                    KeyCode::Char('+') | KeyCode::Char('=') => {
                        resize_step(session, true)?;
                        dirty = true;
                    }
                    KeyCode::Char('-') | KeyCode::Char('_') => {
                        resize_step(session, false)?;
                        dirty = true;
                    }
                    code => {
                        if let Some(command) = command_for(code) {
                            session.handle(command);
                            dirty = true;
                        }
                    }
                },
                Event::Resize(..) => dirty = true,
                _ => {}
            }
        }
        dirty |= session.tick(clock.elapsed());
        if dirty {
            render::draw(stdout, session)?;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let _guard = init_tracing();
    let config = parse_args(std::env::args().skip(1))?;
    tracing::info!("[main] starting with {:?}", config);
    let mut session = Session::new(config)?;

    let mut stdout = std::io::stdout();
    setup_terminal(&mut stdout)?;
    let result = run(&mut stdout, &mut session);
    restore_terminal(&mut stdout)?;
    result
}
