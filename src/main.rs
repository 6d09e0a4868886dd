//! Terminal falling-block game (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from
//! `tui_blocks::term`. The simulation runs in `tui_blocks::core::GameLoop`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use tui_blocks::config::load_config;
use tui_blocks::core::{CommandBuffer, Frontend, GameLoop, GameSession, GameSnapshot, LoopControl, ThreadSleeper};
use tui_blocks::input::{map_key_press, should_quit, SoftDropTracker};
use tui_blocks::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blocks::types::GameCommand;

#[derive(Debug, Parser)]
#[command(name = "tui-blocks", version, about = "Falling-block puzzle game for the terminal")]
struct Args {
    /// Config file (TOML); overrides $TUI_BLOCKS_CONFIG
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for the piece randomizer; random when omitted
    #[arg(short, long, value_name = "N")]
    seed: Option<u32>,

    /// Where log output goes
    #[arg(long, value_name = "FILE", default_value = "tui-blocks.log")]
    log_file: PathBuf,
}

/// Crossterm input plus framebuffer rendering.
struct TerminalFrontend {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    soft_drop: SoftDropTracker,
    frame_ms: u32,
}

impl TerminalFrontend {
    fn new(renderer: TerminalRenderer, frame_ms: u64) -> Self {
        let soft_drop = SoftDropTracker::new().with_release_events(renderer.reports_key_releases());
        Self {
            renderer,
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
            soft_drop,
            frame_ms: u32::try_from(frame_ms).unwrap_or(u32::MAX),
        }
    }
}

fn push(commands: &mut CommandBuffer, command: GameCommand) {
    if commands.try_push(command).is_err() {
        log::warn!("input buffer full, dropped {}", command.as_str());
    }
}

impl Frontend for TerminalFrontend {
    type Error = anyhow::Error;

    fn poll_input(&mut self, commands: &mut CommandBuffer) -> Result<LoopControl> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(LoopControl::Close);
                        }
                        if let Some(command) = self.soft_drop.handle_key_press(key.code) {
                            push(commands, command);
                            continue;
                        }
                        let Some(command) = map_key_press(key) else {
                            continue;
                        };
                        // Auto-repeat only slides the piece.
                        let repeatable = matches!(command, GameCommand::MoveLeft | GameCommand::MoveRight);
                        if key.kind == KeyEventKind::Press || repeatable {
                            push(commands, command);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(command) = self.soft_drop.handle_key_release(key.code) {
                            push(commands, command);
                        }
                    }
                },
                Event::Resize(width, height) => {
                    log::debug!("terminal resized to {width}x{height}");
                    self.renderer.invalidate();
                }
                _ => {}
            }
        }

        if let Some(command) = self.soft_drop.update(self.frame_ms) {
            push(commands, command);
        }
        Ok(LoopControl::Continue)
    }

    fn render(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view
            .render_into(snapshot, Viewport::new(width, height), &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_module_path(false)
        .init();
    Ok(())
}

/// Release builds abort on panic, so the renderer's `Drop` never runs; put the
/// terminal back before the panic message is printed.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        log::error!("panic: {info}");
        default_hook(info);
    }));
}

fn random_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let config = load_config(args.config.as_deref()).context("loading config")?;
    let seed = args.seed.unwrap_or_else(random_seed);
    log::info!("starting with seed {seed}, {config:?}");

    let mut session = GameSession::with_seed(config, seed);
    let mut game_loop = GameLoop::new(config.frame_ms(), ThreadSleeper);

    install_panic_hook();
    let mut renderer = TerminalRenderer::new();
    renderer.enter()?;
    let mut frontend = TerminalFrontend::new(renderer, config.frame_ms());

    let result = game_loop.run(&mut session, &mut frontend);

    // Always try to restore terminal state.
    if let Err(err) = frontend.renderer.exit() {
        log::error!("failed to restore terminal: {err}");
    }
    if let Err(err) = &result {
        log::error!("game loop failed: {err:#}");
    }
    log::info!(
        "exiting: score {}, level {}, lines {}",
        session.score(),
        session.level(),
        session.lines()
    );
    result
}
