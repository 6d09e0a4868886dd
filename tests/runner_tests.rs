//! Frame loop tests with a scripted frontend and manual time

use std::rc::Rc;
use std::time::Duration;

use tui_blocks::core::{
    CommandBuffer, Frontend, GameConfig, GameLoop, GameSession, GameSnapshot, LoopControl, ManualTime, PieceSequence,
    Sleeper, TimeSource,
};
use tui_blocks::types::{GameCommand, PieceKind, SessionState};

/// Sleeps by advancing the shared manual clock.
struct ManualSleeper {
    time: Rc<ManualTime>,
    sleeps: Vec<Duration>,
}

impl Sleeper for ManualSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.time.advance(duration.as_millis() as u64);
        self.sleeps.push(duration);
    }
}

/// Feeds scripted commands, records every rendered snapshot and closes after
/// `close_after` frames.
struct ScriptedFrontend {
    time: Rc<ManualTime>,
    script: Vec<(u64, GameCommand)>,
    frame: u64,
    close_after: u64,
    render_cost_ms: u64,
    fail_render_at: Option<u64>,
    rendered: Vec<GameSnapshot>,
}

impl ScriptedFrontend {
    fn new(time: Rc<ManualTime>, close_after: u64) -> Self {
        Self {
            time,
            script: Vec::new(),
            frame: 0,
            close_after,
            render_cost_ms: 0,
            fail_render_at: None,
            rendered: Vec::new(),
        }
    }

    fn at(mut self, frame: u64, command: GameCommand) -> Self {
        self.script.push((frame, command));
        self
    }
}

impl Frontend for ScriptedFrontend {
    type Error = String;

    fn poll_input(&mut self, commands: &mut CommandBuffer) -> Result<LoopControl, String> {
        if self.frame >= self.close_after {
            return Ok(LoopControl::Close);
        }
        for &(_, command) in self.script.iter().filter(|(frame, _)| *frame == self.frame) {
            commands.push(command);
        }
        Ok(LoopControl::Continue)
    }

    fn render(&mut self, snapshot: &GameSnapshot) -> Result<(), String> {
        if self.fail_render_at == Some(self.frame) {
            return Err(format!("render failed at frame {}", self.frame));
        }
        self.time.advance(self.render_cost_ms);
        self.rendered.push(*snapshot);
        self.frame += 1;
        Ok(())
    }
}

fn setup() -> (
    Rc<ManualTime>,
    GameSession<Rc<ManualTime>, PieceSequence>,
    GameLoop<ManualSleeper>,
) {
    let time = ManualTime::shared();
    let config = GameConfig::default();
    let session = GameSession::new(config, time.clone(), PieceSequence::repeat(PieceKind::O));
    let sleeper = ManualSleeper {
        time: time.clone(),
        sleeps: Vec::new(),
    };
    let game_loop = GameLoop::new(config.frame_ms(), sleeper);
    (time, session, game_loop)
}

#[test]
fn test_loop_runs_until_close() {
    let (time, mut session, mut game_loop) = setup();
    let mut frontend = ScriptedFrontend::new(time.clone(), 10);

    game_loop.run(&mut session, &mut frontend).unwrap();

    assert_eq!(game_loop.frames(), 10);
    assert_eq!(frontend.rendered.len(), 10);
    assert_eq!(time.now_ms(), 200);
    assert!(game_loop
        .sleeper()
        .sleeps
        .iter()
        .all(|d| *d == Duration::from_millis(20)));
    // Nothing was confirmed, so the title screen stays up.
    assert_eq!(session.state(), SessionState::NewGame);
}

#[test]
fn test_gravity_runs_once_per_second_of_frames() {
    let (time, mut session, mut game_loop) = setup();
    let mut frontend = ScriptedFrontend::new(time.clone(), 51).at(0, GameCommand::Confirm);

    game_loop.run(&mut session, &mut frontend).unwrap();

    let spawn_row = frontend.rendered[0].active.unwrap().row;
    // The first cycle is due 1000ms after the game started, i.e. on frame 50.
    assert_eq!(frontend.rendered[49].active.unwrap().row, spawn_row);
    assert_eq!(frontend.rendered[50].active.unwrap().row, spawn_row + 1);
}

#[test]
fn test_commands_apply_before_render() {
    let (time, mut session, mut game_loop) = setup();
    let mut frontend = ScriptedFrontend::new(time.clone(), 3)
        .at(0, GameCommand::Confirm)
        .at(1, GameCommand::MoveLeft)
        .at(2, GameCommand::PauseToggle);

    game_loop.run(&mut session, &mut frontend).unwrap();

    let cols: Vec<i8> = frontend
        .rendered
        .iter()
        .map(|snap| snap.active.unwrap().col)
        .collect();
    assert_eq!(cols, vec![4, 3, 3]);
    assert_eq!(frontend.rendered[2].state, SessionState::Paused);
}

#[test]
fn test_overrun_frames_do_not_sleep() {
    let (time, mut session, mut game_loop) = setup();
    let mut frontend = ScriptedFrontend::new(time.clone(), 5);
    frontend.render_cost_ms = 30;

    game_loop.run(&mut session, &mut frontend).unwrap();

    assert!(game_loop.sleeper().sleeps.is_empty());
    assert_eq!(time.now_ms(), 150);
}

#[test]
fn test_partial_frames_sleep_the_remainder() {
    let (time, mut session, mut game_loop) = setup();
    let mut frontend = ScriptedFrontend::new(time.clone(), 4);
    frontend.render_cost_ms = 7;

    game_loop.run(&mut session, &mut frontend).unwrap();

    assert_eq!(game_loop.sleeper().sleeps, vec![Duration::from_millis(13); 4]);
    assert_eq!(time.now_ms(), 80);
}

#[test]
fn test_render_error_stops_the_loop() {
    let (time, mut session, mut game_loop) = setup();
    let mut frontend = ScriptedFrontend::new(time.clone(), 100);
    frontend.fail_render_at = Some(3);

    let err = game_loop.run(&mut session, &mut frontend).unwrap_err();
    assert_eq!(err, "render failed at frame 3");
    assert_eq!(game_loop.frames(), 3);
}
