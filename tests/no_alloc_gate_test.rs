use std::alloc::{GlobalAlloc, Layout, System};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};

use tui_blocks::core::{
    CommandBuffer, Frontend, GameConfig, GameLoop, GameSession, GameSnapshot, LoopControl, ManualTime, Sleeper,
    SimpleRng,
};
use tui_blocks::input::{map_key_press, SoftDropTracker};
use tui_blocks::term::{FrameBuffer, GameView, Viewport};
use tui_blocks::types::{GameCommand, SessionState};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

struct ManualSleeper(Rc<ManualTime>);

impl Sleeper for ManualSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.0.advance(duration.as_millis() as u64);
    }
}

/// Presses a fixed key pattern and renders into a reused framebuffer.
struct HeadlessFrontend {
    frame: u32,
    soft_drop: SoftDropTracker,
    view: GameView,
    viewport: Viewport,
    fb: FrameBuffer,
}

impl Frontend for HeadlessFrontend {
    type Error = ();

    fn poll_input(&mut self, commands: &mut CommandBuffer) -> Result<LoopControl, ()> {
        self.frame += 1;
        let key = match self.frame % 40 {
            0 => Some(KeyCode::Left),
            10 => Some(KeyCode::Up),
            20 => Some(KeyCode::Right),
            30 => Some(KeyCode::Down),
            _ => None,
        };
        if let Some(code) = key {
            let command = self
                .soft_drop
                .handle_key_press(code)
                .or_else(|| map_key_press(KeyEvent::from(code)));
            if let Some(command) = command {
                let _ = commands.try_push(command);
            }
        }
        if let Some(command) = self.soft_drop.update(20) {
            let _ = commands.try_push(command);
        }
        Ok(LoopControl::Continue)
    }

    fn render(&mut self, snapshot: &GameSnapshot) -> Result<(), ()> {
        self.view.render_into(snapshot, self.viewport, &mut self.fb);
        Ok(())
    }
}

#[test]
fn frame_loop_is_allocation_free_after_warmup() {
    let time = ManualTime::shared();
    let config = GameConfig::default();
    let mut session = GameSession::new(config, time.clone(), SimpleRng::new(1));
    session.apply_command(GameCommand::Confirm);

    let mut game_loop = GameLoop::new(config.frame_ms(), ManualSleeper(time.clone()));
    let viewport = Viewport::new(80, 24);
    let mut frontend = HeadlessFrontend {
        frame: 0,
        soft_drop: SoftDropTracker::new(),
        view: GameView::default(),
        viewport,
        fb: FrameBuffer::new(viewport.width, viewport.height),
    };

    // Warm-up.
    game_loop.step(&mut session, &mut frontend).unwrap();

    let allocs = with_alloc_counting(|| {
        for _ in 0..2_000 {
            game_loop.step(&mut session, &mut frontend).unwrap();
            if session.state() == SessionState::GameOver {
                session.apply_command(GameCommand::Confirm);
            }
        }
    });

    assert_eq!(allocs, 0);
}
