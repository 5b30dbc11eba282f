//! Frame driver: the `Created -> Running -> Stopped` loop.
//!
//! One iteration: measure elapsed time, poll and sample input, call
//! `on_update`, present the surface, set the title. The loop ends when
//! `on_update` returns `false`, the active flag is cleared, or the host fails.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::core::{frame_rate, FrameClock, InputQueue, InputSampler, PressPolicy, Surface};
use crate::error::{EngineError, StopReason};
use crate::game::{Context, Game};
use crate::host::Host;
use crate::types::KEY_COUNT;

/// Lifecycle of one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Created,
    Running,
    Stopped,
}

/// Title shown while running, e.g. `wide console engine - demo - FPS: 59.98`.
pub fn format_title(out: &mut String, app_name: &str, elapsed: f32) {
    out.clear();
    let _ = write!(
        out,
        "wide console engine - {} - FPS: {:3.2}",
        app_name,
        frame_rate(elapsed)
    );
}

pub(crate) struct FrameDriver<'a, H: Host + ?Sized, G: Game + ?Sized> {
    host: &'a mut H,
    game: &'a mut G,
    surface: &'a mut Surface,
    active: &'a AtomicBool,
    app_name: &'a str,
    input: InputSampler,
    queue: InputQueue,
    levels: [bool; KEY_COUNT],
    clock: FrameClock,
    title: String,
    state: EngineState,
    updates: u64,
}

impl<'a, H: Host + ?Sized, G: Game + ?Sized> FrameDriver<'a, H, G> {
    pub(crate) fn new(
        host: &'a mut H,
        game: &'a mut G,
        surface: &'a mut Surface,
        active: &'a AtomicBool,
        app_name: &'a str,
        policy: PressPolicy,
    ) -> Self {
        Self {
            host,
            game,
            surface,
            active,
            app_name,
            input: InputSampler::new(policy),
            queue: InputQueue::new(),
            levels: [false; KEY_COUNT],
            clock: FrameClock::new(),
            title: String::with_capacity(64),
            state: EngineState::Created,
            updates: 0,
        }
    }

    pub(crate) fn state(&self) -> EngineState {
        self.state
    }

    /// Run to completion. Leaves the driver in [`EngineState::Stopped`] on every path.
    pub(crate) fn run(&mut self) -> Result<StopReason, EngineError> {
        debug_assert_eq!(self.state, EngineState::Created);

        let created = {
            let mut ctx = Context::new(&mut *self.surface, &self.input, self.app_name, 0);
            self.game.on_create(&mut ctx)
        };
        if !created {
            info!(app = self.app_name, "on_create returned false; not entering frame loop");
            self.state = EngineState::Stopped;
            return Ok(StopReason::CreateFailed);
        }

        self.state = EngineState::Running;
        self.clock.reset(Instant::now());
        info!(app = self.app_name, "frame loop running");

        let result = self.run_frames();

        {
            let mut ctx =
                Context::new(&mut *self.surface, &self.input, self.app_name, self.updates);
            self.game.on_destroy(&mut ctx);
        }
        self.state = EngineState::Stopped;

        match &result {
            Ok(reason) => info!(%reason, frames = self.updates, "frame loop stopped"),
            Err(err) => warn!(error = %err, frames = self.updates, "frame loop aborted"),
        }
        result
    }

    fn run_frames(&mut self) -> Result<StopReason, EngineError> {
        loop {
            if !self.active.load(Ordering::Acquire) {
                return Ok(StopReason::ShutdownRequested);
            }

            let elapsed = self.clock.tick();

            self.queue.clear();
            self.host.poll_input(&mut self.queue)?;
            self.host.key_levels(&mut self.levels);
            self.input.sample_queue(&self.levels, &self.queue);

            let keep_going = {
                let mut ctx =
                    Context::new(&mut *self.surface, &self.input, self.app_name, self.updates);
                self.game.on_update(&mut ctx, elapsed)
            };
            self.updates += 1;

            self.host.present(self.surface)?;
            format_title(&mut self.title, self.app_name, elapsed);
            self.host.set_title(&self.title);

            if self.updates % 600 == 0 {
                debug!(frames = self.updates, fps = frame_rate(elapsed), "frame stats");
            }

            if !keep_going {
                return Ok(StopReason::UpdateFailed);
            }
        }
    }

    pub(crate) fn updates(&self) -> u64 {
        self.updates
    }
}
