//! Engine: console construction and the frame worker thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;

use tracing::{error, info};

use crate::config::EngineConfig;
use crate::core::Surface;
use crate::driver::{EngineState, FrameDriver};
use crate::error::{EngineError, SetupError, StopReason};
use crate::game::Game;
use crate::host::Host;

const WORKER_NAME: &str = "wce-frame";

/// Lets code outside the frame worker (an OS close/shutdown callback) stop
/// the engine and wait until the display has been restored.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    active: Arc<AtomicBool>,
    finished: Arc<(Mutex<bool>, Condvar)>,
}

impl ShutdownHandle {
    /// Clear the active flag; the loop exits before its next frame.
    pub fn request_stop(&self) {
        self.active.store(false, Ordering::Release);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Block until the engine has stopped and restored the display.
    pub fn wait_stopped(&self) {
        let (lock, cvar) = &*self.finished;
        let done = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let _done = cvar
            .wait_while(done, |done| !*done)
            .unwrap_or_else(PoisonError::into_inner);
    }

    pub fn request_stop_and_wait(&self) {
        self.request_stop();
        self.wait_stopped();
    }

    fn mark_finished(&self) {
        self.set_finished(true);
    }

    fn set_finished(&self, done: bool) {
        let (lock, cvar) = &*self.finished;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = done;
        cvar.notify_all();
    }
}

/// Console game engine over a [`Host`].
///
/// ```
/// # use wide_console_engine::{Context, Engine, EngineConfig, Game, HeadlessHost};
/// struct Blank;
///
/// impl Game for Blank {
///     fn on_create(&mut self, _ctx: &mut Context<'_>) -> bool {
///         true
///     }
///
///     fn on_update(&mut self, _ctx: &mut Context<'_>, _elapsed: f32) -> bool {
///         false
///     }
/// }
///
/// let mut engine = Engine::new(HeadlessHost::new(), EngineConfig::default());
/// engine.construct_console(80, 40)?;
/// engine.start(&mut Blank)?;
/// # Ok::<(), wide_console_engine::EngineError>(())
/// ```
pub struct Engine<H: Host> {
    host: H,
    config: EngineConfig,
    surface: Option<Surface>,
    state: EngineState,
    frames: u64,
    shutdown: ShutdownHandle,
}

impl<H: Host> Engine<H> {
    pub fn new(host: H, config: EngineConfig) -> Self {
        Self {
            host,
            config,
            surface: None,
            state: EngineState::Created,
            frames: 0,
            shutdown: ShutdownHandle {
                active: Arc::new(AtomicBool::new(true)),
                finished: Arc::new((Mutex::new(false), Condvar::new())),
            },
        }
    }

    /// Configure the display and allocate the surface.
    ///
    /// On failure the display is restored, the engine stays unconstructed and
    /// pending [`ShutdownHandle::wait_stopped`] calls return.
    pub fn construct_console(&mut self, width: u16, height: u16) -> Result<(), EngineError> {
        let result = if width == 0 || height == 0 {
            Err(SetupError::InvalidSize { width, height })
        } else {
            self.host.initialize(width, height)
        };

        if let Err(err) = result {
            error!(
                error = %err,
                diagnostic = %err.diagnostic(),
                width,
                height,
                "console setup failed"
            );
            self.host.restore_original();
            self.shutdown.mark_finished();
            return Err(err.into());
        }

        // Re-arm waiters released by an earlier failed attempt.
        if self.state == EngineState::Created {
            self.shutdown.set_finished(false);
        }
        self.surface = Some(Surface::new(width, height));
        info!(width, height, "console constructed");
        Ok(())
    }

    /// [`construct_console`](Self::construct_console) with the configured size.
    pub fn construct_from_config(&mut self) -> Result<(), EngineError> {
        self.construct_console(self.config.width, self.config.height)
    }

    /// Run the frame loop on a dedicated worker thread and wait for it.
    ///
    /// The display is restored before this returns, whatever the outcome.
    pub fn start<G: Game + Send + ?Sized>(
        &mut self,
        game: &mut G,
    ) -> Result<StopReason, EngineError> {
        if self.state == EngineState::Stopped {
            return Err(EngineError::AlreadyStopped);
        }
        let Some(surface) = self.surface.as_mut() else {
            self.shutdown.mark_finished();
            return Err(EngineError::NotConstructed);
        };

        let host = &mut self.host;
        let active = &*self.shutdown.active;
        let app_name = self.config.app_name.as_str();
        let policy = self.config.press_policy;

        let outcome = thread::scope(|scope| {
            let worker = thread::Builder::new()
                .name(WORKER_NAME.to_string())
                .spawn_scoped(scope, move || {
                    let mut driver =
                        FrameDriver::new(host, game, surface, active, app_name, policy);
                    let result = driver.run();
                    debug_assert_eq!(driver.state(), EngineState::Stopped);
                    (result, driver.updates())
                })
                .map_err(EngineError::Spawn)?;

            worker.join().map_err(|_| EngineError::WorkerPanicked)
        });

        self.host.restore_original();
        self.state = EngineState::Stopped;
        self.shutdown.mark_finished();

        let (result, frames) = outcome?;
        self.frames = frames;
        result
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Update calls made by the last run.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
