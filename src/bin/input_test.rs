//! Input diagnostic: shows live key, mouse and focus state.
//!
//! Useful for checking what a terminal actually reports (key releases, mouse
//! buttons, focus changes). Escape quits.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::process::ExitCode;

use anyhow::Result;

use wide_console::core::Canvas;
use wide_console::engine::{Context, Engine, EngineConfig, EngineError, Game};
use wide_console::term::TerminalHost;
use wide_console::types::{colour, glyph, vk, MouseButton, KEY_COUNT};

const LOG_LINES: usize = 24;

#[derive(Debug, Default)]
struct InputProbe {
    log: VecDeque<String>,
    line: String,
}

impl InputProbe {
    fn record(&mut self, entry: String) {
        if self.log.len() == LOG_LINES {
            self.log.pop_front();
        }
        self.log.push_back(entry);
    }
}

impl Game for InputProbe {
    fn on_create(&mut self, _ctx: &mut Context<'_>) -> bool {
        self.record("waiting for input (Escape quits)".to_string());
        true
    }

    fn on_update(&mut self, ctx: &mut Context<'_>, _elapsed: f32) -> bool {
        if ctx.key(vk::ESCAPE).pressed {
            return false;
        }

        for key in 0..KEY_COUNT {
            let state = ctx.key(key as u8);
            if state.pressed {
                self.record(format!("key 0x{key:02X} pressed"));
            }
            if state.released {
                self.record(format!("key 0x{key:02X} released"));
            }
        }
        for button in MouseButton::ALL {
            let state = ctx.mouse(button);
            if state.pressed {
                self.record(format!("mouse {button:?} pressed"));
            }
            if state.released {
                self.record(format!("mouse {button:?} released"));
            }
        }

        ctx.clear(glyph::SPACE, colour::FG_GREY);

        self.line.clear();
        let _ = write!(
            self.line,
            "mouse ({:3},{:3})  focus: {}",
            ctx.mouse_x(),
            ctx.mouse_y(),
            if ctx.has_focus() { "yes" } else { "no" }
        );
        ctx.draw_str(1, 1, &self.line, colour::FG_WHITE);

        let mut x = 1;
        for button in MouseButton::ALL {
            let attr = if ctx.mouse(button).held {
                colour::FG_BLACK | colour::BG_GREEN
            } else {
                colour::FG_DARK_GREY
            };
            let label = format!("{button:?}");
            ctx.draw_str(x, 2, &label, attr);
            x += label.len() as i32 + 1;
        }

        self.line.clear();
        self.line.push_str("held:");
        for key in 0..KEY_COUNT {
            if ctx.key(key as u8).held {
                let _ = write!(self.line, " {key:02X}");
            }
        }
        ctx.draw_str(1, 3, &self.line, colour::FG_YELLOW);

        for (row, entry) in self.log.iter().enumerate() {
            ctx.draw_str(1, 5 + row as i32, entry, colour::FG_CYAN);
        }

        true
    }
}

fn main() -> ExitCode {
    let _log_guard = wide_console::logging::init_from_env("input-test.log")
        .ok()
        .flatten();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<EngineError>() {
                Some(engine_err) => wide_console::print_error(engine_err),
                None => eprintln!("ERROR: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = EngineConfig::from_env().with_app_name("input test");
    let host = TerminalHost::from_config(&config);
    let mut engine = Engine::new(host, config);
    engine.construct_from_config()?;
    engine.start(&mut InputProbe::default())?;
    Ok(())
}
