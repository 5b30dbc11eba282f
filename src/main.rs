//! Wide console demo (default binary).
//!
//! Opens an 80x40 console on the terminal and cycles the glyph drawn at
//! (10, 10) every thousand frames. Escape quits.

use std::process::ExitCode;

use anyhow::Result;

use wide_console::core::Canvas;
use wide_console::engine::{
    config::DEFAULT_APP_NAME, Context, Engine, EngineConfig, EngineError, Game,
};
use wide_console::term::TerminalHost;
use wide_console::types::{colour, vk, Glyph};

const APP_NAME: &str = "Mech Fighters 3000";
const FRAMES_PER_GLYPH: u32 = 1000;

#[derive(Debug, Default)]
struct GlyphCycler {
    glyph: Glyph,
    counter: u32,
}

impl Game for GlyphCycler {
    fn on_create(&mut self, _ctx: &mut Context<'_>) -> bool {
        true
    }

    fn on_update(&mut self, ctx: &mut Context<'_>, _elapsed: f32) -> bool {
        if ctx.key(vk::ESCAPE).pressed {
            return false;
        }

        if self.counter > FRAMES_PER_GLYPH {
            ctx.write(10, 10, self.glyph, colour::FG_WHITE);
            self.glyph = self.glyph.wrapping_add(1);
            self.counter = 0;
        }
        self.counter += 1;

        true
    }
}

fn main() -> ExitCode {
    let _log_guard = match wide_console::logging::init_from_env("wide-console.log") {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            None
        }
    };

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
    let mut config = EngineConfig::from_env();
    if config.app_name == DEFAULT_APP_NAME {
        config.app_name = APP_NAME.to_string();
    }

    let host = TerminalHost::from_config(&config);
    let mut engine = Engine::new(host, config);
    engine.construct_from_config()?;

    let reason = engine.start(&mut GlyphCycler::default())?;
    tracing::info!(%reason, frames = engine.frames(), "demo finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wide_console::engine::{HeadlessHost, ScriptedFrame, StopReason};

    #[test]
    fn cycler_draws_after_enough_frames_and_quits_on_escape() {
        let mut script = vec![ScriptedFrame::idle(); (FRAMES_PER_GLYPH + 2) as usize];
        script.push(ScriptedFrame::keys(&[vk::ESCAPE]));
        let host = HeadlessHost::new().with_script(script);

        let mut engine = Engine::new(host, EngineConfig::default());
        engine.construct_console(80, 40).unwrap();
        let mut game = GlyphCycler::default();
        let reason = engine.start(&mut game).unwrap();

        assert_eq!(reason, StopReason::UpdateFailed);
        assert_eq!(game.glyph, 1);
        let cell = engine.surface().unwrap().get(10, 10).unwrap();
        assert_eq!(cell.glyph, 0);
        assert_eq!(cell.attr, colour::FG_WHITE);
        assert!(engine.host().is_restored());
    }
}
