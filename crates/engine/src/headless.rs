//! Headless host: scripted input, recorded presentation.
//!
//! Runs the engine without a terminal. Each frame consumes the next
//! [`ScriptedFrame`]; once the script is exhausted key levels stay where they
//! were and no events arrive.

use std::collections::VecDeque;

use crate::core::{InputQueue, Surface};
use crate::error::{HostError, SetupError};
use crate::host::Host;
use crate::types::{InputEvent, KEY_COUNT};

/// Input delivered during one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedFrame {
    /// Virtual keys that are down this frame; every other key is up.
    pub keys_down: Vec<u8>,
    pub events: Vec<InputEvent>,
}

impl ScriptedFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn keys(keys_down: &[u8]) -> Self {
        Self {
            keys_down: keys_down.to_vec(),
            events: Vec::new(),
        }
    }

    pub fn with_events(mut self, events: impl IntoIterator<Item = InputEvent>) -> Self {
        self.events.extend(events);
        self
    }
}

#[derive(Debug, Clone)]
pub struct HeadlessHost {
    max_width: u16,
    max_height: u16,
    setup_failure: Option<String>,
    script: VecDeque<ScriptedFrame>,
    levels: [bool; KEY_COUNT],
    initialized: Option<(u16, u16)>,
    presented: usize,
    last_frame: Option<Surface>,
    title: String,
    restore_calls: usize,
    polls: usize,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self {
            max_width: u16::MAX,
            max_height: u16::MAX,
            setup_failure: None,
            script: VecDeque::new(),
            levels: [false; KEY_COUNT],
            initialized: None,
            presented: 0,
            last_frame: None,
            title: String::new(),
            restore_calls: 0,
            polls: 0,
        }
    }

    /// Largest display `initialize` accepts.
    pub fn with_max_size(mut self, width: u16, height: u16) -> Self {
        self.max_width = width;
        self.max_height = height;
        self
    }

    /// Make `initialize` fail with a generic host diagnostic.
    pub fn failing_setup(mut self, diagnostic: impl Into<String>) -> Self {
        self.setup_failure = Some(diagnostic.into());
        self
    }

    pub fn with_script(mut self, frames: impl IntoIterator<Item = ScriptedFrame>) -> Self {
        self.script.extend(frames);
        self
    }

    pub fn push_frame(&mut self, frame: ScriptedFrame) {
        self.script.push_back(frame);
    }

    /// Size passed to a successful `initialize`.
    pub fn initialized(&self) -> Option<(u16, u16)> {
        self.initialized
    }

    pub fn presented_frames(&self) -> usize {
        self.presented
    }

    pub fn last_presented(&self) -> Option<&Surface> {
        self.last_frame.as_ref()
    }

    pub fn last_title(&self) -> &str {
        &self.title
    }

    pub fn restore_calls(&self) -> usize {
        self.restore_calls
    }

    pub fn is_restored(&self) -> bool {
        self.restore_calls > 0
    }

    pub fn polls(&self) -> usize {
        self.polls
    }

    pub fn remaining_script(&self) -> usize {
        self.script.len()
    }
}

impl Host for HeadlessHost {
    fn initialize(&mut self, width: u16, height: u16) -> Result<(), SetupError> {
        if let Some(diagnostic) = &self.setup_failure {
            return Err(SetupError::Host {
                operation: "initialize headless console",
                diagnostic: diagnostic.clone(),
            });
        }
        if width > self.max_width || height > self.max_height {
            return Err(SetupError::TooLarge {
                width,
                height,
                max_width: self.max_width,
                max_height: self.max_height,
            });
        }
        self.initialized = Some((width, height));
        Ok(())
    }

    fn present(&mut self, surface: &Surface) -> Result<(), HostError> {
        match &mut self.last_frame {
            Some(last) => last.copy_from(surface),
            None => self.last_frame = Some(surface.clone()),
        }
        self.presented += 1;
        Ok(())
    }

    fn poll_input(&mut self, queue: &mut InputQueue) -> Result<(), HostError> {
        self.polls += 1;
        let Some(frame) = self.script.pop_front() else {
            return Ok(());
        };

        self.levels = [false; KEY_COUNT];
        for key in frame.keys_down {
            self.levels[key as usize] = true;
        }
        for event in frame.events {
            queue.push(event);
        }
        Ok(())
    }

    fn key_levels(&mut self, levels: &mut [bool; KEY_COUNT]) {
        levels.copy_from_slice(&self.levels);
    }

    fn set_title(&mut self, title: &str) {
        self.title.clear();
        self.title.push_str(title);
    }

    fn restore_original(&mut self) {
        self.restore_calls += 1;
    }
}
