//! The render target abstraction.
//!
//! The controller overwrites the display wholesale on every transition, so a
//! surface is just "replace everything with this text". The kind tag lets
//! terminal output pick a style without the controller knowing about color.

use std::sync::Mutex;

use colored::Colorize;

/// What a render represents, for style selection only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    /// In-flight placeholder while a remote call runs.
    Loading,
    /// The result of a completed operation.
    Content,
    /// Prompts, hints, and other non-result text.
    Notice,
    /// A failure description.
    Error,
}

/// Anything capable of accepting generated text.
pub trait Surface: Send + Sync {
    /// Replace the entire display with `output`.
    fn render(&self, kind: RenderKind, output: &str);
}

/// Production surface: prints to stdout, colored by kind.
#[derive(Debug, Default)]
pub struct TerminalSurface;

impl Surface for TerminalSurface {
    fn render(&self, kind: RenderKind, output: &str) {
        match kind {
            RenderKind::Loading => println!("{}", output.dimmed()),
            RenderKind::Content => println!("{}", output),
            RenderKind::Notice => println!("{}", output.yellow()),
            RenderKind::Error => println!("{}", output.red()),
        }
    }
}

/// Test surface that records every render in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    frames: Mutex<Vec<(RenderKind, String)>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<(RenderKind, String)> {
        self.frames.lock().expect("surface lock poisoned").clone()
    }

    /// The text currently "on screen": the last render, if any.
    pub fn last(&self) -> Option<(RenderKind, String)> {
        self.frames().last().cloned()
    }
}

impl Surface for RecordingSurface {
    fn render(&self, kind: RenderKind, output: &str) {
        self.frames
            .lock()
            .expect("surface lock poisoned")
            .push((kind, output.to_string()));
    }
}
