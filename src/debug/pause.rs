//! Blocking "wait for the operator" primitives

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io;

/// Blocks until the operator lets the program continue
pub trait Pause {
    fn wait_for_continue(&self) -> io::Result<()>;
}

/// Waits for one line on stdin
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPause;

impl Pause for StdinPause {
    fn wait_for_continue(&self) -> io::Result<()> {
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(())
    }
}

/// Waits for the Enter key with the terminal in raw mode
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyPause;

impl Pause for KeyPause {
    fn wait_for_continue(&self) -> io::Result<()> {
        enable_raw_mode()?;
        let result = wait_for_enter();
        disable_raw_mode()?;
        result
    }
}

fn wait_for_enter() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && key.code == KeyCode::Enter {
                return Ok(());
            }
        }
    }
}

/// Does not block; for non-interactive runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

impl Pause for NoPause {
    fn wait_for_continue(&self) -> io::Result<()> {
        Ok(())
    }
}
