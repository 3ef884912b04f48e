/// Core game interface for the gridsnake runner
use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::Frame;

/// Commands a game issues back to the runner from within a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    /// Replace the tick schedule with one firing at the given period.
    ArmTicks(Duration),
    /// Stop the tick schedule.
    StopTicks,
    /// Leave the main loop.
    Quit,
}

/// Queue of engine commands collected during a single callback.
///
/// The runner drains it after the callback returns, so arming and stopping
/// the tick timer always happens in one place.
#[derive(Debug, Default)]
pub struct Context {
    commands: Vec<EngineCommand>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm_ticks(&mut self, period: Duration) {
        self.commands.push(EngineCommand::ArmTicks(period));
    }

    pub fn stop_ticks(&mut self) {
        self.commands.push(EngineCommand::StopTicks);
    }

    pub fn quit(&mut self) {
        self.commands.push(EngineCommand::Quit);
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = EngineCommand> + '_ {
        self.commands.drain(..)
    }

    #[cfg(test)]
    pub(crate) fn commands(&self) -> &[EngineCommand] {
        &self.commands
    }
}

/// Main game trait that the runner drives.
///
/// A game reacts to key presses and timer ticks, and draws itself into a
/// ratatui frame. The runner owns the terminal, the key-event stream, and
/// the tick timer; a game steers the timer through the [`Context`].
pub trait Game {
    /// Handle a key press.
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context);

    /// Advance the game by one timer tick.
    fn on_tick(&mut self, ctx: &mut Context);

    /// Render the current state into the frame.
    fn render(&self, frame: &mut Frame);
}
