use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::core::game::{Context, EngineCommand, Game};
use crate::core::timer::TickTimer;

/// Drives a [`Game`]: one `select!` loop multiplexes the terminal key-event
/// stream and the tick timer, redrawing after every event.
///
/// Everything runs on one logical thread, so a key handler can never
/// interleave with a tick; a direction change made between two ticks is
/// simply visible to the next one.
pub struct Engine<G: Game> {
    game: G,
    timer: TickTimer,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G) -> Self {
        Self {
            game,
            timer: TickTimer::new(),
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut events = EventStream::new();
        let mut ctx = Context::new();

        loop {
            terminal.draw(|frame| self.game.render(frame))?;

            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(event) => {
                            if let Event::Key(key) = event? {
                                if key.kind == KeyEventKind::Press {
                                    self.game.handle_key(key, &mut ctx);
                                }
                            }
                        }
                        // Input stream closed; nothing left to drive the game.
                        None => break,
                    }
                }
                _ = self.timer.tick() => {
                    self.game.on_tick(&mut ctx);
                }
            }

            if self.apply_commands(&mut ctx) {
                break;
            }
        }

        Ok(())
    }

    /// Drain the commands queued during a callback. Returns true on quit.
    fn apply_commands(&mut self, ctx: &mut Context) -> bool {
        for command in ctx.drain() {
            match command {
                EngineCommand::ArmTicks(period) => {
                    debug!(?period, "arming tick timer");
                    self.timer.arm(period);
                }
                EngineCommand::StopTicks => {
                    debug!("stopping tick timer");
                    self.timer.disarm();
                }
                EngineCommand::Quit => return true,
            }
        }
        false
    }
}
