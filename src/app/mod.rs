mod renderer;

use std::{
    io::{Stdout, Write},
    sync::mpsc::{Receiver, channel},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    style::Color,
    terminal::{self, ClearType},
};

use crate::{
    config::MazeConfig,
    error::{MazeError, Result},
    maze::{Direction, Maze, MazeEvent},
};
pub use renderer::{Glyph, Renderer, required_size_for};

/// How a run of the front-end ended.
#[derive(Debug, PartialEq)]
pub enum RunResult {
    /// The exit was reached
    Solved,
    /// The automatic solver found no route
    Unsolvable,
    /// Canceled by the user with Esc or q
    Canceled,
}

/// Timeout for polling input while waiting for the user to quit
const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Maps arrow keys and WASD to directions.
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}

fn is_quit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Esc | KeyCode::Char('q'))
}

/// Blocks up to `timeout` for a key press. Returns its code, if any.
fn poll_key(timeout: Duration) -> std::io::Result<Option<KeyCode>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
            Ok(Some(key_event.code))
        }
        _ => Ok(None),
    }
}

/// Terminal front-end: draws carving and solving as they happened, or lets
/// the user walk the maze with the keyboard.
pub struct App {
    config: MazeConfig,
}

impl App {
    pub fn new(config: MazeConfig) -> Self {
        Self { config }
    }

    /// Set a panic hook to restore terminal state on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Generates the maze, then solves it in the configured mode.
    /// The terminal must already be set up.
    pub fn run(&self, stdout: &mut Stdout) -> Result<RunResult> {
        let (need_width, need_height) =
            required_size_for(self.config.num_cols, self.config.num_rows)?;
        let (term_width, term_height) = terminal::size()?;
        if term_width < need_width || term_height < need_height {
            return Err(MazeError::Config(format!(
                "terminal is {}x{} but the maze needs {}x{}",
                term_width, term_height, need_width, need_height
            )));
        }

        let (event_tx, event_rx) = channel::<MazeEvent>();
        let mut maze = Maze::from_config(&self.config, Some(event_tx))?;
        let mut renderer = Renderer::new(&mut *stdout, maze.grid(), self.config.manual_mode)?;

        tracing::info!("[app] Replaying generation of a {:?} maze", maze.dimensions());
        renderer.draw_walled()?;
        if !self.replay(&mut renderer, &event_rx)? {
            return Ok(RunResult::Canceled);
        }

        let result = if self.config.manual_mode {
            self.play(&mut renderer, &mut maze, &event_rx)?
        } else {
            self.solve(&mut renderer, &mut maze, &event_rx)?
        };
        tracing::info!("[app] Run finished with {:?}", result);
        Ok(result)
    }

    /// Draws every pending event, pausing `animation_delay` between them.
    /// Returns `false` if the user quit midway.
    fn replay<W: Write>(
        &self,
        renderer: &mut Renderer<W>,
        event_rx: &Receiver<MazeEvent>,
    ) -> Result<bool> {
        for event in event_rx.try_iter() {
            renderer.handle_event(&event)?;
            if matches!(event, MazeEvent::VisitedReset | MazeEvent::Solved { .. }) {
                continue;
            }
            if let Some(code) = poll_key(self.config.animation_delay)? {
                if is_quit_key(code) {
                    tracing::debug!("[app] Quit pressed during replay");
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn solve<W: Write>(
        &self,
        renderer: &mut Renderer<W>,
        maze: &mut Maze,
        event_rx: &Receiver<MazeEvent>,
    ) -> Result<RunResult> {
        let solved = maze.solve_automatically();
        if !self.replay(renderer, event_rx)? {
            return Ok(RunResult::Canceled);
        }
        let (result, message, color) = if solved {
            (
                RunResult::Solved,
                "Maze solved! Press Esc to exit.",
                Color::Green,
            )
        } else {
            (
                RunResult::Unsolvable,
                "No path found to the exit. Press Esc to exit.",
                Color::Red,
            )
        };
        renderer.status(message, color)?;
        App::wait_for_quit()?;
        Ok(result)
    }

    fn play<W: Write>(
        &self,
        renderer: &mut Renderer<W>,
        maze: &mut Maze,
        event_rx: &Receiver<MazeEvent>,
    ) -> Result<RunResult> {
        maze.start_manual_solve();
        renderer.draw_player(maze.navigator().cursor())?;
        renderer.status("Arrow keys or WASD to move, Esc to exit.", Color::Cyan)?;

        loop {
            let Some(code) = poll_key(INPUT_POLL_TIMEOUT)? else {
                continue;
            };
            if is_quit_key(code) {
                return Ok(if maze.is_solved() {
                    RunResult::Solved
                } else {
                    RunResult::Canceled
                });
            }
            let Some(direction) = direction_for_key(code) else {
                continue;
            };

            let outcome = maze.try_move(direction);
            tracing::debug!("[app] Move {} -> {:?}", direction, outcome);
            for event in event_rx.try_iter() {
                renderer.handle_event(&event)?;
            }
            if outcome.is_accepted() && maze.is_solved() {
                renderer.status("Maze solved manually! Press Esc to exit.", Color::Green)?;
            }
        }
    }

    /// Blocks until Esc or q is pressed.
    fn wait_for_quit() -> std::io::Result<()> {
        loop {
            if let Some(code) = poll_key(INPUT_POLL_TIMEOUT)? {
                if is_quit_key(code) {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(direction_for_key(KeyCode::Up), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyCode::Char('w')), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyCode::Char('s')), Some(Direction::Down));
        assert_eq!(direction_for_key(KeyCode::Left), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyCode::Char('d')), Some(Direction::Right));
        assert_eq!(direction_for_key(KeyCode::Enter), None);
        assert!(is_quit_key(KeyCode::Esc));
        assert!(is_quit_key(KeyCode::Char('q')));
        assert!(!is_quit_key(KeyCode::Char('w')));
    }
}
