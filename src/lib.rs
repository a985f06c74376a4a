//! Rectangular grid mazes carved by randomized recursive backtracking, solved
//! either automatically with depth-first search or by a player walking a cursor.
//!
//! The core ([`maze`], [`generators`], [`solvers`], [`game`]) runs headless.
//! Rendering collaborators subscribe to [`MazeEvent`]s through an mpsc channel;
//! [`app`] is one such collaborator drawing to the terminal.

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod generators;
pub mod maze;
pub mod solvers;

pub use config::MazeConfig;
pub use error::{MazeError, Result};
pub use game::{ManualNavigator, MoveOutcome, NavigatorState};
pub use generators::Generator;
pub use maze::{Cell, Coord, Direction, Grid, Maze, MazeEvent};
pub use solvers::{DfsSolver, SolverState, solve_maze};
