mod navigator;

pub use navigator::{ManualNavigator, MoveOutcome, NavigatorState};
