pub mod game;
pub mod recommendation;
