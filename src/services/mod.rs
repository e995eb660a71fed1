pub mod board;
pub mod token;
pub mod tracker;

pub use board::BoardService;
pub use token::TokenSource;
pub use tracker::BugTrackerService;
