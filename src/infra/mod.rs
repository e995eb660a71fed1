pub mod bugzilla;
pub mod trello;
