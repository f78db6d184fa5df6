pub mod history;
pub mod human;
