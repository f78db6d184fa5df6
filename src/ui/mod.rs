pub mod dashboard;
pub mod footer;
pub mod graph;
pub mod help;
pub mod lcd;
pub mod theme;
