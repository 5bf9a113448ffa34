pub mod dashboard;
pub mod problem_area;
pub mod progress_bar;
pub mod stats_sidebar;
pub mod tips;
