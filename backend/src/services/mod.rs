//! Business logic services for the Crop Disease Tracker

pub mod dashboard;
pub mod datasource;
pub mod report;

pub use dashboard::DashboardService;
pub use datasource::DataSource;
pub use report::ReportService;
