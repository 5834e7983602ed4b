pub mod report;
pub mod user;

// Re-export all repositories for easy importing
pub use report::ReportRepository;
pub use user::UserRepository;
