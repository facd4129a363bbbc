//! Concrete collaborators behind the pipeline ports.

pub mod google_sheets;
pub mod smtp;

pub use google_sheets::GoogleSheetsRecorder;
pub use smtp::SmtpNotifier;
