pub mod answer;
pub mod catalog;
pub mod prompt;
pub mod question;
pub mod report;
pub mod saved;
pub mod session;
