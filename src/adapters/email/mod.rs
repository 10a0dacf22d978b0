//! Mailer adapters: SMTP for production, console for development.

mod console;
mod smtp;

pub use console::ConsoleMailer;
pub use smtp::SmtpMailer;
