pub mod dispatcher;
pub mod mailer;
