pub mod employee;
pub mod notification;
