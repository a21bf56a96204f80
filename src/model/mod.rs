pub mod employee;
pub mod validation;
