pub mod db_utils;
pub mod password;
pub mod upload;
