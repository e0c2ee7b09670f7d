pub mod attend;
pub mod config;
pub mod db;
pub mod employee;
pub mod grid;
pub mod init;
pub mod log;
pub mod payroll;
pub mod schedule;
pub mod suggest;
