pub mod attendance;
pub mod attendance_status;
pub mod employee;
pub mod month;
pub mod payroll;
pub mod schedule;
pub mod shift;
pub mod suggestion;
