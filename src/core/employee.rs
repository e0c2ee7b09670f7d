use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{get_employee, list_employees, upsert_employee};
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;

/// Roster maintenance.
pub struct EmployeeLogic;

/// Fields of `employee --add`; absent fields keep the stored value.
#[derive(Debug, Clone, Default)]
pub struct EmployeeInput {
    pub id: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub store_id: Option<String>,
    pub base_salary: Option<i64>,
}

impl EmployeeLogic {
    pub fn save(pool: &DbPool, input: EmployeeInput) -> AppResult<Employee> {
        if input.id.trim().is_empty() {
            return Err(AppError::Other("employee id cannot be empty".into()));
        }
        if let Some(s) = input.base_salary
            && s < 0
        {
            return Err(AppError::InvalidAmount(format!(
                "base salary cannot be negative: {s}"
            )));
        }

        let existing = get_employee(&pool.conn, &input.id)?;
        let created = existing.is_none();

        let mut emp = match existing {
            Some(e) => e,
            None => {
                let name = input.name.clone().ok_or_else(|| {
                    AppError::Other(format!("--name is required for new employee '{}'", input.id))
                })?;
                Employee::new(&input.id, &name)
            }
        };

        if let Some(name) = input.name {
            emp.name = name;
        }
        if let Some(role) = input.role {
            emp.role = role;
        }
        if let Some(store) = input.store_id {
            emp.store_id = (!store.is_empty()).then_some(store);
        }
        if input.base_salary.is_some() {
            emp.base_salary = input.base_salary;
        }

        upsert_employee(&pool.conn, &emp)?;

        ttlog_soft(
            &pool.conn,
            if created { "employee_add" } else { "employee_edit" },
            &emp.id,
            &format!(
                "name={} store={} salary={}",
                emp.name,
                emp.store_id.as_deref().unwrap_or("-"),
                emp.base_salary.map(|s| s.to_string()).unwrap_or_else(|| "-".into())
            ),
        );

        Ok(emp)
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Employee>> {
        list_employees(&pool.conn)
    }
}
