use serde::Serialize;

/// Roster entry as provided by the staff administration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: String,
    pub store_id: Option<String>,
    pub base_salary: Option<i64>,
}

impl Employee {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            role: String::new(),
            store_id: None,
            base_salary: None,
        }
    }

    /// Base salary used for sizing, zero when the roster has none.
    pub fn salary_or_zero(&self) -> i64 {
        self.base_salary.unwrap_or(0)
    }
}
