use std::fmt::Display;

use rust_decimal::Decimal;

use crate::comparer::EqualityComparer;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub annual_salary: Decimal,
    pub is_manager: bool,
    pub department_id: i32,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Department {
    pub id: i32,
    pub short_name: String,
    pub long_name: String,
}

impl Display for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<5}{:<10}{:<10}", self.id, self.first_name, self.last_name)
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<5}{:<10}{:<10}", self.id, self.short_name, self.long_name)
    }
}

/// Two employees are the same person if the ids match and the names match
/// ignoring case. Salary, manager flag and department are not compared.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeComparer;

impl EqualityComparer<Employee> for EmployeeComparer {
    fn equals(&self, a: &Employee, b: &Employee) -> bool {
        a.id == b.id
            && a.first_name.to_lowercase() == b.first_name.to_lowercase()
            && a.last_name.to_lowercase() == b.last_name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn douglas() -> Employee {
        Employee {
            id: 3,
            first_name: "Douglas".to_string(),
            last_name: "Roberts".to_string(),
            annual_salary: Decimal::new(400002, 1),
            is_manager: false,
            department_id: 2,
        }
    }

    #[test]
    fn test_employee_comparer_ignores_case_and_other_fields() {
        let mut other = douglas();
        other.first_name = "DOUGLAS".to_string();
        other.last_name = "roberts".to_string();
        other.annual_salary = Decimal::ZERO;
        assert!(EmployeeComparer.equals(&douglas(), &other));
        assert_ne!(douglas(), other);
    }

    #[test]
    fn test_employee_comparer_requires_same_id() {
        let mut other = douglas();
        other.id = 4;
        assert!(!EmployeeComparer.equals(&douglas(), &other));
    }

    #[test]
    fn test_full_name() {
        assert_eq!(douglas().full_name(), "Douglas Roberts");
    }
}
