//! The fixed company data the demo reports and tests run against.

use rust_decimal::Decimal;

use crate::{records::{Department, Employee}, sequence::Sequence, types::Value};

fn employee(id: i32, first_name: &str, last_name: &str, annual_salary: Decimal, is_manager: bool, department_id: i32) -> Employee {
    Employee {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        annual_salary,
        is_manager,
        department_id,
    }
}

fn department(id: i32, short_name: &str, long_name: &str) -> Department {
    Department {
        id,
        short_name: short_name.to_string(),
        long_name: long_name.to_string(),
    }
}

pub fn employees() -> Sequence<Employee> {
    Sequence::from(vec![
        employee(1, "Bob", "Jones", Decimal::new(600003, 1), true, 1),
        employee(2, "Sarah", "Jameson", Decimal::new(800001, 1), true, 2),
        employee(3, "Douglas", "Roberts", Decimal::new(400002, 1), false, 2),
        employee(4, "Jane", "Stevens", Decimal::new(300002, 1), false, 3),
    ])
}

pub fn departments() -> Sequence<Department> {
    Sequence::from(vec![
        department(1, "HR", "Human Resources"),
        department(2, "FN", "Finance"),
        department(3, "TE", "Technology"),
    ])
}

/// The employee added after a query was built, to show deferred execution.
pub fn late_hire() -> Employee {
    employee(5, "Sam", "Davis", Decimal::new(1000002, 1), true, 2)
}

pub fn mixed_values() -> Sequence<Value> {
    Sequence::from(vec![
        Value::Int(100),
        Value::from("Bob Jones"),
        Value::Int(2000),
        Value::Int(3000),
        Value::from("Bill Henderson"),
        Value::from(employee(6, "Jennifer", "Dale", Decimal::from(90000), true, 1)),
        Value::from(employee(7, "Dane", "Hughes", Decimal::from(60000), false, 2)),
        Value::from(department(4, "MKT", "Marketing")),
        Value::from(department(5, "R&D", "Research & Development")),
        Value::from(department(6, "PRD", "Production")),
    ])
}

pub fn integers() -> Sequence<i64> {
    Sequence::from(vec![3, 14, 23, 17, 28, 89])
}
