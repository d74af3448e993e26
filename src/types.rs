use std::fmt::Display;

use crate::{query::Query, records::{Department, Employee}};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Text,
    Employee,
    Department,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Int => write!(f, "INT"),
            ValueKind::Text => write!(f, "TEXT"),
            ValueKind::Employee => write!(f, "EMPLOYEE"),
            ValueKind::Department => write!(f, "DEPARTMENT"),
        }
    }
}

/// Element of a heterogeneous collection. `of_type` and `of_kind` filter a
/// sequence of these down to a single variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    Text(String),
    Employee(Employee),
    Department(Department),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Text(_) => ValueKind::Text,
            Value::Employee(_) => ValueKind::Employee,
            Value::Department(_) => ValueKind::Department,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "\"{}\"", s.escape_debug()),
            Value::Employee(e) => write!(f, "{}", e),
            Value::Department(d) => write!(f, "{}", d),
        }
    }
}

/// Payload extraction for one variant of `Value`.
pub trait FromValue: Sized {
    const KIND: ValueKind;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for Employee {
    const KIND: ValueKind = ValueKind::Employee;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Employee(e) => Some(e.clone()),
            _ => None,
        }
    }
}

impl FromValue for Department {
    const KIND: ValueKind = ValueKind::Department;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Department(d) => Some(d.clone()),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Employee> for Value {
    fn from(e: Employee) -> Self {
        Value::Employee(e)
    }
}

impl From<Department> for Value {
    fn from(d: Department) -> Self {
        Value::Department(d)
    }
}

impl Query<Value> {
    /// Keeps the elements of variant `U`, unwrapped, in source order.
    pub fn of_type<U: FromValue + 'static>(&self) -> Query<U> {
        let source = self.clone();
        Query::from_factory(move || source.enumerate().filter_map(|value| U::from_value(&value)))
    }

    pub fn of_kind(&self, kind: ValueKind) -> Query<Value> {
        self.filter(move |value| value.kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use crate::sample;

    use super::*;

    fn marketing() -> Department {
        Department { id: 4, short_name: "MKT".to_string(), long_name: "Marketing".to_string() }
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Value::from(100i64).kind(), ValueKind::Int);
        assert_eq!(Value::from("Bob Jones").kind(), ValueKind::Text);
        assert_eq!(Value::from(marketing()).kind(), ValueKind::Department);
    }

    #[test]
    fn test_from_value_only_accepts_own_variant() {
        assert_eq!(i64::from_value(&Value::Int(7)), Some(7));
        assert_eq!(i64::from_value(&Value::from("7")), None);
        assert_eq!(String::from_value(&Value::from("7")), Some("7".to_string()));
        assert_eq!(Department::from_value(&Value::from(marketing())), Some(marketing()));
        assert_eq!(Employee::from_value(&Value::from(marketing())), None);
    }

    #[test]
    fn test_kind_constants() {
        assert_eq!(<i64 as FromValue>::KIND, ValueKind::Int);
        assert_eq!(<String as FromValue>::KIND, ValueKind::Text);
        assert_eq!(<Employee as FromValue>::KIND, ValueKind::Employee);
        assert_eq!(<Department as FromValue>::KIND, ValueKind::Department);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(2000).to_string(), "2000");
        assert_eq!(Value::from("Bill").to_string(), "\"Bill\"");
        assert_eq!(ValueKind::Department.to_string(), "DEPARTMENT");
    }

    #[test]
    fn test_of_type_filters_by_variant() {
        let mixed = sample::mixed_values().query();
        assert_eq!(mixed.of_type::<i64>().to_list(), vec![100, 2000, 3000]);
        assert_eq!(mixed.of_type::<String>().to_list(), vec!["Bob Jones", "Bill Henderson"]);
        let employees: Vec<i32> = mixed.of_type::<Employee>().map(|e| e.id).to_list();
        assert_eq!(employees, vec![6, 7]);
        let departments: Vec<String> = mixed.of_type::<Department>().map(|d| d.short_name).to_list();
        assert_eq!(departments, vec!["MKT", "R&D", "PRD"]);
    }

    #[test]
    fn test_of_kind_keeps_values() {
        let mixed = sample::mixed_values().query();
        let departments = mixed.of_kind(ValueKind::Department);
        assert_eq!(departments.count(), 3);
        assert!(departments.all(|v| v.kind() == ValueKind::Department));
        assert_eq!(mixed.of_kind(<Employee as FromValue>::KIND).count(), 2);
    }

    #[test]
    fn test_of_type_is_deferred() {
        let values = sample::mixed_values();
        let texts = values.query().of_type::<String>();
        values.push(Value::from("Late"));
        assert_eq!(texts.last(), Ok("Late".to_string()));
    }
}
