/*
    Text reports over the sample company data. Each report is one use of the
    query engine; rendering goes through a writeln callback so the binary can
    print and the tests can capture.
 */

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    config::DemoConfig,
    error::QueryError,
    query::Query,
    records::{Department, Employee, EmployeeComparer},
    sample,
    types::Value,
};

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("unknown report '{0}', try 'list'")]
    UnknownReport(String),

    #[error(transparent)]
    Query(#[from] QueryError),
}

pub const REPORTS: &[(&str, &str)] = &[
    ("select-where", "names and salaries above the salary threshold"),
    ("deferred", "a query built before a hire sees the new employee"),
    ("immediate", "a materialized list built before a hire does not"),
    ("join", "employees joined with their departments"),
    ("group-join", "every department with its employees"),
    ("order-by", "joined employees ordered by department, then salary"),
    ("group-by", "employees grouped by department id"),
    ("lookup", "employees materialized into a lookup by department id"),
    ("quantifiers", "all / any over annual salaries"),
    ("contains", "contains with a case-insensitive employee comparer"),
    ("of-type", "departments picked out of a mixed collection"),
    ("element-at", "element access past the end of the employee list"),
    ("first-last", "last even number of an integer list"),
    ("single", "single employee lookup by id"),
    ("company-report", "joined employee report with salary statistics"),
];

/// The high-salary filter from the deferred execution example. Every element
/// it inspects is logged, which makes re-enumeration visible.
pub trait EmployeeQueryExt {
    fn high_salaried(&self, threshold: Decimal, trace_access: bool) -> Query<Employee>;
}

impl EmployeeQueryExt for Query<Employee> {
    fn high_salaried(&self, threshold: Decimal, trace_access: bool) -> Query<Employee> {
        self.filter(move |employee| {
            if trace_access {
                info!(employee = %employee.full_name(), "accessing employee");
            }
            employee.annual_salary >= threshold
        })
    }
}

fn salary_line(full_name: &str, salary: Decimal) -> String {
    format!("{:<20} : {:>10}", full_name, salary.to_string())
}

pub fn run_report(name: &str, config: &DemoConfig, writeln: &mut dyn FnMut(&str)) -> Result<(), DemoError> {
    debug!(report = name, "running report");
    let employees = sample::employees();
    let departments = sample::departments();
    match name {
        "select-where" => {
            let threshold = config.salary_threshold;
            let results = employees.query()
                .map(|e| (e.full_name(), e.annual_salary))
                .filter(move |(_, salary)| *salary > threshold);
            for (full_name, salary) in &results {
                writeln(&salary_line(&full_name, salary));
            }
        }
        "deferred" | "immediate" => {
            let high_salaried = employees.query()
                .high_salaried(config.salary_threshold, config.trace_access)
                .map(|e| (e.full_name(), e.annual_salary));
            let results = if name == "deferred" {
                high_salaried
            } else {
                Query::from_vec(high_salaried.to_list())
            };
            employees.push(sample::late_hire());
            for (full_name, salary) in &results {
                writeln(&salary_line(&full_name, salary));
            }
        }
        "join" => {
            let results = departments.query().inner_join(
                &employees.query(),
                |d| d.id,
                |e| e.department_id,
                |d, e| (e.full_name(), e.annual_salary, d.long_name.clone()),
            );
            for (full_name, salary, department) in &results {
                writeln(&format!("{} : {:<20}", salary_line(&full_name, salary), department));
            }
        }
        "group-join" => {
            let results = departments.query().group_join(
                &employees.query(),
                |d| d.id,
                |e| e.department_id,
                |d, group: &[Employee]| (d.long_name.clone(), group.to_vec()),
            );
            for (department, group) in &results {
                writeln(&format!("Department Name : {}", department));
                for employee in group {
                    writeln(&format!("\t{}", employee.full_name()));
                }
            }
        }
        "order-by" => {
            let results = employees.query()
                .inner_join(&departments.query(), |e| e.department_id, |d| d.id, |e, d| (e.clone(), d.long_name.clone()))
                .order_by(|(e, _)| e.department_id)
                .then_by(|(e, _)| e.annual_salary);
            for (e, department) in results.query().enumerate() {
                writeln(&format!(
                    "Id: {:<5} First Name: {:<10} Last Name: {:<10} Annual Salary: {:>10}\tDepartment Name: {}",
                    e.id, e.first_name, e.last_name, e.annual_salary.to_string(), department
                ));
            }
        }
        "group-by" | "lookup" => {
            let ordered = employees.query().order_by(|e| e.department_id);
            let groups = if name == "group-by" {
                ordered.group_by(|e| e.department_id).to_list()
            } else {
                ordered.to_lookup(|e| e.department_id).into_groups()
            };
            for group in &groups {
                writeln(&format!("Department Id: {}", group.key()));
                for employee in group {
                    writeln(&format!("\tEmployee FullName: {}", employee.full_name()));
                }
            }
        }
        "quantifiers" => {
            let threshold = Decimal::from(60000);
            let query = employees.query();
            if query.all(|e| e.annual_salary > threshold) {
                writeln(&format!("All employee annual salaries are above {}", threshold));
            } else {
                writeln(&format!("Not all employee annual salaries are above {}", threshold));
            }
            if query.any_where(|e| e.annual_salary > threshold) {
                writeln(&format!("At least one employee has an annual salary above {}", threshold));
            } else {
                writeln(&format!("No employee has an annual salary above {}", threshold));
            }
        }
        "contains" => {
            let search = Employee {
                id: 3,
                first_name: "Douglas".to_string(),
                last_name: "Roberts".to_string(),
                annual_salary: Decimal::new(400002, 1),
                is_manager: false,
                department_id: 2,
            };
            let found = if employees.query().contains_with(&search, EmployeeComparer) { "was found" } else { "was not found" };
            writeln(&format!("An employee record for {} {}.", search.full_name(), found));
        }
        "of-type" => {
            let mixed: Query<Value> = sample::mixed_values().query();
            for department in &mixed.of_type::<Department>() {
                writeln(&department.to_string());
            }
        }
        "element-at" => match employees.query().element_at_or_none(6) {
            Some(employee) => writeln(&employee.to_string()),
            None => writeln("This employee record does not exist within the collection"),
        },
        "first-last" => match sample::integers().query().last_or_none_where(|i| i % 2 == 0) {
            Some(even) => writeln(&even.to_string()),
            None => writeln("There are no even numbers in the collection"),
        },
        "single" => match employees.query().single_or_none_where(|e| e.id == 11)? {
            Some(employee) => writeln(&employee.to_string()),
            None => writeln("This employee does not exist within the collection"),
        },
        "company-report" => {
            let results = employees.query().inner_join(
                &departments.query(),
                |e| e.department_id,
                |d| d.id,
                |e, d| (e.clone(), d.long_name.clone()),
            );
            for (e, department) in &results {
                writeln(&format!("First Name: {}", e.first_name));
                writeln(&format!("Last Name: {}", e.last_name));
                writeln(&format!("Annual Salary: {}", e.annual_salary));
                writeln(&format!("Manager: {}", if e.is_manager { "Yes" } else { "No" }));
                writeln(&format!("Department: {}", department));
                writeln("");
            }
            let average = results.average(|(e, _)| e.annual_salary)?;
            let highest = results.max(|(e, _)| e.annual_salary)?;
            let lowest = results.min(|(e, _)| e.annual_salary)?;
            writeln(&format!("Average Annual Salary: {}", average.normalize()));
            writeln(&format!("Highest Annual Salary: {}", highest));
            writeln(&format!("Lowest Annual Salary: {}", lowest));
        }
        _ => return Err(DemoError::UnknownReport(name.to_string())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(name: &str, config: &DemoConfig) -> Vec<String> {
        let mut lines = Vec::new();
        run_report(name, config, &mut |line: &str| lines.push(line.to_string())).unwrap();
        lines
    }

    #[test]
    fn test_every_listed_report_runs() {
        let config = DemoConfig::default();
        for (name, _) in REPORTS {
            assert!(!capture(name, &config).is_empty(), "report {} printed nothing", name);
        }
    }

    #[test]
    fn test_unknown_report() {
        let result = run_report("nope", &DemoConfig::default(), &mut |_: &str| {});
        assert!(matches!(result, Err(DemoError::UnknownReport(name)) if name == "nope"));
    }

    #[test]
    fn test_deferred_and_immediate_differ_by_late_hire() {
        let config = DemoConfig { trace_access: false, ..DemoConfig::default() };
        let deferred = capture("deferred", &config);
        let immediate = capture("immediate", &config);
        assert_eq!(deferred.len(), 3);
        assert!(deferred[2].starts_with("Sam Davis"));
        assert_eq!(immediate.len(), 2);
        assert_eq!(immediate[0], "Bob Jones            :    60000.3");
    }

    #[test]
    fn test_select_where_uses_configured_threshold() {
        let config = DemoConfig { salary_threshold: Decimal::from(35000), ..DemoConfig::default() };
        assert_eq!(capture("select-where", &config).len(), 3);
    }

    #[test]
    fn test_group_join_report() {
        let lines = capture("group-join", &DemoConfig::default());
        assert_eq!(
            lines,
            vec![
                "Department Name : Human Resources",
                "\tBob Jones",
                "Department Name : Finance",
                "\tSarah Jameson",
                "\tDouglas Roberts",
                "Department Name : Technology",
                "\tJane Stevens",
            ]
        );
    }

    #[test]
    fn test_group_by_and_lookup_print_the_same() {
        let config = DemoConfig::default();
        assert_eq!(capture("group-by", &config), capture("lookup", &config));
    }

    #[test]
    fn test_single_and_element_at_fall_back() {
        let config = DemoConfig::default();
        assert_eq!(capture("single", &config), vec!["This employee does not exist within the collection"]);
        assert_eq!(capture("element-at", &config), vec!["This employee record does not exist within the collection"]);
        assert_eq!(capture("first-last", &config), vec!["28"]);
    }

    #[test]
    fn test_quantifiers_and_contains() {
        let config = DemoConfig::default();
        assert_eq!(
            capture("quantifiers", &config),
            vec![
                "Not all employee annual salaries are above 60000",
                "At least one employee has an annual salary above 60000",
            ]
        );
        assert_eq!(capture("contains", &config), vec!["An employee record for Douglas Roberts was found."]);
    }

    #[test]
    fn test_company_report_statistics() {
        let lines = capture("company-report", &DemoConfig::default());
        let tail = &lines[lines.len() - 3..];
        assert_eq!(
            tail,
            &[
                "Average Annual Salary: 52500.2".to_string(),
                "Highest Annual Salary: 80000.1".to_string(),
                "Lowest Annual Salary: 30000.2".to_string(),
            ]
        );
        assert!(lines.contains(&"Manager: Yes".to_string()));
    }
}
