#[cfg(test)]
use mockall::automock;

/// Caller-supplied equality, used where the default `PartialEq` of a record
/// is not the notion of "same" a query needs.
#[cfg_attr(test, automock)]
pub trait EqualityComparer<T: 'static> {
    fn equals(&self, a: &T, b: &T) -> bool;
}

impl<T: 'static, F> EqualityComparer<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same_parity(a: &i32, b: &i32) -> bool {
        a % 2 == b % 2
    }

    #[test]
    fn test_closure_comparer() {
        let comparer = |a: &String, b: &String| a.eq_ignore_ascii_case(b);
        assert!(comparer.equals(&"Bob".to_string(), &"BOB".to_string()));
        assert!(!comparer.equals(&"Bob".to_string(), &"Rob".to_string()));
    }

    #[test]
    fn test_fn_item_comparer() {
        assert!(same_parity.equals(&2, &4));
        assert!(!same_parity.equals(&2, &3));
    }
}
