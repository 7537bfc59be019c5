use std::cmp::Ordering;

/// A total order over keys
///
/// Keys comparing [Ordering::Equal] are the same key as far as the tree is
/// concerned, even if they are not `==`: under the default [WordOrder],
/// `"Apple"` and `"apple"` occupy a single slot.
pub trait Comparator<T: ?Sized> {
    /// Compares `a` against `b`
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Ordering for words, configurable in case sensitivity and length priority
///
/// The default is ascending, case-insensitive lexicographic order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WordOrder {
    /// Compare characters as they are instead of after lowercase folding
    pub case_sensitive: bool,
    /// Order shorter words before longer ones, comparing characters only
    /// between words of the same length
    ///
    /// Note that this is not a lexicographic order: `"zz"` sorts before `"aaa"`.
    pub length_first: bool,
}

impl WordOrder {
    /// Case-insensitive lexicographic order
    pub const fn new() -> Self {
        Self {
            case_sensitive: false,
            length_first: false,
        }
    }

    /// Sets [Self::case_sensitive]
    pub const fn case_sensitive(mut self, on: bool) -> Self {
        self.case_sensitive = on;
        self
    }

    /// Sets [Self::length_first]
    pub const fn length_first(mut self, on: bool) -> Self {
        self.length_first = on;
        self
    }
}

impl<T: AsRef<str> + ?Sized> Comparator<T> for WordOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        let (a, b) = (a.as_ref(), b.as_ref());
        if self.length_first {
            let by_len = a.chars().count().cmp(&b.chars().count());
            if by_len != Ordering::Equal {
                return by_len;
            }
        }
        if self.case_sensitive {
            a.cmp(b)
        } else {
            let fold = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
            fold_cmp(a, b).unwrap_or_else(|| fold(a).cmp(&fold(b)))
        }
    }
}

/// Compares ASCII-only strings without allocating, `None` if either isn't ASCII
fn fold_cmp(a: &str, b: &str) -> Option<Ordering> {
    if !a.is_ascii() || !b.is_ascii() {
        return None;
    }
    let a = a.bytes().map(|c| c.to_ascii_lowercase());
    let b = b.bytes().map(|c| c.to_ascii_lowercase());
    Some(a.cmp(b))
}

/// Delegates to the key's own [Ord] implementation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering::{Equal, Greater, Less};

    #[test]
    fn test_case_insensitive_default() {
        let order = WordOrder::default();
        assert_eq!(order.compare("apple", "Banana"), Less);
        assert_eq!(order.compare("Banana", "cherry"), Less);
        assert_eq!(order.compare("APPLE", "apple"), Equal);
        assert_eq!(order.compare("apple", "app"), Greater);
        assert_eq!(order.compare("zz", "aaa"), Greater);
        assert_eq!(order.compare(&String::from("b"), &String::from("A")), Greater);
    }

    #[test]
    fn test_case_sensitive() {
        let order = WordOrder::new().case_sensitive(true);
        assert_eq!(order.compare("Banana", "apple"), Less);
        assert_ne!(order.compare("APPLE", "apple"), Equal);
    }

    #[test]
    fn test_length_first() {
        let order = WordOrder::new().length_first(true);
        assert_eq!(order.compare("zz", "aaa"), Less);
        assert_eq!(order.compare("abc", "ABD"), Less);
        assert_eq!(order.compare("ABC", "abc"), Equal);
    }

    #[test]
    fn test_non_ascii_folding() {
        let order = WordOrder::default();
        assert_eq!(order.compare("Éclair", "éclair"), Equal);
        assert_eq!(order.compare("Ärger", "zebra"), Greater);
        assert_eq!(order.compare("straße", "STRASSE"), Greater);
    }

    #[test]
    fn test_natural() {
        assert_eq!(Natural.compare(&1, &2), Less);
        assert_eq!(Natural.compare("b", "a"), Greater);
    }
}
