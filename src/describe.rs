//! Describe objects in an informative way.

use std::fmt::Write;

/// A one line summary of an object, for printing to the user.
pub trait Describe {
    fn describe(&self) -> String;
}

/// Describe a list of items under a header.
///
/// # Examples
/// ```
/// # use molspec::describe::{describe_list, Describe};
/// struct Item(&'static str);
///
/// impl Describe for Item {
///     fn describe(&self) -> String {
///         self.0.to_string()
///     }
/// }
///
/// let description = describe_list("Items", &[Item("first"), Item("second")]);
/// assert_eq!("[ Items ]\n 0: first\n 1: second\n", &description);
/// ```
pub fn describe_list<T: Describe>(header: &str, items: &[T]) -> String {
    let mut description = String::new();

    write!(description, "[ {} ]\n", header).expect("Could not construct a description string");
    for (i, item) in items.iter().enumerate() {
        write!(description, "{:2}: {}\n", i, item.describe())
            .expect("Could not construct a description string");
    }

    description
}
