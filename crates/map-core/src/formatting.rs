/// Formats a list of items into a single string.
///
/// For example, "item1, item2, and item3", or "item1 and item2" when there are only two.
pub fn format_list(items: &[String]) -> String {
    let num_items = items.len();
    let mut string = String::new();
    for (i, item) in items.iter().enumerate() {
        if i == 0 {
            string.push_str(item);
        } else if i == num_items - 1 {
            if num_items > 2 {
                string.push(',');
            }
            string.push_str(" and ");
            string.push_str(item);
        } else {
            string.push_str(", ");
            string.push_str(item);
        }
    }

    string
}

/// Picks the singular or plural form of a noun to go with the provided count.
pub fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

/// Picks "is" or "are" to go with the provided count.
pub fn is_or_are(count: usize) -> &'static str {
    pluralize(count, "is", "are")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn format_empty_list() {
        assert_eq!("", format_list(&[]));
    }

    #[test]
    fn format_short_lists() {
        assert_eq!("a", format_list(&strings(&["a"])));
        assert_eq!("a and b", format_list(&strings(&["a", "b"])));
    }

    #[test]
    fn format_long_list() {
        assert_eq!("a, b, c, and d", format_list(&strings(&["a", "b", "c", "d"])));
    }

    #[test]
    fn plurals() {
        assert_eq!("board", pluralize(1, "board", "boards"));
        assert_eq!("boards", pluralize(0, "board", "boards"));
        assert_eq!("boards", pluralize(7, "board", "boards"));
        assert_eq!("is", is_or_are(1));
        assert_eq!("are", is_or_are(2));
    }
}
