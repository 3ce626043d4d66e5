//! Type tags for aggregate headers

/// Short type name of `T`, with module paths removed
pub fn short_type_name<T: ?Sized>() -> String {
    shorten_type_name(std::any::type_name::<T>())
}

/// Strip every `path::` prefix from a fully qualified type name
///
/// `std::collections::hash::map::HashMap<&str, alloc::vec::Vec<i32>>` becomes
/// `HashMap<&str, Vec<i32>>`.
pub fn shorten_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                out.truncate(segment_start);
            }
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' | '*' => {
                out.push(c);
                segment_start = out.len();
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_nested_generics() {
        assert_eq!(
            shorten_type_name("std::collections::hash::map::HashMap<&str, alloc::vec::Vec<i32>>"),
            "HashMap<&str, Vec<i32>>"
        );
    }

    #[test]
    fn test_shorten_keeps_primitives_and_qualifiers() {
        assert_eq!(shorten_type_name("i32"), "i32");
        assert_eq!(shorten_type_name("&mut core::cell::RefCell<u8>"), "&mut RefCell<u8>");
        assert_eq!(shorten_type_name("dyn core::any::Any"), "dyn Any");
        assert_eq!(shorten_type_name("[alloc::string::String; 3]"), "[String; 3]");
    }

    #[test]
    fn test_short_type_name_of_std_types() {
        assert_eq!(short_type_name::<Vec<u8>>(), "Vec<u8>");
        assert_eq!(short_type_name::<Option<String>>(), "Option<String>");
    }
}
