use crate::book::Book;

/// Field-by-field equality with an ignore list.
///
/// Each entity lists its comparable fields in [`FieldEq::FIELDS`] and
/// compares one named field at a time. Tests use this to check a fetched
/// entity against the one they posted while skipping server-assigned fields
/// such as `Id`.
pub trait FieldEq {
    /// Comparable field names, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Compare a single field. Unknown field names compare equal.
    fn field_eq(&self, other: &Self, field: &str) -> bool;

    /// `true` if every field not listed in `ignore` is equal.
    fn fields_equal(&self, other: &Self, ignore: &[&str]) -> bool {
        self.differing_fields(other, ignore).is_empty()
    }

    /// Names of the fields (outside `ignore`) whose values differ.
    fn differing_fields(&self, other: &Self, ignore: &[&str]) -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .copied()
            .filter(|field| !ignore.contains(field))
            .filter(|field| !self.field_eq(other, field))
            .collect()
    }
}

/// Compare two possibly-absent entities. Two absent values are equal; one
/// absent value never equals a present one.
pub fn optional_fields_equal<T: FieldEq>(a: Option<&T>, b: Option<&T>, ignore: &[&str]) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.fields_equal(b, ignore),
        (None, None) => true,
        _ => false,
    }
}

impl FieldEq for Book {
    const FIELDS: &'static [&'static str] = &["Id", "Name"];

    fn field_eq(&self, other: &Self, field: &str) -> bool {
        match field {
            "Id" => self.id == other.id,
            "Name" => self.name == other.name,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::BookId;

    fn book(id: i32, name: &str) -> Book {
        Book::new(BookId::new(id), name).unwrap()
    }

    #[test]
    fn identical_books_are_equal() {
        assert!(book(1, "Energy").fields_equal(&book(1, "Energy"), &[]));
    }

    #[test]
    fn ignore_list_skips_id() {
        let posted = book(0, "Energy");
        let stored = book(24, "Energy");
        assert!(!posted.fields_equal(&stored, &[]));
        assert!(posted.fields_equal(&stored, &["Id"]));
    }

    #[test]
    fn differing_fields_lists_names() {
        let a = book(1, "Energy");
        let b = book(2, "Finance");
        assert_eq!(a.differing_fields(&b, &[]), vec!["Id", "Name"]);
        assert_eq!(a.differing_fields(&b, &["Name"]), vec!["Id"]);
    }

    #[test]
    fn optional_comparison() {
        let a = book(1, "Energy");
        assert!(optional_fields_equal::<Book>(None, None, &[]));
        assert!(!optional_fields_equal(Some(&a), None, &[]));
        assert!(optional_fields_equal(Some(&a), Some(&a.clone()), &[]));
    }
}
