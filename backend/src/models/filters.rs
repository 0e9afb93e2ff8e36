use crate::validator::{self, Validator};

/// Pagination and sort parameters shared by list endpoints. The safelist is
/// supplied by the caller so each entity can expose its own sortable columns.
#[derive(Debug, Clone)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    pub sort: String,
    pub sort_safelist: Vec<String>,
}

impl Filters {
    pub fn validate(&self, v: &mut Validator) {
        v.check(self.page > 0, "page", "must be greater than zero");
        v.check(self.page <= 1_000, "page", "must be a maximum of 1000");
        v.check(self.page_size > 0, "page_size", "must be greater than zero");
        v.check(self.page_size <= 100, "page_size", "must be a maximum of 100");
        v.check(
            validator::permitted(&self.sort, &self.sort_safelist),
            "sort",
            "invalid sort value",
        );
    }

    /// Column name for ORDER BY with the descending marker stripped.
    ///
    /// ORDER BY identifiers cannot be bound as query parameters, so the value
    /// is interpolated into SQL text. Membership in the safelist is re-checked
    /// here even though `validate` already ran; reaching this with an
    /// unlisted value means the safelist and validation rules have diverged,
    /// which is a programming error, not user input.
    pub fn sort_column(&self) -> &str {
        for candidate in &self.sort_safelist {
            if *candidate == self.sort {
                return self.sort.trim_start_matches('-');
            }
        }
        panic!("unsafe sort parameter: {}", self.sort);
    }

    pub fn sort_direction(&self) -> &'static str {
        if self.sort.starts_with('-') {
            "DESC"
        } else {
            "ASC"
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(page: i64, page_size: i64, sort: &str) -> Filters {
        Filters {
            page,
            page_size,
            sort: sort.to_string(),
            sort_safelist: ["id", "name", "level", "-id", "-name", "-level"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    #[test]
    fn defaults_pass_validation() {
        let mut v = Validator::new();
        filters(1, 20, "id").validate(&mut v);
        assert!(v.valid());
    }

    #[test]
    fn page_bounds_are_enforced() {
        let mut v = Validator::new();
        filters(0, 20, "id").validate(&mut v);
        assert_eq!(v.errors.get("page").unwrap(), "must be greater than zero");

        let mut v = Validator::new();
        filters(1_001, 20, "id").validate(&mut v);
        assert_eq!(v.errors.get("page").unwrap(), "must be a maximum of 1000");
    }

    #[test]
    fn page_size_bounds_are_enforced() {
        let mut v = Validator::new();
        filters(1, 0, "id").validate(&mut v);
        assert!(v.errors.contains_key("page_size"));

        let mut v = Validator::new();
        filters(1, 101, "id").validate(&mut v);
        assert_eq!(
            v.errors.get("page_size").unwrap(),
            "must be a maximum of 100"
        );
    }

    #[test]
    fn sort_outside_safelist_is_flagged() {
        let mut v = Validator::new();
        filters(1, 20, "contact").validate(&mut v);
        assert_eq!(v.errors.get("sort").unwrap(), "invalid sort value");
    }

    #[test]
    fn sort_column_strips_descending_marker() {
        assert_eq!(filters(1, 20, "name").sort_column(), "name");
        assert_eq!(filters(1, 20, "-name").sort_column(), "name");
    }

    #[test]
    fn sort_direction_follows_marker() {
        assert_eq!(filters(1, 20, "level").sort_direction(), "ASC");
        assert_eq!(filters(1, 20, "-level").sort_direction(), "DESC");
    }

    #[test]
    fn limit_and_offset_derive_from_page() {
        let f = filters(3, 25, "id");
        assert_eq!(f.limit(), 25);
        assert_eq!(f.offset(), 50);
    }

    #[test]
    #[should_panic(expected = "unsafe sort parameter")]
    fn sort_column_panics_on_unvalidated_value() {
        filters(1, 20, "id; DROP TABLE schools").sort_column();
    }
}
