//! Owner search resolution.
//!
//! A last-name search ends in one of three states:
//!
//! | matches in the whole result set | outcome                          |
//! |---------------------------------|----------------------------------|
//! | 0                               | [`SearchOutcome::NotFound`]      |
//! | 1                               | [`SearchOutcome::Resolved`]      |
//! | 2 or more                       | [`SearchOutcome::Listed`]        |
//!
//! The count is taken over all pages, not only the page that was requested.

use crate::domain::entities::Owner;
use crate::domain::pagination::Page;
use crate::domain::validation::{FieldErrors, Reason};

/// Field the search form reports "not found" against.
pub const LAST_NAME_FIELD: &str = "last_name";

/// Terminal state of one owner search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Nothing matched; carries a `notFound` error on the last-name field.
    NotFound(FieldErrors),
    /// Exactly one owner matched; show that owner directly.
    Resolved(i64),
    /// Several owners matched; show the requested page.
    Listed(Page<Owner>),
}

/// What the decision needs from the result set before any extra lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    NotFound,
    Single,
    Many,
}

/// Classifies a result set by its total size.
pub fn classify(total_items: i64) -> Resolution {
    match total_items {
        n if n <= 0 => Resolution::NotFound,
        1 => Resolution::Single,
        _ => Resolution::Many,
    }
}

/// Decides the outcome from one page of matches.
///
/// Returns `None` only when the set holds a single owner that is not on this
/// page (the caller then reads the first page and decides again).
pub fn resolve(page: Page<Owner>) -> Option<SearchOutcome> {
    match classify(page.total_items) {
        Resolution::NotFound => Some(SearchOutcome::NotFound(not_found_errors())),
        Resolution::Single => page
            .items
            .first()
            .and_then(Owner::id)
            .map(SearchOutcome::Resolved),
        Resolution::Many => Some(SearchOutcome::Listed(page)),
    }
}

fn not_found_errors() -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.reject(LAST_NAME_FIELD, Reason::NotFound);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::OwnerDetails;
    use crate::domain::pagination::PageRequest;

    fn owner(id: i64, last_name: &str) -> Owner {
        Owner::persisted(
            id,
            OwnerDetails {
                first_name: "Test".to_string(),
                last_name: last_name.to_string(),
                address: "Street 1".to_string(),
                city: "Quito".to_string(),
                telephone: "1234567890".to_string(),
            },
            Vec::new(),
        )
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(0), Resolution::NotFound);
        assert_eq!(classify(1), Resolution::Single);
        assert_eq!(classify(2), Resolution::Many);
    }

    #[test]
    fn test_empty_is_not_found() {
        let outcome = resolve(Page::empty(PageRequest::first(5))).unwrap();
        match outcome {
            SearchOutcome::NotFound(errors) => {
                assert_eq!(errors.codes(), vec![("last_name", "notFound")]);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_single_match_resolves() {
        let page = Page::new(vec![owner(10, "Carter")], PageRequest::first(5), 1);
        assert_eq!(resolve(page), Some(SearchOutcome::Resolved(10)));
    }

    #[test]
    fn test_single_match_off_page_needs_lookup() {
        let page = Page::new(Vec::new(), PageRequest::new(3, 5), 1);
        assert_eq!(resolve(page), None);
    }

    #[test]
    fn test_one_item_on_page_but_more_overall_is_listed() {
        let page = Page::new(vec![owner(3, "Smithson")], PageRequest::new(2, 1), 2);
        assert!(matches!(resolve(page), Some(SearchOutcome::Listed(_))));
    }

    #[test]
    fn test_many_matches_listed() {
        let page = Page::new(
            vec![owner(1, "Smith"), owner(2, "Smithson")],
            PageRequest::first(5),
            2,
        );
        match resolve(page).unwrap() {
            SearchOutcome::Listed(page) => {
                assert_eq!(page.items.len(), 2);
                assert_eq!(page.total_pages(), 1);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
