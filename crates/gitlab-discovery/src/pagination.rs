use std::fmt;

use tracing::{debug, warn};

use crate::error::ListingError;
use crate::resolve::RepositoryRecord;

pub const PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Group path; listing includes projects of nested subgroups.
    Group(String),
    User(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Group(name) => write!(f, "group {name}"),
            Scope::User(name) => write!(f, "user {name}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn first() -> Self {
        Self {
            page: 1,
            per_page: PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub current_page: u32,
    pub total_pages: u32,
    pub next_page: u32,
}

impl PageCursor {
    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub records: Vec<RepositoryRecord>,
    pub cursor: PageCursor,
}

/// One paged listing call against the provider.
pub trait PageSource {
    fn list_page(&self, scope: &Scope, request: PageRequest) -> Result<Page, ListingError>;
}

/// Fetches every page for `scope`, preserving provider order.
///
/// Any failed call aborts the walk and drops the records gathered so far.
pub fn walk_pages<S>(source: &S, scope: &Scope) -> Result<Vec<RepositoryRecord>, ListingError>
where
    S: PageSource + ?Sized,
{
    let mut request = PageRequest::first();
    let mut records = Vec::new();

    loop {
        let page = source.list_page(scope, request).map_err(|error| {
            warn!(%scope, page = request.page, %error, "listing call failed");
            error
        })?;

        let cursor = page.cursor;
        debug!(
            %scope,
            page = cursor.current_page,
            total_pages = cursor.total_pages,
            count = page.records.len(),
            "fetched page"
        );
        records.extend(page.records);

        if !cursor.has_more() {
            break;
        }

        // A cursor that does not move forward would never reach the last page.
        if cursor.next_page <= cursor.current_page {
            warn!(%scope, ?cursor, "cursor did not advance, stopping walk");
            break;
        }
        request.page = cursor.next_page;
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct FakePages {
        pages: Vec<Vec<RepositoryRecord>>,
        fail_on: Option<u32>,
        requests: RefCell<Vec<PageRequest>>,
    }

    impl FakePages {
        fn new(pages: Vec<Vec<RepositoryRecord>>) -> Self {
            Self {
                pages,
                fail_on: None,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageSource for FakePages {
        fn list_page(&self, _scope: &Scope, request: PageRequest) -> Result<Page, ListingError> {
            self.requests.borrow_mut().push(request);
            if self.fail_on == Some(request.page) {
                return Err(ListingError::Http {
                    status: 500,
                    message: "boom".to_string(),
                });
            }

            let total_pages = self.pages.len() as u32;
            let records = self.pages[(request.page - 1) as usize].clone();
            Ok(Page {
                records,
                cursor: PageCursor {
                    current_page: request.page,
                    total_pages,
                    next_page: request.page + 1,
                },
            })
        }
    }

    fn record(path: &str) -> RepositoryRecord {
        RepositoryRecord {
            path_with_namespace: path.to_string(),
            http_url_to_repo: format!("https://gitlab.com/{path}.git"),
            ssh_url_to_repo: format!("git@gitlab.com:{path}.git"),
            archived: false,
        }
    }

    #[test]
    fn pagination_issues_one_call_per_page_and_concatenates_in_order() {
        let source = FakePages::new(vec![
            vec![record("acme/a"), record("acme/b")],
            vec![record("acme/c")],
            vec![record("acme/d"), record("acme/e")],
        ]);

        let records =
            walk_pages(&source, &Scope::Group("acme".to_string())).expect("walk should succeed");

        let paths: Vec<&str> = records
            .iter()
            .map(|record| record.path_with_namespace.as_str())
            .collect();
        assert_eq!(paths, vec!["acme/a", "acme/b", "acme/c", "acme/d", "acme/e"]);

        let requests = source.requests.borrow();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|request| request.per_page == PAGE_SIZE));
        assert_eq!(
            requests.iter().map(|request| request.page).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn pagination_single_page_makes_exactly_one_call() {
        let source = FakePages::new(vec![vec![record("alice/dotfiles")]]);

        let records =
            walk_pages(&source, &Scope::User("alice".to_string())).expect("walk should succeed");

        assert_eq!(records.len(), 1);
        assert_eq!(source.requests.borrow().len(), 1);
    }

    #[test]
    fn pagination_aborts_on_later_page_failure() {
        let mut source = FakePages::new(vec![vec![record("acme/a")], vec![record("acme/b")]]);
        source.fail_on = Some(2);

        let err = walk_pages(&source, &Scope::Group("acme".to_string()))
            .expect_err("second page failure should abort");

        assert_eq!(err.status(), Some(500));
        assert_eq!(source.requests.borrow().len(), 2);
    }

    struct StuckCursor;

    impl PageSource for StuckCursor {
        fn list_page(&self, _scope: &Scope, request: PageRequest) -> Result<Page, ListingError> {
            Ok(Page {
                records: vec![record("acme/loop")],
                cursor: PageCursor {
                    current_page: request.page,
                    total_pages: 5,
                    next_page: request.page,
                },
            })
        }
    }

    #[test]
    fn pagination_stops_when_cursor_does_not_advance() {
        let records = walk_pages(&StuckCursor, &Scope::Group("acme".to_string()))
            .expect("walk should stop cleanly");

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn scope_display_names_kind_and_target() {
        assert_eq!(
            Scope::Group("acme/platform".to_string()).to_string(),
            "group acme/platform"
        );
        assert_eq!(Scope::User("alice".to_string()).to_string(), "user alice");
    }
}
