//! Course list search and the popups shown on the course page.

use serde::{Deserialize, Serialize};

use crate::auth::{take_flag, SHOW_MODAL_AFTER_LOGIN, SHOW_MODAL_AFTER_SIGNUP};
use crate::error::EnrollResult;
use crate::session::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseItem {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Courses whose name contains `term`, ignoring case. Order is preserved.
pub fn filter_courses<'a>(items: &'a [CourseItem], term: &str) -> Vec<&'a CourseItem> {
    let term = term.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&term))
        .collect()
}

/// Show the welcome popup if a login or sign-up just happened. Only one
/// flag is consumed per page load, login first.
pub fn take_post_auth_popup<S: SessionStore + ?Sized>(store: &S) -> EnrollResult<bool> {
    if take_flag(store, SHOW_MODAL_AFTER_LOGIN)? {
        return Ok(true);
    }
    take_flag(store, SHOW_MODAL_AFTER_SIGNUP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    fn course(id: u64, name: &str) -> CourseItem {
        CourseItem {
            id,
            name: name.to_string(),
            description: String::new(),
            image_url: None,
        }
    }

    #[test]
    fn filter_is_case_insensitive() {
        let items = vec![course(1, "Intro to Rust"), course(2, "Data Science"), course(3, "Rusty Bikes")];
        let hits: Vec<u64> = filter_courses(&items, "RUST").iter().map(|c| c.id).collect();
        assert_eq!(hits, vec![1, 3]);
        assert_eq!(filter_courses(&items, "").len(), 3);
        assert!(filter_courses(&items, "zzz").is_empty());
    }

    #[test]
    fn popup_flag_consumed_once() {
        let store = MemorySessionStore::new();
        store.set(SHOW_MODAL_AFTER_LOGIN, "true").unwrap();
        store.set(SHOW_MODAL_AFTER_SIGNUP, "true").unwrap();
        assert!(take_post_auth_popup(&store).unwrap());
        assert!(take_post_auth_popup(&store).unwrap());
        assert!(!take_post_auth_popup(&store).unwrap());
    }
}
