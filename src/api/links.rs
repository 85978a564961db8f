//! Relative hyperlinks attached to representations.
//!
//! Every link is the configured mount path plus the resource's own path; no
//! host is ever baked in.

use crate::api::dto::{ApiLinks, ApplicationLinks, PageLinks, RatingLinks};
use crate::domain::{ApiId, ApplicationId, RatingId};

/// Builds resource base paths under the configured mount path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkComputer {
    base_path: String,
}

impl LinkComputer {
    /// `base_path` is the public mount path, e.g. `/portal/environments/DEFAULT`.
    pub fn new(base_path: impl AsRef<str>) -> Self {
        Self { base_path: base_path.as_ref().trim_end_matches('/').to_string() }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Path of a collection or resource relative to the mount path.
    pub fn path(&self, relative: &str) -> String {
        format!("{}{}", self.base_path, relative)
    }

    pub fn api_base(&self, api: &ApiId) -> String {
        self.path(&format!("/apis/{}", api))
    }

    pub fn application_base(&self, application: &ApplicationId) -> String {
        self.path(&format!("/applications/{}", application))
    }

    pub fn api_links(&self, api: &ApiId) -> ApiLinks {
        compute_api_links(&self.api_base(api))
    }

    pub fn application_links(&self, application: &ApplicationId) -> ApplicationLinks {
        compute_application_links(&self.application_base(application))
    }

    pub fn rating_links(&self, api: &ApiId, rating: &RatingId) -> RatingLinks {
        let api = self.api_base(api);
        RatingLinks { self_link: format!("{}/ratings/{}", api, rating), api }
    }

    /// Links of a page of `api`; the parent link points at the parent page when there is one.
    pub fn api_page_links(&self, api: &ApiId, page: &str, parent: Option<&str>) -> PageLinks {
        let pages = format!("{}/pages", self.api_base(api));
        let parent = parent.map(|parent| format!("{}/{}", pages, parent));
        compute_page_links(&format!("{}/{}", pages, page), parent.as_deref())
    }
}

/// ```rust
/// use portal_rest::api::links::compute_page_links;
///
/// let links = compute_page_links("/my-page-id", Some("/my-page-parent"));
/// assert_eq!(links.self_link, "/my-page-id");
/// assert_eq!(links.content, "/my-page-id/content");
/// assert_eq!(links.parent.as_deref(), Some("/my-page-parent"));
/// ```
pub fn compute_page_links(base: &str, parent: Option<&str>) -> PageLinks {
    PageLinks {
        self_link: base.to_string(),
        content: format!("{}/content", base),
        parent: parent.map(str::to_string),
    }
}

pub fn compute_application_links(base: &str) -> ApplicationLinks {
    ApplicationLinks {
        self_link: base.to_string(),
        members: format!("{}/members", base),
        notifications: format!("{}/notifications", base),
        picture: format!("{}/picture", base),
    }
}

pub fn compute_api_links(base: &str) -> ApiLinks {
    ApiLinks {
        self_link: base.to_string(),
        pages: format!("{}/pages", base),
        plans: format!("{}/plans", base),
        ratings: format!("{}/ratings", base),
        picture: format!("{}/picture", base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_links_without_parent() {
        let links = compute_page_links("/pages/p1", None);
        assert_eq!(links.self_link, "/pages/p1");
        assert_eq!(links.content, "/pages/p1/content");
        assert!(links.parent.is_none());
    }

    #[test]
    fn test_application_links() {
        let computer = LinkComputer::new("/portal/");
        let links = computer.application_links(&ApplicationId::from("app-1"));
        assert_eq!(links.self_link, "/portal/applications/app-1");
        assert_eq!(links.members, "/portal/applications/app-1/members");
        assert_eq!(links.notifications, "/portal/applications/app-1/notifications");
        assert_eq!(links.picture, "/portal/applications/app-1/picture");
    }

    #[test]
    fn test_api_links_with_empty_base() {
        let links = LinkComputer::new("").api_links(&ApiId::from("api-1"));
        assert_eq!(links.self_link, "/apis/api-1");
        assert_eq!(links.pages, "/apis/api-1/pages");
        assert_eq!(links.plans, "/apis/api-1/plans");
        assert_eq!(links.ratings, "/apis/api-1/ratings");
        assert_eq!(links.picture, "/apis/api-1/picture");
    }

    #[test]
    fn test_rating_links() {
        let computer = LinkComputer::new("/portal");
        let links = computer.rating_links(&ApiId::from("api-1"), &RatingId::from("r-1"));
        assert_eq!(links.self_link, "/portal/apis/api-1/ratings/r-1");
        assert_eq!(links.api, "/portal/apis/api-1");
    }

    #[test]
    fn test_api_page_links() {
        let computer = LinkComputer::new("/portal");
        let links = computer.api_page_links(&ApiId::from("api-1"), "child", Some("folder"));
        assert_eq!(links.self_link, "/portal/apis/api-1/pages/child");
        assert_eq!(links.content, "/portal/apis/api-1/pages/child/content");
        assert_eq!(links.parent.as_deref(), Some("/portal/apis/api-1/pages/folder"));
    }
}
