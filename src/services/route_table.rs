//! Static classification of URL paths by prefix.
//!
//! Matching is plain `starts_with`, so `/dashboard/reports` inherits the class of
//! `/dashboard`, and `/loginx` still counts as the login route.

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

const PUBLIC: &[&str] = &[LOGIN_PATH];

const PROTECTED: &[&str] = &[
    DASHBOARD_PATH,
    "/accounts",
    "/admin",
    "/feedback",
    "/stocks",
    "/settings",
];

// Declared for the views; the edge guard cannot prove a role from a cookie.
const ADMIN_ONLY: &[&str] = &["/admin"];

// Framework internals, the API surface, and static assets are never guarded.
const RESERVED: &[&str] = &[
    "/_next",
    "/api",
    "/favicon.ico",
    "/static",
    "/images",
    "/fonts",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected,
    Reserved,
    Unclassified,
}

/// Immutable prefix table shared by the guard and the views.
#[derive(Debug, Clone)]
pub struct RouteTable {
    public: Vec<String>,
    protected: Vec<String>,
    admin_only: Vec<String>,
    reserved: Vec<String>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(PUBLIC, PROTECTED, ADMIN_ONLY, RESERVED)
    }
}

impl RouteTable {
    pub fn new(public: &[&str], protected: &[&str], admin_only: &[&str], reserved: &[&str]) -> Self {
        let owned = |prefixes: &[&str]| prefixes.iter().map(|p| p.to_string()).collect();
        Self {
            public: owned(public),
            protected: owned(protected),
            admin_only: owned(admin_only),
            reserved: owned(reserved),
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        matches_any(&self.public, path)
    }

    pub fn is_protected(&self, path: &str) -> bool {
        matches_any(&self.protected, path)
    }

    pub fn is_admin_only(&self, path: &str) -> bool {
        matches_any(&self.admin_only, path)
    }

    pub fn is_reserved(&self, path: &str) -> bool {
        matches_any(&self.reserved, path)
    }

    /// Public wins over Protected, which wins over Reserved.
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.is_public(path) {
            RouteClass::Public
        } else if self.is_protected(path) {
            RouteClass::Protected
        } else if self.is_reserved(path) {
            RouteClass::Reserved
        } else {
            RouteClass::Unclassified
        }
    }

    pub fn protected_prefixes(&self) -> impl Iterator<Item = &str> {
        self.protected.iter().map(String::as_str)
    }
}

fn matches_any(prefixes: &[String], path: &str) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
}
