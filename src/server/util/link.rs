//! Absolute hyperlinks to API resources.

pub const CATEGORIES_PATH: &str = "/drone-categories/";
pub const DRONES_PATH: &str = "/drones/";
pub const PILOTS_PATH: &str = "/pilots/";
pub const COMPETITIONS_PATH: &str = "/competitions/";
pub const USERS_PATH: &str = "/users/";

/// Builds absolute resource links from the configured application URL.
#[derive(Debug, Clone, Copy)]
pub struct LinkBuilder<'a> {
    base: &'a str,
}

impl<'a> LinkBuilder<'a> {
    /// # Arguments
    /// - `base` - Application URL without trailing slash, e.g. `http://localhost:8000`
    pub fn new(base: &'a str) -> Self {
        Self { base }
    }

    pub fn path(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn categories(&self) -> String {
        self.path(CATEGORIES_PATH)
    }

    pub fn category(&self, id: i32) -> String {
        format!("{}{}{}", self.base, CATEGORIES_PATH, id)
    }

    pub fn drones(&self) -> String {
        self.path(DRONES_PATH)
    }

    pub fn drone(&self, id: i32) -> String {
        format!("{}{}{}", self.base, DRONES_PATH, id)
    }

    pub fn pilots(&self) -> String {
        self.path(PILOTS_PATH)
    }

    pub fn pilot(&self, id: i32) -> String {
        format!("{}{}{}", self.base, PILOTS_PATH, id)
    }

    pub fn competitions(&self) -> String {
        self.path(COMPETITIONS_PATH)
    }

    pub fn competition(&self, id: i32) -> String {
        format!("{}{}{}", self.base, COMPETITIONS_PATH, id)
    }

    pub fn users(&self) -> String {
        self.path(USERS_PATH)
    }

    pub fn user(&self, id: i32) -> String {
        format!("{}{}{}", self.base, USERS_PATH, id)
    }
}
