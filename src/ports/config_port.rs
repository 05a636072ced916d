//! Configuration access port trait.
//!
//! Values are raw strings; parsing and validation belong to the domain.

pub trait ConfigPort {
    /// `None` when the section or key is absent.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}
