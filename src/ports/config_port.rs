//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    /// Integer value, or `default` when the key is missing or not an integer.
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    /// Float value, or `default` when the key is missing or not a number.
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
}
