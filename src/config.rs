//! Pool configuration options

/// Configuration for flyweight pool behavior
///
/// # Examples
///
/// ```
/// use flyweight_pool::PoolConfiguration;
///
/// let config = PoolConfiguration::<String>::new()
///     .with_key_validator(|k| !k.is_empty())
///     .with_initial_capacity(64);
///
/// assert!(config.key_validator.is_some());
/// assert_eq!(config.initial_capacity, 64);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfiguration<K> {
    /// Optional key screen, checked before any factory invocation.
    /// A rejected key surfaces as `PoolError::InvalidKey`.
    pub key_validator: Option<fn(&K) -> bool>,

    /// Pre-sizing hint for the entry map
    pub initial_capacity: usize,
}

impl<K> Default for PoolConfiguration<K> {
    fn default() -> Self {
        Self {
            key_validator: None,
            initial_capacity: 0,
        }
    }
}

impl<K> PoolConfiguration<K> {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key validator, enabling `InvalidKey` rejection
    ///
    /// # Examples
    ///
    /// ```
    /// use flyweight_pool::{PoolConfiguration, PoolError, SharedObjectPool};
    ///
    /// let config = PoolConfiguration::new().with_key_validator(|k: &String| !k.is_empty());
    /// let pool = SharedObjectPool::with_config(|k: &String| k.to_uppercase(), config);
    ///
    /// assert_eq!(pool.acquire(String::new()), Err(PoolError::InvalidKey));
    /// ```
    pub fn with_key_validator(mut self, validator: fn(&K) -> bool) -> Self {
        self.key_validator = Some(validator);
        self
    }

    /// Set the initial capacity of the entry map
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}
