use alloc::boxed::Box;
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::bean::Bean;
use crate::convert::{ConvertError, Converter, ConverterRegistry};

// -----------------------------------------------------------------------------
// Process-wide registry

/// Returns the process-wide converter registry.
///
/// Initialized on first use with [`ConverterRegistry::new`]. Registration
/// serializes on the write lock while conversions share the read lock, so
/// the table is read-mostly by construction. The free functions
/// [`register`], [`unregister`], and [`convert_to`] wrap the locking.
pub fn global() -> &'static RwLock<ConverterRegistry> {
    static GLOBAL: OnceLock<RwLock<ConverterRegistry>> = OnceLock::new();
    GLOBAL.get_or_init(|| RwLock::new(ConverterRegistry::new()))
}

/// Registers `rule` for target type `T` in the process-wide registry.
pub fn register<T: Bean>(rule: impl Converter + 'static) {
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register::<T>(rule);
}

/// Removes the process-wide rule for target type `T`.
pub fn unregister<T: Bean>() -> bool {
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .unregister::<T>()
}

/// Converts `value` to type `T` with the process-wide registry.
///
/// # Examples
///
/// ```
/// let port: u16 = beanpath::convert::convert_to(Box::new(String::from("8080"))).unwrap();
/// assert_eq!(port, 8080);
/// ```
pub fn convert_to<T: Bean>(value: Box<dyn Bean>) -> Result<T, ConvertError> {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .convert_to(value)
}

// -----------------------------------------------------------------------------
// Tests
