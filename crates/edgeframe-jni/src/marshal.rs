//! Ownership transfer across the JNI boundary.
//!
//! Inbound arrays belong to the JVM. [`copy_from_java`] copies a `byte[]` into
//! a Rust-owned `Vec<u8>`, which Rust frees when the native call returns.
//! Direct `ByteBuffer`s are borrowed in place by [`borrow_direct_buffer`] and
//! never freed by Rust.
//!
//! Outbound, [`copy_to_java`] has the JVM allocate a fresh `byte[]`
//! (`NewByteArray`) and copies the result into it. The returned local
//! reference is owned by the JVM and reclaimed by its garbage collector.

use edgeframe_core::PipelineError;
use jni::objects::{JByteArray, JByteBuffer};
use jni::sys::jbyteArray;
use jni::JNIEnv;
use std::panic::{self, AssertUnwindSafe};

/// Copy a Java `byte[]` into a new Rust vector.
pub(crate) fn copy_from_java(env: &JNIEnv<'_>, array: &JByteArray<'_>) -> Result<Vec<u8>, PipelineError> {
    env.convert_byte_array(array)
        .map_err(|e| PipelineError::AllocationFailed(format!("copying input byte[]: {}", e)))
}

/// Allocate a Java `byte[]` holding `bytes`.
pub(crate) fn copy_to_java(env: &JNIEnv<'_>, bytes: &[u8]) -> Result<jbyteArray, PipelineError> {
    env.byte_array_from_slice(bytes)
        .map(JByteArray::into_raw)
        .map_err(|e| PipelineError::AllocationFailed(format!("NewByteArray({}): {}", bytes.len(), e)))
}

/// Borrow the memory behind a direct `ByteBuffer`.
///
/// # Safety
///
/// The slice aliases JVM memory. The caller must not keep it beyond the
/// current native call, and the Java side must not write to the buffer while
/// the call runs. Camera plane buffers handed over for the duration of a call
/// satisfy both.
pub(crate) unsafe fn borrow_direct_buffer<'a>(
    env: &JNIEnv<'_>,
    buffer: &'a JByteBuffer<'_>,
) -> Result<&'a [u8], PipelineError> {
    let ptr = env
        .get_direct_buffer_address(buffer)
        .map_err(|e| PipelineError::AllocationFailed(format!("direct buffer address: {}", e)))?;
    let len = env
        .get_direct_buffer_capacity(buffer)
        .map_err(|e| PipelineError::AllocationFailed(format!("direct buffer capacity: {}", e)))?;
    Ok(unsafe { std::slice::from_raw_parts(ptr, len) })
}

/// Run `f`, turning both errors and panics into `None`.
///
/// Unwinding across an `extern "system"` function aborts the process, so every
/// entry point goes through here.
pub(crate) fn catch<T>(entry: &str, f: impl FnOnce() -> Result<T, PipelineError>) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(err)) => {
            log::warn!("{}: {} ({:?})", entry, err, err.kind());
            None
        }
        Err(_) => {
            log::error!("{}: panicked, returning null", entry);
            None
        }
    }
}

/// Unwrap an entry point result into a `byte[]` or `null`.
///
/// Any exception left pending by a failed JNI call is cleared so the Kotlin
/// caller sees a plain `null` rather than a throw.
pub(crate) fn or_null(env: &JNIEnv<'_>, result: Option<jbyteArray>) -> jbyteArray {
    match result {
        Some(array) => array,
        None => {
            let settled = settle_exception(env.exception_check(), || env.exception_clear());
            if let Err(e) = settled {
                log::error!("pending Java exception could not be cleared: {}", e);
            }
            std::ptr::null_mut()
        }
    }
}

/// Clear a pending exception if `pending` reports one.
///
/// Errors from the check or from the clear are returned, since either leaves
/// an exception that will surface in Kotlin.
fn settle_exception(
    pending: jni::errors::Result<bool>,
    clear: impl FnOnce() -> jni::errors::Result<()>,
) -> jni::errors::Result<()> {
    if pending? {
        clear()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeframe_core::ErrorKind;

    #[test]
    fn test_catch_passes_values_through() {
        assert_eq!(catch("test", || Ok::<_, PipelineError>(42)), Some(42));
    }

    #[test]
    fn test_catch_maps_errors_to_none() {
        let result = catch("test", || -> Result<u8, PipelineError> {
            Err(PipelineError::AllocationFailed("no memory".to_string()))
        });
        assert_eq!(result, None);
    }

    #[test]
    fn test_catch_contains_panics() {
        let result = catch("test", || -> Result<u8, PipelineError> { panic!("boom") });
        assert_eq!(result, None);
    }

    #[test]
    fn test_allocation_error_kind() {
        let err = PipelineError::AllocationFailed("NewByteArray(10)".to_string());
        assert_eq!(err.kind(), ErrorKind::AllocationFailed);
        assert_eq!(
            err.to_string(),
            "Failed to allocate boundary buffer: NewByteArray(10)"
        );
    }

    #[test]
    fn test_settle_exception_without_pending_skips_clear() {
        let mut cleared = false;
        let result = settle_exception(Ok(false), || {
            cleared = true;
            Ok(())
        });
        assert!(result.is_ok());
        assert!(!cleared);
    }

    #[test]
    fn test_settle_exception_clears_pending() {
        let mut cleared = false;
        let result = settle_exception(Ok(true), || {
            cleared = true;
            Ok(())
        });
        assert!(result.is_ok());
        assert!(cleared);
    }

    #[test]
    fn test_settle_exception_reports_failed_clear() {
        let result = settle_exception(Ok(true), || Err(jni::errors::Error::NullPtr("env")));
        assert!(matches!(result, Err(jni::errors::Error::NullPtr("env"))));
    }

    #[test]
    fn test_settle_exception_reports_failed_check() {
        let result = settle_exception(Err(jni::errors::Error::NullPtr("env")), || Ok(()));
        assert!(result.is_err());
    }
}
