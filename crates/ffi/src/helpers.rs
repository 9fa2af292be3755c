use crate::error::{with_last_error_mut, FfiError, PoiskErrorCode};
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &FfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record an error and return its code.
#[inline]
pub(crate) fn track_error(error: &FfiError) -> PoiskErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error after a successful call.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = PoiskErrorCode::Ok;
    });
}

/// Write `value` through `out` on success, record the error otherwise.
///
/// # Safety
/// `out` must be non-null and valid for writes.
pub(crate) unsafe fn write_result<T>(
    result: Result<T, FfiError>,
    out: *mut T,
) -> PoiskErrorCode {
    match result {
        Ok(value) => {
            unsafe {
                out.write(value);
            }
            clear_last_error();
            PoiskErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Box `value` and hand ownership to C through `out`; `out` is set to null
/// on failure.
///
/// # Safety
/// `out` must be non-null and valid for writes.
pub(crate) unsafe fn write_boxed<T>(
    result: Result<T, FfiError>,
    out: *mut *mut T,
) -> PoiskErrorCode {
    match result {
        Ok(value) => {
            unsafe {
                *out = Box::into_raw(Box::new(value));
            }
            clear_last_error();
            PoiskErrorCode::Ok
        }
        Err(error) => {
            unsafe {
                *out = std::ptr::null_mut();
            }
            track_error(&error)
        }
    }
}

/// Borrow a C array as a slice; a null pointer is only accepted with `len == 0`.
///
/// # Safety
/// When non-null, `ptr` must point to `len` initialised values.
pub(crate) unsafe fn slice_from_raw<'a, T>(
    ptr: *const T,
    len: usize,
    param_name: &str,
) -> Result<&'a [T], FfiError> {
    if ptr.is_null() {
        if len == 0 {
            return Ok(&[]);
        }
        return Err(FfiError::null_pointer(param_name));
    }
    Ok(unsafe { std::slice::from_raw_parts(ptr, len) })
}
