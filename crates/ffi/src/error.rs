use poisk_core::SarError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Error raised inside an FFI call: the code handed back to C plus a
/// message kept for `poisk_get_last_error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FfiError {
    code: PoiskErrorCode,
    msg: String,
}

impl FfiError {
    /// Null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_drift"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: PoiskErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Argument that is not valid UTF-8 or otherwise malformed before it
    /// reaches the core.
    pub fn invalid_parameter(param_name: &str, message: &str) -> Self {
        Self {
            code: PoiskErrorCode::InvalidParameter,
            msg: format!("Parameter '{param_name}': {message}"),
        }
    }

    pub fn code(&self) -> PoiskErrorCode {
        self.code
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<SarError> for FfiError {
    fn from(error: SarError) -> Self {
        let code = match error {
            SarError::InvalidInput { .. } | SarError::Config(_) => {
                PoiskErrorCode::InvalidParameter
            }
            SarError::Drift { .. } => PoiskErrorCode::DriftFailed,
            SarError::UnsupportedMethod(_) => PoiskErrorCode::UnsupportedMethod,
        };
        Self {
            code,
            msg: format!("[{}] {error}", error.kind()),
        }
    }
}

/// FFI error codes returned by Poisk functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoiskErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Non-finite, negative or out-of-range argument.
    InvalidParameter = 2,

    /// Position could not be displaced (pole, or a displacement past a pole).
    DriftFailed = 3,

    /// Search method name not recognised.
    UnsupportedMethod = 4,
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The `CString` lives here so the pointer handed to C stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, PoiskErrorCode)> = const { RefCell::new((None, PoiskErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, PoiskErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, PoiskErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next Poisk call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// PoiskDrift drift;
/// if (poisk_estimate_drift(lkp, wind, current, 2.0, &drift) != Ok) {
///     const char* error = poisk_get_last_error();
///     if (error) {
///         printf("Drift failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn poisk_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code, `Ok` if the last call on this
/// thread succeeded.
#[no_mangle]
pub extern "C" fn poisk_get_last_error_code() -> PoiskErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
