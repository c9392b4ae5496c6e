//! FFI bindings for Studyboard
//!
//! C-compatible entry points for hosts that embed the layout and heat-map
//! logic (mobile shells, web views via a native bridge). All functions take
//! null-terminated C strings and return allocated memory that must be freed
//! by the caller using `studyboard_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::BoardConfig;
use crate::pipeline::{
    activity_summary_json, activity_to_heatmap_json, viewport_to_layout_json, BoardProcessor,
};
use crate::types::{Platform, Viewport};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Resolve a viewport into layout JSON.
///
/// `platform` is a host OS identifier; `"web"` selects the web platform,
/// anything else (including NULL) is native.
///
/// # Safety
/// - `platform` must be a valid null-terminated C string or NULL.
/// - Returns a newly allocated string that must be freed with `studyboard_free_string`.
/// - Returns NULL on error; call `studyboard_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn studyboard_layout_json(
    width: f64,
    height: f64,
    platform: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let platform = cstr_to_string(platform)
        .map(|os| Platform::from_os(&os))
        .unwrap_or(Platform::Native);

    match viewport_to_layout_json(width, height, platform) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Build the heat-map report for a JSON sample array.
///
/// # Safety
/// - `samples_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `studyboard_free_string`.
/// - Returns NULL on error; call `studyboard_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn studyboard_heatmap_json(
    samples_json: *const c_char,
    screen_width: f64,
) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(samples_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match activity_to_heatmap_json(json_str, screen_width) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Summary statistics for a JSON sample array.
///
/// # Safety
/// - `samples_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `studyboard_free_string`.
/// - Returns NULL on error; call `studyboard_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn studyboard_summary_json(samples_json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(samples_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match activity_summary_json(json_str) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Stateful Processor API
// ============================================================================

/// Opaque handle to a BoardProcessor
pub struct BoardProcessorHandle {
    processor: BoardProcessor,
}

/// Create a processor, optionally configured from TOML.
///
/// # Safety
/// - `config_toml` must be a valid null-terminated C string or NULL for defaults.
/// - Must be freed with `studyboard_processor_free`.
/// - Returns NULL on error; call `studyboard_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn studyboard_processor_new(
    config_toml: *const c_char,
) -> *mut BoardProcessorHandle {
    clear_last_error();

    let config = if config_toml.is_null() {
        BoardConfig::default()
    } else {
        let toml_str = match cstr_to_string(config_toml) {
            Some(s) => s,
            None => {
                set_last_error("Invalid config string pointer");
                return ptr::null_mut();
            }
        };
        match BoardConfig::from_toml_str(&toml_str) {
            Ok(config) => config,
            Err(e) => {
                set_last_error(&e.to_string());
                return ptr::null_mut();
            }
        }
    };

    match BoardProcessor::with_config(config) {
        Ok(processor) => Box::into_raw(Box::new(BoardProcessorHandle { processor })),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a processor.
///
/// # Safety
/// - `processor` must be a valid pointer returned by `studyboard_processor_new`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn studyboard_processor_free(processor: *mut BoardProcessorHandle) {
    if !processor.is_null() {
        drop(Box::from_raw(processor));
    }
}

/// Resolve a viewport with the processor's breakpoints.
///
/// # Safety
/// - `processor` must be a valid pointer returned by `studyboard_processor_new`.
/// - `platform` must be a valid null-terminated C string or NULL.
/// - Returns a newly allocated string that must be freed with `studyboard_free_string`.
/// - Returns NULL on error; call `studyboard_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn studyboard_processor_layout_json(
    processor: *const BoardProcessorHandle,
    width: f64,
    height: f64,
    platform: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if processor.is_null() {
        set_last_error("Null processor pointer");
        return ptr::null_mut();
    }

    let handle = &*processor;
    let platform = cstr_to_string(platform)
        .map(|os| Platform::from_os(&os))
        .unwrap_or(Platform::Native);

    let report = handle
        .processor
        .layout(&Viewport::new(width, height, platform));

    match serde_json::to_string(&report) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Build a heat-map report with the processor's chart options.
///
/// # Safety
/// - `processor` must be a valid pointer returned by `studyboard_processor_new`.
/// - `samples_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `studyboard_free_string`.
/// - Returns NULL on error; call `studyboard_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn studyboard_processor_heatmap_json(
    processor: *const BoardProcessorHandle,
    samples_json: *const c_char,
    screen_width: f64,
) -> *mut c_char {
    clear_last_error();

    if processor.is_null() {
        set_last_error("Null processor pointer");
        return ptr::null_mut();
    }

    let handle = &*processor;

    let json_str = match cstr_to_string(samples_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match handle.processor.heatmap_json(&json_str, screen_width) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Studyboard functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Studyboard function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn studyboard_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Studyboard function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn studyboard_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn studyboard_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
