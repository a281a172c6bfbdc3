// C ABI over an opaque engine handle. Callers own the handle and must free
// it with `speller_engine_free`; strings returned here must be released with
// `speller_free_string`. Panics never cross the boundary.
use crate::core::dictionary::Dictionary;
use crate::core::engine::WordEngine;
use crate::core::types::DisplayMode;
use crate::corpus::tokenize;
use crate::error::SelectionError;
use log::error;
use std::ffi::{c_char, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

pub const SPELLER_OK: i32 = 0;
pub const SPELLER_OUT_OF_RANGE: i32 = 1;
pub const SPELLER_BLANK_SELECTED: i32 = 2;
pub const SPELLER_INVALID: i32 = -1;

pub const SPELLER_MODE_CLEARING: u8 = 0;
pub const SPELLER_MODE_SHRINKING: u8 = 1;

unsafe fn engine_mut<'a>(handle: *mut WordEngine) -> Option<&'a mut WordEngine> {
    handle.as_mut()
}

unsafe fn engine_ref<'a>(handle: *const WordEngine) -> Option<&'a WordEngine> {
    handle.as_ref()
}

fn to_c_string(s: String) -> *mut c_char {
    CString::new(s).map_or(ptr::null_mut(), CString::into_raw)
}

/// Creates an engine over a whitespace-separated word list with the default
/// configuration. Returns null on invalid input.
///
/// # Safety
/// `words` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn speller_engine_new(words: *const c_char) -> *mut WordEngine {
    if words.is_null() {
        return ptr::null_mut();
    }
    let text = match CStr::from_ptr(words).to_str() {
        Ok(text) => text,
        Err(_) => return ptr::null_mut(),
    };
    let result = catch_unwind(|| {
        WordEngine::with_defaults(Dictionary::from_words(tokenize(text)))
    });
    match result {
        Ok(engine) => Box::into_raw(Box::new(engine)),
        Err(_) => {
            error!("Panic while creating speller engine");
            ptr::null_mut()
        }
    }
}

/// # Safety
/// `handle` must be null or come from `speller_engine_new`, and not be used
/// afterwards.
#[no_mangle]
pub unsafe extern "C" fn speller_engine_free(handle: *mut WordEngine) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// # Safety
/// `handle` must be null or a live engine handle.
#[no_mangle]
pub unsafe extern "C" fn speller_select_cell(handle: *mut WordEngine, row: usize, col: usize) -> i32 {
    let Some(engine) = engine_mut(handle) else {
        return SPELLER_INVALID;
    };
    let result = catch_unwind(AssertUnwindSafe(|| engine.select_cell(row, col)));
    match result {
        Ok(Ok(_)) => SPELLER_OK,
        Ok(Err(SelectionError::BlankSelected { .. })) => SPELLER_BLANK_SELECTED,
        Ok(Err(_)) => SPELLER_OUT_OF_RANGE,
        Err(_) => {
            error!("Panic in speller_select_cell");
            SPELLER_INVALID
        }
    }
}

/// Returns 1 if a letter was removed, 0 if the prefix was already empty.
///
/// # Safety
/// `handle` must be null or a live engine handle.
#[no_mangle]
pub unsafe extern "C" fn speller_undo(handle: *mut WordEngine) -> i32 {
    match engine_mut(handle) {
        Some(engine) => catch_unwind(AssertUnwindSafe(|| engine.undo().is_some() as i32)).unwrap_or(SPELLER_INVALID),
        None => SPELLER_INVALID,
    }
}

/// # Safety
/// `handle` must be null or a live engine handle.
#[no_mangle]
pub unsafe extern "C" fn speller_reset(handle: *mut WordEngine) -> i32 {
    match engine_mut(handle) {
        Some(engine) => catch_unwind(AssertUnwindSafe(|| engine.reset()))
            .map_or(SPELLER_INVALID, |_| SPELLER_OK),
        None => SPELLER_INVALID,
    }
}

/// Returns 1 when the engine is now unrestricted, 0 when restricted.
///
/// # Safety
/// `handle` must be null or a live engine handle.
#[no_mangle]
pub unsafe extern "C" fn speller_toggle_unrestricted(handle: *mut WordEngine) -> i32 {
    match engine_mut(handle) {
        Some(engine) => catch_unwind(AssertUnwindSafe(|| engine.toggle_unrestricted() as i32))
            .unwrap_or(SPELLER_INVALID),
        None => SPELLER_INVALID,
    }
}

/// # Safety
/// `handle` must be null or a live engine handle.
#[no_mangle]
pub unsafe extern "C" fn speller_set_display_mode(handle: *mut WordEngine, mode: u8) -> i32 {
    let mode = match mode {
        SPELLER_MODE_CLEARING => DisplayMode::Clearing,
        SPELLER_MODE_SHRINKING => DisplayMode::Shrinking,
        _ => return SPELLER_INVALID,
    };
    match engine_mut(handle) {
        Some(engine) => catch_unwind(AssertUnwindSafe(|| engine.set_display_mode(mode)))
            .map_or(SPELLER_INVALID, |_| SPELLER_OK),
        None => SPELLER_INVALID,
    }
}

/// Commits the current word; returns it as a string, or null when nothing
/// was typed.
///
/// # Safety
/// `handle` must be null or a live engine handle.
#[no_mangle]
pub unsafe extern "C" fn speller_commit(handle: *mut WordEngine) -> *mut c_char {
    let Some(engine) = engine_mut(handle) else {
        return ptr::null_mut();
    };
    match catch_unwind(AssertUnwindSafe(|| engine.commit())) {
        Ok(Some(word)) => to_c_string(word),
        Ok(None) => ptr::null_mut(),
        Err(_) => {
            error!("Panic in speller_commit");
            ptr::null_mut()
        }
    }
}

/// The engine state as a JSON object (prefix, grid, suggestions, done, ...).
///
/// # Safety
/// `handle` must be null or a live engine handle.
#[no_mangle]
pub unsafe extern "C" fn speller_state_json(handle: *const WordEngine) -> *mut c_char {
    let Some(engine) = engine_ref(handle) else {
        return ptr::null_mut();
    };
    let json = catch_unwind(AssertUnwindSafe(|| serde_json::to_string(&engine.view())));
    match json {
        Ok(Ok(json)) => to_c_string(json),
        Ok(Err(e)) => {
            error!("Could not encode engine state: {}", e);
            ptr::null_mut()
        }
        Err(_) => {
            error!("Panic in speller_state_json");
            ptr::null_mut()
        }
    }
}

/// # Safety
/// `s` must be null or a string returned by this library.
#[no_mangle]
pub unsafe extern "C" fn speller_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
