//! odontolib: dental chart (odontogram) model, editor and SVG renderer.
//!
//! A chart maps FDI tooth numbers to [`ToothRecord`]s. The same records feed
//! the interactive views ([`grid`], [`editor`]) and the printable renderer,
//! and the printed SVG carries the chart so it can be loaded again.
//!
//! # Example
//! ```
//! use odontolib::{parse_chart, render_chart_json_to_svg};
//!
//! let json = r#"{"16":{"zones":{"top":"caries"},"status":"corona"}}"#;
//! let chart = parse_chart(json).unwrap();
//! assert_eq!(chart.get("16").status.as_deref(), Some("corona"));
//!
//! let svg = render_chart_json_to_svg(json, None).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod chart;
pub mod editor;
pub mod error;
pub mod grid;
pub mod layout;
pub mod model;
pub mod renderer;
pub mod taxonomy;

#[cfg(target_os = "android")]
pub mod android;

pub use chart::{ChartSession, ChartState, ToothField};
pub use editor::Editor;
pub use error::{ChartError, EditorError};
pub use grid::{ArchView, QuadrantListView, StatusChoice, ToothCell};
pub use layout::Connection;
pub use model::*;
pub use renderer::{chart_from_svg, render_chart_to_svg, render_tooth_to_svg, RenderOptions, ToothRender};
pub use taxonomy::{Category, Symbol, Taxonomy};

/// Decode a chart from the stored record JSON.
pub fn parse_chart(json: &str) -> Result<ChartState, ChartError> {
    ChartState::from_json(json)
}

/// Encode a chart into the stored record JSON.
/// Keys are sorted, so equal charts always produce the same bytes.
pub fn chart_to_json(chart: &ChartState) -> Result<String, ChartError> {
    chart.to_json()
}

/// Parse chart JSON and render it with the standard taxonomy.
///
/// `tooth_size` sets the tooth side in user units. Pass `None` to use the
/// default (40).
pub fn render_chart_json_to_svg(json: &str, tooth_size: Option<f64>) -> Result<String, ChartError> {
    let chart = parse_chart(json)?;
    render_chart_to_svg(&chart, &Taxonomy::standard(), &RenderOptions::with_tooth_size(tooth_size))
}

/// Parse chart JSON and render it with options given as JSON, e.g.
/// `{"tooth_size": 32, "show_measurements": false}`. Missing fields keep
/// their defaults.
pub fn render_chart_json_with_options(json: &str, options_json: &str) -> Result<String, ChartError> {
    let chart = parse_chart(json)?;
    let options = RenderOptions::from_json(options_json)?;
    render_chart_to_svg(&chart, &Taxonomy::standard(), &options)
}

/// Parse one tooth record and render it with the standard taxonomy.
///
/// `tooth` picks the silhouette and must be a charted FDI number.
pub fn render_tooth_json_to_svg(record_json: &str, tooth: &str, size: Option<f64>) -> Result<String, ChartError> {
    let id: ToothId = tooth.parse()?;
    let record: ToothRecord = serde_json::from_str(record_json)?;
    Ok(render_tooth_to_svg(
        &record,
        id.silhouette(),
        size,
        Connection::default(),
        &Taxonomy::standard(),
    ))
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI: for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Render chart JSON to SVG and return it as a C string.
/// The caller must free the returned string with `odontolib_free_string`.
///
/// `tooth_size` sets the tooth side in user units. Pass 0.0 to use the default.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn odontolib_render_chart(json: *const c_char, tooth_size: f64) -> *mut c_char {
    let Some(json) = (unsafe { c_str(json) }) else {
        return std::ptr::null_mut();
    };

    let size = if tooth_size > 0.0 { Some(tooth_size) } else { None };

    match render_chart_json_to_svg(json, size) {
        Ok(svg) => into_c_string(svg),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Render chart JSON to SVG with options JSON and return it as a C string.
/// The caller must free the returned string with `odontolib_free_string`.
///
/// # Safety
/// `json` and `options_json` must be valid null-terminated UTF-8 C strings.
#[no_mangle]
pub unsafe extern "C" fn odontolib_render_chart_with_options(
    json: *const c_char,
    options_json: *const c_char,
) -> *mut c_char {
    let (Some(json), Some(options_json)) = (unsafe { c_str(json) }, unsafe { c_str(options_json) }) else {
        return std::ptr::null_mut();
    };

    match render_chart_json_with_options(json, options_json) {
        Ok(svg) => into_c_string(svg),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Render one tooth record to SVG and return it as a C string.
/// The caller must free the returned string with `odontolib_free_string`.
///
/// `size` sets the tooth side in user units. Pass 0.0 to use the default.
///
/// # Safety
/// `record_json` and `tooth` must be valid null-terminated UTF-8 C strings.
#[no_mangle]
pub unsafe extern "C" fn odontolib_render_tooth(
    record_json: *const c_char,
    tooth: *const c_char,
    size: f64,
) -> *mut c_char {
    let (Some(record_json), Some(tooth)) = (unsafe { c_str(record_json) }, unsafe { c_str(tooth) }) else {
        return std::ptr::null_mut();
    };

    let size = if size > 0.0 { Some(size) } else { None };

    match render_tooth_json_to_svg(record_json, tooth, size) {
        Ok(svg) => into_c_string(svg),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Free a string previously returned by odontolib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by an odontolib function, or null.
#[no_mangle]
pub unsafe extern "C" fn odontolib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}

/// Hand a string to the caller, or null if it cannot be a C string.
fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).map_or(std::ptr::null_mut(), CString::into_raw)
}

/// # Safety
/// `ptr` must be null or a valid null-terminated C string.
unsafe fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}
