//! JNI bindings for Android.
//!
//! Kotlin side, on `com.clinic.odontogram.OdontoLib`:
//!
//! ```kotlin
//! external fun renderChart(json: String, toothSize: Float): String?
//! external fun renderTooth(recordJson: String, toothId: String, size: Float): String?
//! ```
//!
//! Sizes are the tooth side in SVG user units; zero or less means the
//! default. Every failure, from unreadable arguments to bad chart JSON,
//! comes back as `null`.

use jni::objects::{JClass, JString};
use jni::sys::{jfloat, jstring};
use jni::JNIEnv;

use crate::{render_chart_json_to_svg, render_tooth_json_to_svg, ChartError};

/// Render the whole chart (stored record JSON keyed by FDI number) as the
/// printable odontogram, with the chart embedded for reloading.
#[no_mangle]
pub extern "system" fn Java_com_clinic_odontogram_OdontoLib_renderChart(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
    tooth_size: jfloat,
) -> jstring {
    let Some(json) = rust_string(&mut env, &json) else {
        return std::ptr::null_mut();
    };
    let svg = render_chart_json_to_svg(&json, tooth_size_or_default(tooth_size));
    java_string(&mut env, svg)
}

/// Render one tooth record. `toothId` must be a charted FDI number; it
/// picks the rectangular or circular silhouette.
#[no_mangle]
pub extern "system" fn Java_com_clinic_odontogram_OdontoLib_renderTooth(
    mut env: JNIEnv,
    _class: JClass,
    record_json: JString,
    tooth_id: JString,
    size: jfloat,
) -> jstring {
    let (Some(record_json), Some(tooth_id)) = (
        rust_string(&mut env, &record_json),
        rust_string(&mut env, &tooth_id),
    ) else {
        return std::ptr::null_mut();
    };
    let svg = render_tooth_json_to_svg(&record_json, &tooth_id, tooth_size_or_default(size));
    java_string(&mut env, svg)
}

fn tooth_size_or_default(size: jfloat) -> Option<f64> {
    (size > 0.0).then_some(f64::from(size))
}

fn rust_string(env: &mut JNIEnv, s: &JString) -> Option<String> {
    env.get_string(s).ok().map(Into::into)
}

fn java_string(env: &mut JNIEnv, svg: Result<String, ChartError>) -> jstring {
    svg.ok()
        .and_then(|svg| env.new_string(svg).ok())
        .map_or(std::ptr::null_mut(), |js| js.into_raw())
}
