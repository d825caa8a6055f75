//! WASM bindings for the transportation planner
//!
//! The browser form collects the eight numbers and calls [`solve_transport`];
//! the returned object feeds the result table and chart.

use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::model::ProblemInstance;
use crate::solver::{TransportError, TransportSolver};

/// Solve the two-factory, two-city problem and return the plan as a JS object.
///
/// Throws a JS `Error` for input the form would refuse (wrong length, negative,
/// NaN or infinite). When no plan exists the `Error` also carries a numeric
/// `statusCode` property with the solver status code.
#[wasm_bindgen(js_name = solveTransport)]
pub fn solve_transport(costs: &[f64], supplies: &[f64], demands: &[f64]) -> Result<JsValue, JsValue> {
    let instance = ProblemInstance::new(
        fixed::<4>("costs", costs)?,
        fixed::<2>("supplies", supplies)?,
        fixed::<2>("demands", demands)?,
    );
    if let Some((field, value)) = instance.first_invalid_field() {
        return Err(js_sys::Error::new(&format!("{} must be a finite number >= 0, got {}", field, value)).into());
    }

    let plan = TransportSolver::new()
        .solve_instance(&instance)
        .map_err(|e| error_value(&e))?;
    serde_wasm_bindgen::to_value(&plan).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The reference instance used to pre-fill the form
#[wasm_bindgen(js_name = defaultInstance)]
pub fn default_instance() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&ProblemInstance::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn fixed<const N: usize>(field: &str, values: &[f64]) -> Result<[f64; N], JsValue> {
    values.try_into().map_err(|_| {
        js_sys::Error::new(&format!("{} expects {} numbers, got {}", field, N, values.len())).into()
    })
}

fn error_value(err: &TransportError) -> JsValue {
    let js_err = js_sys::Error::new(&err.to_string());
    if let Some(code) = err.status_code() {
        if let Err(e) = js_sys::Reflect::set(&js_err, &JsValue::from_str("statusCode"), &JsValue::from(code)) {
            warn!(?e, code, "could not attach statusCode to JS error");
        }
    }
    js_err.into()
}
