use crate::log::init_logger;
use crate::resolver::{self, ResolverError};
use wasm_bindgen::prelude::*;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "E001", "R002")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<ResolverError> for WasmError {
    fn from(e: ResolverError) -> Self {
        // For MalformedRecord, surface the nested ParseError details
        match &e {
            ResolverError::MalformedRecord(pe) => WasmError {
                code: pe.code().to_string(),
                message: pe.to_string(),
                description: pe.description().to_string(),
                details: pe.details().to_string(),
                help: pe.help().map(ToString::to_string),
            },
            ResolverError::UnsolvableInput { .. } => WasmError {
                code: e.code().to_string(),
                message: e.to_string(),
                description: e.description().to_string(),
                details: e.details().to_string(),
                help: e.help().map(ToString::to_string),
            },
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }

        js_sys::Error::new(&msg).into()
    }
}

fn to_js_error(e: ResolverError) -> JsValue {
    WasmError::from(e).into()
}

/// Initialize logging and the panic hook.
///
/// Must be called from JavaScript (page or worker) after the module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("allergen resolver initialized");
}

#[derive(serde::Serialize)]
struct WasmSolution {
    part_one: String,
    part_two: String,
    elapsed_ms: f64,
}

/// JS entry: (input: string) -> { part_one: string, part_two: string, elapsed_ms: number }
///
/// Both answers are strings, ready to be shown as-is by the page.
#[wasm_bindgen]
pub fn solve_input(input: &str) -> Result<JsValue, JsValue> {
    let solution = resolver::solve(input).map_err(to_js_error)?;

    let result = WasmSolution {
        part_one: solution.safe_food_count.to_string(),
        part_two: solution.canonical_list,
        elapsed_ms: solution.elapsed.as_secs_f64() * 1000.0,
    };

    serde_wasm_bindgen::to_value(&result).map_err(|e| {
        WasmError {
            code: "WASM001".to_string(),
            message: format!("serialization failed: {e}"),
            description: "Failed to serialize result".to_string(),
            details: "The solution could not be converted to JavaScript format.".to_string(),
            help: Some("This is an internal error. Please report this issue.".to_string()),
        }
        .into()
    })
}

/// Part one only: count occurrences of foods that cannot carry an allergen.
#[wasm_bindgen]
pub fn count_safe_foods(input: &str) -> Result<usize, JsValue> {
    resolver::count_safe_foods(input).map_err(to_js_error)
}

/// Part two only: the canonical dangerous-food list.
#[wasm_bindgen]
pub fn resolve_dangerous_list(input: &str) -> Result<String, JsValue> {
    resolver::resolve_dangerous_list(input).map_err(to_js_error)
}

/// Build a copy/paste report for troubleshooting a failed run.
///
/// `input_preview` should be the first few lines of the input, not all of it.
#[wasm_bindgen]
pub fn get_debug_info(input_preview: &str, error_message: &str, record_count: usize) -> String {
    use std::fmt::Write;
    let mut report = String::new();

    // writing to a String never fails
    let _ = writeln!(&mut report, "=== ALLERGEN RESOLVER DEBUG REPORT ===");
    let _ = writeln!(&mut report, "Version: {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(
        &mut report,
        "Generated: {}",
        js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_else(|| "unknown".to_string())
    );
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Error");
    let _ = writeln!(&mut report, "{error_message}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Input");
    let _ = writeln!(&mut report, "Records: {record_count}");
    for line in input_preview.lines() {
        let _ = writeln!(&mut report, "> {line}");
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Environment");
    if let Some(window) = web_sys::window() {
        if let Ok(user_agent) = window.navigator().user_agent() {
            let _ = writeln!(&mut report, "User Agent: {user_agent}");
        }
        let _ = writeln!(
            &mut report,
            "Location: {}",
            window.location().href().unwrap_or_else(|_| "unknown".to_string())
        );
    } else {
        // no `window` inside a dedicated worker
        let _ = writeln!(&mut report, "Context: worker");
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "=== END DEBUG REPORT ===");

    report
}
