#[cfg(not(target_arch = "wasm32"))]
use log::LevelFilter;

/// Initialize logging for the resolver.
///
/// # Behavior
/// - **Native (CLI):** `Info` level, or `Debug` when `debug_enabled`; `RUST_LOG` overrides both.
/// - **WASM:** `console_log` at `Debug` if `debug_enabled`, otherwise `Info`.
///
/// Calling it twice is harmless: the second initialization is ignored.
pub fn init_logger(debug_enabled: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let level = if debug_enabled {
            log::Level::Debug
        } else {
            log::Level::Info
        };

        match console_log::init_with_level(level) {
            Ok(()) => {
                log::info!("WASM logger initialized at {level:?} level");
            }
            Err(e) => {
                // worker and page may both initialize; keep running without a second logger
                let msg = format!("console_log unavailable: {e}");
                web_sys::console::error_1(&msg.into());
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let level = if debug_enabled {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };

        let mut builder = env_logger::Builder::new();
        builder
            .filter(None, level)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false);

        // Let RUST_LOG override our defaults if explicitly set
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }

        if builder.try_init().is_ok() {
            log::debug!("native logger initialized at {level:?} level");
        }
    }
}
