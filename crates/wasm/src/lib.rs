//! Host bridge: exposes the universe to a browser renderer through `wasm-bindgen`.
//!
//! # Invariants
//! - The renderer reads cell state only through the pointer returned by
//!   `cells()`, viewing `cellsLen()` bytes of wasm linear memory.
//! - That pointer must be re-acquired after every mutating call; storage is
//!   reused across generations, so a stale view reads old bytes, never freed
//!   memory.
//! - The bridge performs no drawing, timing, or input handling.

use lifegrid_kernel::{Universe, UniverseConfig, patterns};
use wasm_bindgen::prelude::*;

/// Route panics and `tracing` events to the browser console. Safe to call
/// more than once.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    install_console_subscriber();
}

#[cfg(target_arch = "wasm32")]
fn install_console_subscriber() {
    // Err means a subscriber is already installed.
    if tracing_wasm::try_set_as_global_default().is_ok() {
        tracing::debug!("console subscriber installed");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn install_console_subscriber() {}

/// JavaScript-facing wrapper around [`Universe`].
#[wasm_bindgen(js_name = Universe)]
pub struct WasmUniverse {
    inner: Universe,
}

impl From<Universe> for WasmUniverse {
    fn from(inner: Universe) -> Self {
        Self { inner }
    }
}

#[wasm_bindgen(js_class = Universe)]
impl WasmUniverse {
    /// Create an all-dead `width x height` universe.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<WasmUniverse, JsError> {
        let inner = Universe::new(width, height)?;
        tracing::debug!(width, height, "bridge universe created");
        Ok(inner.into())
    }

    /// Create a universe from a JSON `UniverseConfig`.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<WasmUniverse, JsError> {
        let config = UniverseConfig::from_json(json)?;
        Ok(Universe::from_config(&config)?.into())
    }

    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Pointer to the packed bit buffer in linear memory.
    pub fn cells(&self) -> *const u8 {
        self.inner.cells().as_ptr()
    }

    /// Length in bytes of the buffer behind `cells()`.
    #[wasm_bindgen(js_name = cellsLen)]
    pub fn cells_len(&self) -> usize {
        self.inner.cells().len()
    }

    #[wasm_bindgen(js_name = liveCount)]
    pub fn live_count(&self) -> usize {
        self.inner.live_count()
    }

    pub fn tick(&mut self) {
        self.inner.tick();
    }

    #[wasm_bindgen(js_name = toggleCell)]
    pub fn toggle_cell(&mut self, row: i32, col: i32) {
        self.inner.toggle_cell(row, col);
    }

    #[wasm_bindgen(js_name = activateCell)]
    pub fn activate_cell(&mut self, row: i32, col: i32) {
        self.inner.activate_cell(row, col);
    }

    pub fn randomize(&mut self) {
        self.inner.randomize();
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Restart the randomize seed stream, e.g. from `Date.now()`.
    ///
    /// Takes a JS number; the fractional part is dropped and negative or NaN
    /// seeds become 0.
    pub fn reseed(&mut self, seed: f64) {
        self.inner.reseed(seed as u64);
    }

    /// Stamp a named pattern (case-insensitive) with its top-left corner at
    /// `(row, col)`. Coordinates wrap.
    #[wasm_bindgen(js_name = placePattern)]
    pub fn place_pattern(&mut self, name: &str, row: i32, col: i32) -> Result<(), JsError> {
        let pattern = patterns::find(name)
            .ok_or_else(|| JsError::new(&format!("unknown pattern: {name}")))?;
        self.inner.place(pattern, row, col);
        Ok(())
    }

    #[wasm_bindgen(js_name = setDensity)]
    pub fn set_density(&mut self, density: f64) -> Result<(), JsError> {
        self.inner.set_density(density)?;
        Ok(())
    }

    /// Text rendering, one line per row.
    pub fn render(&self) -> String {
        self.inner.to_string()
    }
}
