use js_sys::Function;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use laba_core::{
    AnimationId, Completion, Config, Engine, Outputs, PlaybackCfg, Stage, TargetId, TargetState,
};

/// Browser-facing stage. Timestamps cross the boundary in milliseconds
/// (`performance.now()`), the core works in seconds.
#[wasm_bindgen]
pub struct LabaStage {
    core: Stage<TargetState>,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

#[inline]
fn ms_to_secs(ms: f64) -> f64 {
    ms / 1000.0
}

fn target_from_js(state: JsValue) -> Result<TargetState, JsError> {
    if jsvalue_is_undefined_or_null(&state) {
        return Ok(TargetState::default());
    }
    swb::from_value(state).map_err(|e| JsError::new(&format!("target state error: {e}")))
}

/// Wrap a JS callback as a core completion. Exceptions thrown by the
/// callback are swallowed so they cannot unwind through the tick.
fn completion_from_js(f: Function) -> Completion {
    Box::new(move || {
        let _ = f.call0(&JsValue::UNDEFINED);
    })
}

#[wasm_bindgen]
impl LabaStage {
    /// Create a stage. Pass a config object or undefined/null for defaults.
    /// Example:
    ///   new LabaStage({ time_scale: 0.5 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<LabaStage, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let engine = Engine::try_new(cfg).map_err(|e| JsError::new(&e.to_string()))?;

        Ok(LabaStage {
            core: Stage::new(engine),
        })
    }

    /// Register a target. `state` is an optional TargetState object
    /// (`{ width, height, sibling_index, ... }`). Returns a TargetId (u32).
    #[wasm_bindgen(js_name = add_target)]
    pub fn add_target(&mut self, state: JsValue) -> Result<u32, JsError> {
        let state = target_from_js(state)?;
        Ok(self.core.add_target(state).0)
    }

    #[wasm_bindgen(js_name = remove_target)]
    pub fn remove_target(&mut self, target: u32) -> bool {
        self.core.remove_target(TargetId(target)).is_some()
    }

    /// Current state of a target as a plain object.
    #[wasm_bindgen(js_name = target_state)]
    pub fn target_state(&self, target: u32) -> Result<JsValue, JsError> {
        let state = self
            .core
            .target(TargetId(target))
            .ok_or_else(|| JsError::new(&format!("unknown target {target}")))?;
        swb::to_value(state).map_err(|e| JsError::new(&format!("target state error: {e}")))
    }

    /// Replace a target's state, e.g. after the host re-measured the element.
    #[wasm_bindgen(js_name = set_target_state)]
    pub fn set_target_state(&mut self, target: u32, state: JsValue) -> Result<(), JsError> {
        let state = target_from_js(state)?;
        let slot = self
            .core
            .target_mut(TargetId(target))
            .ok_or_else(|| JsError::new(&format!("unknown target {target}")))?;
        *slot = state;
        Ok(())
    }

    /// Restore identity transform, full scale and opacity.
    #[wasm_bindgen(js_name = reset_target)]
    pub fn reset_target(&mut self, target: u32) -> Result<(), JsError> {
        let slot = self
            .core
            .target_mut(TargetId(target))
            .ok_or_else(|| JsError::new(&format!("unknown target {target}")))?;
        slot.reset();
        Ok(())
    }

    /// Start notation on a target. `on_complete` is called (no arguments)
    /// from inside a later `update`. Returns an AnimationId (u32).
    #[wasm_bindgen]
    pub fn animate(
        &mut self,
        target: u32,
        notation: String,
        now_ms: f64,
        on_complete: Option<Function>,
    ) -> Result<u32, JsError> {
        let id = self
            .core
            .animate(
                TargetId(target),
                &notation,
                ms_to_secs(now_ms),
                on_complete.map(completion_from_js),
            )
            .map_err(|e| JsError::new(&format!("animate error: {e}")))?;
        Ok(id.0)
    }

    /// Start a playback routine: `{ intro?, notation, repeat? }`.
    #[wasm_bindgen]
    pub fn play(&mut self, target: u32, cfg: JsValue, now_ms: f64) -> Result<u32, JsError> {
        let cfg: PlaybackCfg =
            swb::from_value(cfg).map_err(|e| JsError::new(&format!("playback cfg error: {e}")))?;
        let id = self
            .core
            .play(TargetId(target), cfg, ms_to_secs(now_ms))
            .map_err(|e| JsError::new(&format!("play error: {e}")))?;
        Ok(id.0)
    }

    #[wasm_bindgen]
    pub fn describe(&self, target: u32, notation: String) -> Result<String, JsError> {
        self.core
            .describe(TargetId(target), &notation)
            .map_err(|e| JsError::new(&format!("describe error: {e}")))
    }

    /// Advance all animations to `now_ms`. Returns Outputs `{ changes, events }`.
    #[wasm_bindgen]
    pub fn update(&mut self, now_ms: f64) -> Result<JsValue, JsError> {
        let out: &Outputs = self.core.update(ms_to_secs(now_ms));
        swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Same as `update` but returns the Outputs as a JSON string.
    #[wasm_bindgen(js_name = update_json)]
    pub fn update_json(&mut self, now_ms: f64) -> Result<String, JsError> {
        let out: &Outputs = self.core.update(ms_to_secs(now_ms));
        serde_json::to_string(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Drop an animation without running its completion.
    #[wasm_bindgen]
    pub fn stop(&mut self, animation: u32) -> bool {
        self.core.stop(AnimationId(animation))
    }

    #[wasm_bindgen(js_name = is_running)]
    pub fn is_running(&self, animation: u32) -> bool {
        self.core.is_running(AnimationId(animation))
    }
}

/// Describe notation against a detached target of the given size.
#[wasm_bindgen(js_name = describe_notation)]
pub fn describe_notation(
    notation: String,
    width: f64,
    height: f64,
    sibling_index: u32,
) -> Result<String, JsError> {
    let target = TargetState::with_size(width, height).with_sibling_index(sibling_index as usize);
    Engine::default()
        .describe(&target, &notation)
        .map_err(|e| JsError::new(&format!("describe error: {e}")))
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
