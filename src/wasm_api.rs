//! WASM API: `#[wasm_bindgen]` exports for the article builder front end.
//!
//! This module is only compiled when targeting `wasm32`. It provides:
//! - `init_runtime` / `destroy_runtime`: lifecycle
//! - `create_editor` / `destroy_editor`: editor instances
//! - `add_block` / `remove_block` / `move_block`: store mutation
//! - `import_content` / `export_json` / `export_markup`: interchange
//! - `register_premium`: premium module registration
//! - `get_block_types`: sidebar catalogue

use std::cell::RefCell;

use serde::Serialize;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

use crate::config::EditorOptions;
use crate::core::registry::BlockTypeDescriptor;
use crate::core::EditorId;
use crate::render::premium::PremiumModule;
use crate::runtime::{Editor, EditorManager};

// ── Global state ────────────────────────────────────────────────────────────

thread_local! {
    static RUNTIME: RefCell<Option<EditorManager>> = RefCell::new(None);
}

fn with_runtime<R>(f: impl FnOnce(&mut EditorManager) -> R) -> Result<R, String> {
    RUNTIME.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(rt) => Ok(f(rt)),
            None => Err("Runtime not initialized. Call init_runtime() first.".into()),
        }
    })
}

fn with_editor<R>(editor_id: &str, f: impl FnOnce(&mut Editor) -> R) -> Result<R, String> {
    let id = parse_id(editor_id)?;
    with_runtime(|rt| rt.editor_mut(id).map(f))?.ok_or_else(|| format!("Unknown editor: '{}'", editor_id))
}

fn parse_id(editor_id: &str) -> Result<EditorId, String> {
    let raw = editor_id.strip_prefix("ef-editor-").unwrap_or(editor_id);
    Uuid::parse_str(raw)
        .map(EditorId)
        .map_err(|e| format!("Invalid editor id '{}': {}", editor_id, e))
}

// ── Response types ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct OkResponse {
    id: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct IndexResponse {
    index: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    imported: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    locked: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupResponse {
    group: String,
    types: Vec<BlockTypeDescriptor>,
}

fn json_ok(id: &str) -> String {
    serde_json::to_string(&OkResponse { id: id.into() }).unwrap_or_default()
}

fn json_err(msg: impl Into<String>) -> String {
    serde_json::to_string(&ErrorResponse {
        error: msg.into(),
    })
    .unwrap_or_default()
}

fn json_index(index: usize) -> String {
    serde_json::to_string(&IndexResponse { index }).unwrap_or_default()
}

// ── Exported functions ──────────────────────────────────────────────────────

#[wasm_bindgen]
pub fn init_runtime() {
    console_error_panic_hook::set_once();

    RUNTIME.with(|cell| {
        *cell.borrow_mut() = Some(EditorManager::new());
    });
}

#[wasm_bindgen]
pub fn destroy_runtime() {
    RUNTIME.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

/// `entitled` is the result of the host's license validation.
#[wasm_bindgen]
pub fn create_editor(options_json: &str, entitled: bool) -> String {
    let options = if options_json.trim().is_empty() {
        EditorOptions::default()
    } else {
        match EditorOptions::from_json(options_json) {
            Ok(o) => o,
            Err(e) => return json_err(e.to_string()),
        }
    };

    match with_runtime(|rt| rt.create_editor(options, entitled)) {
        Ok(id) => json_ok(&id.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn destroy_editor(editor_id: &str) -> bool {
    parse_id(editor_id)
        .and_then(|id| with_runtime(|rt| rt.destroy_editor(id)))
        .unwrap_or(false)
}

#[wasm_bindgen]
pub fn add_block(editor_id: &str, key: &str) -> String {
    match with_editor(editor_id, |editor| editor.add_block(key)) {
        Ok(Ok(index)) => json_index(index),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn remove_block(editor_id: &str, index: usize) -> String {
    match with_editor(editor_id, |editor| editor.remove_block(index)) {
        Ok(Ok(_)) => json_index(index),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn move_block(editor_id: &str, from: usize, to: usize) -> String {
    match with_editor(editor_id, |editor| editor.move_block(from, to)) {
        Ok(Ok(())) => json_index(to),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn import_content(editor_id: &str, content: &str) -> String {
    let response = match with_editor(editor_id, |editor| editor.try_import(content)) {
        Ok(Ok(summary)) => ImportResponse {
            success: true,
            imported: Some(summary.imported),
            locked: Some(summary.locked),
            error: None,
        },
        Ok(Err(e)) => ImportResponse {
            success: false,
            imported: None,
            locked: None,
            error: Some(e.to_string()),
        },
        Err(e) => ImportResponse {
            success: false,
            imported: None,
            locked: None,
            error: Some(e),
        },
    };
    serde_json::to_string(&response).unwrap_or_default()
}

#[wasm_bindgen]
pub fn export_json(editor_id: &str) -> String {
    with_editor(editor_id, |editor| editor.export_json()).unwrap_or_else(json_err)
}

#[wasm_bindgen]
pub fn export_markup(editor_id: &str) -> String {
    with_editor(editor_id, |editor| editor.export_markup()).unwrap_or_else(json_err)
}

/// Called by the premium script once it has loaded.
///
/// `descriptors_json` is an array of descriptors; an empty string installs
/// the standard premium catalogue.
#[wasm_bindgen]
pub fn register_premium(descriptors_json: &str) -> String {
    let module = if descriptors_json.trim().is_empty() {
        PremiumModule::standard()
    } else {
        match serde_json::from_str::<Vec<BlockTypeDescriptor>>(descriptors_json) {
            Ok(descriptors) => PremiumModule {
                descriptors,
                ..PremiumModule::standard()
            },
            Err(e) => return json_err(format!("Invalid descriptors JSON: {}", e)),
        }
    };

    match with_runtime(|rt| rt.register_premium(module)) {
        Ok(count) => serde_json::to_string(&serde_json::json!({ "editors": count })).unwrap_or_default(),
        Err(e) => json_err(e),
    }
}

/// Sidebar catalogue of one editor, grouped
#[wasm_bindgen]
pub fn get_block_types(editor_id: &str) -> String {
    match with_editor(editor_id, |editor| {
        let registry = editor.registry();
        registry
            .groups()
            .into_iter()
            .map(|(group, keys)| GroupResponse {
                group,
                types: keys.iter().filter_map(|k| registry.describe(k)).collect(),
            })
            .collect::<Vec<_>>()
    }) {
        Ok(groups) => serde_json::to_string(&groups).unwrap_or_default(),
        Err(e) => json_err(e),
    }
}
