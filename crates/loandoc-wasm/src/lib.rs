//! WASM bindings for loan-application field extraction.
//!
//! Exposes the extraction engine to browsers and Node.js. Documents arrive
//! either as plain text (one paragraph per line) or as a serialized
//! `{"full_text": ..., "tables": [...]}` source document.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use loandoc_core::extract::rules;
use loandoc_core::{DocumentExtractor, LoanDocumentParser, SourceDocument, ZeroPolicy};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_source(source_json: &str) -> Result<SourceDocument, JsValue> {
    SourceDocument::from_json(source_json).map_err(|e| JsValue::from_str(&format!("Invalid source document: {}", e)))
}

/// Extract loan fields from document text.
#[wasm_bindgen]
pub fn extract_from_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&loandoc_core::extract(&SourceDocument::from_plain_text(text)))
}

/// Extract loan fields from a serialized source document.
#[wasm_bindgen]
pub fn extract_document(source_json: &str) -> Result<JsValue, JsValue> {
    to_js(&loandoc_core::extract(&parse_source(source_json)?))
}

/// Parse a number written with "." or "," separators (e.g. "1.500.000,5").
#[wasm_bindgen]
pub fn parse_number(value: &str) -> f64 {
    rules::parse_number(value)
}

/// Format an amount the Vietnamese way (e.g. "1.500.000").
#[wasm_bindgen]
pub fn format_vnd(amount: f64) -> String {
    rules::format_vnd(amount)
}

/// Extractor class for browser use.
#[wasm_bindgen]
pub struct LoanDocumentExtractor {
    parser: LoanDocumentParser,
}

#[wasm_bindgen]
impl LoanDocumentExtractor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: LoanDocumentParser::new(),
        }
    }

    /// Keep numeric values of exactly zero instead of treating them as missing.
    #[wasm_bindgen]
    pub fn set_explicit_zero(&mut self, explicit: bool) {
        let policy = if explicit {
            ZeroPolicy::ExplicitZero
        } else {
            ZeroPolicy::Legacy
        };
        self.parser = std::mem::take(&mut self.parser).with_zero_policy(policy);
    }

    /// Extract loan fields from document text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.extract(&SourceDocument::from_plain_text(text)))
    }

    /// Extract from a serialized source document, including missing fields,
    /// warnings and timing.
    #[wasm_bindgen]
    pub fn extract_with_report(&self, source_json: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(&parse_source(source_json)?))
    }
}

impl Default for LoanDocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}
