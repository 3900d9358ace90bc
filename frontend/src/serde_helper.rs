//! 支付组件等第三方脚本需要普通 JS 对象，这里负责 Rust 值与 `JsValue` 的互转

use js_sys::wasm_bindgen::JsValue;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("serde-wasm-bindgen: {0}")]
    SerdeWasmBindgen(#[from] serde_wasm_bindgen::Error),
    #[error("JS error: {0:?}")]
    JsSys(JsValue),
}

impl From<JsValue> for Error {
    fn from(v: JsValue) -> Self {
        Error::JsSys(v)
    }
}

/// map 转为 object 而非 `Map`；金额仍以 number 传出
pub fn to_value<T: Serialize>(value: &T) -> Result<JsValue, Error> {
    let serializer = serde_wasm_bindgen::Serializer::new()
        .serialize_large_number_types_as_bigints(false)
        .serialize_maps_as_objects(true);
    Ok(value.serialize(&serializer)?)
}

pub fn from_value<T: DeserializeOwned>(value: JsValue) -> Result<T, Error> {
    Ok(serde_wasm_bindgen::from_value(value)?)
}
