//! Host bridge over the object pywebview injects into the page.
//!
//! pywebview exposes the Python API as `window.pywebview.api`; every method
//! returns a promise. Results are round-tripped through `JSON.stringify` so
//! the core library only ever sees `serde_json` values.

use js_sys::{Array, Function, JSON, Promise, Reflect};
use module_panel::{HostApi, HostError};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

pub struct PywebviewHost {
    api_path: Vec<String>,
}

impl PywebviewHost {
    pub fn new(api_path: Vec<String>) -> Self {
        Self { api_path }
    }

    /// True once the API methods are installed. pywebview creates an empty
    /// API object first and fills it in just before the ready event.
    pub fn is_ready(&self) -> bool {
        self.api("init")
            .and_then(|api| {
                Reflect::get(&api, &JsValue::from_str("init"))
                    .map_err(|e| HostError::new("init", js_error_message(&e)))
            })
            .is_ok_and(|init| init.is_instance_of::<Function>())
    }

    fn api(&self, method: &str) -> Result<JsValue, HostError> {
        let window = web_sys::window().ok_or_else(|| HostError::new(method, "window is unavailable"))?;
        let mut object: JsValue = window.into();
        for key in &self.api_path {
            object = Reflect::get(&object, &JsValue::from_str(key))
                .map_err(|e| HostError::new(method, js_error_message(&e)))?;
            if object.is_undefined() || object.is_null() {
                return Err(HostError::new(
                    method,
                    format!("`{}` is not available", self.api_path.join(".")),
                ));
            }
        }
        Ok(object)
    }

    async fn call(&self, method: &str, args: &[JsValue]) -> Result<JsValue, HostError> {
        let api = self.api(method)?;
        let function: Function = Reflect::get(&api, &JsValue::from_str(method))
            .map_err(|e| HostError::new(method, js_error_message(&e)))?
            .dyn_into()
            .map_err(|_| HostError::new(method, "not a function"))?;

        let array = Array::new();
        for arg in args {
            array.push(arg);
        }
        let returned = function
            .apply(&api, &array)
            .map_err(|e| HostError::new(method, js_error_message(&e)))?;

        JsFuture::from(Promise::resolve(&returned))
            .await
            .map_err(|e| HostError::new(method, js_error_message(&e)))
    }

    async fn call_json(&self, method: &str, args: &[JsValue]) -> Result<Value, HostError> {
        let value = self.call(method, args).await?;
        json_from_js(method, &value)
    }
}

fn json_from_js(method: &str, value: &JsValue) -> Result<Value, HostError> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    let text: String = JSON::stringify(value)
        .map_err(|e| HostError::new(method, js_error_message(&e)))?
        .into();
    serde_json::from_str(&text).map_err(|e| HostError::new(method, e.to_string()))
}

fn js_error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

impl HostApi for PywebviewHost {
    async fn init(&self) -> Result<(), HostError> {
        self.call("init", &[]).await.map(|_| ())
    }

    async fn get_module_list(&self) -> Result<Value, HostError> {
        self.call_json("get_module_list", &[]).await
    }

    async fn get_module_webview(&self, module_name: &str) -> Result<Value, HostError> {
        self.call_json("get_module_webview", &[JsValue::from_str(module_name)])
            .await
    }

    async fn execute_command(&self, command: &str) -> Result<(), HostError> {
        self.call("execute_command", &[JsValue::from_str(command)])
            .await
            .map(|_| ())
    }
}
