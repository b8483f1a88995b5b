use std::error::Error;
use std::fmt::{Display, Formatter};

use wasm_bindgen::JsValue;

/// Failures while wiring the scene into the page.
///
/// The ripple, layout and scene-state modules never fail; everything here
/// comes from the browser side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    NoWindow,
    MissingElement(&'static str),
    NoContext(&'static str),
    ShaderCompile(String),
    ShaderLink(String),
    Js(String),
}

impl Display for SceneError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no global window"),
            Self::MissingElement(what) => write!(f, "element not found: {what}"),
            Self::NoContext(kind) => write!(f, "{kind} context not supported"),
            Self::ShaderCompile(log) => write!(f, "shader compile failed: {log}"),
            Self::ShaderLink(log) => write!(f, "program link failed: {log}"),
            Self::Js(msg) => write!(f, "javascript error: {msg}"),
        }
    }
}

impl Error for SceneError {}

impl From<JsValue> for SceneError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(msg) => Self::Js(msg),
            None => Self::Js(format!("{value:?}")),
        }
    }
}

impl From<SceneError> for JsValue {
    fn from(err: SceneError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type SceneResult<T> = Result<T, SceneError>;
