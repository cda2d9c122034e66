//! Submitted request data and the processing context.
//!
//! Inbound data is a flat mapping of field name to a string or a list of
//! strings, split into the POST and GET partitions. A form reads exactly one
//! partition, chosen by its [`Method`].
//!
//! [`ProcessContext`] is what `process` receives. It carries the request
//! snapshot plus the scope of the form currently being processed, which is
//! how a button tells its form that it was the one clicked.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SwatError;

/// A submitted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// The scalar value, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    /// All values. A scalar yields a single element.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            FieldValue::Scalar(s) => vec![s.clone()],
            FieldValue::List(items) => items.clone(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldValue::List(_))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Scalar(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Scalar(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(String::from).collect())
    }
}

/// One partition of submitted data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    fields: HashMap<String, FieldValue>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` body.
    ///
    /// `name[]` keys accumulate into a list stored under `name`. Other keys,
    /// including `name[key]`, are stored verbatim with the last value winning.
    ///
    /// ```rust
    /// use swat::FormData;
    ///
    /// let data = FormData::parse_urlencoded("checkbox[]=2&checkbox[]=5&q=a+b");
    /// assert_eq!(data.get_list("checkbox"), vec!["2", "5"]);
    /// assert_eq!(data.get_str("q"), Some("a b"));
    /// ```
    pub fn parse_urlencoded(input: &str) -> Self {
        let mut data = FormData::new();
        for (key, value) in url::form_urlencoded::parse(input.as_bytes()) {
            match key.strip_suffix("[]") {
                Some(base) => data.push(base, value.into_owned()),
                None => data.insert(key.into_owned(), value.into_owned()),
            }
        }
        data
    }

    /// Sets a value, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Appends to the list stored under `name`, promoting a scalar.
    pub fn push(&mut self, name: &str, value: String) {
        let slot = self
            .fields
            .entry(name.to_string())
            .or_insert_with(|| FieldValue::List(Vec::new()));
        match slot {
            FieldValue::List(items) => items.push(value),
            FieldValue::Scalar(existing) => {
                let first = std::mem::take(existing);
                *slot = FieldValue::List(vec![first, value]);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(FieldValue::as_str)
    }

    /// All values under `name`; empty when absent.
    pub fn get_list(&self, name: &str) -> Vec<String> {
        self.fields
            .get(name)
            .map(FieldValue::to_list)
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Scalar values submitted as `prefix[key]`, by key.
    ///
    /// ```rust
    /// use swat::FormData;
    ///
    /// let data = FormData::parse_urlencoded("qty[3]=1&qty[7]=4&other=x");
    /// let keyed = data.keyed("qty");
    /// assert_eq!(keyed.get("7").map(String::as_str), Some("4"));
    /// assert_eq!(keyed.len(), 2);
    /// ```
    pub fn keyed(&self, prefix: &str) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter_map(|(name, value)| {
                let rest = name.strip_prefix(prefix)?.strip_prefix('[')?;
                let key = rest.strip_suffix(']')?;
                if key.is_empty() {
                    return None;
                }
                Some((key.to_string(), value.as_str()?.to_string()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }
}

/// The HTTP method a form submits with, which selects the data partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Post,
    Get,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Post => "post",
            Method::Get => "get",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = SwatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "post" => Ok(Method::Post),
            "get" => Ok(Method::Get),
            _ => Err(SwatError::InvalidMethod(s.to_string())),
        }
    }
}

/// A read-only snapshot of submitted data.
#[derive(Debug, Clone, Default)]
pub struct Request {
    post: FormData,
    get: FormData,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(mut self, post: FormData) -> Self {
        self.post = post;
        self
    }

    pub fn with_get(mut self, get: FormData) -> Self {
        self.get = get;
        self
    }

    /// The partition read by forms using `method`.
    pub fn data(&self, method: Method) -> &FormData {
        match method {
            Method::Post => &self.post,
            Method::Get => &self.get,
        }
    }

    pub fn post(&self) -> &FormData {
        &self.post
    }

    pub fn get(&self) -> &FormData {
        &self.get
    }
}

/// The form currently being processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormScope {
    pub id: String,
    pub clicked_button: Option<String>,
}

/// Saved context restored when a form finishes processing.
#[derive(Debug)]
pub struct FormFrame {
    method: Method,
    scope: Option<FormScope>,
}

/// State threaded through `process` calls.
#[derive(Debug)]
pub struct ProcessContext<'r> {
    request: &'r Request,
    method: Method,
    form: Option<FormScope>,
}

impl<'r> ProcessContext<'r> {
    pub fn new(request: &'r Request) -> Self {
        ProcessContext {
            request,
            method: Method::Post,
            form: None,
        }
    }

    pub fn request(&self) -> &'r Request {
        self.request
    }

    /// The active partition.
    pub fn data(&self) -> &'r FormData {
        self.request.data(self.method)
    }

    /// The GET partition, regardless of the active method.
    pub fn query(&self) -> &'r FormData {
        self.request.get()
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Id of the enclosing form, if any.
    pub fn form_id(&self) -> Option<&str> {
        self.form.as_ref().map(|f| f.id.as_str())
    }

    /// Opens a form scope. Pass the returned frame to
    /// [`leave_form`](Self::leave_form) when done.
    pub fn enter_form(&mut self, id: &str, method: Method) -> FormFrame {
        let frame = FormFrame {
            method: self.method,
            scope: self.form.take(),
        };
        self.method = method;
        self.form = Some(FormScope {
            id: id.to_string(),
            clicked_button: None,
        });
        frame
    }

    /// Closes the current form scope, returning it.
    pub fn leave_form(&mut self, frame: FormFrame) -> Option<FormScope> {
        self.method = frame.method;
        std::mem::replace(&mut self.form, frame.scope)
    }

    /// Records `button_id` as the button that submitted the enclosing form.
    pub fn register_clicked_button(&mut self, button_id: &str) {
        match self.form.as_mut() {
            Some(scope) => scope.clicked_button = Some(button_id.to_string()),
            None => tracing::debug!(button = button_id, "clicked button outside of a form"),
        }
    }
}
