//! Redirect options.
//!
//! See [`RedirectOptions`] docs.

use actix_web::http::StatusCode;
use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;

/// Route parameters and other string-keyed option bags.
pub type Params = serde_json::Map<String, Value>;

/// A single scalar passed in place of structured options.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarOption {
    /// Boolean scalar.
    Bool(bool),

    /// Integer scalar.
    Int(i64),

    /// Floating point scalar.
    Float(f64),

    /// String scalar.
    Str(String),
}

/// Route generation options that can also carry the redirect status code.
///
/// When deserialized, the `statusCode` key sets the redirect status and every other key is kept
/// as an option for the URL generator.
///
/// # Examples
/// ```
/// # use actix_web::http::StatusCode;
/// use actix_web_redirect::StructuredOptions;
///
/// let opts: StructuredOptions = serde_json::from_str(
///     r#"{ "statusCode": 303, "query": { "page": 2 } }"#,
/// ).unwrap();
///
/// assert_eq!(opts.status_code(), Some(StatusCode::SEE_OTHER));
/// assert!(opts.query().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StructuredOptions {
    #[serde(
        rename = "statusCode",
        default,
        deserialize_with = "deserialize_status_code"
    )]
    status_code: Option<StatusCode>,

    #[serde(flatten)]
    options: Params,
}

impl StructuredOptions {
    /// Constructs empty structured options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status code used for the redirect.
    pub fn with_status_code(mut self, status: StatusCode) -> Self {
        self.status_code = Some(status);
        self
    }

    /// Adds a route generation option, replacing any previous value under `key`.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Returns the explicitly requested status code, if any.
    pub fn status_code(&self) -> Option<StatusCode> {
        self.status_code
    }

    /// Returns route generation options, excluding the status code.
    pub fn options(&self) -> &Params {
        &self.options
    }

    /// Returns the `query` option when it is an object.
    pub fn query(&self) -> Option<&Params> {
        self.options.get("query").and_then(Value::as_object)
    }

    /// Returns the `fragment` option when it is a string.
    pub fn fragment(&self) -> Option<&str> {
        self.options.get("fragment").and_then(Value::as_str)
    }
}

fn deserialize_status_code<'de, D>(de: D) -> Result<Option<StatusCode>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u16>::deserialize(de)?
        .map(|code| StatusCode::from_u16(code).map_err(D::Error::custom))
        .transpose()
}

/// Options passed to [`Redirect::to_route`](crate::Redirect::to_route).
///
/// Scalar options use the positional URL generation form and always redirect with
/// "302 Found". Structured options use the full form, which honors the "reuse matched params"
/// flag and an optional status code.
#[derive(Debug, Clone, PartialEq)]
pub enum RedirectOptions {
    /// Positional options.
    Scalar(ScalarOption),

    /// Structured options.
    Structured(StructuredOptions),
}

impl Default for RedirectOptions {
    fn default() -> Self {
        Self::Structured(StructuredOptions::default())
    }
}

impl From<ScalarOption> for RedirectOptions {
    fn from(scalar: ScalarOption) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<StructuredOptions> for RedirectOptions {
    fn from(opts: StructuredOptions) -> Self {
        Self::Structured(opts)
    }
}

impl From<bool> for RedirectOptions {
    fn from(val: bool) -> Self {
        Self::Scalar(ScalarOption::Bool(val))
    }
}

impl From<i64> for RedirectOptions {
    fn from(val: i64) -> Self {
        Self::Scalar(ScalarOption::Int(val))
    }
}

impl From<f64> for RedirectOptions {
    fn from(val: f64) -> Self {
        Self::Scalar(ScalarOption::Float(val))
    }
}

impl From<&str> for RedirectOptions {
    fn from(val: &str) -> Self {
        Self::Scalar(ScalarOption::Str(val.to_owned()))
    }
}

impl From<String> for RedirectOptions {
    fn from(val: String) -> Self {
        Self::Scalar(ScalarOption::Str(val))
    }
}

impl TryFrom<Value> for RedirectOptions {
    type Error = serde_json::Error;

    fn try_from(val: Value) -> Result<Self, Self::Error> {
        let opts = match val {
            Value::Null => return Ok(Self::default()),
            Value::Bool(val) => ScalarOption::Bool(val),
            Value::Number(num) => match num.as_i64() {
                Some(int) => ScalarOption::Int(int),
                // large unsigned ints and floats; both have an f64 representation
                None => ScalarOption::Float(num.as_f64().unwrap_or_default()),
            },
            Value::String(val) => ScalarOption::Str(val),

            Value::Array(items) => {
                let map = items
                    .into_iter()
                    .enumerate()
                    .map(|(idx, item)| (idx.to_string(), item))
                    .collect::<Params>();

                return serde_json::from_value(Value::Object(map)).map(Self::Structured);
            }

            obj @ Value::Object(_) => return serde_json::from_value(obj).map(Self::Structured),
        };

        Ok(Self::Scalar(opts))
    }
}
