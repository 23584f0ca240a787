use std::fmt;

use url::form_urlencoded;

/// HTTP method of a built request. Both backends are read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
        }
    }
}

/// A fully specified request, built without any I/O.
///
/// Standard parameters are form-encoded in insertion order. Raw fragments
/// are already encoded and are appended verbatim after them, each as
/// `&key=value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Scheme, host and path, without a query string
    pub endpoint: String,
    pub params: Vec<(String, String)>,
    pub raw_params: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            endpoint: endpoint.into(),
            params: Vec::new(),
            raw_params: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    /// Add a parameter only when a non-empty value is present
    pub fn param_opt(self, key: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Add a pre-encoded parameter that must not be escaped again
    pub fn raw_param(mut self, key: &str, encoded: impl Into<String>) -> Self {
        self.raw_params.push((key.to_string(), encoded.into()));
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Value of the first standard parameter named `key`
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Query string: serialized standard parameters, then raw fragments
    pub fn query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        for (key, value) in &self.raw_params {
            query.push('&');
            query.push_str(key);
            query.push('=');
            query.push_str(value);
        }
        query
    }

    /// Full request URL
    pub fn url(&self) -> String {
        if self.params.is_empty() && self.raw_params.is_empty() {
            return self.endpoint.clone();
        }
        format!("{}?{}", self.endpoint, self.query())
    }
}
