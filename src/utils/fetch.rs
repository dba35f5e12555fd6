use crate::domain::model::Credentials;
use crate::utils::error::Result;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, COOKIE};
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
    pub timeout: Option<Duration>,
}

impl FetchOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::default()
        }
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Outbound requests on behalf of a caller: the caller's cookies and bearer
/// token always travel with the request, alongside a JSON content type.
/// Transport failures are returned untouched.
pub struct AuthenticatedFetch<'a> {
    client: &'a Client,
    credentials: &'a Credentials,
}

impl<'a> AuthenticatedFetch<'a> {
    pub fn new(client: &'a Client, credentials: &'a Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub fn request(&self, url: &str, mut options: FetchOptions) -> Result<RequestBuilder> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.credentials.bearer {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token))?);
        }

        // Caller cookies are joined with the session's, never swapped for them.
        let caller_cookie = options.headers.remove(COOKIE);
        let caller_cookie = caller_cookie.as_ref().and_then(|v| v.to_str().ok());
        let cookie = match (caller_cookie, self.credentials.cookie.as_deref()) {
            (Some(caller), Some(session)) => Some(format!("{}; {}", caller, session)),
            (Some(caller), None) => Some(caller.to_string()),
            (None, Some(session)) => Some(session.to_string()),
            (None, None) => None,
        };
        if let Some(cookie) = cookie {
            headers.insert(COOKIE, HeaderValue::from_str(&cookie)?);
        }

        headers.extend(options.headers);

        let mut request = self.client.request(options.method, url).headers(headers);

        if let Some(body) = options.body {
            request = request.body(serde_json::to_vec(&body)?);
        }

        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        Ok(request)
    }

    pub async fn fetch(&self, url: &str, options: FetchOptions) -> Result<Response> {
        let request = self.request(url, options)?;
        Ok(request.send().await?)
    }
}
