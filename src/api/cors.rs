use axum::http::{HeaderMap, HeaderValue, header};

/// Methods advertised during a pre-flight exchange.
pub const ALLOWED_METHODS: &str = "GET, POST, PATCH, DELETE";

/// Custom request headers advertised during a pre-flight exchange.
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Decides which caller origins may read response headers cross-origin.
///
/// The allow-list comes from configuration, never from the client. The gate
/// only shapes response headers; it never rejects the underlying operation.
#[derive(Debug, Clone)]
pub struct OriginGate {
    allowed_origins: Vec<String>,
}

/// Outcome of an origin check. An empty decision sets no headers: the
/// request is still served, browser scripts just cannot read the response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateDecision {
    pub allow_origin: Option<String>,
    pub allow_methods: Option<&'static str>,
    pub allow_headers: Option<&'static str>,
}

impl OriginGate {
    #[must_use]
    pub const fn new(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins }
    }

    /// Grants header visibility to the declared origin if it is on the
    /// allow-list. The origin is echoed back exactly, never widened to `*`.
    #[must_use]
    pub fn authorize(&self, origin: Option<&str>) -> GateDecision {
        match origin {
            Some(origin) if self.allowed_origins.iter().any(|allowed| allowed == origin) => {
                GateDecision {
                    allow_origin: Some(origin.to_string()),
                    ..GateDecision::default()
                }
            }
            _ => GateDecision::default(),
        }
    }

    /// Method-negotiation mode: an allowed origin additionally learns which
    /// methods and custom headers it may use.
    #[must_use]
    pub fn preflight(&self, origin: Option<&str>) -> GateDecision {
        let mut decision = self.authorize(origin);
        if decision.allow_origin.is_some() {
            decision.allow_methods = Some(ALLOWED_METHODS);
            decision.allow_headers = Some(ALLOWED_HEADERS);
        }
        decision
    }
}

impl GateDecision {
    pub fn apply(&self, headers: &mut HeaderMap) {
        if let Some(origin) = &self.allow_origin
            && let Ok(value) = HeaderValue::from_str(origin)
        {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
        if let Some(methods) = self.allow_methods {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(methods),
            );
        }
        if let Some(allowed) = self.allow_headers {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(allowed),
            );
        }
    }

    #[must_use]
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        self.apply(&mut headers);
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> OriginGate {
        OriginGate::new(vec![
            "http://localhost:8080".to_string(),
            "https://movies.example".to_string(),
        ])
    }

    #[test]
    fn listed_origin_is_echoed_back() {
        let decision = gate().authorize(Some("http://localhost:8080"));
        assert_eq!(
            decision.allow_origin.as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(decision.allow_methods, None);
        assert_eq!(decision.allow_headers, None);
    }

    #[test]
    fn unlisted_origin_grants_nothing() {
        assert_eq!(
            gate().authorize(Some("https://evil.example")),
            GateDecision::default()
        );
    }

    #[test]
    fn absent_origin_grants_nothing() {
        assert_eq!(gate().authorize(None), GateDecision::default());
    }

    #[test]
    fn preflight_advertises_methods_and_headers_for_listed_origin() {
        let decision = gate().preflight(Some("https://movies.example"));
        assert_eq!(
            decision.allow_origin.as_deref(),
            Some("https://movies.example")
        );
        assert_eq!(decision.allow_methods, Some(ALLOWED_METHODS));
        assert_eq!(decision.allow_headers, Some(ALLOWED_HEADERS));
    }

    #[test]
    fn preflight_for_unlisted_origin_stays_empty() {
        assert_eq!(
            gate().preflight(Some("https://evil.example")),
            GateDecision::default()
        );
    }

    #[test]
    fn decision_headers_carry_the_grant() {
        let headers = gate().preflight(Some("http://localhost:8080")).headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:8080"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            ALLOWED_METHODS
        );

        let empty = gate().authorize(None).headers();
        assert!(empty.is_empty());
    }
}
