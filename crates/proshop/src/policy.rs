//! Per-request origin decisions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::allow_list::{normalize_origin, OriginAllowList};
use crate::constants::{ALLOWED_HEADERS, ALLOWED_METHODS, PREFLIGHT_MAX_AGE_SECS};

/// Outcome of checking a request's `Origin` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// No `Origin` header: same-origin, curl, mobile or server-to-server.
    SameOrigin,
    /// Cross-origin request from a listed origin.
    Allowed(CorsGrant),
    /// Cross-origin request from an unlisted origin.
    Denied(Denial),
}

impl CorsDecision {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, CorsDecision::Denied(_))
    }
}

/// What a permitted cross-origin caller is told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsGrant {
    /// Echoed back verbatim. Never `*`, since credentials are enabled.
    pub origin: String,
    pub credentials: bool,
    pub methods: &'static [&'static str],
    pub headers: &'static [&'static str],
    pub max_age_secs: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// The normalized origin is not in the allow-list.
    NotListed,
    /// The header was present but empty after normalization.
    Empty,
}

/// Observability record for a rejected origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Denial {
    pub origin: String,
    pub reason: DenyReason,
    pub at: DateTime<Utc>,
}

/// Stateless check against a loaded allow-list.
///
/// A missing origin is always allowed; a present one must match exactly
/// after trailing-slash normalization.
pub fn is_allowed(origin: Option<&str>, allow_list: &OriginAllowList) -> bool {
    match origin {
        None => true,
        Some(origin) => allow_list.contains(origin),
    }
}

/// The allow-list plus the grant attached to every permitted origin.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allow_list: OriginAllowList,
}

impl OriginPolicy {
    pub fn new(allow_list: OriginAllowList) -> Self {
        Self { allow_list }
    }

    pub fn allow_list(&self) -> &OriginAllowList {
        &self.allow_list
    }

    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        is_allowed(origin, &self.allow_list)
    }

    /// Pure decision, no side effects.
    pub fn decide(&self, origin: Option<&str>) -> CorsDecision {
        let Some(raw) = origin else {
            return CorsDecision::SameOrigin;
        };

        match normalize_origin(raw) {
            None => CorsDecision::Denied(Denial {
                origin: raw.to_string(),
                reason: DenyReason::Empty,
                at: Utc::now(),
            }),
            Some(normalized) if self.allow_list.contains(normalized) => {
                CorsDecision::Allowed(CorsGrant {
                    origin: raw.trim().to_string(),
                    credentials: true,
                    methods: ALLOWED_METHODS,
                    headers: ALLOWED_HEADERS,
                    max_age_secs: PREFLIGHT_MAX_AGE_SECS,
                })
            }
            Some(_) => CorsDecision::Denied(Denial {
                origin: raw.to_string(),
                reason: DenyReason::NotListed,
                at: Utc::now(),
            }),
        }
    }

    /// [`decide`](Self::decide), logging denials so misconfigured frontend
    /// deployments show up in the server log.
    pub fn check(&self, origin: Option<&str>) -> CorsDecision {
        let decision = self.decide(origin);
        if let CorsDecision::Denied(ref denial) = decision {
            tracing::warn!(
                origin = %denial.origin,
                reason = ?denial.reason,
                at = %denial.at.to_rfc3339(),
                decision = "denied",
                "CORS origin rejected"
            );
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(raw: &str) -> OriginPolicy {
        OriginPolicy::new(OriginAllowList::parse(raw))
    }

    #[test]
    fn test_missing_origin_always_allowed() {
        assert!(is_allowed(None, &OriginAllowList::default()));
        assert!(is_allowed(None, &OriginAllowList::parse("https://a.com")));
        assert_eq!(policy("").decide(None), CorsDecision::SameOrigin);
    }

    #[test]
    fn test_listed_origin_allowed() {
        let list = OriginAllowList::parse("https://a.com,http://localhost:3000");
        for origin in list.iter() {
            assert!(is_allowed(Some(origin), &list), "{origin} should be allowed");
        }
    }

    #[test]
    fn test_unlisted_origin_denied() {
        let list = OriginAllowList::parse("https://a.com");
        assert!(!is_allowed(Some("https://b.com"), &list));
        assert!(!is_allowed(Some("https://sub.a.com"), &list));
        assert!(!is_allowed(Some("http://a.com"), &list));
        assert!(!is_allowed(Some("https://a.com:8443"), &list));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let list = OriginAllowList::parse("https://a.com");
        assert!(!is_allowed(Some("https://A.com"), &list));
    }

    #[test]
    fn test_trailing_slash_is_symmetric() {
        for configured in ["https://x.com", "https://x.com/"] {
            let list = OriginAllowList::parse(configured);
            assert_eq!(
                is_allowed(Some("https://x.com/"), &list),
                is_allowed(Some("https://x.com"), &list)
            );
            assert!(is_allowed(Some("https://x.com/"), &list));
        }
    }

    #[test]
    fn test_wildcard_entry_is_not_a_wildcard() {
        let list = OriginAllowList::parse("*");
        assert!(!is_allowed(Some("https://a.com"), &list));
    }

    #[test]
    fn test_empty_list_denies_every_cross_origin_request() {
        let p = policy("");
        assert!(!p.is_allowed(Some("http://localhost:3000")));
        assert!(p.is_allowed(None));
    }

    #[test]
    fn test_grant_echoes_origin_with_credentials() {
        let decision = policy("https://shop.example.com").decide(Some("https://shop.example.com"));
        let CorsDecision::Allowed(grant) = decision else {
            panic!("expected Allowed, got {decision:?}");
        };
        assert_eq!(grant.origin, "https://shop.example.com");
        assert!(grant.credentials);
        assert!(grant.methods.contains(&"PATCH"));
        assert!(grant.methods.contains(&"OPTIONS"));
        assert!(grant.headers.contains(&"content-type"));
        assert_eq!(grant.max_age_secs, 3600);
    }

    #[test]
    fn test_denial_carries_origin_and_reason() {
        let decision = policy("https://a.com").check(Some("https://evil.example"));
        let CorsDecision::Denied(denial) = decision else {
            panic!("expected Denied, got {decision:?}");
        };
        assert_eq!(denial.origin, "https://evil.example");
        assert_eq!(denial.reason, DenyReason::NotListed);
    }

    #[test]
    fn test_blank_origin_header_is_denied() {
        let decision = policy("https://a.com").decide(Some(" / "));
        assert!(matches!(
            decision,
            CorsDecision::Denied(Denial { reason: DenyReason::Empty, .. })
        ));
        assert!(!decision.is_allowed());
    }

    #[test]
    fn test_denial_serializes_reason_in_snake_case() {
        let denial = Denial {
            origin: "https://evil.example".to_string(),
            reason: DenyReason::NotListed,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&denial).unwrap();
        assert_eq!(json["reason"], "not_listed");
        assert_eq!(json["origin"], "https://evil.example");
    }
}
