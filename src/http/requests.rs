//! Request bodies, response bodies and boundary validation

use super::error::{ApiError, ApiResult};
use crate::catalog::ClaimType;
use crate::richtext;
use serde::{Deserialize, Serialize};
use url::Url;

const MAX_NAME_CHARS: usize = 200;
const MAX_IMAGE_URL_CHARS: usize = 2048;

#[derive(Debug, Deserialize)]
pub struct ClientBody {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderBody {
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProcedureBody {
    pub procedure_text: Option<String>,
}

/// `{id}` returned by create endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    pub id: i64,
}

/// `{changes}` returned by update/delete endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changes {
    pub changes: u64,
}

/// Zero touched rows means the target (scoped to its parent) does not exist
pub fn changed(changes: u64, what: &str) -> ApiResult<Changes> {
    if changes == 0 {
        Err(ApiError::not_found(what.to_string()))
    } else {
        Ok(Changes { changes })
    }
}

pub fn parse_id(raw: &str, what: &str) -> ApiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::validation(format!("{} must be an integer, got '{}'", what, raw)))
}

pub fn parse_claim_type(raw: &str) -> ApiResult<ClaimType> {
    raw.parse::<ClaimType>().map_err(ApiError::from)
}

pub fn require_name(name: Option<String>) -> ApiResult<String> {
    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::validation("name is required"))?;

    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ApiError::validation(format!(
            "name must be at most {} characters",
            MAX_NAME_CHARS
        )));
    }
    Ok(name)
}

/// Sanitize procedure markup; absent or visually empty text is rejected
pub fn require_procedure_text(text: Option<String>) -> ApiResult<String> {
    let text = text.ok_or_else(|| ApiError::validation("procedure_text is required"))?;
    let sanitized = richtext::sanitize(text.trim());
    if richtext::is_blank(&sanitized) {
        return Err(ApiError::validation("procedure_text must not be empty"));
    }
    Ok(sanitized)
}

/// Provider image: empty, a `data:image/` URI, an http(s) URL or a relative path
pub fn normalize_image(image: Option<String>) -> ApiResult<String> {
    let image = image.map(|i| i.trim().to_string()).unwrap_or_default();
    if image.is_empty() {
        return Ok(image);
    }

    // Stored values end up in an `src` attribute
    if image
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>'))
    {
        return Err(ApiError::validation(
            "image URL must not contain whitespace, quotes or angle brackets",
        ));
    }

    if image.starts_with("data:") {
        return if image.starts_with("data:image/") && image.contains(',') {
            Ok(image)
        } else {
            Err(ApiError::validation("data URIs must be data:image/ URIs"))
        };
    }

    if image.len() > MAX_IMAGE_URL_CHARS {
        return Err(ApiError::validation("image URL is too long"));
    }

    match Url::parse(&image) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(image),
        Ok(url) => Err(ApiError::validation(format!(
            "image URL scheme '{}' is not allowed",
            url.scheme()
        ))),
        Err(url::ParseError::RelativeUrlWithoutBase) if !image.starts_with("//") => Ok(image),
        Err(_) => Err(ApiError::validation(format!("invalid image URL '{}'", image))),
    }
}
