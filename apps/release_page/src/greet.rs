//! Greeting endpoint served next to the page.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::release::ReleaseVersion;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetEvent {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetResponse {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum GreetError {
    #[error("received nil event")]
    MissingEvent,

    #[error("invalid greet event: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

/// Build the greeting for `event`.
pub fn greet(event: Option<&GreetEvent>, release: &ReleaseVersion) -> Result<String, GreetError> {
    let event = event.ok_or(GreetError::MissingEvent)?;

    Ok(format!(
        "Hello, {}; We are delighted to have you in Version {}",
        event.name,
        release.version()
    ))
}

/// Decode a request body. An empty body and a JSON `null` both mean "no event".
pub fn parse_event(body: &[u8]) -> Result<Option<GreetEvent>, GreetError> {
    if body.trim_ascii().is_empty() {
        return Ok(None);
    }

    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release() -> ReleaseVersion {
        ReleaseVersion::new("1.1.2")
    }

    #[test]
    fn test_greet() {
        let event = GreetEvent {
            name: "Ada".to_owned(),
        };

        assert_eq!(
            greet(Some(&event), &release()).unwrap(),
            "Hello, Ada; We are delighted to have you in Version 1.1.2"
        );
    }

    #[test]
    fn test_greet_uses_release_version() {
        let event = GreetEvent {
            name: "Grace".to_owned(),
        };

        let message = greet(Some(&event), &ReleaseVersion::new("9.9.9")).unwrap();
        assert!(message.ends_with("Version 9.9.9"));
    }

    #[test]
    fn test_greet_empty_name() {
        let event = GreetEvent {
            name: String::new(),
        };

        assert_eq!(
            greet(Some(&event), &release()).unwrap(),
            "Hello, ; We are delighted to have you in Version 1.1.2"
        );
    }

    #[test]
    fn test_greet_without_event() {
        let err = greet(None, &release()).unwrap_err();

        assert!(matches!(err, GreetError::MissingEvent));
        assert_eq!(err.to_string(), "received nil event");
    }

    #[test]
    fn test_parse_event() {
        assert_eq!(
            parse_event(br#"{"name": "Ada"}"#).unwrap(),
            Some(GreetEvent {
                name: "Ada".to_owned()
            })
        );
        assert_eq!(parse_event(b"").unwrap(), None);
        assert_eq!(parse_event(b"  \n").unwrap(), None);
        assert_eq!(parse_event(b"null").unwrap(), None);
        assert!(matches!(
            parse_event(b"{\"name\": 1}"),
            Err(GreetError::InvalidBody(_))
        ));
    }
}
