//! Settings form state and validation.
//!
//! The three URL-shaped fields are checked against a relaxed
//! `[scheme://]host[:port][/path]` pattern before submission; the custom name
//! is free-form. Validation here only gates the write, presentation of field
//! errors is the caller's concern.

use core_api::{JellyfinSettings, JellyfinSettingsUpdate};

use crate::error::{Result, SettingsError};

/// Fields subject to URL validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Hostname,
    ExternalHostname,
    ForgotPasswordUrl,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Hostname => "hostname",
            FormField::ExternalHostname => "externalHostname",
            FormField::ForgotPasswordUrl => "forgotPasswordUrl",
        }
    }
}

/// Editable settings-form state.
///
/// Build one from the latest snapshot, let the user edit, then hand it to
/// [`SettingsController::submit`](crate::SettingsController::submit). The
/// write replaces all four fields atomically; there are no partial updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub custom_name: String,
    pub hostname: String,
    pub external_hostname: String,
    pub forgot_password_url: String,
}

impl SettingsForm {
    /// Populate the form from a fetched snapshot.
    pub fn from_settings(settings: &JellyfinSettings) -> Self {
        Self {
            custom_name: settings.custom_name.clone().unwrap_or_default(),
            hostname: settings.hostname.clone(),
            external_hostname: settings.external_hostname.clone().unwrap_or_default(),
            forgot_password_url: settings.forgot_password_url.clone().unwrap_or_default(),
        }
    }

    /// Fields currently failing validation.
    ///
    /// The hostname is required; the external and forgot-password URLs are
    /// optional but must match the pattern when non-empty.
    pub fn invalid_fields(&self) -> Vec<FormField> {
        let mut invalid = Vec::new();

        if !is_valid_host_url(&self.hostname) {
            invalid.push(FormField::Hostname);
        }

        if !self.external_hostname.is_empty() && !is_valid_host_url(&self.external_hostname) {
            invalid.push(FormField::ExternalHostname);
        }

        if !self.forgot_password_url.is_empty() && !is_valid_host_url(&self.forgot_password_url) {
            invalid.push(FormField::ForgotPasswordUrl);
        }

        invalid
    }

    /// Whether submission is allowed.
    pub fn is_valid(&self) -> bool {
        self.invalid_fields().is_empty()
    }

    /// Validate, reporting the first failing field.
    pub fn validate(&self) -> Result<()> {
        match self.invalid_fields().first() {
            Some(field) => Err(SettingsError::InvalidField {
                field: field.as_str(),
            }),
            None => Ok(()),
        }
    }

    /// The atomic write body for this form.
    pub fn to_update(&self) -> JellyfinSettingsUpdate {
        JellyfinSettingsUpdate {
            custom_name: self.custom_name.clone(),
            hostname: self.hostname.clone(),
            external_hostname: self.external_hostname.clone(),
            forgot_password_url: self.forgot_password_url.clone(),
        }
    }
}

/// Relaxed `[scheme://]host[:port][/path]` check.
///
/// Deliberately permissive: bare hostnames, dotted names and IPv4 literals
/// all pass, and the path is unrestricted. This only needs to catch values
/// that cannot possibly be a URL, not enforce RFC 3986.
fn is_valid_host_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .unwrap_or(value);

    let authority = match rest.split_once('/') {
        Some((authority, _path)) => authority,
        None => rest,
    };

    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    };

    if host.is_empty()
        || !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return false;
    }

    match port {
        Some(port) => {
            !port.is_empty() && port.len() <= 5 && port.chars().all(|c| c.is_ascii_digit())
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SettingsForm {
        SettingsForm {
            custom_name: "Home Media".to_string(),
            hostname: "http://jellyfin:8096".to_string(),
            external_hostname: "media.example.com".to_string(),
            forgot_password_url: "https://media.example.com/forgot".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().is_valid());
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_host_url_accepts_relaxed_shapes() {
        for value in [
            "jellyfin",
            "jellyfin:8096",
            "192.168.1.10:8096",
            "media.example.com/jellyfin",
            "https://media.example.com:443/jellyfin",
        ] {
            assert!(is_valid_host_url(value), "expected '{}' to be valid", value);
        }
    }

    #[test]
    fn test_host_url_rejects_garbage() {
        for value in [
            "",
            "http://",
            "host with spaces",
            "host:notaport",
            "host:123456",
            ":8096",
        ] {
            assert!(
                !is_valid_host_url(value),
                "expected '{}' to be invalid",
                value
            );
        }
    }

    #[test]
    fn test_hostname_is_required() {
        let mut form = valid_form();
        form.hostname = String::new();

        assert_eq!(form.invalid_fields(), vec![FormField::Hostname]);
        assert!(matches!(
            form.validate(),
            Err(SettingsError::InvalidField { field: "hostname" })
        ));
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let mut form = valid_form();
        form.external_hostname = String::new();
        form.forgot_password_url = String::new();

        assert!(form.is_valid());
    }

    #[test]
    fn test_invalid_optional_field_blocks_submit() {
        let mut form = valid_form();
        form.forgot_password_url = "not a url at all".to_string();

        assert_eq!(form.invalid_fields(), vec![FormField::ForgotPasswordUrl]);
    }

    #[test]
    fn test_from_settings_round_trip() {
        let settings = JellyfinSettings {
            custom_name: Some("Home Media".to_string()),
            hostname: "http://jellyfin:8096".to_string(),
            external_hostname: None,
            forgot_password_url: Some("media.example.com/forgot".to_string()),
            libraries: Vec::new(),
        };

        let form = SettingsForm::from_settings(&settings);
        assert_eq!(form.custom_name, "Home Media");
        assert_eq!(form.external_hostname, "");

        let update = form.to_update();
        assert_eq!(update.hostname, "http://jellyfin:8096");
        assert_eq!(update.forgot_password_url, "media.example.com/forgot");
    }
}
