//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (routes dispatch to a real destination)
//! - Validate value ranges (timeouts > 0, ports non-empty)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::{GatewayConfig, SYSTEM_I_DESTINATION};

/// A single semantic problem found in the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("route key {0:?} is not of the form METHOD:PATH")]
    MalformedRouteKey(String),

    #[error("route {0:?} has an empty {1} field")]
    EmptyRouteField(String, &'static str),

    #[error("destination {0:?} has unsupported type {1:?} (only \"tcp\")")]
    UnsupportedDestinationKind(String, String),

    #[error("destination {0:?} has an empty ip")]
    EmptyIp(String),

    #[error("destination {0:?} has an empty port pool for operation {1:?}")]
    EmptyPortPool(String, String),

    #[error("timeout {0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("routes are configured but destination \"systemI\" is missing")]
    MissingSystemIDestination,
}

/// Run all semantic checks, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (key, route) in &config.routes {
        let mut parts = key.splitn(2, ':');
        let method = parts.next().unwrap_or_default();
        let path = parts.next().unwrap_or_default();
        if method.is_empty() || !path.starts_with('/') {
            errors.push(ValidationError::MalformedRouteKey(key.clone()));
        }
        if route.system.is_empty() {
            errors.push(ValidationError::EmptyRouteField(key.clone(), "system"));
        }
        if route.service.is_empty() {
            errors.push(ValidationError::EmptyRouteField(key.clone(), "service"));
        }
        if route.format.is_empty() {
            errors.push(ValidationError::EmptyRouteField(key.clone(), "format"));
        }
    }

    if !config.routes.is_empty() && !config.destinations.contains_key(SYSTEM_I_DESTINATION) {
        errors.push(ValidationError::MissingSystemIDestination);
    }

    for (name, dest) in &config.destinations {
        if dest.kind != "tcp" {
            errors.push(ValidationError::UnsupportedDestinationKind(
                name.clone(),
                dest.kind.clone(),
            ));
        }
        if dest.ip.is_empty() {
            errors.push(ValidationError::EmptyIp(name.clone()));
        }
        for (op, ports) in &dest.ports {
            if ports.is_empty() {
                errors.push(ValidationError::EmptyPortPool(name.clone(), op.clone()));
            }
        }
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.read_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("read_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
