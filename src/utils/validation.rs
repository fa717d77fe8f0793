use crate::utils::error::{Result, TicketError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TicketError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TicketError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_port(field_name: &str, port: u16) -> Result<()> {
    if port == 0 {
        return Err(TicketError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: port.to_string(),
            reason: "Port must be between 1 and 65535".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TicketError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("storage.state_file", "counter.json").is_ok());
        assert!(validate_path("storage.state_file", "").is_err());
        assert!(validate_path("storage.state_file", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_port() {
        assert!(validate_port("server.port", 3000).is_ok());
        assert!(validate_port("server.port", 0).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("server.host", "0.0.0.0").is_ok());
        assert!(validate_non_empty_string("server.host", "   ").is_err());
    }
}
