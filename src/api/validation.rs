use super::ApiError;
use crate::domain::TicketId;

/// Short-circuits non-positive path IDs: no row can carry one, so they are
/// reported as not found without touching the store.
pub fn validate_id(resource: &str, id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::NotFound(format!("{resource} {id} not found")));
    }
    Ok(id)
}

pub fn validate_ticket_id(id: i32) -> Result<TicketId, ApiError> {
    validate_id("ticket", id).map(TicketId::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("user", 1).is_ok());
        assert!(validate_id("user", 12345).is_ok());
        assert!(matches!(validate_id("user", 0), Err(ApiError::NotFound(_))));
        assert!(matches!(validate_id("user", -1), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_validate_ticket_id() {
        assert_eq!(validate_ticket_id(7).unwrap(), TicketId::new(7));
        assert!(matches!(validate_ticket_id(-1), Err(ApiError::NotFound(_))));
    }
}
