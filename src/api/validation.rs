use super::ApiError;
use tracing::debug;

/// Upper bound for `max_results` and `per_topic`. Larger requests are capped.
pub const MAX_RESULT_COUNT: usize = 50;

pub fn validate_result_count(name: &str, count: usize) -> Result<usize, ApiError> {
    if count == 0 {
        return Err(ApiError::validation(format!(
            "Invalid {name}: 0. Must be at least 1"
        )));
    }

    if count > MAX_RESULT_COUNT {
        debug!("Capping {} from {} to {}", name, count, MAX_RESULT_COUNT);
    }
    Ok(count.min(MAX_RESULT_COUNT))
}

pub fn validate_search_query(query: &str) -> Result<&str, ApiError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Search topic cannot be empty"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_result_count() {
        assert_eq!(validate_result_count("max_results", 1).unwrap(), 1);
        assert_eq!(validate_result_count("max_results", 5).unwrap(), 5);
        assert_eq!(validate_result_count("max_results", 50).unwrap(), 50);
        assert!(validate_result_count("max_results", 0).is_err());
    }

    #[test]
    fn test_large_result_count_is_capped() {
        assert_eq!(validate_result_count("per_topic", 51).unwrap(), 50);
        assert_eq!(validate_result_count("max_results", 100).unwrap(), 50);
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("merge sort").unwrap(), "merge sort");
        assert_eq!(validate_search_query("  trimmed  ").unwrap(), "trimmed");
        assert!(validate_search_query("").is_err());
        assert!(validate_search_query("   ").is_err());
    }
}
