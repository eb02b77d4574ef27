//! Series selectors for the delete-series endpoint.

/// Series selector matching every series that carries `label`.
pub fn series_selector(label: &str) -> String {
    format!(r#"{{{label}=~".+"}}"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_requires_non_empty_value() {
        assert_eq!(series_selector("label1"), "{label1=~\".+\"}");
    }
}
