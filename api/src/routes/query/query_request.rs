use serde::{Deserialize, Serialize};

/// Query-string parameters for /chatbot/query/.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// The free-text question. Absent or empty gets a friendly nudge,
    /// never an HTTP error.
    #[serde(default)]
    pub query: Option<String>,
}

/// Response payload for /chatbot/query/: one text field, always present.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_has_single_field() {
        let v = serde_json::to_value(QueryResponse {
            response: "Player Nuwan is a top scorer in the league.".into(),
        })
        .unwrap();
        assert_eq!(
            v,
            serde_json::json!({"response": "Player Nuwan is a top scorer in the league."})
        );
    }
}
