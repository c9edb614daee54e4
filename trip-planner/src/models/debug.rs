use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

pub const NOT_INVOKED: &str = "not invoked";
pub const NO_CRITIQUE: &str = "no comments";

/// The agent's reasoning trace as returned in `details`.
///
/// Fields beyond weather/attractions/critique are kept untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DebugTrace {
    #[serde(default, deserialize_with = "lenient_text")]
    pub weather: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub attractions: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub critique: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DebugTrace {
    pub fn weather_or_placeholder(&self) -> &str {
        non_empty(&self.weather).unwrap_or(NOT_INVOKED)
    }

    pub fn attractions_or_placeholder(&self) -> &str {
        non_empty(&self.attractions).unwrap_or(NOT_INVOKED)
    }

    pub fn critique_or_placeholder(&self) -> &str {
        non_empty(&self.critique).unwrap_or(NO_CRITIQUE)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Accepts null, strings, or any other JSON value (kept as its JSON text).
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let trace: DebugTrace = serde_json::from_str(r#"{"weather":"sunny"}"#).unwrap();

        assert_eq!(trace.weather_or_placeholder(), "sunny");
        assert_eq!(trace.attractions_or_placeholder(), NOT_INVOKED);
        assert_eq!(trace.critique_or_placeholder(), NO_CRITIQUE);
    }

    #[test]
    fn nulls_count_as_absent() {
        let trace: DebugTrace =
            serde_json::from_str(r#"{"weather":null,"attractions":null,"critique":"PASS"}"#)
                .unwrap();

        assert!(trace.weather.is_none());
        assert!(trace.attractions.is_none());
        assert_eq!(trace.critique_or_placeholder(), "PASS");
    }

    #[test]
    fn unknown_fields_pass_through() {
        let trace: DebugTrace =
            serde_json::from_str(r#"{"weather":"rain","budget":{"total":900}}"#).unwrap();

        assert_eq!(trace.extra["budget"]["total"], 900);
        assert!(!trace.extra.contains_key("weather"));
    }

    #[test]
    fn non_string_fields_keep_their_json_text() {
        let trace: DebugTrace =
            serde_json::from_str(r#"{"attractions":["Zilker Park","Barton Springs"]}"#).unwrap();

        assert_eq!(
            trace.attractions.as_deref(),
            Some(r#"["Zilker Park","Barton Springs"]"#)
        );
    }
}
