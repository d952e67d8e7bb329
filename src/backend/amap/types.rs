//! Response models of the AMap web service API.
//!
//! The upstream is loose about types: counts and durations arrive as strings,
//! and empty values are frequently sent as `[]` instead of `""` or `{}`. Every
//! field here is optional in practice and decodes to an empty value rather
//! than failing the whole response.

use serde::{Deserialize, Serialize};

/// Successful calls report `status == "1"`
const STATUS_OK: &str = "1";

fn zero_count() -> String {
    "0".to_string()
}

/// `GET /v3/geocode/geo`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeocodeResponse {
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub info: String,
    #[serde(default = "zero_count", deserialize_with = "lenient::string")]
    pub count: String,
    #[serde(default, deserialize_with = "lenient::list")]
    pub geocodes: Vec<Geocode>,
}

impl GeocodeResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK && self.count != "0"
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Geocode {
    /// `"lng,lat"`
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub formatted_address: String,
}

/// Driving, walking and transit direction responses
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DirectionResponse {
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub info: String,
    #[serde(default = "zero_count", deserialize_with = "lenient::string")]
    pub count: String,
    #[serde(default, deserialize_with = "lenient::object")]
    pub route: Option<RouteData>,
}

impl DirectionResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK && self.count != "0"
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RouteData {
    /// Driving and walking alternatives
    #[serde(default, deserialize_with = "lenient::list")]
    pub paths: Vec<RoutePath>,
    /// Transit alternatives
    #[serde(default, deserialize_with = "lenient::list")]
    pub transits: Vec<Transit>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RoutePath {
    /// Metres
    #[serde(default, deserialize_with = "lenient::string")]
    pub distance: String,
    /// Seconds
    #[serde(default, deserialize_with = "lenient::string")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient::list")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Step {
    #[serde(default, deserialize_with = "lenient::string")]
    pub instruction: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub polyline: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Transit {
    #[serde(default, deserialize_with = "lenient::string")]
    pub distance: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient::list")]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Segment {
    #[serde(default, deserialize_with = "lenient::object")]
    pub walking: Option<WalkingLeg>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub bus: Option<BusLeg>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WalkingLeg {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub distance: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BusLeg {
    #[serde(default, deserialize_with = "lenient::list")]
    pub buslines: Vec<BusLine>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BusLine {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub polyline: String,
    #[serde(default, deserialize_with = "lenient::object")]
    pub departure_stop: Option<Stop>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub arrival_stop: Option<Stop>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Stop {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
}

mod lenient {
    use serde::de::{DeserializeOwned, Error};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(opt_string(deserializer)?.unwrap_or_default())
    }

    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Value::deserialize(deserializer)? {
            value @ Value::Object(_) => serde_json::from_value(value).map(Some).map_err(D::Error::custom),
            _ => Ok(None),
        }
    }

    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Value::deserialize(deserializer)? {
            value @ Value::Array(_) => serde_json::from_value(value).map_err(D::Error::custom),
            _ => Ok(Vec::new()),
        }
    }
}
