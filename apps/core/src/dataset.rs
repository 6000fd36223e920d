use serde::{Deserialize, Serialize};

/// One wind sample in image coordinates (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Speed magnitude in m/s.
    pub v: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub points: Vec<Point>,
}

impl Dataset {
    pub const fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, DataFetchError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DataFetchError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server answered {status} for {path}")]
    Status { status: u16, path: String },
    #[error("malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read dataset: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::{DataFetchError, Dataset, Point};

    #[test]
    fn parses_points_and_ignores_unknown_fields() {
        let body = br#"{
            "points": [
                {"x": 10, "y": 452, "v": 2.0, "u": 1.2},
                {"x": 55.5, "y": 0.25, "v": 0.75}
            ],
            "meta": {"solver": "les"}
        }"#;

        let dataset = Dataset::from_json(body).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.points[0],
            Point {
                x: 10.0,
                y: 452.0,
                v: 2.0
            }
        );
    }

    #[test]
    fn missing_points_list_is_empty() {
        let dataset = Dataset::from_json(b"{}").unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn shape_errors_are_parse_failures() {
        let bodies: [&[u8]; 4] = [
            b"not json",
            br#"[1, 2, 3]"#,
            br#"{"points": [{"x": 1, "y": 2}]}"#,
            br#"{"points": "none"}"#,
        ];

        for body in bodies {
            let error = Dataset::from_json(body).unwrap_err();
            assert!(matches!(error, DataFetchError::Parse(_)), "{error}");
        }
    }
}
