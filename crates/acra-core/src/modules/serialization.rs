use crate::domain::{AcraError, AcraResult};
use crate::modules::batch::BatchResult;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// A data series with its description and physical unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesEnvelope<T> {
    pub data: T,
    pub desc: &'static str,
    pub units: &'static str,
}

impl<T> SeriesEnvelope<T> {
    pub fn new(data: T, desc: &'static str, units: &'static str) -> Self {
        Self { data, desc, units }
    }
}

type CaseSeriesEnvelope = SeriesEnvelope<Vec<Vec<f64>>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultDocument {
    pub mu0: SeriesEnvelope<Vec<f64>>,
    pub mu0_dash: SeriesEnvelope<Vec<f64>>,
    pub pressure: CaseSeriesEnvelope,
    pub heating_rate_shortwave: CaseSeriesEnvelope,
    pub heating_rate_longwave: CaseSeriesEnvelope,
    pub optical_thickness_downward: CaseSeriesEnvelope,
    pub optical_thickness_upward: CaseSeriesEnvelope,
    pub optical_depth_downward: CaseSeriesEnvelope,
    pub optical_depth_upward: CaseSeriesEnvelope,
    pub optical_depth: CaseSeriesEnvelope,
    pub optical_thickness: CaseSeriesEnvelope,
}

impl ResultDocument {
    pub fn from_batch(result: &BatchResult) -> Self {
        Self {
            mu0: SeriesEnvelope::new(result.mu0.clone(), "Cosine of zenithal angle", "1"),
            mu0_dash: SeriesEnvelope::new(
                result.mu0_dash.clone(),
                "Modified cosine of zenithal angle",
                "1",
            ),
            pressure: SeriesEnvelope::new(result.collect(|case| &case.pressure), "Pressure", "Pa"),
            heating_rate_shortwave: SeriesEnvelope::new(
                result.collect(|case| &case.heating_rate_shortwave),
                "Heating rate shortwave",
                "K/day",
            ),
            heating_rate_longwave: SeriesEnvelope::new(
                result.collect(|case| &case.heating_rate_longwave),
                "Heating rate longwave",
                "K/day",
            ),
            optical_thickness_downward: SeriesEnvelope::new(
                result.collect(|case| &case.optical_thickness_downward),
                "Optical thickness downward",
                "1",
            ),
            optical_thickness_upward: SeriesEnvelope::new(
                result.collect(|case| &case.optical_thickness_upward),
                "Optical thickness upward",
                "1",
            ),
            optical_depth_downward: SeriesEnvelope::new(
                result.collect(|case| &case.optical_depth_downward),
                "Optical depth downward",
                "1",
            ),
            optical_depth_upward: SeriesEnvelope::new(
                result.collect(|case| &case.optical_depth_upward),
                "Optical depth upward",
                "1",
            ),
            optical_depth: SeriesEnvelope::new(
                result.collect(|case| &case.optical_depth),
                "Optical depth",
                "1",
            ),
            optical_thickness: SeriesEnvelope::new(
                result.collect(|case| &case.optical_thickness),
                "Optical thickness",
                "1",
            ),
        }
    }
}

/// Encodes the whole document up front so it can be emitted in one write.
pub fn encode_json_document<T: Serialize>(document: &T) -> AcraResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b" "));
    document.serialize(&mut serializer).map_err(|source| {
        AcraError::internal(
            "SYS.JSON_ENCODE",
            format!("failed to encode result document: {}", source),
        )
    })?;
    buffer.push(b'\n');
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::{ResultDocument, encode_json_document};
    use crate::modules::batch::{BatchResult, derive_case_series};
    use crate::modules::solver::SolverTable;
    use serde_json::Value;

    const KEYS: [&str; 11] = [
        "mu0",
        "mu0_dash",
        "pressure",
        "heating_rate_shortwave",
        "heating_rate_longwave",
        "optical_thickness_downward",
        "optical_thickness_upward",
        "optical_depth_downward",
        "optical_depth_upward",
        "optical_depth",
        "optical_thickness",
    ];

    fn sample_result() -> BatchResult {
        let mut result = BatchResult::with_capacity(2);
        let table = SolverTable::new(vec![[100.0, 1.0, 2.0, 0.1, 0.2]]);
        result.push_case(1.0, 1.0, derive_case_series(&table, 1.0));
        let table = SolverTable::new(vec![
            [100.0, 1.0, 2.0, 0.1, 0.2],
            [200.0, 3.0, 4.0, 0.3, 0.4],
        ]);
        result.push_case(0.5, 0.75, derive_case_series(&table, 0.75));
        result
    }

    #[test]
    fn document_wraps_every_series_in_an_envelope() {
        let encoded = encode_json_document(&ResultDocument::from_batch(&sample_result()))
            .expect("document should encode");
        let parsed: Value = serde_json::from_slice(&encoded).expect("document should parse");

        let object = parsed.as_object().expect("document should be an object");
        assert_eq!(object.len(), KEYS.len());
        for key in KEYS {
            let envelope = &parsed[key];
            assert!(envelope["data"].is_array(), "{} data should be an array", key);
            assert!(envelope["desc"].is_string(), "{} should carry a description", key);
            assert!(envelope["units"].is_string(), "{} should carry units", key);
        }
        assert_eq!(parsed["pressure"]["units"], "Pa");
        assert_eq!(parsed["heating_rate_longwave"]["units"], "K/day");
        assert_eq!(parsed["mu0"]["desc"], "Cosine of zenithal angle");
    }

    #[test]
    fn per_case_series_serialise_as_nested_ragged_arrays() {
        let encoded = encode_json_document(&ResultDocument::from_batch(&sample_result()))
            .expect("document should encode");
        let parsed: Value = serde_json::from_slice(&encoded).expect("document should parse");

        assert_eq!(parsed["mu0"]["data"], serde_json::json!([1.0, 0.5]));
        assert_eq!(parsed["mu0_dash"]["data"], serde_json::json!([1.0, 0.75]));
        assert_eq!(
            parsed["pressure"]["data"],
            serde_json::json!([[100.0], [100.0, 200.0]])
        );
        let thickness = parsed["optical_thickness"]["data"]
            .as_array()
            .expect("optical thickness data should be an array");
        assert_eq!(thickness[0].as_array().map(Vec::len), Some(2));
        assert_eq!(thickness[1].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn output_uses_single_space_indent_and_trailing_newline() {
        let encoded = encode_json_document(&ResultDocument::from_batch(&BatchResult::default()))
            .expect("document should encode");
        let text = String::from_utf8(encoded).expect("output should be UTF-8");

        assert!(text.starts_with("{\n \"mu0\": {\n  \"data\": []"));
        assert!(text.ends_with("}\n"));
    }
}
