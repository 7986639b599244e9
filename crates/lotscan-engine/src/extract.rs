use lotscan_types::CountReport;

/// Outcome of extracting a structured result from a model reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// A JSON object was found and parsed into the shared report schema.
    Parsed(CountReport),
    /// No parseable object; carries the original reply verbatim.
    Raw(String),
}

impl Extraction {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Extraction::Parsed(_))
    }
}

/// Recover a structured counting result from free-form model text.
///
/// Models wrap the requested JSON in explanatory prose often enough that
/// this takes the widest brace-delimited substring (first `{` to last `}`)
/// and attempts to parse that. Any failure degrades to `Extraction::Raw`
/// with the input untouched; this path never errors. Schema validation
/// beyond parse success is the caller's job.
pub fn extract(raw: &str) -> Extraction {
    let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) else {
        return Extraction::Raw(raw.to_string());
    };
    if end < start {
        return Extraction::Raw(raw.to_string());
    }

    match serde_json::from_str::<CountReport>(&raw[start..=end]) {
        Ok(report) => Extraction::Parsed(report),
        Err(_) => Extraction::Raw(raw.to_string()),
    }
}
