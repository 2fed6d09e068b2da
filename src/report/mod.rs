//! Result reporting
//!
//! Turns a finished session into the JSON document printed on stdout. The
//! render is a pure function of the outcome and the session inputs; nothing
//! here talks to a provider.

mod trace;

use serde::Serialize;

use crate::domain::{AttemptRecord, FinalOutcome, OutcomeStatus, SessionContext};
use crate::error::Result;

pub use trace::ConsoleTrace;

/// Version tag of the report envelope
pub const REPORT_VERSION: &str = "1.0";

/// Task name carried in every report
pub const REPORT_TASK: &str = "creative_generation";

const ASSET_TYPE: &str = "text_ad";

#[derive(Debug, Serialize)]
struct Report<'a> {
    adcp_version: &'static str,
    task: &'static str,
    status: OutcomeStatus,
    attempts: usize,
    payload: Payload<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outstanding_feedback: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transcript: Option<Vec<&'a AttemptRecord>>,
}

#[derive(Debug, Serialize)]
struct Payload<'a> {
    product_name: &'a str,
    target_audience: &'a str,
    creative_assets: Vec<CreativeAsset<'a>>,
    brand_safety_check: BrandSafety,
}

#[derive(Debug, Serialize)]
struct CreativeAsset<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    content: &'a str,
    metadata: AssetMetadata,
}

#[derive(Debug, Serialize)]
struct AssetMetadata {
    /// Length in characters, not bytes
    length: usize,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum BrandSafety {
    Passed,
    Failed,
}

/// Render the final report as pretty-printed JSON.
///
/// With `include_transcript` the full attempt history is embedded under
/// `"transcript"`.
pub fn render_report(outcome: &FinalOutcome, context: &SessionContext, include_transcript: bool) -> Result<String> {
    let content = outcome.final_attempt.candidate_text.as_str();

    let report = Report {
        adcp_version: REPORT_VERSION,
        task: REPORT_TASK,
        status: outcome.status,
        attempts: outcome.attempt_count(),
        payload: Payload {
            product_name: context.product(),
            target_audience: context.audience(),
            creative_assets: vec![CreativeAsset {
                kind: ASSET_TYPE,
                content,
                metadata: AssetMetadata {
                    length: content.chars().count(),
                },
            }],
            brand_safety_check: if outcome.is_approved() {
                BrandSafety::Passed
            } else {
                BrandSafety::Failed
            },
        },
        outstanding_feedback: outcome.outstanding_feedback(),
        transcript: include_transcript.then(|| outcome.history.iter().collect()),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
