pub mod emirates_id;
pub mod passport;

use crate::models::data::round_to;
use crate::models::{Evidence, ExtractionResult, FieldMap, Warnings};
use crate::utils::{EngineConfig, ScanError};
use std::collections::BTreeMap;
use std::time::Instant;

/// What a document pipeline hands back before timing is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub fields: FieldMap,
    pub warnings: Warnings,
    pub metadata: BTreeMap<String, String>,
}

/// Extractor turns collected evidence into a scored, validated record.
/// It holds no per-request state, so one instance can serve any number of scans.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: EngineConfig,
}

impl Extractor {
    pub fn new(config: EngineConfig) -> Self {
        Extractor { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn extract(&self, evidence: &Evidence) -> Result<ExtractionResult, ScanError> {
        self.extract_since(evidence, Instant::now())
    }

    /// Like [`Extractor::extract`], with elapsed time measured from `started`
    /// so collaborator time can be included.
    pub fn extract_since(
        &self,
        evidence: &Evidence,
        started: Instant,
    ) -> Result<ExtractionResult, ScanError> {
        let document_type = evidence.document_type();

        let output = match evidence {
            Evidence::EmiratesId(id_card) => emirates_id::process(id_card, &self.config),
            Evidence::Passport(passport) => passport::process(passport, &self.config),
        };
        let output = output.map_err(|err| {
            log::warn!("{} scan rejected: {}", document_type, err);
            err
        })?;

        let processing_time_ms = round_to(started.elapsed().as_secs_f64() * 1000.0, 2);
        log::info!(
            "{} scan finished: {} fields, {} warnings, {:.2} ms",
            document_type,
            output.fields.len(),
            output.warnings.len(),
            processing_time_ms
        );

        Ok(ExtractionResult {
            document_type,
            fields: output.fields,
            processing_time_ms,
            warnings: output.warnings.into_vec(),
            metadata: output.metadata,
        })
    }
}

/// Keep one entry per field name: the most confident one, in the position where
/// the name first appeared. Ties keep the earlier entry.
pub(crate) fn keep_best<T, N, C>(items: Vec<T>, name: N, confidence: C) -> Vec<T>
where
    N: Fn(&T) -> &str,
    C: Fn(&T) -> f64,
{
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        match kept.iter().position(|k| name(k) == name(&item)) {
            Some(i) => {
                if confidence(&item) > confidence(&kept[i]) {
                    kept[i] = item;
                }
            }
            None => kept.push(item),
        }
    }
    kept
}

/// Non-empty value of a field, if the field is present.
pub(crate) fn field_value<'a>(fields: &'a FieldMap, name: &str) -> Option<&'a str> {
    fields
        .get(name)
        .map(|field| field.value.as_str())
        .filter(|value| !value.is_empty())
}
