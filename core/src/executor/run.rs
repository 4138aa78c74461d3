use uuid::Uuid;

use super::types::{
    ScanCache, ScanConfig, ScanMetadata, ScanOutcome, ScanOutputs, ScanPayload, ScanRecord, ScanType,
};
use crate::client::GuardApi;
use crate::config::RequestConfig;
use crate::errors::ExecuteError;
use crate::metadata::MetadataCache;
use crate::options::defaults_for;
use crate::scanner::{decode_tokens, ScannerUse};

/// Runs a batch of records one at a time, one scan call per record.
pub struct ValidationExecutor<'a> {
    api: &'a dyn GuardApi,
    cache: &'a mut MetadataCache,
    request: &'a RequestConfig,
    continue_on_fail: bool,
}

impl<'a> ValidationExecutor<'a> {
    pub fn new(
        api: &'a dyn GuardApi,
        cache: &'a mut MetadataCache,
        request: &'a RequestConfig,
        continue_on_fail: bool,
    ) -> Self {
        Self {
            api,
            cache,
            request,
            continue_on_fail,
        }
    }

    /// Without continue-on-fail the first failing record aborts the batch and
    /// nothing is returned. With it, the failure lands in "not valid" with
    /// its message and the batch carries on.
    pub async fn run(mut self, records: Vec<ScanRecord>) -> Result<ScanOutputs, ExecuteError> {
        let mut outputs = ScanOutputs::default();

        for (item, record) in records.iter().enumerate() {
            match self.scan_one(item, record).await {
                Ok(outcome) => {
                    tracing::debug!(
                        target: "guard.executor",
                        item,
                        valid = outcome.valid,
                        "record classified"
                    );
                    outputs.push(outcome);
                }
                Err(e) if self.continue_on_fail => {
                    tracing::warn!(
                        target: "guard.executor",
                        item = e.item(),
                        error = %e,
                        "record failed, continuing"
                    );
                    outputs.push(ScanOutcome::failed(
                        item,
                        record.effective_prompt(),
                        record.effective_output(),
                        e.to_string(),
                    ));
                }
                Err(e) => {
                    tracing::error!(target: "guard.executor", item = e.item(), error = %e, "batch aborted");
                    return Err(e);
                }
            }
        }

        tracing::info!(
            target: "guard.executor",
            valid = outputs.valid.len(),
            not_valid = outputs.not_valid.len(),
            "batch complete"
        );
        Ok(outputs)
    }

    async fn scan_one(&mut self, item: usize, record: &ScanRecord) -> Result<ScanOutcome, ExecuteError> {
        let params = &record.params;
        let scan_type = params.scan_type;

        let prompt = record.effective_prompt();
        let output = record.effective_output();
        check_required(item, scan_type, &prompt, &output)?;

        let mut tokens = params.selected_tokens().to_vec();
        if tokens.is_empty() && !params.project_id.is_empty() {
            let bundle = self
                .cache
                .ensure_fresh(self.api)
                .await
                .map_err(|source| ExecuteError::Api { item, source })?;
            tokens = defaults_for(&bundle, &params.project_id)
                .for_category(scan_type.category())
                .iter()
                .map(|t| t.as_str().to_string())
                .collect();
            tracing::debug!(
                target: "guard.executor",
                item,
                project_id = %params.project_id,
                defaults = tokens.len(),
                "using project default scanners"
            );
        }

        let payload = self.build_payload(scan_type, &params.project_id, &tokens, prompt.clone(), &output);
        let result = self
            .api
            .scan(scan_type, &payload)
            .await
            .map_err(|source| ExecuteError::Api { item, source })?;

        Ok(ScanOutcome::scanned(item, prompt, output, result))
    }

    fn build_payload(
        &self,
        scan_type: ScanType,
        project_id: &str,
        tokens: &[String],
        prompt: String,
        output: &str,
    ) -> ScanPayload {
        let scanners = decode_tokens(tokens)
            .into_iter()
            .map(ScannerUse::from)
            .collect();

        ScanPayload {
            prompt,
            output: (scan_type == ScanType::Output && !output.is_empty()).then(|| output.to_string()),
            config: ScanConfig {
                project_id: (!project_id.is_empty()).then(|| project_id.to_string()),
                fail_fast: self.request.fail_fast,
                cache: ScanCache {
                    enabled: self.request.cache_enabled,
                    ttl: self.request.cache_ttl,
                },
            },
            metadata: ScanMetadata {
                project_type: self.request.project_type.clone(),
                session: format!("session-{}", Uuid::new_v4()),
                file: self.request.file.clone(),
                tags: Vec::new(),
                name: self.request.source_name.clone(),
            },
            scanners,
        }
    }
}

fn check_required(item: usize, scan_type: ScanType, prompt: &str, output: &str) -> Result<(), ExecuteError> {
    let mut fields = Vec::new();
    if prompt.is_empty() {
        fields.push("prompt");
    }
    if scan_type == ScanType::Output && output.is_empty() {
        fields.push("output");
    }
    if fields.is_empty() {
        return Ok(());
    }
    Err(ExecuteError::MissingInput {
        item,
        scan_type: scan_type.as_str(),
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_required_by_scan_type() {
        assert!(check_required(0, ScanType::Input, "p", "").is_ok());
        assert!(check_required(0, ScanType::Output, "p", "o").is_ok());

        let err = check_required(3, ScanType::Output, "", "").unwrap_err();
        assert_eq!(
            err.to_string(),
            "item 3: missing required field(s) for output scan: prompt, output"
        );

        let err = check_required(1, ScanType::Input, "", "o").unwrap_err();
        assert!(matches!(
            err,
            ExecuteError::MissingInput { item: 1, ref fields, .. } if fields == &vec!["prompt"]
        ));
    }
}
