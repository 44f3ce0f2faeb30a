//! High-level service facade that classifies waste items.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::model::{ClassificationRequest, ClassificationResult, WasteCategory};
use crate::ports::{CompletionPort, PortError};
use crate::prompt::{CompletionRequest, ModelPolicy};
use crate::reply::{ParsedReply, parse_reply};
use crate::taxonomy::Taxonomy;

#[derive(thiserror::Error, Debug)]
/// Errors that end a classification call without a result.
pub enum ClassifyError {
    /// Neither a description nor an image was supplied.
    #[error("Description or image is required")]
    MissingInput,
    /// The upstream credential is not configured.
    #[error("AI gateway credential not configured")]
    MissingCredential,
    /// The upstream model could not be reached or answered with a failure.
    #[error(transparent)]
    Upstream(PortError),
}

/// Who is at fault for a [`ClassifyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent an unusable request.
    Request,
    /// The deployment is misconfigured.
    Configuration,
    /// The upstream model failed.
    Upstream,
}

impl ClassifyError {
    /// Classify the error for status mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingInput => ErrorKind::Request,
            Self::MissingCredential => ErrorKind::Configuration,
            Self::Upstream(_) => ErrorKind::Upstream,
        }
    }
}

impl From<PortError> for ClassifyError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::MissingCredential => Self::MissingCredential,
            other => Self::Upstream(other),
        }
    }
}

/// Public entry point for classifying waste descriptions and photos.
pub struct ClassificationService {
    port: Arc<dyn CompletionPort>,
    policy: ModelPolicy,
    taxonomy: &'static Taxonomy,
}

impl ClassificationService {
    /// Create a new service bound to the provided completion backend.
    #[must_use]
    pub fn new(port: Arc<dyn CompletionPort>, policy: ModelPolicy) -> Self {
        Self {
            port,
            policy,
            taxonomy: Taxonomy::builtin(),
        }
    }

    /// Model selection and sampling settings in use.
    #[must_use]
    pub const fn policy(&self) -> &ModelPolicy {
        &self.policy
    }

    /// Taxonomy results are mapped onto.
    #[must_use]
    pub const fn taxonomy(&self) -> &'static Taxonomy {
        self.taxonomy
    }

    /// Classify a waste item.
    ///
    /// Makes exactly one upstream call for a valid request and none for a
    /// request without input.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::MissingInput`] when neither field carries
    /// content, [`ClassifyError::MissingCredential`] when the backend has no
    /// credential, and [`ClassifyError::Upstream`] when the model call fails.
    pub async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ClassifyError> {
        let input = request.input().ok_or(ClassifyError::MissingInput)?;
        let completion = CompletionRequest::for_input(&input, &self.policy);

        debug!(
            provider = self.port.provider_name(),
            model = %completion.model,
            image = input.is_image(),
            "requesting classification"
        );

        let content = self.port.complete(&completion).await.map_err(|err| {
            error!(provider = self.port.provider_name(), "Classification error: {err}");
            ClassifyError::from(err)
        })?;

        let result = self.normalize(&content);
        info!(
            category = %result.category,
            confidence = result.confidence,
            model = %completion.model,
            "classified waste item"
        );
        Ok(result)
    }

    /// Map assistant text onto a taxonomy-backed result.
    ///
    /// Never fails: unreadable replies use the fallback verdict and unknown
    /// categories become [`WasteCategory::DEFAULT`].
    #[must_use]
    pub fn normalize(&self, content: &str) -> ClassificationResult {
        let parsed = parse_reply(content);
        if let ParsedReply::Fallback { reason } = &parsed {
            warn!(%reason, content, "Parse error, using fallback classification");
        }
        let verdict = parsed.into_verdict();

        let (category, entry) = self.taxonomy.resolve(&verdict.label);
        if WasteCategory::from_label(&verdict.label).is_none() {
            warn!(label = %verdict.label, "unknown waste category, defaulting to {category}");
        }

        ClassificationResult {
            category,
            label: entry.label.to_owned(),
            confidence: verdict.confidence,
            reasoning: verdict.reasoning,
            suggestions: entry.suggestions(),
        }
    }
}
