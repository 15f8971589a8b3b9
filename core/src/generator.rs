//! The generator seam the assembly loop drives.

use async_trait::async_trait;
use mieru_genai::GenerationRequest;

/// Sampling temperature for report generation. Low, for stable section
/// structure across retries.
const REPORT_TEMPERATURE: f32 = 0.3;

/// One text-generation call.
///
/// The orchestrator only needs raw text back; transport, auth and
/// within-call retry live behind this seam. Tests implement it with
/// scripted responses.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, instruction: &str) -> mieru_genai::Result<String>;
}

#[async_trait]
impl TextGenerator for mieru_genai::Client {
    async fn generate(&self, instruction: &str) -> mieru_genai::Result<String> {
        let request = GenerationRequest::new(instruction).with_temperature(REPORT_TEMPERATURE);
        let response = mieru_genai::Client::generate(self, &request).await?;
        Ok(response.text)
    }
}
