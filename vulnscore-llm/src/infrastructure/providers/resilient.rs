//! Resilient LLM provider wrapper
//!
//! Adds a circuit breaker and retry with exponential backoff to any provider.

use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, warn};

use vulnscore_core::config::LlmResilienceConfig;

use crate::domain::{CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderInfo};

/// Runtime resilience settings
#[derive(Debug, Clone)]
pub struct ResilienceConfig {
    /// Retries after the first attempt, for retryable errors only
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// Consecutive failures before the circuit opens
    pub circuit_breaker_threshold: u32,
    /// How long the circuit stays open before a trial request
    pub circuit_breaker_timeout: Duration,
    /// Trial requests allowed while half-open
    pub half_open_max_requests: u32,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self::from(&LlmResilienceConfig::default())
    }
}

impl From<&LlmResilienceConfig> for ResilienceConfig {
    fn from(config: &LlmResilienceConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            max_backoff: Duration::from_millis(config.max_backoff_ms),
            circuit_breaker_threshold: config.circuit_breaker_threshold.max(1),
            circuit_breaker_timeout: Duration::from_secs(config.circuit_breaker_timeout_secs),
            half_open_max_requests: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CircuitState {
    Closed,
    Open { since: Instant },
    HalfOpen { in_flight: u32 },
}

struct Circuit {
    state: CircuitState,
    consecutive_failures: u32,
}

/// Wraps a provider with circuit breaking and retries
///
/// ```rust,ignore
/// let inner = OpenAIProvider::new(api_key, "gpt-4o-mini", 60)?;
/// let provider = ResilientProvider::new(inner, ResilienceConfig::default());
/// ```
pub struct ResilientProvider<P: LlmProvider> {
    inner: P,
    config: ResilienceConfig,
    circuit: Mutex<Circuit>,
}

impl<P: LlmProvider> ResilientProvider<P> {
    pub fn new(provider: P, config: ResilienceConfig) -> Self {
        Self {
            inner: provider,
            config,
            circuit: Mutex::new(Circuit {
                state: CircuitState::Closed,
                consecutive_failures: 0,
            }),
        }
    }

    fn circuit_open(&self) -> LlmError {
        LlmError::CircuitOpen {
            circuit: self.inner.info().id.to_string(),
        }
    }

    /// Admit or reject a request according to the circuit state
    async fn acquire(&self) -> Result<(), LlmError> {
        let mut circuit = self.circuit.lock().await;

        match circuit.state {
            CircuitState::Closed => Ok(()),
            CircuitState::Open { since } => {
                if since.elapsed() >= self.config.circuit_breaker_timeout {
                    debug!("Circuit breaker transitioning to half-open");
                    circuit.state = CircuitState::HalfOpen { in_flight: 1 };
                    Ok(())
                } else {
                    Err(self.circuit_open())
                }
            }
            CircuitState::HalfOpen { in_flight } => {
                if in_flight < self.config.half_open_max_requests {
                    circuit.state = CircuitState::HalfOpen {
                        in_flight: in_flight + 1,
                    };
                    Ok(())
                } else {
                    Err(self.circuit_open())
                }
            }
        }
    }

    async fn record_success(&self) {
        let mut circuit = self.circuit.lock().await;
        if matches!(circuit.state, CircuitState::HalfOpen { .. }) {
            debug!("Circuit breaker closing after successful trial request");
        }
        circuit.state = CircuitState::Closed;
        circuit.consecutive_failures = 0;
    }

    async fn record_failure(&self) {
        let mut circuit = self.circuit.lock().await;
        circuit.consecutive_failures += 1;

        match circuit.state {
            CircuitState::Closed
                if circuit.consecutive_failures >= self.config.circuit_breaker_threshold =>
            {
                warn!(
                    failures = circuit.consecutive_failures,
                    threshold = self.config.circuit_breaker_threshold,
                    "Circuit breaker opening due to failures"
                );
                circuit.state = CircuitState::Open {
                    since: Instant::now(),
                };
            }
            CircuitState::HalfOpen { .. } => {
                debug!("Circuit breaker reopening after failed trial request");
                circuit.state = CircuitState::Open {
                    since: Instant::now(),
                };
            }
            _ => {}
        }
    }

    async fn complete_with_retry(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        let mut backoff = self.config.initial_backoff;
        let mut attempt = 0;

        loop {
            match self.inner.complete(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(e) if !e.is_retryable() || attempt >= self.config.max_retries => return Err(e),
                Err(e) => {
                    attempt += 1;
                    // Honor the provider's retry-after when it fits our ceiling
                    let delay = match e.retry_after() {
                        Some(wait) if wait <= self.config.max_backoff => wait,
                        _ => backoff,
                    };

                    debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying LLM request"
                    );
                    sleep(delay).await;

                    backoff = (backoff * 2 + jitter(backoff / 4)).min(self.config.max_backoff);
                }
            }
        }
    }
}

/// Up to `max` of pseudo-random jitter
fn jitter(max: Duration) -> Duration {
    let max_nanos = max.as_nanos().max(1) as u64;
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0);
    Duration::from_nanos(nanos % max_nanos)
}

#[async_trait]
impl<P: LlmProvider> LlmProvider for ResilientProvider<P> {
    fn info(&self) -> ProviderInfo {
        let info = self.inner.info();
        ProviderInfo {
            id: info.id,
            name: format!("{} (Resilient)", info.name),
        }
    }

    fn default_model(&self) -> &str {
        self.inner.default_model()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.acquire().await?;

        match self.complete_with_retry(request).await {
            Ok(response) => {
                self.record_success().await;
                Ok(response)
            }
            Err(e) => {
                self.record_failure().await;
                Err(e)
            }
        }
    }

    async fn health_check(&self) -> Result<(), LlmError> {
        self.inner.health_check().await
    }
}
