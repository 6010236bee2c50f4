//! Financial advice domain logic.
//!
//! Everything here is pure: validate a request, derive [`Metrics`], render
//! the prompt for the completion service and turn its reply into advice.
//! Talking to the completion service is the caller's job.

pub use error::AdvisorError;
pub use extract::{MIN_ADVICE_CHARS, advice_or_fallback, extract_advice, fallback_advice};
pub use metrics::{Insight, Metrics, SavingsRate, TOP_CATEGORIES};
pub use money::Usd;
pub use prompt::{ADVISOR_SYSTEM_PROMPT, COMMUNITY_SYSTEM_PROMPT, render_advice_prompt};
pub use request::{AdviceRequest, MissingTotals, Totals, Transaction, validate_message};

mod error;
mod extract;
mod metrics;
mod money;
mod prompt;
mod request;

type ResultAdvisor<T> = Result<T, AdvisorError>;
