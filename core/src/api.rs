//! Concrete endpoints of the challenge API.

use serde_json::Value;

use crate::config::ClientConfig;
use crate::endpoint::{Endpoint, Environment, Params};
use crate::http::HttpMethod;
use crate::types::ChallengeEntity;

/// Path of the challenge-filter listing.
pub const CHALLENGE_FILTERS_PATH: &str = "/survival.challenge.filter.ios";

/// `GET /survival.challenge.filter.ios?sign=...` returning every challenge
/// filter.
#[derive(Debug, Clone)]
pub struct SurvivalChallengeApi {
    environment: Environment,
    sign: String,
}

impl SurvivalChallengeApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            environment: config.environment(),
            sign: config.sign.clone(),
        }
    }
}

impl Endpoint for SurvivalChallengeApi {
    type Model = Vec<ChallengeEntity>;

    fn environment(&self) -> &Environment {
        &self.environment
    }

    fn path(&self) -> &str {
        CHALLENGE_FILTERS_PATH
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn params(&self) -> Params {
        Params::from([("sign".to_string(), Value::String(self.sign.clone()))])
    }
}
