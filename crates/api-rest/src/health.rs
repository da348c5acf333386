use crate::types::{ChatbotHealthRes, HealthRes};

/// Health reporting shared by both services.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Calculator health: the service has no dependencies beyond the process itself.
    pub fn check_health() -> HealthRes {
        HealthRes {
            status: "healthy".into(),
        }
    }

    /// Chatbot health, reporting whether a knowledge base is loaded.
    ///
    /// # Arguments
    /// * `conditions_loaded` - number of conditions in the loaded knowledge base
    pub fn check_chatbot_health(conditions_loaded: usize) -> ChatbotHealthRes {
        ChatbotHealthRes {
            status: "healthy".into(),
            model_loaded: conditions_loaded > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_healthy() {
        assert_eq!(HealthService::check_health().status, "healthy");
        assert!(HealthService::check_chatbot_health(7).model_loaded);
        assert!(!HealthService::check_chatbot_health(0).model_loaded);
    }
}
