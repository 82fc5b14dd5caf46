#[derive(Clone)]
pub struct AppConfig {
    pub feed_bearer_token: String,
    pub email_api_key: String,
    pub recipient_email: String,
    pub sender_email: String,
    pub feed_user_id: u64,
    pub feed_max_results: u32,
    pub window_minutes: u32,
    pub email_subject: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub schedule: String,
    pub log_level: String,
    pub feed_base_url: String,
    pub email_base_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("feed_bearer_token", &"[redacted]")
            .field("email_api_key", &"[redacted]")
            .field("recipient_email", &self.recipient_email)
            .field("sender_email", &self.sender_email)
            .field("feed_user_id", &self.feed_user_id)
            .field("feed_max_results", &self.feed_max_results)
            .field("window_minutes", &self.window_minutes)
            .field("email_subject", &self.email_subject)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("schedule", &self.schedule)
            .field("log_level", &self.log_level)
            .field("feed_base_url", &self.feed_base_url)
            .field("email_base_url", &self.email_base_url)
            .finish()
    }
}

/// The credential-free subset of [`AppConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}
