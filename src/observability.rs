use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("webchat.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("webchat.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("webchat.client.request_duration_seconds");
pub(crate) static UPLOAD_BYTES: Counter = Counter::new("webchat.client.upload_bytes");

pub(crate) static SESSION_SUBMISSIONS: Counter = Counter::new("webchat.session.submissions");
pub(crate) static SESSION_INERT_SUBMISSIONS: Counter =
    Counter::new("webchat.session.inert_submissions");
pub(crate) static SESSION_UPLOADS: Counter = Counter::new("webchat.session.uploads");
pub(crate) static SESSION_HISTORY_ENTRIES: Counter =
    Counter::new("webchat.session.history_entries");
pub(crate) static SESSION_NOTIFICATIONS: Counter = Counter::new("webchat.session.notifications");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);
    collector.register_counter(&UPLOAD_BYTES);

    collector.register_counter(&SESSION_SUBMISSIONS);
    collector.register_counter(&SESSION_INERT_SUBMISSIONS);
    collector.register_counter(&SESSION_UPLOADS);
    collector.register_counter(&SESSION_HISTORY_ENTRIES);
    collector.register_counter(&SESSION_NOTIFICATIONS);
}
