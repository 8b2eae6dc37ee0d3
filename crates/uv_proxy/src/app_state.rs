use crate::api::UpstreamClient;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) upstream: UpstreamClient,
}
