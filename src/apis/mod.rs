//! Clients for the BRI APIs.

use crate::{client::ClientConfig, endpoints::Endpoints, signing::Clock, transport::Transport};
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

pub mod direct_debit;

pub(crate) struct BriClientInner {
    pub(crate) transport: Transport,
    pub(crate) config: ClientConfig,
    pub(crate) endpoints: Endpoints,
    pub(crate) clock: Arc<dyn Clock>,
}

impl Debug for BriClientInner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BriClientInner")
            .field("config", &self.config)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}
