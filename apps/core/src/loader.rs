use std::fmt;

use tracing::{debug, warn};

use crate::dataset::{DataFetchError, Dataset};
use crate::selection::DatasetKey;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Loading => write!(f, "Loading"),
            Self::Ready => write!(f, "Ready"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Handed out when a fetch starts and returned with its result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub key: DatasetKey,
}

/// What happened to a completed fetch.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Applied {
    Loaded,
    Emptied,
    Stale,
}

/// Owns the displayed dataset and decides which fetch results may replace it.
#[derive(Debug, Default)]
pub struct Loader {
    dataset: Dataset,
    status: LoadStatus,
    current: Option<FetchTicket>,
    last_error: Option<String>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub const fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Marks `key` as the dataset the view wants. The previous dataset stays
    /// visible until the result arrives.
    pub fn begin(&mut self, generation: u64, key: DatasetKey) -> FetchTicket {
        debug!(%key, generation, "dataset fetch started");
        let ticket = FetchTicket { generation, key };
        self.current = Some(ticket.clone());
        self.status = LoadStatus::Loading;
        ticket
    }

    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Dataset, DataFetchError>,
    ) -> Applied {
        if self.current.as_ref() != Some(ticket) {
            debug!(
                key = %ticket.key,
                generation = ticket.generation,
                "discarding superseded dataset"
            );
            return Applied::Stale;
        }
        self.current = None;

        match result {
            Ok(dataset) => {
                debug!(key = %ticket.key, points = dataset.len(), "dataset loaded");
                self.dataset = dataset;
                self.status = LoadStatus::Ready;
                self.last_error = None;
                Applied::Loaded
            }
            Err(error) => {
                warn!(key = %ticket.key, %error, "failed to load data");
                self.dataset = Dataset::empty();
                self.status = LoadStatus::Failed;
                self.last_error = Some(error.to_string());
                Applied::Emptied
            }
        }
    }
}
