//! Home-screen banners and their rotation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use precocerto_core::{BannerId, DomainError, Entity};

/// A promotional banner image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    id: BannerId,
    image_url: String,
}

impl Banner {
    pub fn new(id: BannerId, image_url: impl Into<String>) -> Self {
        Self {
            id,
            image_url: image_url.into(),
        }
    }

    /// Banner for the listing entry at 0-based `index`.
    pub fn listed(index: usize, image_url: String) -> Result<Self, DomainError> {
        Ok(Self::new(BannerId::from_index(index)?, image_url))
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}

impl Entity for Banner {
    type Id = BannerId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Rotating banner strip.
///
/// The presentation layer owns the timer and calls [`advance`](Self::advance)
/// every [`interval`](Self::interval).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerCarousel {
    banners: Vec<Banner>,
    current: usize,
    interval: Duration,
}

impl BannerCarousel {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);

    pub fn new(banners: Vec<Banner>, interval: Duration) -> Self {
        Self {
            banners,
            current: 0,
            interval,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Self::DEFAULT_INTERVAL)
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Banner> {
        self.banners.get(self.current)
    }

    /// Move to the next banner, wrapping around. No-op when empty.
    pub fn advance(&mut self) -> Option<&Banner> {
        if self.banners.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.banners.len();
        self.current()
    }

    /// Swap in a freshly loaded set of banners and restart from the first.
    pub fn replace(&mut self, banners: Vec<Banner>) {
        self.banners = banners;
        self.current = 0;
    }
}

impl Default for BannerCarousel {
    fn default() -> Self {
        Self::empty()
    }
}
