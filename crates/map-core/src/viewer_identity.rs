use std::{fmt::Display, sync::OnceLock};

use log::{debug, info};

/// The query parameter used to pass the viewer identity along with asset requests.
const IDENTITY_PARAMETER: &str = "authuser";

static SHARED_IDENTITY: OnceLock<Option<ViewerIdentity>> = OnceLock::new();

/// The index of the account to load authenticated assets (like room thumbnails) as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewerIdentity(pub u32);

impl Display for ViewerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Something that can check whether an asset loads when requested as a particular viewer.
pub trait IdentityProbe {
    /// Determines whether assets can be loaded as the viewer with the provided index.
    fn probe(&self, index: u32) -> bool;
}

impl<F: Fn(u32) -> bool> IdentityProbe for F {
    fn probe(&self, index: u32) -> bool {
        self(index)
    }
}

/// Tries viewer indices in order, starting at 0, until one works.
///
/// Returns `None` if none of the first `max_attempts` indices work.
pub fn resolve_identity(probe: &impl IdentityProbe, max_attempts: u32) -> Option<ViewerIdentity> {
    for index in 0..max_attempts {
        if probe.probe(index) {
            debug!("Viewer identity {index} works");
            return Some(ViewerIdentity(index));
        }
        debug!("Viewer identity {index} doesn't work");
    }

    None
}

/// Resolves the viewer identity for the whole process.
///
/// Only the first call actually probes anything; every later call gets the same result back, even if it passes a
/// different probe.
pub fn shared_identity(probe: &impl IdentityProbe, max_attempts: u32) -> Option<ViewerIdentity> {
    *SHARED_IDENTITY.get_or_init(|| {
        let identity = resolve_identity(probe, max_attempts);
        info!("Resolved viewer identity: {identity:?}");
        identity
    })
}

/// Adds the viewer identity, if there is one, to the provided asset URL.
pub fn asset_url(source: &str, identity: Option<ViewerIdentity>) -> String {
    match identity {
        Some(identity) => {
            let separator = if source.contains('?') { '&' } else { '?' };
            format!("{source}{separator}{IDENTITY_PARAMETER}={identity}")
        }
        None => source.to_string(),
    }
}
