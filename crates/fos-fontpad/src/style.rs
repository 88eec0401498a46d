//! Font asset activation
//!
//! Activating an asset hands back a [`StyleHandle`]; the registration lives
//! exactly as long as the handle.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use fos_fonts::AssetRef;

/// Makes font assets available for rendering
pub trait StyleInjector {
    /// Register an asset until the returned handle is dropped
    fn activate(&self, asset: &AssetRef) -> StyleHandle;
}

/// Owned registration of an active font asset
///
/// Released once, on [`StyleHandle::dispose`] or drop.
pub struct StyleHandle {
    asset: AssetRef,
    release: Option<Box<dyn FnOnce()>>,
}

impl StyleHandle {
    /// Create a handle that runs `release` when disposed
    pub fn new(asset: AssetRef, release: impl FnOnce() + 'static) -> Self {
        Self {
            asset,
            release: Some(Box::new(release)),
        }
    }

    /// Asset held by this handle
    pub fn asset(&self) -> &AssetRef {
        &self.asset
    }

    /// Release the registration now
    pub fn dispose(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for StyleHandle {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for StyleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleHandle")
            .field("asset", &self.asset)
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// `<link rel="stylesheet">` entry of the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkElement {
    pub id: u64,
    pub rel: &'static str,
    pub href: String,
}

#[derive(Debug, Default)]
struct RegistryInner {
    links: Vec<LinkElement>,
    next_id: u64,
    activations: u64,
}

/// Document-head stand-in holding the active stylesheet links
///
/// Single-threaded; clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct StyleSheetRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl StyleSheetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Links currently registered, oldest first
    pub fn active(&self) -> Vec<LinkElement> {
        self.inner.borrow().links.clone()
    }

    /// Hrefs currently registered
    pub fn hrefs(&self) -> Vec<String> {
        self.inner.borrow().links.iter().map(|l| l.href.clone()).collect()
    }

    /// Number of active links
    pub fn len(&self) -> usize {
        self.inner.borrow().links.len()
    }

    /// Check if no link is active
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().links.is_empty()
    }

    /// Activations since the registry was created
    pub fn total_activations(&self) -> u64 {
        self.inner.borrow().activations
    }

    fn remove(inner: &Weak<RefCell<RegistryInner>>, id: u64) {
        if let Some(inner) = inner.upgrade() {
            inner.borrow_mut().links.retain(|l| l.id != id);
            tracing::debug!("Removed stylesheet link {}", id);
        }
    }
}

impl StyleInjector for StyleSheetRegistry {
    fn activate(&self, asset: &AssetRef) -> StyleHandle {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.activations += 1;
            inner.links.push(LinkElement {
                id,
                rel: "stylesheet",
                href: asset.to_string(),
            });
            id
        };
        tracing::debug!("Added stylesheet link {} for {}", id, asset);

        let registry = Rc::downgrade(&self.inner);
        StyleHandle::new(asset.clone(), move || Self::remove(&registry, id))
    }
}
