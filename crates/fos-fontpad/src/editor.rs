//! Text editor component
//!
//! Owns the editor state and applies its side effects: every change is
//! persisted, and a change of family, weight or style swaps the active
//! font asset.

use std::sync::Arc;

use fos_fonts::{AssetRef, FontCatalog, FontStyle, FontWeight};

use crate::config::EditorConfig;
use crate::state::EditorState;
use crate::storage::{PersistedState, Storage};
use crate::style::{StyleHandle, StyleInjector};
use crate::Result;

type Subscriber = Box<dyn FnMut(&EditorState)>;

/// Font preview text editor
pub struct TextEditor<S: Storage, I: StyleInjector> {
    /// Font catalog shared with the host
    catalog: Arc<FontCatalog>,
    /// Current state
    state: EditorState,
    /// Persisted state backend
    storage: S,
    /// Font asset activation
    injector: I,
    /// Registration of the current font asset
    style: Option<StyleHandle>,
    /// Views notified of state changes
    subscribers: Vec<Subscriber>,
}

impl<S: Storage, I: StyleInjector> TextEditor<S, I> {
    /// Open an editor, restoring persisted state when present
    pub fn open(catalog: Arc<FontCatalog>, storage: S, injector: I, config: &EditorConfig) -> Self {
        let persisted = PersistedState::load(&storage);
        let state = EditorState::restore(&catalog, config, &persisted);
        tracing::info!("Editor opened with {} {}", state.family, state.variant());

        let mut editor = Self {
            catalog,
            state,
            storage,
            injector,
            style: None,
            subscribers: Vec::new(),
        };
        editor.activate_style();
        editor
    }

    /// Current state
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Font catalog
    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    /// Storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Asset registered for the current selection
    pub fn active_asset(&self) -> Option<&AssetRef> {
        self.style.as_ref().map(StyleHandle::asset)
    }

    /// Register a view to be called after every state change
    pub fn subscribe(&mut self, subscriber: impl FnMut(&EditorState) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Close the editor, releasing the active font and returning the storage
    pub fn into_storage(self) -> S {
        let Self { storage, style, .. } = self;
        drop(style);
        storage
    }

    /// Replace the text
    pub fn set_text(&mut self, text: impl Into<String>) {
        let next = self.state.with_text(text);
        self.apply(next);
    }

    /// Switch to another family
    pub fn select_family(&mut self, family: &str) -> Result<()> {
        let next = self.state.with_family(&self.catalog, family)?;
        self.apply(next);
        Ok(())
    }

    /// Pick a weight of the current family
    pub fn select_weight(&mut self, weight: FontWeight) -> Result<()> {
        let next = self.state.with_weight(&self.catalog, weight)?;
        self.apply(next);
        Ok(())
    }

    /// Turn italic on or off
    pub fn set_italic(&mut self, italic: bool) -> Result<()> {
        let next = self.state.with_italic(&self.catalog, italic)?;
        self.apply(next);
        Ok(())
    }

    /// Pick a style from the style selector
    pub fn select_style(&mut self, style: FontStyle) -> Result<()> {
        self.set_italic(style.is_italic())
    }

    fn apply(&mut self, next: EditorState) {
        if next == self.state {
            return;
        }

        let restyle = next.family != self.state.family || next.variant() != self.state.variant();
        self.state = next;

        if let Err(e) = PersistedState::save(&mut self.storage, &self.state) {
            tracing::warn!("Failed to persist editor state: {}", e);
        }

        if restyle {
            self.activate_style();
        }

        for subscriber in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }
    }

    /// Swap the active asset for the current selection
    fn activate_style(&mut self) {
        if let Some(previous) = self.style.take() {
            previous.dispose();
        }

        match self.catalog.asset(&self.state.family, self.state.variant()) {
            Ok(asset) => {
                tracing::debug!("Activating {} {}: {}", self.state.family, self.state.variant(), asset);
                self.style = Some(self.injector.activate(asset));
            }
            Err(e) => tracing::warn!("No font asset to activate: {}", e),
        }
    }
}
