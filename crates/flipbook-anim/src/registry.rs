//! Clip registry.
//!
//! Named clip definitions plus the key-binding lookup. The registry is an
//! ordinary value owned by the viewer session and handed to the playback
//! engine by reference.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use flipbook_common::{FlipbookError, FlipbookResult};

use crate::clip::{Clip, ClipDef};
use crate::keys::KeySymbol;

/// Named clips and the keys bound to them.
#[derive(Debug, Clone, Default)]
pub struct ClipRegistry {
    /// Clips by name
    clips: HashMap<String, Clip>,
    /// Clip name by activating key
    key_bindings: HashMap<KeySymbol, String>,
}

impl ClipRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a clip, replacing any clip of the same name.
    ///
    /// A supplied key binding is pointed at this clip, replacing whatever the
    /// key was bound to before. Nothing is modified when validation fails.
    pub fn register(&mut self, def: ClipDef) -> FlipbookResult<&Clip> {
        let clip = Clip::new(def)?;
        let name = clip.name().to_string();

        if let Some(key) = clip.key_binding() {
            if let Some(previous) = self.key_bindings.insert(key, name.clone()) {
                if previous != name {
                    debug!("Key '{key}' rebound from '{previous}' to '{name}'");
                }
            }
        }

        info!("Added animation: {}", clip.summary());
        let stored = match self.clips.entry(name) {
            Entry::Occupied(mut entry) => {
                debug!("Replaced existing animation '{}'", entry.key());
                entry.insert(clip);
                entry.into_mut()
            },
            Entry::Vacant(entry) => entry.insert(clip),
        };
        Ok(stored)
    }

    /// Removes a clip by name.
    ///
    /// Key bindings that point at the clip are left in place; lookups through
    /// them report "not found" until a clip of that name is registered again.
    pub fn unregister(&mut self, name: &str) -> FlipbookResult<Clip> {
        match self.clips.remove(name) {
            Some(clip) => {
                info!("Removed animation: {}", clip.summary());
                Ok(clip)
            },
            None => {
                warn!("Animation {name} not found!");
                Err(FlipbookError::ClipNotFound {
                    name: name.to_string(),
                })
            },
        }
    }

    /// Looks up a clip by name.
    #[must_use]
    pub fn lookup_by_name(&self, name: &str) -> Option<&Clip> {
        self.clips.get(name)
    }

    /// Looks up the clip bound to `key`.
    ///
    /// `None` is the normal answer for an unbound key, and also for a key
    /// whose clip has been unregistered.
    #[must_use]
    pub fn lookup_by_key(&self, key: KeySymbol) -> Option<&Clip> {
        self.key_bindings
            .get(&key)
            .and_then(|name| self.clips.get(name))
    }

    /// Raw binding for `key`, even if it no longer resolves to a clip.
    #[must_use]
    pub fn binding_for(&self, key: KeySymbol) -> Option<&str> {
        self.key_bindings.get(&key).map(String::as_str)
    }

    /// Snapshot of every clip, sorted by name.
    #[must_use]
    pub fn all_clips(&self) -> Vec<&Clip> {
        let mut clips: Vec<&Clip> = self.clips.values().collect();
        clips.sort_by(|a, b| a.name().cmp(b.name()));
        clips
    }

    /// Whether a clip with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Number of registered clips.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Whether no clips are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk_left() -> ClipDef {
        ClipDef::new("walk_left", 32, 32, 4, 1).with_key(KeySymbol::Char('a'))
    }

    #[test]
    fn test_register_and_lookup_by_key() {
        let mut registry = ClipRegistry::new();
        registry.register(walk_left()).expect("valid clip");

        let clip = registry
            .lookup_by_key(KeySymbol::Char('a'))
            .expect("bound clip");
        assert_eq!(clip.name(), "walk_left");
        assert_eq!(clip.frame_count(), 4);
        assert!(registry.lookup_by_key(KeySymbol::Char('d')).is_none());
    }

    #[test]
    fn test_unregister_leaves_dangling_binding() {
        let mut registry = ClipRegistry::new();
        registry.register(walk_left()).expect("valid clip");

        let removed = registry.unregister("walk_left").expect("registered");
        assert_eq!(removed.name(), "walk_left");
        assert!(registry.lookup_by_key(KeySymbol::Char('a')).is_none());
        assert_eq!(registry.binding_for(KeySymbol::Char('a')), Some("walk_left"));

        // Re-registering the name without a key revives the old binding.
        registry
            .register(ClipDef::new("walk_left", 16, 16, 2, 0))
            .expect("valid clip");
        assert_eq!(
            registry
                .lookup_by_key(KeySymbol::Char('a'))
                .map(Clip::frame_count),
            Some(2)
        );
    }

    #[test]
    fn test_unregister_missing_is_reported() {
        let mut registry = ClipRegistry::new();
        let err = registry.unregister("ghost");
        assert!(matches!(err, Err(FlipbookError::ClipNotFound { ref name }) if name == "ghost"));
    }

    #[test]
    fn test_invalid_registration_leaves_registry_unchanged() {
        let mut registry = ClipRegistry::new();
        registry.register(walk_left()).expect("valid clip");

        let zero_frames = ClipDef::new("walk_right", 32, 32, 0, 1).with_key(KeySymbol::Char('d'));
        assert!(matches!(
            registry.register(zero_frames),
            Err(FlipbookError::InvalidClip { .. })
        ));

        let negative_row = ClipDef::new("walk_left", 32, 32, 4, -1).with_key(KeySymbol::Char('a'));
        assert!(registry.register(negative_row).is_err());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.binding_for(KeySymbol::Char('d')), None);
        assert_eq!(
            registry.lookup_by_name("walk_left").map(Clip::row),
            Some(1)
        );
    }

    #[test]
    fn test_last_registration_wins_key() {
        let mut registry = ClipRegistry::new();
        registry.register(walk_left()).expect("valid clip");
        registry
            .register(ClipDef::new("walk_right", 32, 32, 4, 2).with_key(KeySymbol::Char('a')))
            .expect("valid clip");

        assert_eq!(
            registry.lookup_by_key(KeySymbol::Char('a')).map(Clip::name),
            Some("walk_right")
        );
        assert!(registry.contains("walk_left"));
    }

    #[test]
    fn test_overwrite_by_name() {
        let mut registry = ClipRegistry::new();
        registry.register(walk_left()).expect("valid clip");
        registry
            .register(ClipDef::new("walk_left", 48, 48, 6, 3))
            .expect("valid clip");

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.lookup_by_name("walk_left").map(Clip::frame_width),
            Some(48)
        );
    }

    #[test]
    fn test_all_clips_sorted() {
        let mut registry = ClipRegistry::new();
        assert!(registry.is_empty());
        for name in ["walk_up", "idle", "walk_down"] {
            registry
                .register(ClipDef::new(name, 8, 8, 1, 0))
                .expect("valid clip");
        }
        let names: Vec<&str> = registry.all_clips().into_iter().map(Clip::name).collect();
        assert_eq!(names, ["idle", "walk_down", "walk_up"]);
    }
}
