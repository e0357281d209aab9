//! Texture loading and progress tracking
//!
//! Textures are enqueued by name before `load`; the platform reports each one
//! as it arrives through `resolve` (or `fail`). Only names and pixel sizes are
//! tracked here, pixel data stays with the platform.

/// Index of a loaded texture, or the plain white fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(Option<usize>);

impl TextureHandle {
    /// Untextured fill
    pub const WHITE: TextureHandle = TextureHandle(None);

    pub fn index(&self) -> Option<usize> {
        self.0
    }

    pub fn is_white(&self) -> bool {
        self.0.is_none()
    }
}

/// A texture known to the loader
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub name: String,
    pub url: String,
    /// Pixel size, zero until loaded
    pub width: f32,
    pub height: f32,
    pub loaded: bool,
}

/// Resource queue
#[derive(Debug, Default)]
pub struct Loader {
    textures: Vec<Texture>,
    loaded: usize,
    has_load_fired: bool,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_load_fired(&self) -> bool {
        self.has_load_fired
    }

    /// Queue a texture. After `load` only already known names resolve,
    /// anything else falls back to white.
    pub fn enqueue(&mut self, name: &str, url: &str) -> TextureHandle {
        if let Some(index) = self.find(name) {
            return TextureHandle(Some(index));
        }
        if self.has_load_fired {
            log::warn!("cannot enqueue '{name}' after loading");
            return TextureHandle::WHITE;
        }
        self.textures.push(Texture {
            name: name.to_string(),
            url: url.to_string(),
            width: 0.0,
            height: 0.0,
            loaded: false,
        });
        TextureHandle(Some(self.textures.len() - 1))
    }

    /// Start loading. Only the first call does anything.
    pub fn load(&mut self) -> bool {
        if self.has_load_fired {
            log::warn!("cannot load resources more than once");
            return false;
        }
        self.has_load_fired = true;
        log::info!("loading {} resources", self.textures.len());
        true
    }

    /// Textures still waiting for the platform
    pub fn pending(&self) -> impl Iterator<Item = &Texture> {
        self.textures.iter().filter(|t| !t.loaded)
    }

    /// Mark a texture as loaded with its pixel size
    pub fn resolve(&mut self, name: &str, width: f32, height: f32) {
        let Some(index) = self.find(name) else {
            log::warn!("resolved unknown resource '{name}'");
            return;
        };
        let texture = &mut self.textures[index];
        if texture.loaded {
            return;
        }
        texture.width = width;
        texture.height = height;
        texture.loaded = true;
        self.loaded += 1;
        log::debug!("loaded resource: {name} ({width}x{height})");
    }

    /// Count a texture as done without a size, it renders white
    pub fn fail(&mut self, name: &str) {
        log::warn!("failed to load resource '{name}'");
        self.resolve(name, 0.0, 0.0);
    }

    /// Loaded ratio in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.textures.is_empty() {
            1.0
        } else {
            self.loaded as f32 / self.textures.len() as f32
        }
    }

    pub fn is_complete(&self) -> bool {
        self.has_load_fired && self.loaded == self.textures.len()
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&Texture> {
        handle.0.and_then(|i| self.textures.get(i))
    }

    /// Cached lookup by name
    pub fn get(&self, name: &str) -> TextureHandle {
        TextureHandle(self.find(name))
    }

    pub fn destroy(&mut self) {
        self.textures.clear();
        self.loaded = 0;
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.textures.iter().position(|t| t.name == name)
    }
}
