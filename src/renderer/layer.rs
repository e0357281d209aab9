//! Named render layers and their contents

use std::fmt;
use std::str::FromStr;

use super::graphics::{Graphics, Sprite};
use crate::error::ConfigError;

/// Fixed layers, drawn in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    Background,
    Interactable,
    Decoration,
}

impl RenderLayer {
    pub const ALL: [RenderLayer; 3] = [
        RenderLayer::Background,
        RenderLayer::Interactable,
        RenderLayer::Decoration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderLayer::Background => "background",
            RenderLayer::Interactable => "interactable",
            RenderLayer::Decoration => "decoration",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RenderLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderLayer {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RenderLayer::ALL
            .into_iter()
            .find(|layer| layer.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownLayer(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Graphics(Graphics),
    Sprite(Sprite),
}

impl From<Graphics> for Drawable {
    fn from(graphics: Graphics) -> Self {
        Drawable::Graphics(graphics)
    }
}

impl From<Sprite> for Drawable {
    fn from(sprite: Sprite) -> Self {
        Drawable::Sprite(sprite)
    }
}

/// Handle to a drawable inside its layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableId(usize);

/// Ordered drawables, later ones on top
#[derive(Debug, Clone, Default)]
pub struct Layer {
    items: Vec<Drawable>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, drawable: impl Into<Drawable>) -> DrawableId {
        self.items.push(drawable.into());
        DrawableId(self.items.len() - 1)
    }

    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.items.get(id.0)
    }

    pub fn get_mut(&mut self, id: DrawableId) -> Option<&mut Drawable> {
        self.items.get_mut(id.0)
    }

    pub fn graphics_mut(&mut self, id: DrawableId) -> Option<&mut Graphics> {
        match self.get_mut(id) {
            Some(Drawable::Graphics(graphics)) => Some(graphics),
            _ => None,
        }
    }

    pub fn sprite_mut(&mut self, id: DrawableId) -> Option<&mut Sprite> {
        match self.get_mut(id) {
            Some(Drawable::Sprite(sprite)) => Some(sprite),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Drawable> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
