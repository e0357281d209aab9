//! Layered 2D rendering
//!
//! Actors draw into three fixed layers. Each frame the layers are tessellated,
//! bottom to top, into one vertex list split into batches that share a
//! texture and blend mode. Uploading the vertices is left to the platform.

pub mod graphics;
pub mod layer;
pub mod shapes;
pub mod vertex;

pub use graphics::{BlendMode, Fill, Graphics, GraphicsShape, Sprite, Transform2D};
pub use layer::{Drawable, DrawableId, Layer, RenderLayer};
pub use vertex::{Vertex, colors, hex_to_rgba};

use glam::{Affine2, Vec2};

use crate::engine::TextureHandle;
use crate::error::ConfigError;
use crate::settings::RenderSettings;

/// World → screen mapping: `screen = world * scale + position`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneTransform {
    pub position: Vec2,
    pub scale: Vec2,
}

impl SceneTransform {
    pub fn affine(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, 0.0, self.position)
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world * self.scale + self.position
    }

    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.position) / self.scale
    }
}

/// Consecutive vertices sharing texture and blend mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawBatch {
    pub texture: TextureHandle,
    pub blend: BlendMode,
    pub start: usize,
    pub count: usize,
}

#[derive(Debug)]
pub struct Renderer {
    width: u32,
    height: u32,
    pub antialias: bool,
    pub background: u32,
    pub transform: SceneTransform,
    layers: [Option<Layer>; 3],
    vertices: Vec<Vertex>,
    batches: Vec<DrawBatch>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&RenderSettings::default())
    }
}

impl Renderer {
    /// Renderer with the world origin at the center of the viewport
    pub fn new(settings: &RenderSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            antialias: settings.antialias,
            background: settings.background,
            transform: SceneTransform {
                position: Vec2::new(settings.width as f32, settings.height as f32) * 0.5,
                scale: Vec2::splat(settings.zoom),
            },
            layers: Default::default(),
            vertices: Vec::new(),
            batches: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resize the viewport, keeping the world origin centered
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.transform.position = Vec2::new(width as f32, height as f32) * 0.5;
    }

    /// Replace a layer's content, returning the old one
    pub fn set_layer_content(&mut self, layer: RenderLayer, content: Layer) -> Option<Layer> {
        log::debug!("set {layer} layer ({} drawables)", content.len());
        self.layers[layer.index()].replace(content)
    }

    /// A layer's content, created empty on first use
    pub fn layer_mut(&mut self, layer: RenderLayer) -> &mut Layer {
        self.layers[layer.index()].get_or_insert_with(Layer::new)
    }

    pub fn layer(&self, layer: RenderLayer) -> Option<&Layer> {
        self.layers[layer.index()].as_ref()
    }

    /// Look a layer up by name
    pub fn layer_by_name(&mut self, name: &str) -> Result<&mut Layer, ConfigError> {
        let layer = name.parse::<RenderLayer>()?;
        Ok(self.layer_mut(layer))
    }

    /// Tessellate every visible drawable into the frame buffers
    pub fn render(&mut self) {
        self.vertices.clear();
        self.batches.clear();
        let scene = self.transform.affine();

        for content in self.layers.iter().flatten() {
            for drawable in content.iter() {
                let start = self.vertices.len();
                let (texture, blend) = match drawable {
                    Drawable::Graphics(graphics) => {
                        if !graphics.visible {
                            continue;
                        }
                        tessellate_graphics(&mut self.vertices, &scene, graphics);
                        (TextureHandle::WHITE, BlendMode::Normal)
                    }
                    Drawable::Sprite(sprite) => {
                        if !sprite.visible {
                            continue;
                        }
                        let xf = scene * sprite.transform.affine();
                        let color = hex_to_rgba(sprite.tint, sprite.alpha);
                        shapes::quad(&mut self.vertices, &xf, sprite.size, sprite.anchor, color);
                        (sprite.texture, sprite.blend)
                    }
                };
                push_batch(&mut self.batches, texture, blend, start, self.vertices.len());
            }
        }
    }

    /// Vertices of the last frame, in screen pixels
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn batches(&self) -> &[DrawBatch] {
        &self.batches
    }

    /// Raw bytes of the last frame for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn destroy(&mut self) {
        self.layers = Default::default();
        self.vertices.clear();
        self.batches.clear();
    }
}

fn tessellate_graphics(out: &mut Vec<Vertex>, scene: &Affine2, graphics: &Graphics) {
    let xf = *scene * graphics.transform.affine();
    let color = graphics.fill.rgba();
    match graphics.shape() {
        GraphicsShape::Circle { radius, segments } => {
            shapes::circle(out, &xf, radius, color, segments)
        }
        GraphicsShape::Polygon => shapes::polygon(out, &xf, graphics.points(), color),
        GraphicsShape::Band => shapes::band(out, &xf, graphics.points(), color),
    }
}

/// Extend the last batch when it matches, start a new one otherwise
fn push_batch(
    batches: &mut Vec<DrawBatch>,
    texture: TextureHandle,
    blend: BlendMode,
    start: usize,
    end: usize,
) {
    if end == start {
        return;
    }
    if let Some(last) = batches.last_mut() {
        if last.texture == texture && last.blend == blend && last.start + last.count == start {
            last.count += end - start;
            return;
        }
    }
    batches.push(DrawBatch {
        texture,
        blend,
        start,
        count: end - start,
    });
}
