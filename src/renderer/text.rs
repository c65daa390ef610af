//! CPU text rasterization
//!
//! Glyphs are laid out and rasterized with rusttype into a small RGBA
//! image, uploaded once as a texture, and drawn as a quad by the text
//! pipeline. No font ships with the binary; one is discovered from the
//! usual system locations, and text is skipped entirely (with a warning)
//! when none loads.

use rusttype::{Font, Scale, point};

/// Candidate font files, tried in order
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Load the first system font that parses. `None` disables text rendering.
pub fn load_system_font() -> Option<Font<'static>> {
    for path in FONT_PATHS {
        let Ok(data) = std::fs::read(path) else {
            continue;
        };
        if let Some(font) = Font::try_from_vec(data) {
            log::info!("Loaded font {path}");
            return Some(font);
        }
        log::warn!("Font {path} exists but failed to parse");
    }
    log::warn!("No usable system font found; text rendering disabled");
    None
}

/// A rasterized line of text: tightly sized RGBA pixels
#[derive(Debug, Clone)]
pub struct RasterizedText {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Rasterize one line of text at the given pixel size and color
pub fn rasterize(font: &Font<'_>, text: &str, size: f32, color: [u8; 4]) -> RasterizedText {
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);

    let glyphs: Vec<_> = font
        .layout(text, scale, point(1.0, 1.0 + v_metrics.ascent))
        .collect();

    let text_width = glyphs
        .last()
        .map_or(0.0, |g| g.position().x + g.unpositioned().h_metrics().advance_width);
    let width = (text_width.ceil() as u32 + 2).max(1);
    let height = ((v_metrics.ascent - v_metrics.descent).ceil() as u32 + 2).max(1);

    let mut rgba = vec![0u8; (width * height * 4) as usize];

    for glyph in glyphs {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = bb.min.x + gx as i32;
            let py = bb.min.y + gy as i32;
            if px >= 0 && (px as u32) < width && py >= 0 && (py as u32) < height {
                let idx = ((py as u32 * width + px as u32) * 4) as usize;
                rgba[idx] = color[0];
                rgba[idx + 1] = color[1];
                rgba[idx + 2] = color[2];
                rgba[idx + 3] = (coverage * color[3] as f32) as u8;
            }
        });
    }

    RasterizedText {
        rgba,
        width,
        height,
    }
}

/// A text texture ready to be drawn by the text pipeline
#[derive(Debug)]
pub struct TextSprite {
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl TextSprite {
    /// Upload RGBA pixels to the GPU and bind them for sampling
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        rgba: &[u8],
        width: u32,
        height: u32,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("text_texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("text_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            bind_group,
            width,
            height,
        }
    }
}
