use super::helpers;
use wgpu;
use wgpu::util::DeviceExt;
use web_sys as web;

const DECAL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Browser-side pixel source for a decal texture.
pub enum DecalImage {
    Image(web::HtmlImageElement),
    Canvas(web::HtmlCanvasElement),
}

impl DecalImage {
    fn size(&self) -> (u32, u32) {
        match self {
            DecalImage::Image(img) => (img.natural_width(), img.natural_height()),
            DecalImage::Canvas(c) => (c.width(), c.height()),
        }
    }

    fn source(&self) -> wgpu::ExternalImageSource {
        match self {
            DecalImage::Image(img) => wgpu::ExternalImageSource::HTMLImageElement(img.clone()),
            DecalImage::Canvas(c) => wgpu::ExternalImageSource::HTMLCanvasElement(c.clone()),
        }
    }
}

/// Texture and bind group for one decal. Starts as a single transparent
/// texel so a decal whose image never arrives draws nothing.
pub(crate) struct DecalSlot {
    // held so the texture outlives every bind group made from it
    _texture: wgpu::Texture,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) loaded: bool,
}

impl DecalSlot {
    pub(crate) fn transparent(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("decal_placeholder"),
                size: wgpu::Extent3d {
                    width: 1,
                    height: 1,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DECAL_FORMAT,
                usage: wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &[0, 0, 0, 0],
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = decal_bind_group(device, layout, &view, sampler);
        Self {
            _texture: texture,
            bind_group,
            loaded: false,
        }
    }

    /// Replace the slot's texture with the pixels of `image`.
    pub(crate) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        image: &DecalImage,
    ) -> anyhow::Result<()> {
        let (width, height) = image.size();
        if width == 0 || height == 0 {
            anyhow::bail!("decal image has no pixels");
        }
        let (texture, view) = helpers::create_texture(
            device,
            "decal_tex",
            width,
            height,
            DECAL_FORMAT,
            1,
            wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: image.source(),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self._texture = texture;
        self.bind_group = decal_bind_group(device, layout, &view, sampler);
        self.loaded = true;
        Ok(())
    }
}

pub(crate) fn create_decal_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("decal_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

fn decal_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("decal_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
