use super::helpers;
use crate::constants::MSAA_SAMPLES;
use wgpu;

/// Multisampled colour and depth attachments matching the swapchain size.
///
/// The scene pass renders into `msaa_view` and resolves into the swapchain
/// frame. Particles write depth so decals behind the cloud are hidden;
/// decals only test against it.
pub(crate) struct RenderTargets {
    // textures are held so their views stay valid
    _msaa_tex: wgpu::Texture,
    pub(crate) msaa_view: wgpu::TextureView,
    _depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let (msaa_tex, msaa_view) = helpers::create_texture(
            device,
            "msaa_color_tex",
            width,
            height,
            color_format,
            MSAA_SAMPLES,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let (depth_tex, depth_view) = helpers::create_texture(
            device,
            "depth_tex",
            width,
            height,
            helpers::DEPTH_FORMAT,
            MSAA_SAMPLES,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        Self {
            _msaa_tex: msaa_tex,
            msaa_view,
            _depth_tex: depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(
        &mut self,
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) {
        *self = Self::new(device, color_format, width, height);
    }
}
