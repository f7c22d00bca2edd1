use tree_core::LabelConfig;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Draw the label's two lines onto a transparent off-screen canvas, filled
/// with a left-to-right gradient and centred horizontally.
pub fn rasterize_label(
    document: &web::Document,
    label: &LabelConfig,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let [width, height] = label.bitmap_size;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let (w, h) = (width as f64, height as f64);
    ctx.clear_rect(0.0, 0.0, w, h);
    let gradient = ctx.create_linear_gradient(0.0, 0.0, w, 0.0);
    for (offset, color) in &label.gradient {
        gradient
            .add_color_stop(*offset, color)
            .map_err(|e| anyhow::anyhow!("bad gradient stop {color}: {:?}", e))?;
    }
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.set_font(&label.font);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    for (line, y) in label.lines().iter().zip(label.line_y) {
        ctx.fill_text(line, w / 2.0, y as f64)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    Ok(canvas)
}
