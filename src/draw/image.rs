use crate::assets::decode::DecodedImage;
use crate::draw::rounded::{CornerRadii, trace_rounded_rect};
use crate::foundation::core::Rect;
use crate::foundation::error::EaselResult;
use crate::render::surface::{StyleScope, Surface};
use crate::scene::model::ImageView;

/// Destination box of an image primitive.
pub fn image_frame(view: &ImageView) -> Rect {
    Rect::new(
        view.left,
        view.top,
        view.left + view.width,
        view.top + view.height,
    )
}

/// Blit an already loaded image. With a radius the image is clipped to a rounded outline whose
/// border is stroked first; without one the border, if any, is stroked over the image.
pub fn draw_image(
    surface: &mut dyn Surface,
    view: &ImageView,
    image: &DecodedImage,
) -> EaselResult<()> {
    let frame = image_frame(view);
    let has_border = view.border_width > 0.0;
    let mut scope = StyleScope::new(surface);

    let radii = (view.border_radius > 0.0)
        .then(|| CornerRadii::uniform(view.border_radius))
        .flatten();
    match radii {
        Some(radii) => {
            trace_rounded_rect(&mut *scope, frame, radii);
            if has_border {
                scope.set_line_width(view.border_width);
                scope.set_stroke_color(view.border_color);
                scope.stroke();
            }
            scope.clip();
            scope.draw_image(image, frame)?;
        }
        None => {
            scope.draw_image(image, frame)?;
            if has_border {
                scope.set_line_width(view.border_width);
                scope.set_stroke_color(view.border_color);
                scope.stroke_rect(frame);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/draw/image.rs"]
mod tests;
