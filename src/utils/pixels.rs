use gpui::{AbsoluteLength, DefiniteLength, Pixels, Window, px};

pub trait PixelsExt {
    /// Calculates the top and bottom padding needed in order for
    /// the height of an element to reach this px value.
    fn padding_needed_for_height(
        &self,
        window: &Window,
        text_size: AbsoluteLength,
        line_height: DefiniteLength,
    ) -> Pixels;
}

impl PixelsExt for Pixels {
    fn padding_needed_for_height(
        &self,
        window: &Window,
        text_size: AbsoluteLength,
        line_height: DefiniteLength,
    ) -> Pixels {
        let line_height = line_height_in_pixels(text_size, line_height, window.rem_size());
        vertical_padding_for(*self, line_height)
    }
}

pub(crate) fn line_height_in_pixels(
    text_size: AbsoluteLength,
    line_height: DefiniteLength,
    rem_size: Pixels,
) -> Pixels {
    match line_height {
        DefiniteLength::Absolute(line_height) => line_height.to_pixels(rem_size),
        DefiniteLength::Fraction(fraction) => text_size.to_pixels(rem_size) * fraction,
    }
}

/// Padding on each side so one line of text fills `height`; never negative.
pub(crate) fn vertical_padding_for(height: Pixels, line_height: Pixels) -> Pixels {
    let padding = (height - line_height) / 2.;

    if padding < px(0.) { px(0.) } else { padding }
}
