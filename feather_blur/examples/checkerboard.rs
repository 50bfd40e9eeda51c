use feather_blur::{geometry::Point, verboser::Silent, FeatherBlur, Grid, PixelData, Rect};
use image::DynamicImage;

fn main() {
    let source = PixelData::new(
        |p| if (p.x / 16 + p.y / 16) % 2 == 0 { 20u8 } else { 235 },
        Grid::new(256, 256),
        3,
    );
    let blur = FeatherBlur::<f32>::gaussian(9, 3.0, &mut Silent).unwrap();
    let out = blur
        .apply(&source, Rect::square(Point::new(48, 48), 160), &mut Silent)
        .unwrap();
    DynamicImage::try_from(out)
        .unwrap()
        .save("checkerboard_feathered.png")
        .unwrap();
}
