use feather_blur::{
    convolve,
    geometry::Point,
    image::{extract, fit, integrate, region, scale},
    rect::ramp,
    verboser::{Silent, Traced},
    FeatherBlur, Grid, Kernel, PixelData, Rect,
};

fn checkerboard(grid: Grid, components: usize) -> PixelData<u8> {
    PixelData::new(
        |p| if (p.x / 4 + p.y / 4) % 2 == 0 { 30 } else { 220 },
        grid,
        components,
    )
}

#[test]
fn gray_image_survives_feathering() {
    let source = PixelData::filled(128u8, Grid::new(100, 100), 3);
    let rect = Rect::new(Point::new(40, 40), Point::new(60, 60));
    let blur = FeatherBlur::<f64>::gaussian(5, 1.0, &mut Silent).unwrap();
    let out = blur.apply(&source, rect, &mut Silent).unwrap();
    assert!(out.pixels().iter().all(|&value| value == 128));

    let blur = FeatherBlur::<f32>::gaussian(5, 1.0, &mut Traced::default()).unwrap();
    let out = blur.apply(&source, rect, &mut Traced::default()).unwrap();
    assert_eq!(out, source);
}

#[test]
fn blur_is_strongest_at_the_center() {
    let source = checkerboard(Grid::new(64, 64), 3);
    let rect = Rect::new(Point::new(8, 8), Point::new(56, 56));
    let blur = FeatherBlur::<f64>::gaussian(9, 3.0, &mut Silent).unwrap();
    let out = blur.apply(&source, rect, &mut Silent).unwrap();

    let contrast = |data: &PixelData<u8>, y: usize, from: usize| {
        let row: Vec<u8> = (from..from + 8)
            .map(|x| data.pixel(Point::new(x, y)).unwrap()[0])
            .collect();
        row.iter().max().unwrap() - row.iter().min().unwrap()
    };
    assert_eq!(contrast(&source, 32, 28), 190);
    assert!(contrast(&out, 32, 28) < contrast(&out, 32, 8));
    assert_eq!(contrast(&out, 2, 28), 190);
}

#[test]
fn out_of_bounds_extract_fails() {
    let source = PixelData::filled(0u8, Grid::new(100, 100), 3);
    let result = extract(&source, Point::new(90, 90), Grid::new(20, 20), &mut Silent);
    assert!(matches!(result, Err(region::Error::RegionOutOfBounds { .. })));
}

#[test]
fn cropped_pipeline_only_touches_the_region() {
    let source = checkerboard(Grid::new(48, 48), 4);
    let origin = Point::new(12, 16);
    let size = Grid::new(20, 20);

    let chunk = extract(&source, origin, size, &mut Silent).unwrap();
    let mut blurred = chunk.clone();
    let kernel = Kernel::<f64>::normalised_gaussian(5, 1.0).unwrap();
    convolve(&chunk, &mut blurred, &kernel, &mut Silent).unwrap();
    assert_ne!(blurred, chunk);

    let mut out = source.clone();
    integrate(&blurred, &mut out, origin, &mut Silent).unwrap();
    for y in 0..48 {
        for x in 0..48 {
            let point = Point::new(x, y);
            let inside = (12..32).contains(&x) && (16..36).contains(&y);
            if !inside {
                assert_eq!(out.pixel(point), source.pixel(point));
            }
        }
    }
    assert_eq!(extract(&out, origin, size, &mut Silent).unwrap(), blurred);
}

#[test]
fn upscale_then_blur_keeps_flat_areas() {
    let source = PixelData::filled(90u8, Grid::new(10, 10), 1);
    let scaled = scale(3, &source, &mut Silent).unwrap();
    assert_eq!(*scaled.grid(), Grid::new(30, 30));
    let blur = FeatherBlur::<f64>::gaussian(3, 1.0, &mut Silent).unwrap();
    let rect = Rect::square(Point::new(5, 5), 20);
    assert_eq!(blur.apply(&scaled, rect, &mut Silent).unwrap(), scaled);
}

#[test]
fn fitted_ramp_becomes_a_gray_mask() {
    let mut values = ramp::<f64>(21);
    fit(&mut values, 0.0, 1.0, 0.0, 255.0);
    let mask = values.map(|&value| value.round() as u8);
    assert_eq!(mask.pixel(Point::new(10, 10)), Some(&[255u8][..]));
    assert_eq!(mask.pixel(Point::new(0, 10)), Some(&[0u8][..]));
    assert_eq!(mask.pixel(Point::new(20, 20)), Some(&[0u8][..]));
    assert_eq!(mask.pixel(Point::new(15, 10)), Some(&[128u8][..]));
}
