//! Color adjustment regression test

use pixform_color::{
    brightness, channel_swap, contrast, equalize, gamma, grayscale, hsv_adjust, invert, normalize,
    sepia, threshold,
};
use pixform_core::{ErrorKind, PixelFormat};
use pixform_test::{RegParams, fixtures};

#[test]
fn color_reg() {
    let mut rp = RegParams::new("color");

    // --- Test 1: double inversion restores integer images ---
    for format in PixelFormat::ALL {
        if format.is_float() || !format.supports_arithmetic() {
            continue;
        }
        let src = fixtures::numbered(7, 5, format).expect("numbered");
        let mut img = src.clone();
        invert(&mut img).expect("invert");
        invert(&mut img).expect("invert again");
        rp.compare_images(&src, &img);
        rp.check_size_invariant(&img);
    }

    // --- Test 2: grayscale is idempotent ---
    for format in PixelFormat::ALL {
        let mut img = fixtures::gradient(9, 4, format).expect("gradient");
        grayscale(&mut img).expect("grayscale");
        rp.compare_values(1.0, img.channels() as f64, 0.0);
        let once = img.clone();
        grayscale(&mut img).expect("grayscale again");
        rp.compare_images(&once, &img);
        rp.check_size_invariant(&img);
    }

    // --- Test 3: threshold at 128 ---
    let mut img = fixtures::from_u8_values(4, 1, PixelFormat::Gray8, &[100, 200, 50, 255])
        .expect("values");
    threshold(&mut img, 128.0).expect("threshold");
    let expected = fixtures::from_u8_values(4, 1, PixelFormat::Gray8, &[0, 255, 0, 255])
        .expect("expected");
    rp.compare_images(&expected, &img);

    // --- Test 4: hue shift of 120 degrees turns red green ---
    for format in [PixelFormat::Rgb24, PixelFormat::Rgba64, PixelFormat::Float32Rgb] {
        let max = format.max_value();
        let mut px = vec![max, 0.0, 0.0];
        if format.channels() == 4 {
            px.push(max);
        }
        let mut img = fixtures::solid(3, 3, format, &px).expect("red");
        hsv_adjust(&mut img, 120.0, 1.0, 1.0).expect("hsv");
        let out = img.pixel(1, 1).expect("pixel");
        rp.compare_bool(true, out[1] > out[0]);
        rp.compare_values(max as f64, out[1] as f64, 1e-3);
        if format.channels() == 4 {
            rp.compare_values(max as f64, out[3] as f64, 0.0);
        }
    }

    // --- Test 5: HSV adjustment needs three RGB channels ---
    let mut gray = fixtures::constant(2, 2, PixelFormat::Gray16, 100.0).expect("gray");
    let err = hsv_adjust(&mut gray, 10.0, 1.0, 1.0).expect_err("gray hsv");
    rp.compare_bool(true, err.kind() == ErrorKind::InvalidArgument);

    // --- Test 6: tone operations on 8-bit data ---
    let mut img = fixtures::from_u8_values(4, 1, PixelFormat::Gray8, &[0, 64, 128, 250])
        .expect("values");
    brightness(&mut img, 10.0).expect("brightness");
    rp.compare_samples(&[10.0, 74.0, 138.0, 255.0], &gray_values(&img), 0.0);
    contrast(&mut img, 1.0).expect("contrast identity");
    rp.compare_samples(&[10.0, 74.0, 138.0, 255.0], &gray_values(&img), 0.0);
    gamma(&mut img, 1.0).expect("gamma identity");
    rp.compare_samples(&[10.0, 74.0, 138.0, 255.0], &gray_values(&img), 0.0);

    // --- Test 7: channel swap twice is the identity ---
    let src = fixtures::gradient(5, 5, PixelFormat::Rgba32).expect("gradient");
    let mut img = src.clone();
    channel_swap(&mut img, 0, 3).expect("swap");
    channel_swap(&mut img, 3, 0).expect("swap back");
    rp.compare_images(&src, &img);

    // --- Test 8: normalize and equalize span the full range ---
    let mut img = fixtures::from_u8_values(4, 1, PixelFormat::Gray8, &[40, 60, 80, 100])
        .expect("values");
    normalize(&mut img).expect("normalize");
    rp.compare_values(0.0, img.sample(0, 0, 0).unwrap_or(-1.0) as f64, 0.0);
    rp.compare_values(255.0, img.sample(3, 0, 0).unwrap_or(-1.0) as f64, 0.0);

    let mut img = fixtures::from_u8_values(4, 1, PixelFormat::Gray8, &[40, 60, 80, 100])
        .expect("values");
    equalize(&mut img).expect("equalize");
    rp.compare_samples(&[0.0, 85.0, 170.0, 255.0], &gray_values(&img), 0.0);

    // --- Test 9: sepia keeps alpha and stays in range ---
    let mut img = fixtures::solid(2, 2, PixelFormat::Float32Rgba, &[1.0, 1.0, 1.0, 0.5])
        .expect("white");
    sepia(&mut img).expect("sepia");
    let px = img.pixel(0, 0).expect("pixel");
    rp.compare_samples(&[1.0, 1.0, 0.937, 0.5], &px, 1e-4);

    assert!(rp.cleanup(), "color regression test failed");
}

fn gray_values(img: &pixform_core::Image) -> Vec<f32> {
    let data = img.samples::<u8>().expect("8-bit samples");
    data.iter().map(|&v| v as f32).collect()
}
