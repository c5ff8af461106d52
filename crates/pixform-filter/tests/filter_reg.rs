//! Filter regression test
//!
//! Runs the 3×3 filters and the kernel convolutions across every format
//! and checks border handling, size invariants and rejections.

use pixform_core::{ErrorKind, PixelFormat};
use pixform_filter::{Kernel, blur, convolve, convolve_3x3, edge, emboss, gaussian_blur, sharpen};
use pixform_test::{RegParams, fixtures};

#[test]
fn filter_reg() {
    let mut rp = RegParams::new("filter");

    // --- Test 1: every filter keeps size and format ---
    for format in PixelFormat::ALL {
        if !format.supports_arithmetic() {
            continue;
        }
        let src = fixtures::gradient(8, 6, format).expect("gradient");
        eprintln!("  {}: {}x{}", format, src.width(), src.height());

        let mut img = src.clone();
        blur(&mut img, 2.0).expect("blur");
        rp.check_size_invariant(&img);
        sharpen(&mut img).expect("sharpen");
        rp.check_size_invariant(&img);
        edge(&mut img).expect("edge");
        rp.check_size_invariant(&img);
        emboss(&mut img).expect("emboss");
        rp.check_size_invariant(&img);
        gaussian_blur(&mut img, 0.8).expect("gaussian");
        rp.check_size_invariant(&img);
        rp.compare_values(src.byte_size() as f64, img.byte_size() as f64, 0.0);
    }

    // --- Test 2: the border ring survives 3x3 filters ---
    let src = fixtures::numbered(6, 5, PixelFormat::Rgba32).expect("numbered");
    let mut img = src.clone();
    edge(&mut img).expect("edge");
    for x in 0..6 {
        rp.compare_samples(&src.pixel(x, 0).expect("top"), &img.pixel(x, 0).expect("top"), 0.0);
        rp.compare_samples(&src.pixel(x, 4).expect("bot"), &img.pixel(x, 4).expect("bot"), 0.0);
    }
    for y in 0..5 {
        rp.compare_samples(&src.pixel(0, y).expect("left"), &img.pixel(0, y).expect("left"), 0.0);
        rp.compare_samples(&src.pixel(5, y).expect("right"), &img.pixel(5, y).expect("right"), 0.0);
    }

    // --- Test 3: blur flattens a one-pixel checkerboard to mid-gray ---
    let mut img = fixtures::checkerboard(8, 8, PixelFormat::Gray8, 1, 255.0).expect("checker");
    blur(&mut img, 1.0).expect("blur");
    // Either phase collects weight 8 of 16 from bright pixels: 127.5
    rp.compare_values(128.0, img.sample(2, 2, 0).unwrap_or(-1.0) as f64, 0.0);
    rp.compare_values(128.0, img.sample(3, 2, 0).unwrap_or(-1.0) as f64, 0.0);
    rp.compare_values(0.0, img.sample(0, 0, 0).unwrap_or(-1.0) as f64, 0.0);

    // --- Test 4: emboss of a flat image sits at mid-gray plus the value ---
    let mut img = fixtures::constant(5, 5, PixelFormat::Gray16, 1000.0).expect("flat");
    emboss(&mut img).expect("emboss");
    rp.compare_values(33768.0, img.sample(2, 2, 0).unwrap_or(-1.0) as f64, 0.0);
    rp.compare_values(1000.0, img.sample(0, 0, 0).unwrap_or(-1.0) as f64, 0.0);

    // --- Test 5: custom kernels ---
    let src = fixtures::gradient(7, 3, PixelFormat::Float32).expect("ramp");
    let mut img = src.clone();
    let k = Kernel::box_kernel(3).expect("box");
    convolve(&mut img, &k).expect("convolve");
    // A linear ramp is preserved by a symmetric kernel away from the edges
    let expected = src.sample(3, 1, 0).unwrap_or(-1.0) as f64;
    rp.compare_values(expected, img.sample(3, 1, 0).unwrap_or(-1.0) as f64, 1e-5);

    // A full 2D Gaussian kernel matches the separable blur
    let src = fixtures::gradient(9, 8, PixelFormat::Float32Rgb).expect("rgb ramp");
    let mut full = src.clone();
    convolve(&mut full, &Kernel::gaussian(7, 1.0).expect("gaussian kernel")).expect("convolve");
    let mut separable = src.clone();
    gaussian_blur(&mut separable, 1.0).expect("gaussian");
    for (a, b) in full.samples::<f32>().unwrap_or(&[]).iter().zip(
        separable.samples::<f32>().unwrap_or(&[]),
    ) {
        rp.compare_values(*a as f64, *b as f64, 1e-4);
    }

    // --- Test 6: rejections ---
    let mut small = fixtures::constant(2, 5, PixelFormat::Rgb24, 9.0).expect("small");
    let err = sharpen(&mut small).expect_err("too narrow");
    rp.compare_bool(true, err.kind() == ErrorKind::InvalidArgument);
    let mut indexed = fixtures::constant(5, 5, PixelFormat::Indexed8, 3.0).expect("indexed");
    let err = convolve_3x3(&mut indexed, &[[0.0; 3]; 3], 1.0, 0.0).expect_err("indexed");
    rp.compare_bool(true, err.kind() == ErrorKind::UnsupportedFormat);
    let err = gaussian_blur(&mut indexed, 1.0).expect_err("indexed gaussian");
    rp.compare_bool(true, err.kind() == ErrorKind::UnsupportedFormat);

    // --- Test 7: extreme radii and sigmas stay bounded ---
    let mut img = fixtures::constant(3, 3, PixelFormat::Gray8, 77.0).expect("flat");
    gaussian_blur(&mut img, 20000.0).expect("wide gaussian");
    rp.compare_values(77.0, img.sample(1, 1, 0).unwrap_or(-1.0) as f64, 0.0);
    rp.compare_values(77.0, img.sample(0, 2, 0).unwrap_or(-1.0) as f64, 0.0);
    let err = blur(&mut img, 1e30).expect_err("too many passes");
    rp.compare_bool(true, err.kind() == ErrorKind::InvalidArgument);

    assert!(rp.cleanup(), "filter regression test failed");
}
