//! Regression test parameters and comparisons

use pixform_core::Image;

/// Regression test parameters
///
/// Tracks the test name, the index of the current comparison and every
/// failure seen so far.
pub struct RegParams {
    /// Name of the test (e.g., "resize")
    pub test_name: String,
    /// Current comparison index (incremented before each comparison)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "resize")
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current comparison index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        // NaN never compares within delta
        if diff <= delta {
            return true;
        }
        let msg = format!(
            "Failure in {}_reg: value comparison for index {}\n\
             difference = {} but allowed delta = {}\n\
             expected = {}, actual = {}",
            self.test_name, self.index, diff, delta, expected, actual
        );
        self.fail(msg)
    }

    /// Compare a boolean condition
    pub fn compare_bool(&mut self, expected: bool, actual: bool) -> bool {
        self.index += 1;
        if expected == actual {
            return true;
        }
        let msg = format!(
            "Failure in {}_reg: condition for index {} expected {}, got {}",
            self.test_name, self.index, expected, actual
        );
        self.fail(msg)
    }

    /// Compare two sample sequences element by element
    ///
    /// # Returns
    ///
    /// `true` if the lengths agree and every pair differs by at most `delta`.
    pub fn compare_samples(&mut self, expected: &[f32], actual: &[f32], delta: f32) -> bool {
        self.index += 1;
        if expected.len() != actual.len() {
            let msg = format!(
                "Failure in {}_reg: sample comparison for index {} - lengths {} vs {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len()
            );
            return self.fail(msg);
        }
        for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
            if (e - a).abs() > delta || e.is_nan() != a.is_nan() {
                let msg = format!(
                    "Failure in {}_reg: sample comparison for index {} - element {}: expected {}, actual {}",
                    self.test_name, self.index, i, e, a
                );
                return self.fail(msg);
            }
        }
        true
    }

    /// Compare two images for exact equality of size, format and samples
    ///
    /// # Returns
    ///
    /// `true` if images are identical, `false` otherwise.
    pub fn compare_images(&mut self, img1: &Image, img2: &Image) -> bool {
        self.index += 1;

        if !img1.sizes_equal(img2) {
            let msg = format!(
                "Failure in {}_reg: image comparison for index {} - {}x{} {} vs {}x{} {}",
                self.test_name,
                self.index,
                img1.width(),
                img1.height(),
                img1.format(),
                img2.width(),
                img2.height(),
                img2.format()
            );
            return self.fail(msg);
        }

        for y in 0..img1.height() {
            for x in 0..img1.width() {
                let p1 = img1.pixel(x, y);
                let p2 = img2.pixel(x, y);
                if p1 != p2 {
                    let msg = format!(
                        "Failure in {}_reg: image comparison for index {} - pixel mismatch at ({}, {}): {:?} vs {:?}",
                        self.test_name, self.index, x, y, p1, p2
                    );
                    return self.fail(msg);
                }
            }
        }

        true
    }

    /// Check the size invariant `byte_size == w * h * channels * bytes_per_element`
    pub fn check_size_invariant(&mut self, img: &Image) -> bool {
        let format = img.format();
        let expected = img.width() as usize
            * img.height() as usize
            * format.channels() as usize
            * format.bytes_per_element();
        self.compare_values(expected as f64, img.byte_size() as f64, 0.0)
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all comparisons passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
