//! End-to-end cascade tests through the public library API with fake models.

use cropscan::config::ThresholdsConfig;
use cropscan::imaging::{ImageTensor, PlantFilter};
use cropscan::inference::{
    CascadeClassifier, Classifier, ModelKind, ModelLoader, ModelRegistry, Status,
};
use cropscan::pipeline::{Detector, decode_image};
use cropscan::remediation::RemediationTable;
use cropscan::{Error, Result};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scores depend on the mean green value of the tensor so one fake model
/// can answer differently for different images.
struct GreenSensitiveModel {
    kind: ModelKind,
}

impl Classifier for GreenSensitiveModel {
    fn run(&self, tensor: &ImageTensor) -> Result<Vec<f32>> {
        let data = tensor.as_slice();
        #[allow(clippy::cast_precision_loss)]
        let green = data.iter().skip(1).step_by(3).sum::<f32>() / (data.len() / 3) as f32;

        let scores = match self.kind {
            // Confident only on very saturated green.
            ModelKind::Corn if green > 0.9 => vec![0.95, 0.05],
            ModelKind::Corn => vec![0.6, 0.4],
            ModelKind::Apple => vec![0.3, 0.7],
            ModelKind::General => vec![0.2, 0.8],
        };
        Ok(scores)
    }
}

#[derive(Default)]
struct FakeLoader {
    model_loads: Arc<AtomicUsize>,
}

impl ModelLoader for FakeLoader {
    fn load_model(&self, kind: ModelKind) -> Result<Box<dyn Classifier>> {
        self.model_loads.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(GreenSensitiveModel { kind }))
    }

    fn load_labels(&self, kind: ModelKind) -> Result<Vec<String>> {
        let labels: [&str; 2] = match kind {
            ModelKind::Corn => ["Corn_(maize)___Common_rust_", "Corn_(maize)___healthy"],
            ModelKind::Apple => ["Apple___healthy", "Apple___Black_rot"],
            ModelKind::General => ["Grape___healthy", "Grape___Black_rot"],
        };
        Ok(labels.iter().map(ToString::to_string).collect())
    }
}

fn detector(loader: FakeLoader) -> Detector {
    let cascade = CascadeClassifier::new(
        Arc::new(ModelRegistry::new(loader)),
        PlantFilter::default(),
        ThresholdsConfig::default(),
    );
    let table = RemediationTable::from_reader(
        "Crop & Disease Name,Temporary Solution,Permanent Solution\n\
         Corn_(maize)___Common_rust_,Remove infected leaves,Plant resistant hybrids\n"
            .as_bytes(),
    )
    .expect("parse table");
    Detector::new(cascade, table)
}

#[test]
fn test_saturated_leaf_goes_to_corn() {
    let detector = detector(FakeLoader::default());
    let image = RgbImage::from_pixel(300, 200, Rgb([0, 255, 0]));

    let diagnosis = detector.diagnose(&image, "corn.jpg").expect("diagnose");
    assert_eq!(diagnosis.result.status, Status::Corn);
    assert_eq!(diagnosis.result.label, "Corn_(maize)___Common_rust_");
    assert_eq!(
        diagnosis.remedy.map(|r| r.temporary),
        Some("Remove infected leaves".to_string())
    );
}

#[test]
fn test_duller_leaf_falls_through_to_general() {
    let detector = detector(FakeLoader::default());
    let image = RgbImage::from_pixel(200, 300, Rgb([60, 160, 60]));

    let diagnosis = detector.diagnose(&image, "grape.jpg").expect("diagnose");
    assert_eq!(diagnosis.result.status, Status::General);
    assert_eq!(diagnosis.result.label, "Grape___Black_rot");
    assert!((diagnosis.result.confidence - 80.0).abs() < 1e-3);
    // Known to the classifier but not to the table.
    assert_eq!(
        diagnosis.remedy.map(|r| r.temporary),
        Some("No solution found.".to_string())
    );
}

#[test]
fn test_rejection_leaves_models_unloaded() {
    let loads = Arc::new(AtomicUsize::new(0));
    let detector = detector(FakeLoader {
        model_loads: Arc::clone(&loads),
    });
    let image = RgbImage::from_pixel(64, 64, Rgb([128, 128, 128]));

    let diagnosis = detector.diagnose(&image, "wall.jpg").expect("diagnose");
    assert_eq!(diagnosis.result.status, Status::PlantRejected);
    assert_eq!(loads.load(Ordering::SeqCst), 0);
    assert!(!detector.cascade().registry().is_initialized());
}

#[test]
fn test_concurrent_diagnoses_share_one_load() {
    let loads = Arc::new(AtomicUsize::new(0));
    let detector = Arc::new(detector(FakeLoader {
        model_loads: Arc::clone(&loads),
    }));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let detector = Arc::clone(&detector);
            std::thread::spawn(move || {
                let image = RgbImage::from_pixel(32, 32, Rgb([0, 255, 0]));
                detector.diagnose(&image, &format!("leaf_{i}.jpg"))
            })
        })
        .collect();

    for handle in handles {
        let diagnosis = handle.join().expect("thread").expect("diagnose");
        assert_eq!(diagnosis.result.status, Status::Corn);
    }

    // One load sequence builds exactly three models.
    assert_eq!(loads.load(Ordering::SeqCst), 3);
}

#[test]
fn test_decoded_png_flows_through_cascade() {
    let mut bytes = Vec::new();
    RgbImage::from_pixel(40, 40, Rgb([0, 255, 0]))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode");

    let image = decode_image(&bytes, "mem.png").expect("decode");
    let diagnosis = detector(FakeLoader::default())
        .diagnose(&image, "mem.png")
        .expect("diagnose");
    assert_eq!(diagnosis.result.status, Status::Corn);
}

#[test]
fn test_garbage_bytes_are_a_decode_error() {
    let result = decode_image(b"\x00\x01\x02", "garbage.bin");
    assert!(matches!(result, Err(Error::ImageDecode { .. })));
}
