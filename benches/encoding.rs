use std::hint::black_box;
use std::time::{Duration, Instant};

use qrsmith::{encode, ECLevel, MaskPattern, QRBuilder, Version};

const ITERATIONS: u32 = 20;

fn time<F: FnMut()>(mut f: F) -> Duration {
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        f();
    }
    start.elapsed() / ITERATIONS
}

fn print_row(label: &str, avg: Duration) {
    println!("| {label:<32}| {:>12.3?} |", avg);
}

fn main() {
    println!("Running qrsmith encoding benchmark ({ITERATIONS} iterations per row)");
    println!("{}", "-".repeat(51));

    let total_start = Instant::now();

    let inputs = [
        ("numeric 1234567890 x 100", "1234567890".repeat(100)),
        ("alphanumeric A1B2 x 200", "A1B2".repeat(200)),
        ("url", "https://example.com/some/path?q=1".to_string()),
        ("byte 2000 chars", "qrsmith!".repeat(250)),
    ];
    for (label, data) in &inputs {
        for ecl in [ECLevel::L, ECLevel::H] {
            let avg = time(|| {
                black_box(encode(black_box(data), ecl).ok());
            });
            print_row(&format!("{label} {ecl:?}"), avg);
        }
    }

    // Mask search dominates large symbols, compare against a pinned mask
    let data = "qrsmith!".repeat(250);
    for v in [10, 25, 40] {
        let ver = match Version::new(v) {
            Ok(ver) => ver,
            Err(e) => {
                eprintln!("Skipping version {v}: {e}");
                continue;
            }
        };
        let mut builder = QRBuilder::new(data[..200].as_bytes());
        builder.version(ver).ec_level(ECLevel::M);
        let avg = time(|| {
            black_box(builder.build().ok());
        });
        print_row(&format!("v{v} auto mask"), avg);

        if let Ok(mask) = MaskPattern::new(0) {
            builder.mask(mask);
            let avg = time(|| {
                black_box(builder.build().ok());
            });
            print_row(&format!("v{v} mask 0"), avg);
        }
    }

    println!("{}", "-".repeat(51));
    println!("Total time elapsed: {:?}", total_start.elapsed());
}
