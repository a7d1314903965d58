use std::error::Error;

use qrsmith::{validate_input, ECLevel, QRBuilder};

fn main() -> Result<(), Box<dyn Error>> {
    // Trimmed & checked the same way the CLI does it
    let input = validate_input("  https://example.com  ")?;

    // Version, mode and mask are picked automatically
    let qr = QRBuilder::new(input.as_bytes()).ec_level(ECLevel::Q).build()?;

    let img = qr.to_image(8); // 8 pixels per module
    img.save("basic_qr.png")?;

    println!("{:?} input saved to basic_qr.png, {}", input.kind, qr.metadata());
    Ok(())
}
