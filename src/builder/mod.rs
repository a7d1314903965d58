mod ec;
mod qr;

pub use ec::error_correction_capacity;
pub use qr::QR;

use tracing::{debug, info, instrument};

use crate::common::{
    codec::{encoder::encode_data, types::Mode},
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

/// Configures & builds a QR symbol. Unset options are chosen automatically:
/// the smallest fitting version, the most compact mode & the lowest penalty
/// mask.
pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mode: Option<Mode>,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mode: None, mask: None }
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = Some(mode);
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn metadata(&self) -> String {
        let version = self.version.map_or("None".to_string(), |v| (*v).to_string());
        format!("{{ Version: {version}, Ec level: {:?} }}", self.ec_level)
    }
}

impl QRBuilder<'_> {
    #[instrument(level = "debug", skip(self), fields(len = self.data.len()))]
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}", self.metadata());
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }

        let encoded = encode_data(self.data, self.ec_level, self.version, self.mode)?;
        let version = encoded.version;
        let payload = ec::build_payload(encoded.bits.data(), version, self.ec_level);
        debug!(codewords = payload.len(), "Added error correction");

        let mut qr = QR::new(version, self.ec_level);
        qr.place_codewords(&payload);

        let mask = match self.mask {
            Some(m) => {
                qr.apply_mask(m);
                m
            }
            None => apply_best_mask(&mut qr),
        };

        let modules = version.width() * version.width();
        info!(
            version = *version,
            ec_level = ?self.ec_level,
            mode = ?encoded.mode,
            mask = *mask,
            data_len = self.data.len(),
            data_capacity = version.data_codewords(self.ec_level),
            error_capacity = error_correction_capacity(version, self.ec_level),
            dark_percent = qr.count_dark_modules() * 100 / modules,
            "QR generated"
        );

        Ok(qr)
    }
}
