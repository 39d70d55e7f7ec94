use std::{
    fs, io,
    path::{Path, PathBuf},
};

use monkeyread_core::settings::{PersistedSettings, SettingsStore};
use thiserror::Error;

const SETTINGS_MAGIC: u32 = 0x3152_4B4D; // "MKR1"
const SETTINGS_VERSION_V1: u8 = 1;
const SETTINGS_VERSION: u8 = SETTINGS_VERSION_V1;
const SETTINGS_RECORD_LEN: usize = 24;
const CHECKSUM_START: usize = SETTINGS_RECORD_LEN - 4;

const FLAG_EMPHASIS: u8 = 0x01;

#[derive(Debug, Error)]
pub(super) enum FileSettingsError {
    #[error("settings file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("settings record is corrupted")]
    Corrupted,
}

/// Settings persisted as one fixed-size binary record in a file.
#[derive(Debug)]
pub(super) struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub(super) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/monkeyread/settings.bin`, `None` when the platform has
    /// no config directory.
    pub(super) fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("monkeyread").join("settings.bin"))
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    type Error = FileSettingsError;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        decode_record(&bytes)
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let staged = self.path.with_extension("tmp");
        fs::write(&staged, encode_record(settings))?;
        fs::rename(&staged, &self.path)?;
        Ok(())
    }
}

fn encode_record(settings: &PersistedSettings) -> [u8; SETTINGS_RECORD_LEN] {
    let mut buf = [0u8; SETTINGS_RECORD_LEN];
    buf[0..4].copy_from_slice(&SETTINGS_MAGIC.to_le_bytes());
    buf[4] = SETTINGS_VERSION;
    buf[5] = if settings.emphasis_enabled {
        FLAG_EMPHASIS
    } else {
        0
    };
    buf[6] = settings.word_chunk_size;
    buf[8..10].copy_from_slice(&settings.wpm.to_le_bytes());
    buf[12..20].copy_from_slice(&settings.total_words_read.to_le_bytes());
    let checksum = checksum32(&buf[..CHECKSUM_START]);
    buf[CHECKSUM_START..].copy_from_slice(&checksum.to_le_bytes());
    buf
}

/// Unknown magic or version reads as "no settings"; a bad checksum or
/// truncated record is an error.
fn decode_record(buf: &[u8]) -> Result<Option<PersistedSettings>, FileSettingsError> {
    if buf.len() < 5 {
        return Ok(None);
    }

    let magic = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    if magic != SETTINGS_MAGIC {
        return Ok(None);
    }

    match buf[4] {
        SETTINGS_VERSION_V1 => {
            if buf.len() < SETTINGS_RECORD_LEN {
                return Err(FileSettingsError::Corrupted);
            }

            let expected_checksum = u32::from_le_bytes([buf[20], buf[21], buf[22], buf[23]]);
            if checksum32(&buf[..CHECKSUM_START]) != expected_checksum {
                return Err(FileSettingsError::Corrupted);
            }

            let mut total = [0u8; 8];
            total.copy_from_slice(&buf[12..20]);

            Ok(Some(PersistedSettings {
                wpm: u16::from_le_bytes([buf[8], buf[9]]),
                emphasis_enabled: (buf[5] & FLAG_EMPHASIS) != 0,
                word_chunk_size: buf[6].max(1),
                total_words_read: u64::from_le_bytes(total),
            }))
        }
        _ => Ok(None),
    }
}

fn checksum32(bytes: &[u8]) -> u32 {
    let mut hash = 0x811C9DC5u32;
    for b in bytes {
        hash ^= *b as u32;
        hash = hash.wrapping_mul(16777619);
    }
    hash
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use super::*;

    fn sample() -> PersistedSettings {
        PersistedSettings::new(575)
            .with_emphasis(true)
            .with_total_words_read(123_456_789_012)
    }

    #[test]
    fn record_survives_encode_decode() {
        let record = encode_record(&sample());
        assert_eq!(decode_record(&record).unwrap(), Some(sample()));
    }

    #[test]
    fn flipped_byte_is_reported_as_corruption() {
        let mut record = encode_record(&sample());
        record[9] ^= 0x40;
        assert!(matches!(
            decode_record(&record),
            Err(FileSettingsError::Corrupted)
        ));
        assert!(matches!(
            decode_record(&record[..12]),
            Err(FileSettingsError::Corrupted)
        ));
    }

    #[test]
    fn foreign_or_future_records_are_ignored() {
        assert_eq!(decode_record(b"not a settings file").unwrap(), None);
        assert_eq!(decode_record(&[]).unwrap(), None);

        let mut record = encode_record(&sample());
        record[4] = 9;
        assert_eq!(decode_record(&record).unwrap(), None);
    }

    #[test]
    fn store_round_trips_through_the_filesystem() {
        let dir = env::temp_dir().join(format!("monkeyread-settings-{}", process::id()));
        let mut store = FileSettingsStore::new(dir.join("nested").join("settings.bin"));

        assert_eq!(store.load().unwrap(), None);
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
        assert!(store.path().exists());

        let _ = fs::remove_dir_all(dir);
    }
}
