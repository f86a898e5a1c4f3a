use crate::av::format::VIDEO_MP2T;
use crate::error::{DvbSubError, Result};
use lazy_static::lazy_static;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

lazy_static! {
    static ref CONFIG: RwLock<ReaderConfig> = RwLock::new(ReaderConfig::load());
}

/// Paths probed, in order, for a `key = value` configuration file.
const CONFIG_PATHS: [&str; 2] = ["./dvbsub.toml", "./dvbsub_config.toml"];

/// Settings shared by the subtitle readers of one demuxer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// MIME type of the container the elementary streams come from.
    pub container_mime_type: String,
    /// Id handed to the first track created by a fresh id generator.
    pub first_track_id: u32,
    /// Step between consecutive track ids.
    pub track_id_increment: u32,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            container_mime_type: VIDEO_MP2T.to_string(),
            first_track_id: 1,
            track_id_increment: 1,
        }
    }
}

impl ReaderConfig {
    /// Builds a configuration from defaults, then environment variables, then
    /// the first config file that parses. Environment values that fail to
    /// parse are skipped.
    pub fn load() -> Self {
        Self::load_from(&CONFIG_PATHS)
    }

    /// Like [`load`](ReaderConfig::load), probing `paths` in order instead of
    /// the default locations. A file that fails to parse is skipped whole.
    pub fn load_from<P: AsRef<Path>>(paths: &[P]) -> Self {
        let mut config = ReaderConfig::default();

        if let Ok(mime) = env::var("DVBSUB_CONTAINER_MIME") {
            if !mime.trim().is_empty() {
                config.container_mime_type = mime.trim().to_string();
            }
        }
        if let Some(id) = env_u32("DVBSUB_FIRST_TRACK_ID") {
            config.first_track_id = id;
        }
        if let Some(step) = env_u32("DVBSUB_TRACK_ID_INCREMENT") {
            config.track_id_increment = step;
        }

        for path in paths {
            let path = path.as_ref();
            if let Ok(content) = fs::read_to_string(path) {
                let mut candidate = config.clone();
                match candidate.apply(&content) {
                    Ok(()) => return candidate,
                    Err(e) => log::warn!("ignoring config file {}: {}", path.display(), e),
                }
            }
        }

        config
    }

    /// Parses a `key = value` document on top of the defaults. Unknown keys
    /// are ignored.
    pub fn parse(content: &str) -> Result<Self> {
        let mut config = ReaderConfig::default();
        config.apply(content)?;
        Ok(config)
    }

    /// Reads and parses a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn apply(&mut self, content: &str) -> Result<()> {
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(DvbSubError::Config(format!("expected key = value: {}", line)));
            };
            let value = value.trim().trim_matches('"').trim_matches('\'');
            match key.trim() {
                "container_mime_type" => {
                    if value.is_empty() {
                        return Err(DvbSubError::Config("empty container_mime_type".into()));
                    }
                    self.container_mime_type = value.to_string();
                }
                "first_track_id" => self.first_track_id = value.parse()?,
                "track_id_increment" => self.track_id_increment = value.parse()?,
                _ => {}
            }
        }
        Ok(())
    }
}

fn env_u32(name: &str) -> Option<u32> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Re-reads the process-wide configuration.
pub fn reload() {
    let new_config = ReaderConfig::load();
    if let Ok(mut config) = CONFIG.write() {
        *config = new_config;
    }
}

/// Returns a copy of the process-wide configuration.
pub fn current() -> ReaderConfig {
    match CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::{Mutex, MutexGuard};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const ENV_KEYS: [&str; 3] = [
        "DVBSUB_CONTAINER_MIME",
        "DVBSUB_FIRST_TRACK_ID",
        "DVBSUB_TRACK_ID_INCREMENT",
    ];

    static ENV_LOCK: Mutex<()> = parking_lot::const_mutex(());

    /// Serializes tests that touch the process environment and clears the
    /// reader variables on both ends.
    struct EnvGuard {
        _lock: MutexGuard<'static, ()>,
    }

    impl EnvGuard {
        fn new(vars: &[(&str, &str)]) -> Self {
            let lock = ENV_LOCK.lock();
            for key in ENV_KEYS {
                env::remove_var(key);
            }
            for (key, value) in vars {
                env::set_var(key, value);
            }
            Self { _lock: lock }
        }

        fn set(&self, key: &str, value: &str) {
            env::set_var(key, value);
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in ENV_KEYS {
                env::remove_var(key);
            }
        }
    }

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("dvbsub-config-{}-{}.toml", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    fn no_files() -> &'static [&'static str] {
        &[]
    }

    #[test]
    fn test_defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.container_mime_type, "video/mp2t");
        assert_eq!(config.first_track_id, 1);
        assert_eq!(config.track_id_increment, 1);
    }

    #[test]
    fn test_parse_overrides() {
        let config = ReaderConfig::parse(
            r#"# reader settings
container_mime_type = "video/x-m2ts"
first_track_id = 256
track_id_increment = 8192
unknown_key = ignored
"#,
        )
        .unwrap();

        assert_eq!(
            config,
            ReaderConfig {
                container_mime_type: "video/x-m2ts".into(),
                first_track_id: 256,
                track_id_increment: 8192,
            }
        );
    }

    #[test]
    fn test_parse_bad_integer() {
        let err = ReaderConfig::parse("first_track_id = abc").unwrap_err();
        assert!(matches!(err, DvbSubError::ParseInt(_)));
    }

    #[test]
    fn test_parse_missing_separator() {
        let err = ReaderConfig::parse("container_mime_type").unwrap_err();
        assert!(matches!(err, DvbSubError::Config(_)));
    }

    #[test]
    fn test_env_overrides_defaults() {
        let _env = EnvGuard::new(&[
            ("DVBSUB_CONTAINER_MIME", " video/x-m2ts "),
            ("DVBSUB_FIRST_TRACK_ID", "5"),
            ("DVBSUB_TRACK_ID_INCREMENT", "not-a-number"),
        ]);

        let config = ReaderConfig::load_from(no_files());
        assert_eq!(
            config,
            ReaderConfig {
                container_mime_type: "video/x-m2ts".into(),
                first_track_id: 5,
                track_id_increment: 1,
            }
        );
    }

    #[test]
    fn test_blank_env_mime_is_skipped() {
        let _env = EnvGuard::new(&[("DVBSUB_CONTAINER_MIME", "   ")]);

        let config = ReaderConfig::load_from(no_files());
        assert_eq!(config, ReaderConfig::default());
    }

    #[test]
    fn test_file_overrides_env() {
        let _env = EnvGuard::new(&[
            ("DVBSUB_CONTAINER_MIME", "video/x-m2ts"),
            ("DVBSUB_FIRST_TRACK_ID", "5"),
        ]);
        let path = temp_file("override", "first_track_id = 9\n");

        let config = ReaderConfig::load_from(&[&path]);
        fs::remove_file(&path).unwrap();

        assert_eq!(config.container_mime_type, "video/x-m2ts");
        assert_eq!(config.first_track_id, 9);
        assert_eq!(config.track_id_increment, 1);
    }

    #[test]
    fn test_rejected_file_is_not_applied() {
        let _env = EnvGuard::new(&[]);
        let bad = temp_file("bad", "first_track_id = 77\ntrack_id_increment = abc\n");
        let missing = env::temp_dir().join("dvbsub-config-missing.toml");

        let config = ReaderConfig::load_from(&[&bad, &missing]);
        assert_eq!(config, ReaderConfig::default());

        let good = temp_file("good", "track_id_increment = 4\n");
        let config = ReaderConfig::load_from(&[&bad, &good]);
        fs::remove_file(&bad).unwrap();
        fs::remove_file(&good).unwrap();

        assert_eq!(config.first_track_id, 1);
        assert_eq!(config.track_id_increment, 4);
    }

    #[test]
    fn test_first_good_file_wins() {
        let _env = EnvGuard::new(&[]);
        let first = temp_file("first", "first_track_id = 10\n");
        let second = temp_file("second", "first_track_id = 20\ntrack_id_increment = 3\n");

        let config = ReaderConfig::load_from(&[&first, &second]);
        fs::remove_file(&first).unwrap();
        fs::remove_file(&second).unwrap();

        assert_eq!(config.first_track_id, 10);
        assert_eq!(config.track_id_increment, 1);
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let env = EnvGuard::new(&[("DVBSUB_FIRST_TRACK_ID", "41")]);
        reload();
        assert_eq!(current(), ReaderConfig::load());
        assert_eq!(current().first_track_id, 41);

        env.set("DVBSUB_FIRST_TRACK_ID", "42");
        assert_eq!(current().first_track_id, 41);
        reload();
        assert_eq!(current().first_track_id, 42);

        env::remove_var("DVBSUB_FIRST_TRACK_ID");
        reload();
        assert_eq!(current(), ReaderConfig::load());
    }
}
