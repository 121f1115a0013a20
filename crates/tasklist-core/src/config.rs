use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow,
  bail
};
use tasklist_shared::task::DEFAULT_LIST;
use tracing::{
  debug,
  info,
  trace,
  warn
};

pub const RC_ENV_VAR: &str =
  "TASKLISTRC";
const RC_FILE_NAME: &str =
  ".tasklistrc";
const DATA_DIR_NAME: &str =
  ".tasklist";

/// Settings read from the rc file and
/// `--rc` overrides.
///
/// The rc file holds `key = value` lines;
/// `#` starts a comment. Known keys:
/// `data.location`, `color`,
/// `default.list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub data_location: Option<PathBuf>,
  pub color:         bool,
  pub default_list:  String,
  pub source:        Option<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    Self {
      data_location: None,
      color:         true,
      default_list:  DEFAULT_LIST
        .to_string(),
      source:        None
    }
  }
}

impl Config {
  /// Reads the rc file picked by
  /// `--rcfile`, `$TASKLISTRC`, or
  /// `~/.tasklistrc`, in that order.
  #[tracing::instrument]
  pub fn load(
    rcfile: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Self::default();
    let Some(path) = locate_rc(rcfile)
    else {
      debug!("no rc file; using defaults");
      return Ok(cfg);
    };

    info!(rc = %path.display(), "loading rc file");
    let text = fs::read_to_string(&path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;
    cfg.read_rc(&text).with_context(
      || {
        format!(
          "invalid rc file {}",
          path.display()
        )
      }
    )?;
    cfg.source = Some(path);
    Ok(cfg)
  }

  fn read_rc(
    &mut self,
    text: &str
  ) -> anyhow::Result<()> {
    for (idx, raw) in
      text.lines().enumerate()
    {
      let line = raw
        .split_once('#')
        .map_or(raw, |(kept, _)| kept)
        .trim();
      if line.is_empty() {
        continue;
      }
      let Some((key, value)) =
        line.split_once('=')
      else {
        bail!(
          "line {}: expected key = \
           value, got {raw:?}",
          idx + 1
        );
      };
      self
        .set(key.trim(), value.trim())
        .with_context(|| {
          format!("line {}", idx + 1)
        })?;
    }
    Ok(())
  }

  /// Applies `--rc key=value` pairs on
  /// top of the rc file. A leading
  /// `rc.` on the key is ignored.
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) -> anyhow::Result<()>
  where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      let key = key
        .strip_prefix("rc.")
        .unwrap_or(&key);
      debug!(key, value = %value, "applying override");
      self.set(key, value.trim())
        .with_context(|| {
          format!("invalid --rc {key}")
        })?;
    }
    Ok(())
  }

  pub fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    trace!(key, value, "config key");
    match key {
      | "data.location" => {
        self.data_location =
          (!value.is_empty()).then(|| {
            expand_tilde(value)
          });
      }
      | "color" => {
        self.color = parse_switch(value)?;
      }
      | "default.list" => {
        if value.is_empty() {
          bail!(
            "default.list cannot be \
             blank"
          );
        }
        self.default_list =
          value.to_string();
      }
      | other => {
        warn!(key = other, "ignoring unknown config key");
      }
    }
    Ok(())
  }

  /// Directory holding the store file,
  /// created when missing. `--data`
  /// wins over `data.location`, which
  /// wins over `~/.tasklist`.
  #[tracing::instrument(skip(self))]
  pub fn data_dir(
    &self,
    data_arg: Option<&Path>
  ) -> anyhow::Result<PathBuf> {
    let dir = match data_arg
      .map(Path::to_path_buf)
      .or_else(|| {
        self.data_location.clone()
      }) {
      | Some(dir) => dir,
      | None => dirs::home_dir()
        .map(|home| {
          home.join(DATA_DIR_NAME)
        })
        .ok_or_else(|| {
          anyhow!(
            "cannot determine home \
             directory; pass --data"
          )
        })?
    };

    if !dir.exists() {
      info!(dir = %dir.display(), "creating data directory");
      fs::create_dir_all(&dir)
        .with_context(|| {
          format!(
            "failed to create {}",
            dir.display()
          )
        })?;
    }
    Ok(dir)
  }
}

fn locate_rc(
  rcfile: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = rcfile {
    return Some(path.to_path_buf());
  }
  if let Ok(env) =
    std::env::var(RC_ENV_VAR)
  {
    return (env != "/dev/null")
      .then(|| PathBuf::from(env));
  }
  dirs::home_dir()
    .map(|home| home.join(RC_FILE_NAME))
    .filter(|path| path.exists())
}

fn expand_tilde(value: &str) -> PathBuf {
  match (
    value.strip_prefix("~/"),
    dirs::home_dir()
  ) {
    | (Some(rest), Some(home)) => {
      home.join(rest)
    }
    | _ => PathBuf::from(value)
  }
}

fn parse_switch(
  value: &str
) -> anyhow::Result<bool> {
  match value
    .to_ascii_lowercase()
    .as_str()
  {
    | "1" | "y" | "yes" | "on"
    | "true" => Ok(true),
    | "0" | "n" | "no" | "off"
    | "false" => Ok(false),
    | other => {
      Err(anyhow!("not a switch: {other}"))
    }
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::Config;

  #[test]
  fn defaults_without_rc_file() {
    let cfg = Config::default();
    assert_eq!(cfg.default_list, "General");
    assert!(cfg.color);
    assert_eq!(cfg.data_location, None);
  }

  #[test]
  fn reads_rc_file_with_comments() {
    let temp =
      tempdir().expect("tempdir");
    let rc = temp.path().join("main.rc");
    fs::write(
      &rc,
      "# settings\n\
       default.list = Work\n\
       color = y # plain output off\n\
       data.location = /srv/tasks\n\
       editor = vim\n"
    )
    .expect("write rc");

    let cfg = Config::load(Some(rc.as_path()))
      .expect("load rc");
    assert_eq!(cfg.default_list, "Work");
    assert!(cfg.color);
    assert_eq!(
      cfg.data_location.as_deref(),
      Some(std::path::Path::new("/srv/tasks"))
    );
    assert_eq!(cfg.source, Some(rc));
  }

  #[test]
  fn include_lines_are_not_followed() {
    let temp =
      tempdir().expect("tempdir");
    let dir = temp.path().join("x");
    fs::create_dir(&dir).expect("mkdir");
    let rc = dir.join("main.rc");
    fs::write(&rc, "include ../x/main.rc\n")
      .expect("write rc");

    let err = Config::load(Some(rc.as_path()))
      .expect_err("include is not a setting");
    assert!(format!("{err:#}").contains("line 1"));
  }

  #[test]
  fn rejects_bad_lines_and_values() {
    let temp =
      tempdir().expect("tempdir");
    let rc = temp.path().join("bad.rc");

    fs::write(&rc, "color on\n")
      .expect("write rc");
    assert!(Config::load(Some(rc.as_path())).is_err());

    fs::write(&rc, "color = maybe\n")
      .expect("write rc");
    assert!(Config::load(Some(rc.as_path())).is_err());
  }

  #[test]
  fn overrides_strip_rc_prefix() {
    let mut cfg = Config::default();
    cfg
      .apply_overrides(vec![
        (
          "rc.default.list".to_string(),
          "Study".to_string()
        ),
        (
          "color".to_string(),
          "no".to_string()
        ),
      ])
      .expect("overrides");
    assert_eq!(cfg.default_list, "Study");
    assert!(!cfg.color);

    assert!(
      cfg
        .apply_overrides(vec![(
          "default.list".to_string(),
          " ".to_string()
        )])
        .is_err()
    );
  }

  #[test]
  fn data_arg_wins_and_is_created() {
    let temp =
      tempdir().expect("tempdir");
    let mut cfg = Config::default();
    cfg
      .set(
        "data.location",
        &temp.path().join("cfg").to_string_lossy()
      )
      .expect("set");

    let arg = temp.path().join("arg");
    let dir = cfg
      .data_dir(Some(arg.as_path()))
      .expect("data dir");
    assert_eq!(dir, arg);
    assert!(arg.is_dir());

    let dir = cfg.data_dir(None).expect("data dir");
    assert_eq!(dir, temp.path().join("cfg"));
    assert!(dir.is_dir());
  }
}
